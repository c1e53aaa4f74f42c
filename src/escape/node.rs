use super::{EscapeGraph, EscapePath};
use crate::generics::GraphNode;
use crate::node_id::NodeIdSet;
use crate::{Cost, Gold, NodeId, Result, SearchError};

use std::hash::{Hash, Hasher};

/// A handle to a Node of an [`EscapeGraph`].
///
/// Handles are compared and hashed by id only.
pub struct EscapeNode<'g, G: ?Sized> {
	graph: &'g G,
	id: NodeId,
}

impl<'g, G: EscapeGraph + ?Sized> EscapeNode<'g, G> {
	/// Creates a handle to the Node `id` of `graph`.
	///
	/// ## Errors
	/// [`SearchError::UnknownNode`] if the Graph has no such Node
	pub fn new(graph: &'g G, id: NodeId) -> Result<EscapeNode<'g, G>> {
		if graph.contains(id) {
			Ok(EscapeNode { graph, id })
		} else {
			Err(SearchError::UnknownNode(id))
		}
	}

	/// The id of the Node
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// The Graph this handle belongs to
	pub fn graph(&self) -> &'g G {
		self.graph
	}

	/// The gold lying on the Node
	pub fn gold(&self) -> Gold {
		self.graph.gold(self.id)
	}

	/// All Neighbors of this Node, in the order the Graph reports them
	pub fn neighbours(&self) -> Vec<EscapeNode<'g, G>> {
		let mut ids = vec![];
		self.graph.neighbours(self.id, &mut ids);
		ids.into_iter()
			.map(|id| EscapeNode {
				graph: self.graph,
				id,
			})
			.collect()
	}

	/// The cost of walking from this Node to `other`.
	///
	/// ## Errors
	/// [`SearchError::AdjacencyViolation`] if the two Nodes are not connected
	pub fn edge_weight(&self, other: NodeId) -> Result<Cost> {
		self.graph
			.edge_weight(self.id, other)
			.ok_or(SearchError::AdjacencyViolation {
				from: self.id,
				to: other,
			})
	}

	/// Grows a loop that starts and ends on this Node and visits as many new Nodes as the
	/// budget allows.
	///
	/// Every Node of the loop is expanded in order: each Neighbor not in `visited` whose round
	/// trip fits into the remaining budget is spliced in as `current -> neighbour -> current`.
	/// Spliced in Nodes are expanded in turn, so the loop can reach several hops away. Every
	/// added Node is inserted into `visited`.
	pub fn extend(self, visited: &mut NodeIdSet, mut budget: Cost) -> EscapePath<'g, G> {
		let mut nodes = vec![self];
		let mut weight: Cost = 0;
		let mut i = 0;
		while i < nodes.len() {
			let current = nodes[i];
			let candidates: Vec<(EscapeNode<'g, G>, Cost)> = current
				.neighbours()
				.into_iter()
				.filter(|n| !visited.contains(&n.id))
				.filter_map(|n| current.edge_weight(n.id).ok().map(|w| (n, w)))
				.collect();

			for (neighbour, edge) in candidates {
				let round_trip = edge.saturating_mul(2);
				if round_trip <= budget {
					nodes.splice(i..=i, [current, neighbour, current]);
					visited.insert(neighbour.id);
					budget -= round_trip;
					weight += round_trip;
				}
			}
			i += 1;
		}
		EscapePath::from_parts(nodes, weight)
	}
}

impl<G: ?Sized> Clone for EscapeNode<'_, G> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<G: ?Sized> Copy for EscapeNode<'_, G> {}

impl<G: ?Sized> PartialEq for EscapeNode<'_, G> {
	fn eq(&self, rhs: &Self) -> bool {
		self.id == rhs.id
	}
}
impl<G: ?Sized> Eq for EscapeNode<'_, G> {}

impl<G: ?Sized> Hash for EscapeNode<'_, G> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state)
	}
}

use std::fmt;
impl<G: ?Sized> fmt::Debug for EscapeNode<'_, G> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		fmt.debug_tuple("EscapeNode").field(&self.id).finish()
	}
}
impl<G: ?Sized> fmt::Display for EscapeNode<'_, G> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "{}", self.id)
	}
}

impl<'g, G: EscapeGraph + ?Sized> GraphNode for EscapeNode<'g, G> {
	type Path = EscapePath<'g, G>;

	fn id(&self) -> NodeId {
		self.id
	}

	fn neighbors(&self, target: &mut Vec<Self>) {
		target.extend(self.neighbours());
	}

	fn wrap_to_path(self) -> EscapePath<'g, G> {
		EscapePath::from_node(self)
	}
}
