use super::{ExploreGraph, ExplorePath};
use crate::generics::GraphNode;
use crate::node_id::NodeIdSet;
use crate::{Distance, NodeId};

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

/// Everything the [`ExploreGraph`] knows about a single Node.
///
/// The `distance_to_target` is the hint the host gave the first time the Node was observed
/// and never changes afterwards. `visited` only ever goes from `false` to `true`.
#[derive(Clone, Debug)]
pub struct ExploreNode {
	id: NodeId,
	distance_to_target: Distance,
	visited: bool,
	neighbours: NodeIdSet,
}

impl ExploreNode {
	pub(super) fn new(id: NodeId, distance_to_target: Distance, visited: bool) -> ExploreNode {
		ExploreNode {
			id,
			distance_to_target,
			visited,
			neighbours: NodeIdSet::default(),
		}
	}

	/// The id the host uses for this Node
	pub fn id(&self) -> NodeId {
		self.id
	}
	/// The distance hint from the first observation of this Node
	pub fn distance_to_target(&self) -> Distance {
		self.distance_to_target
	}
	/// `true` once the explorer has stood on this Node
	pub fn is_visited(&self) -> bool {
		self.visited
	}
	/// The ids of all known Neighbors, in no particular order
	pub fn neighbours(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.neighbours.iter().copied()
	}
	/// `true` if `id` is a known Neighbor of this Node
	pub fn is_neighbour(&self, id: NodeId) -> bool {
		self.neighbours.contains(&id)
	}

	pub(super) fn visit(&mut self) {
		self.visited = true;
	}
	pub(super) fn add_neighbour(&mut self, id: NodeId) {
		self.neighbours.insert(id);
	}
}

/// A handle to an [`ExploreNode`] inside of an [`ExploreGraph`].
///
/// Handles compare equal if they point to the same id. They are ordered by their distance to
/// the target, ties broken by id, so sorting a list of handles puts the most promising Node
/// first.
#[derive(Clone, Copy, Debug)]
pub struct ExploreNodeRef<'g> {
	graph: &'g ExploreGraph,
	node: &'g ExploreNode,
}

impl<'g> ExploreNodeRef<'g> {
	pub(super) fn new(graph: &'g ExploreGraph, node: &'g ExploreNode) -> ExploreNodeRef<'g> {
		ExploreNodeRef { graph, node }
	}

	/// The Graph this handle belongs to
	pub fn graph(&self) -> &'g ExploreGraph {
		self.graph
	}
}

impl Deref for ExploreNodeRef<'_> {
	type Target = ExploreNode;
	fn deref(&self) -> &ExploreNode {
		self.node
	}
}

impl PartialEq for ExploreNodeRef<'_> {
	fn eq(&self, rhs: &Self) -> bool {
		self.node.id == rhs.node.id
	}
}
impl Eq for ExploreNodeRef<'_> {}

impl Hash for ExploreNodeRef<'_> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.node.id.hash(state)
	}
}

impl Ord for ExploreNodeRef<'_> {
	fn cmp(&self, rhs: &Self) -> Ordering {
		self.node
			.distance_to_target
			.cmp(&rhs.node.distance_to_target)
			.then_with(|| self.node.id.cmp(&rhs.node.id))
	}
}
impl PartialOrd for ExploreNodeRef<'_> {
	fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
		Some(self.cmp(rhs))
	}
}

impl<'g> GraphNode for ExploreNodeRef<'g> {
	type Path = ExplorePath<'g>;

	fn id(&self) -> NodeId {
		self.node.id
	}

	fn neighbors(&self, target: &mut Vec<Self>) {
		let graph = self.graph;
		target.extend(self.node.neighbours().filter_map(|id| graph.node(id)));
	}

	fn wrap_to_path(self) -> ExplorePath<'g> {
		ExplorePath::from_node(self)
	}
}

use std::fmt;
impl fmt::Display for ExploreNodeRef<'_> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "{}", self.node.id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ordered_by_distance_then_id() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(1, 30, [(4, 22), (3, 20), (2, 22)]);

		let mut nodes = vec![
			graph.node(4).unwrap(),
			graph.node(2).unwrap(),
			graph.node(3).unwrap(),
		];
		nodes.sort();
		let ids: Vec<NodeId> = nodes.iter().map(|n| n.id()).collect();
		assert_eq!(ids, vec![3, 2, 4]);
	}

	#[test]
	fn equal_by_id() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(1, 30, [(2, 20)]);
		assert_eq!(graph.node(2), graph.node(2));
		assert_ne!(graph.node(1), graph.node(2));
	}

	#[test]
	fn neighbors_resolve_through_graph() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(1, 30, [(2, 20), (3, 21)]);

		let mut neighbors = vec![];
		graph.node(1).unwrap().neighbors(&mut neighbors);
		neighbors.sort();
		let ids: Vec<NodeId> = neighbors.iter().map(|n| n.id()).collect();
		assert_eq!(ids, vec![2, 3]);
	}
}
