use crate::node_id::NodeIdMap;
use crate::{Cost, Gold, NodeId};

/// A fully known, weighted Graph with gold on its Nodes.
///
/// Edges are undirected: `edge_weight(a, b)` and `edge_weight(b, a)` must agree.
pub trait EscapeGraph {
	/// `true` if the Graph has a Node with this id
	fn contains(&self, id: NodeId) -> bool;

	/// The gold lying on the Node. Unknown ids have none.
	fn gold(&self, id: NodeId) -> Gold;

	/// Appends the ids of all Neighbors of `id` to `target`.
	///
	/// `target` is not cleared, and the order should be stable between calls.
	fn neighbours(&self, id: NodeId, target: &mut Vec<NodeId>);

	/// The cost of the edge between `from` and `to`, or `None` if they are not adjacent
	fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<Cost>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Chamber {
	gold: Gold,
	tunnels: Vec<(NodeId, Cost)>,
}

/// A simple in-memory [`EscapeGraph`].
///
/// ## Examples
/// ```
/// use cavern_pathfinding::escape::{Cavern, EscapeGraph};
///
/// let mut cavern = Cavern::new();
/// cavern.add_node(1, 0);
/// cavern.add_node(2, 50);
/// cavern.add_edge(1, 2, 7);
///
/// assert_eq!(cavern.edge_weight(2, 1), Some(7));
/// assert_eq!(cavern.gold(2), 50);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cavern {
	chambers: NodeIdMap<Chamber>,
}

impl Cavern {
	/// Creates an empty Cavern
	pub fn new() -> Cavern {
		Cavern::default()
	}

	/// The number of Nodes
	pub fn len(&self) -> usize {
		self.chambers.len()
	}

	/// `true` if there are no Nodes
	pub fn is_empty(&self) -> bool {
		self.chambers.is_empty()
	}

	/// Adds a Node with the given amount of gold.
	///
	/// Adding an id that already exists only replaces its gold and keeps the edges.
	pub fn add_node(&mut self, id: NodeId, gold: Gold) {
		self.chambers.entry(id).or_default().gold = gold;
	}

	/// Connects two Nodes in both directions, replacing the weight of an existing edge.
	///
	/// ## Panics
	/// if either of the Nodes was not added before, or if `a == b`.
	#[track_caller]
	pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Cost) {
		assert_ne!(a, b, "Node {} cannot be connected to itself", a);
		for id in [a, b] {
			assert!(self.contains(id), "Node {} is not part of the Cavern", id);
		}
		self.tunnel_mut(a, b, weight);
		self.tunnel_mut(b, a, weight);
	}

	fn tunnel_mut(&mut self, from: NodeId, to: NodeId, weight: Cost) {
		let chamber = self.chambers.entry(from).or_default();
		match chamber.tunnels.iter_mut().find(|(id, _)| *id == to) {
			Some(tunnel) => tunnel.1 = weight,
			None => chamber.tunnels.push((to, weight)),
		}
	}

	/// Changes the gold on a Node, for example after it was picked up.
	///
	/// Returns the previous amount, or `None` if the Node does not exist.
	pub fn set_gold(&mut self, id: NodeId, gold: Gold) -> Option<Gold> {
		let chamber = self.chambers.get_mut(&id)?;
		Some(std::mem::replace(&mut chamber.gold, gold))
	}

	/// Returns an Iterator over the ids of all Nodes, in no particular order
	pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.chambers.keys().copied()
	}

	/// The total amount of gold in the Cavern
	pub fn total_gold(&self) -> Gold {
		self.chambers.values().map(|c| c.gold).sum()
	}
}

impl EscapeGraph for Cavern {
	fn contains(&self, id: NodeId) -> bool {
		self.chambers.contains_key(&id)
	}

	fn gold(&self, id: NodeId) -> Gold {
		self.chambers.get(&id).map_or(0, |c| c.gold)
	}

	fn neighbours(&self, id: NodeId, target: &mut Vec<NodeId>) {
		if let Some(chamber) = self.chambers.get(&id) {
			target.extend(chamber.tunnels.iter().map(|(other, _)| *other));
		}
	}

	fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<Cost> {
		self.chambers
			.get(&from)?
			.tunnels
			.iter()
			.find(|(id, _)| *id == to)
			.map(|(_, weight)| *weight)
	}
}
