use super::{ExploreNode, ExploreNodeRef, ExplorePath};
use crate::generics::dijkstra_search;
use crate::node_id::NodeIdMap;
use crate::{Distance, NodeId, Result, SearchError};

use log::{trace, warn};

/// The part of an unknown Graph that has been discovered so far.
///
/// Nodes are added the first time they are observed, either as the current location of the
/// explorer or as one of its neighbours, and are never removed. Adjacency is always symmetric.
/// The Graph has no edge weights, only the distance hints reported by the host.
#[derive(Clone, Debug, Default)]
pub struct ExploreGraph {
	nodes: slab::Slab<ExploreNode>,
	id_map: NodeIdMap<usize>,
}

impl ExploreGraph {
	/// Creates an empty Graph
	pub fn new() -> ExploreGraph {
		ExploreGraph::default()
	}

	/// The number of known Nodes
	pub fn len(&self) -> usize {
		self.id_map.len()
	}

	/// `true` if nothing was recorded yet
	pub fn is_empty(&self) -> bool {
		self.id_map.is_empty()
	}

	/// `true` if `id` has been observed
	pub fn contains(&self, id: NodeId) -> bool {
		self.id_map.contains_key(&id)
	}

	/// The record of the Node with the given id
	pub fn get(&self, id: NodeId) -> Option<&ExploreNode> {
		self.id_map.get(&id).map(|&key| &self.nodes[key])
	}

	/// A handle to the Node with the given id, for use with the searches
	pub fn node(&self, id: NodeId) -> Option<ExploreNodeRef<'_>> {
		self.get(id).map(|node| ExploreNodeRef::new(self, node))
	}

	/// Returns an Iterator over all known Nodes
	pub fn iter(&self) -> impl Iterator<Item = &ExploreNode> + '_ {
		self.nodes.iter().map(|(_, node)| node)
	}

	/// Records that the explorer is standing on `current` and sees `neighbours`.
	///
	/// `current` is marked as visited. Every neighbour that has not been seen before is added
	/// as unvisited, and all of them are linked with `current` in both directions.
	/// Distance hints of Nodes that are already known are ignored: the first observation wins.
	///
	/// ## Examples
	/// ```
	/// use cavern_pathfinding::explore::ExploreGraph;
	///
	/// let mut graph = ExploreGraph::new();
	/// graph.record_visit(56, 24, [(57, 23), (58, 23)]);
	///
	/// assert!(graph.get(56).unwrap().is_visited());
	/// assert!(!graph.get(57).unwrap().is_visited());
	/// assert!(graph.get(57).unwrap().is_neighbour(56));
	/// ```
	pub fn record_visit(
		&mut self,
		current: NodeId,
		distance: Distance,
		neighbours: impl IntoIterator<Item = (NodeId, Distance)>,
	) {
		let current_key = self.insert_node(current, distance, true);
		self.nodes[current_key].visit();

		for (id, distance) in neighbours {
			if id == current {
				continue;
			}
			let key = self.insert_node(id, distance, false);
			self.nodes[key].add_neighbour(current);
			self.nodes[current_key].add_neighbour(id);
		}
		trace!("visited {} ({} known nodes)", current, self.len());
	}

	/// adds the Node if it is unknown and returns its key either way
	fn insert_node(&mut self, id: NodeId, distance: Distance, visited: bool) -> usize {
		if let Some(&key) = self.id_map.get(&id) {
			return key;
		}
		let key = self.nodes.insert(ExploreNode::new(id, distance, visited));
		self.id_map.insert(id, key);
		key
	}

	/// The unvisited Neighbors of `id`, closest to the target first.
	///
	/// Ties are broken by ascending id. Unknown ids have no Neighbors.
	pub fn unexplored_neighbours(&self, id: NodeId) -> Vec<ExploreNodeRef<'_>> {
		let mut neighbours: Vec<_> = match self.get(id) {
			Some(node) => node
				.neighbours()
				.filter_map(|other| self.node(other))
				.filter(|other| !other.is_visited())
				.collect(),
			None => vec![],
		};
		neighbours.sort_unstable();
		neighbours
	}

	/// All unvisited Nodes of the Graph, closest to the target first
	pub fn unvisited_sorted(&self) -> Vec<ExploreNodeRef<'_>> {
		let mut nodes: Vec<_> = self
			.iter()
			.filter(|node| !node.is_visited())
			.map(|node| ExploreNodeRef::new(self, node))
			.collect();
		nodes.sort_unstable();
		nodes
	}

	/// The unvisited Node with the smallest distance to the target, ties broken by id.
	///
	/// Returns `None` if every known Node has been visited.
	pub fn closest_unexplored_to_target(&self) -> Option<ExploreNodeRef<'_>> {
		self.iter()
			.filter(|node| !node.is_visited())
			.map(|node| ExploreNodeRef::new(self, node))
			.min()
	}

	/// The shortest Path (in hops) between two known Nodes.
	///
	/// ## Errors
	/// [`SearchError::UnknownNode`] if `from` was never observed,
	/// [`SearchError::UnreachableTarget`] if `to` cannot be reached through known Nodes.
	pub fn shortest_path_to(&self, from: NodeId, to: NodeId) -> Result<ExplorePath<'_>> {
		let start = self.node(from).ok_or(SearchError::UnknownNode(from))?;
		let mut paths = dijkstra_search(start, &[to], false)?;
		paths
			.remove(&to)
			.ok_or(SearchError::UnreachableTarget { start: from, target: to })
	}

	/// A Path from `current` to the most promising unvisited Node.
	///
	/// The candidates are all unvisited Nodes whose distance to the target is at most
	/// `tolerance` more than that of the closest unvisited Node. Among those, the one with the
	/// fewest hops from `current` wins.
	///
	/// Returns an empty Path if there is no unvisited Node left, which means that the target
	/// cannot be reached.
	pub fn path_to_best_node(&self, current: NodeId, tolerance: Distance) -> ExplorePath<'_> {
		let unvisited = self.unvisited_sorted();
		let closest = match unvisited.first() {
			Some(node) => node.distance_to_target(),
			None => {
				warn!("no unexplored nodes left, maze is unsolvable");
				return ExplorePath::new();
			}
		};
		let limit = closest.saturating_add(tolerance);
		let candidates: Vec<NodeId> = unvisited
			.iter()
			.take_while(|node| node.distance_to_target() <= limit)
			.map(|node| node.id())
			.collect();

		let start = match self.node(current) {
			Some(node) => node,
			None => {
				warn!("cannot search from unknown node {}", current);
				return ExplorePath::new();
			}
		};
		match dijkstra_search(start, &candidates, true) {
			Ok(paths) => paths.into_values().next().unwrap_or_default(),
			Err(err) => {
				warn!("{}", err);
				ExplorePath::new()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::generics::SearchPath;

	#[test]
	fn visit_without_neighbours() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(56, 24, []);

		assert_eq!(graph.len(), 1);
		let node = graph.get(56).unwrap();
		assert_eq!(node.distance_to_target(), 24);
		assert!(node.is_visited());
	}

	#[test]
	fn visit_with_new_neighbours() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(56, 24, [(57, 23), (58, 23)]);

		assert_eq!(graph.len(), 3);
		for id in [57, 58] {
			let node = graph.get(id).unwrap();
			assert_eq!(node.neighbours().collect::<Vec<_>>(), vec![56]);
			assert!(!node.is_visited());
			assert_eq!(node.distance_to_target(), 23);
			assert!(graph.get(56).unwrap().is_neighbour(id));
		}
	}

	#[test]
	fn revisit_marks_visited() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(56, 24, [(57, 23)]);
		graph.record_visit(57, 23, []);

		assert_eq!(graph.len(), 2);
		assert!(graph.get(57).unwrap().is_visited());
		assert!(graph.get(57).unwrap().is_neighbour(56));

		// idempotent
		graph.record_visit(57, 23, []);
		assert_eq!(graph.len(), 2);
		assert!(graph.get(57).unwrap().is_visited());
	}

	#[test]
	fn distance_is_never_overwritten() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(1, 10, [(2, 9)]);
		graph.record_visit(3, 12, [(2, 40)]);
		graph.record_visit(2, 77, []);

		assert_eq!(graph.get(2).unwrap().distance_to_target(), 9);
	}

	#[test]
	fn self_observation_is_ignored() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(1, 10, [(1, 10), (2, 9)]);
		assert!(!graph.get(1).unwrap().is_neighbour(1));
		assert_eq!(graph.len(), 2);
	}

	#[test]
	fn unexplored_neighbours_sorted() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(56, 24, [(58, 22), (57, 20)]);

		let ids: Vec<NodeId> = graph
			.unexplored_neighbours(56)
			.iter()
			.map(|n| n.id())
			.collect();
		assert_eq!(ids, vec![57, 58]);
	}

	#[test]
	fn unexplored_neighbours_ties_by_id() {
		let mut graph = ExploreGraph::new();
		graph.record_visit(56, 24, [(60, 21), (59, 21), (61, 20)]);
		graph.record_visit(61, 20, []);

		let ids: Vec<NodeId> = graph
			.unexplored_neighbours(56)
			.iter()
			.map(|n| n.id())
			.collect();
		assert_eq!(ids, vec![59, 60]);
		assert!(graph.unexplored_neighbours(1000).is_empty());
	}

	//  E    F
	//  |    |
	//  A -- B
	//  |    |
	//  I    J
	fn ladder() -> ExploreGraph {
		let mut graph = ExploreGraph::new();
		graph.record_visit(56, 25, [(58, 21), (60, 26), (57, 25)]);
		graph.record_visit(57, 25, [(59, 22), (61, 27), (56, 25)]);
		graph
	}

	#[test]
	fn unvisited_sorted_by_distance() {
		let graph = ladder();
		let ids: Vec<NodeId> = graph.unvisited_sorted().iter().map(|n| n.id()).collect();
		assert_eq!(ids, vec![58, 59, 60, 61]);
	}

	#[test]
	fn closest_unexplored() {
		let graph = ladder();
		assert_eq!(graph.closest_unexplored_to_target().unwrap().id(), 58);
	}

	#[test]
	fn nothing_unexplored() {
		let mut graph = ExploreGraph::new();
		assert!(graph.closest_unexplored_to_target().is_none());

		graph.record_visit(1, 3, [(2, 2)]);
		graph.record_visit(2, 2, [(1, 3)]);
		assert!(graph.closest_unexplored_to_target().is_none());
		assert!(graph.unvisited_sorted().is_empty());
		assert!(graph.path_to_best_node(2, 1).is_empty());
	}

	//  A         E
	//  |         |
	//  B -- C -- D -- F
	fn hook(e_distance: Distance) -> ExploreGraph {
		let mut graph = ExploreGraph::new();
		graph.record_visit(57, 21, [(56, 20), (58, 20)]);
		graph.record_visit(58, 20, [(57, 21), (59, 21)]);
		graph.record_visit(59, 21, [(58, 20), (60, e_distance), (62, 22)]);
		graph.record_visit(62, 22, [(59, 21)]);
		graph
	}

	#[test]
	fn best_node_prefers_close_candidates() {
		// E is within the tolerance of A and much closer to F
		let graph = hook(21);
		let path = graph.path_to_best_node(62, 1);
		assert_eq!(path.ids(), vec![62, 59, 60]);
	}

	#[test]
	fn best_node_far_away() {
		// A is the only candidate
		let graph = hook(22);
		let path = graph.path_to_best_node(62, 1);
		assert_eq!(path.ids(), vec![62, 59, 58, 57, 56]);
	}

	#[test]
	fn shortest_path_errors() {
		let graph = hook(22);
		assert_eq!(
			graph.shortest_path_to(1000, 56).unwrap_err(),
			SearchError::UnknownNode(1000)
		);
		assert_eq!(
			graph.shortest_path_to(62, 1000).unwrap_err(),
			SearchError::UnreachableTarget {
				start: 62,
				target: 1000
			}
		);
	}

	#[test]
	fn adjacency_is_symmetric() {
		let graph = hook(21);
		for node in graph.iter() {
			for other in node.neighbours() {
				assert!(graph.get(other).unwrap().is_neighbour(node.id()));
			}
		}
	}
}
