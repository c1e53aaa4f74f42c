use super::ExploreNodeRef;
use crate::generics::{compare_weight_then_value, SearchPath};
use crate::{Cost, Gold, NodeId};

/// A Path through the explored part of the Graph.
///
/// Every step costs exactly one hop, since nothing is known about the actual length of edges
/// while exploring. There is no gold to collect, so `value` is always 0.
///
/// Two Paths are equal if they walk the same Nodes, but they are ordered by their number of
/// hops alone: different routes of the same length compare as `Ordering::Equal`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorePath<'g> {
	nodes: Vec<ExploreNodeRef<'g>>,
}

impl<'g> ExplorePath<'g> {
	/// creates an empty Path
	pub fn new() -> ExplorePath<'g> {
		ExplorePath { nodes: vec![] }
	}

	/// creates a Path that only contains `node`
	pub fn from_node(node: ExploreNodeRef<'g>) -> ExplorePath<'g> {
		ExplorePath { nodes: vec![node] }
	}

	/// The ids of the Nodes on this Path
	pub fn ids(&self) -> Vec<NodeId> {
		self.nodes.iter().map(|n| n.id()).collect()
	}

	/// Returns an Iterator over the Nodes of the Path
	pub fn iter(&self) -> std::slice::Iter<'_, ExploreNodeRef<'g>> {
		self.nodes.iter()
	}
}

impl<'g> SearchPath for ExplorePath<'g> {
	type Node = ExploreNodeRef<'g>;

	fn nodes(&self) -> &[ExploreNodeRef<'g>] {
		&self.nodes
	}

	fn weight(&self) -> Cost {
		self.nodes.len().saturating_sub(1)
	}

	fn value(&self) -> Gold {
		0
	}

	fn clone_with_node(&self, node: ExploreNodeRef<'g>) -> Self {
		let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
		nodes.extend_from_slice(&self.nodes);
		nodes.push(node);
		ExplorePath { nodes }
	}
}

use std::ops::Index;

impl<'g> Index<usize> for ExplorePath<'g> {
	type Output = ExploreNodeRef<'g>;
	#[track_caller]
	fn index(&self, index: usize) -> &ExploreNodeRef<'g> {
		&self.nodes[index]
	}
}

use std::cmp::Ordering;

impl Ord for ExplorePath<'_> {
	fn cmp(&self, other: &Self) -> Ordering {
		compare_weight_then_value((self.weight(), || 0), (other.weight(), || 0))
	}
}

impl PartialOrd for ExplorePath<'_> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

use std::fmt;
impl fmt::Display for ExplorePath<'_> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "Path[Cost = {}]: ", self.weight())?;
		if self.nodes.is_empty() {
			write!(fmt, "<empty>")
		} else {
			write!(fmt, "{}", self.nodes[0])?;
			for p in self.nodes.iter().skip(1) {
				write!(fmt, " -> {}", p)?;
			}
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::explore::ExploreGraph;

	fn line() -> ExploreGraph {
		let mut graph = ExploreGraph::new();
		graph.record_visit(4, 3, [(2, 2)]);
		graph.record_visit(2, 2, [(0, 1)]);
		graph
	}

	#[test]
	fn index() {
		let graph = line();
		let path = graph.shortest_path_to(4, 0).unwrap();

		assert_eq!(path[0].id(), 4);
		assert_eq!(path[1].id(), 2);
		assert_eq!(path[2].id(), 0);
	}

	#[test]
	#[should_panic]
	fn index_out_of_bounds() {
		let graph = line();
		let path = graph.shortest_path_to(4, 0).unwrap();
		let _node = path[3];
	}

	#[test]
	fn weight_counts_hops() {
		let graph = line();
		let path = graph.shortest_path_to(4, 0).unwrap();
		assert_eq!(path.weight(), 2);
		assert_eq!(ExplorePath::from_node(graph.node(4).unwrap()).weight(), 0);
		assert_eq!(ExplorePath::new().weight(), 0);
	}

	#[test]
	fn display() {
		let graph = line();
		let path = graph.shortest_path_to(4, 0).unwrap();

		assert_eq!(&format!("{}", path), "Path[Cost = 2]: 4 -> 2 -> 0");
	}

	#[test]
	fn ordering_counts_hops_only() {
		// 1 - 2 - 4 and 1 - 3 - 4
		let mut graph = ExploreGraph::new();
		graph.record_visit(1, 2, [(2, 1), (3, 1)]);
		graph.record_visit(2, 1, [(4, 0)]);
		graph.record_visit(3, 1, [(4, 0)]);
		let node = |id| graph.node(id).unwrap();

		let left = ExplorePath::from_node(node(1))
			.clone_with_node(node(2))
			.clone_with_node(node(4));
		let right = ExplorePath::from_node(node(1))
			.clone_with_node(node(3))
			.clone_with_node(node(4));
		assert_eq!(left.cmp(&right), Ordering::Equal);
		assert_ne!(left, right);
		assert!(ExplorePath::from_node(node(1)) < left);
	}

	#[test]
	fn display_empty() {
		assert_eq!(&format!("{}", ExplorePath::new()), "Path[Cost = 0]: <empty>");
	}
}
