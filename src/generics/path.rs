use super::GraphNode;
use crate::{Cost, Gold};
use std::cmp::Ordering;

/// A sequence of adjacent Nodes with a cost and value model.
///
/// Loops are allowed and stay explicit in the sequence. The ordering (`Ord`) decides which of
/// two Paths to the same Node is kept by [`dijkstra_search`](super::dijkstra_search): smaller
/// Paths win. Most implementations should use [`compare_weight_then_value`] for that.
pub trait SearchPath: Clone + Ord {
	/// The kind of Node this Path is made of
	type Node: GraphNode<Path = Self>;

	/// The Nodes of this Path, in walking order
	fn nodes(&self) -> &[Self::Node];

	/// The total cost of walking this Path
	fn weight(&self) -> Cost;

	/// The total value collected by walking this Path
	fn value(&self) -> Gold;

	/// Returns a copy of this Path with `node` appended. `self` is left unchanged.
	///
	/// `node` is always a Neighbor of the last Node on the Path.
	fn clone_with_node(&self, node: Self::Node) -> Self;

	/// The number of Nodes on the Path
	fn len(&self) -> usize {
		self.nodes().len()
	}

	/// `true` if the Path contains no Nodes
	fn is_empty(&self) -> bool {
		self.nodes().is_empty()
	}

	/// The last Node of the Path, if any
	fn last(&self) -> Option<Self::Node> {
		self.nodes().last().copied()
	}
}

/// The standard ordering of Paths: lower weight first, and among equally heavy Paths the
/// richer one counts as the smaller one.
///
/// `value` is only called if the weights are equal, since it is usually more expensive to
/// calculate.
///
/// ## Examples
/// ```
/// # use cavern_pathfinding::generics::compare_weight_then_value;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_weight_then_value((5, || 0), (6, || 0)), Ordering::Less);
/// assert_eq!(compare_weight_then_value((5, || 100), (5, || 200)), Ordering::Greater);
/// ```
pub fn compare_weight_then_value(
	(weight, value): (Cost, impl FnOnce() -> Gold),
	(other_weight, other_value): (Cost, impl FnOnce() -> Gold),
) -> Ordering {
	weight
		.cmp(&other_weight)
		.then_with(|| other_value().cmp(&value()))
}
