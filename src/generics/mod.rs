//! A Module for generic implementations.
//!
//! The searches in [`explore`](crate::explore) and [`escape`](crate::escape) work on very
//! different Graphs: one is discovered a Node at a time and only knows how many hops it takes
//! to get somewhere, the other is fully known and has weighted edges and gold. Both are
//! searched with the same [`dijkstra_search`], which only needs the two Traits defined here.

mod path;
pub use self::path::{compare_weight_then_value, SearchPath};

mod dijkstra;
pub use self::dijkstra::dijkstra_search;

use crate::NodeId;
use std::fmt::Debug;
use std::hash::Hash;

/// A Node that can be searched by [`dijkstra_search`].
///
/// Implementors are meant to be lightweight handles (an id plus a reference to the Graph
/// that owns the actual data), which is why `Copy` is required. Two handles are equal if
/// they refer to the same id.
pub trait GraphNode: Copy + Eq + Hash + Debug {
	/// The Path type built from this kind of Node
	type Path: SearchPath<Node = Self>;

	/// The unique and immutable id of the Node
	fn id(&self) -> NodeId;

	/// Appends all Neighbors of this Node to `target`.
	///
	/// `target` is not cleared, so that the caller can reuse the same buffer for every Node.
	fn neighbors(&self, target: &mut Vec<Self>);

	/// Creates a Path that contains only this Node.
	fn wrap_to_path(self) -> Self::Path;
}
