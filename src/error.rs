use crate::{Cost, NodeId};

/// Errors returned by the searches in this crate.
///
/// Running out of unexplored Nodes is usually not an error: the queries on
/// [`ExploreGraph`](crate::explore::ExploreGraph) report it as an empty result instead.
/// [`NoUnexploredNodes`](SearchError::NoUnexploredNodes) is only returned by
/// [`Explorer::explore`](crate::explore::Explorer::explore), which cannot make progress anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
	/// A requested goal was never reached before every reachable Node was expanded.
	#[error("node {target} is not reachable from node {start}")]
	UnreachableTarget {
		/// where the search started
		start: NodeId,
		/// the goal that was not found
		target: NodeId,
	},

	/// An id that the Graph has never seen.
	#[error("node {0} is not part of the graph")]
	UnknownNode(NodeId),

	/// Indexing into a Path outside of its bounds.
	#[error("index {index} is out of bounds for a path of size {len}")]
	InvalidIndex {
		/// the requested index
		index: usize,
		/// the size of the Path
		len: usize,
	},

	/// Two consecutive Nodes of a Path are not connected by an edge.
	#[error("node {to} is not a neighbour of node {from}")]
	AdjacencyViolation {
		/// the last Node before the gap
		from: NodeId,
		/// the Node that was supposed to follow
		to: NodeId,
	},

	/// The explored Graph has no unvisited Node left but the target was not found.
	#[error("no unexplored nodes left, the target cannot be reached")]
	NoUnexploredNodes,

	/// The configured move limit was hit before the target was found.
	#[error("target not found within {0} moves")]
	MoveLimitExceeded(usize),

	/// Even the shortest Path to the exit does not fit into the budget.
	#[error("shortest path needs {required} but only {available} is available")]
	BudgetTooSmall {
		/// the weight of the shortest Path
		required: Cost,
		/// the budget that was given
		available: Cost,
	},
}

/// Shorthand for results of this crate
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		let err = SearchError::UnreachableTarget {
			start: 1,
			target: 9,
		};
		assert_eq!(err.to_string(), "node 9 is not reachable from node 1");

		let err = SearchError::InvalidIndex { index: 11, len: 10 };
		assert_eq!(
			err.to_string(),
			"index 11 is out of bounds for a path of size 10"
		);
	}

	#[test]
	fn is_copy() {
		let err = SearchError::BudgetTooSmall {
			required: 6,
			available: 5,
		};
		let copy = err;
		assert_eq!(err, copy);
	}
}
