use crate::Distance;

/// Options for configuring the [`Explorer`](super::Explorer)
///
/// Default options:
/// ```
/// # use cavern_pathfinding::explore::ExploreConfig;
/// assert_eq!(
///     ExploreConfig {
///         turnaround_threshold: 4,
///         best_node_tolerance: 1,
///         max_moves: None,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExploreConfig {
	/// How much further from the target than the best known unexplored Node a Neighbor may be
	/// while still probing it (defaults to `4`).
	///
	/// Larger values walk uphill for longer before turning around and walking back to the most
	/// promising Node. `0` turns around as soon as a Neighbor is worse than the best known Node.
	pub turnaround_threshold: Distance,
	/// When turning around, all unexplored Nodes within this distance of the best one are
	/// considered, and the one closest to the current location is chosen (defaults to `1`).
	pub best_node_tolerance: Distance,
	/// Give up once this many moves were made without reaching the target (defaults to `None`,
	/// which never gives up). No move beyond the limit is ever made.
	pub max_moves: Option<usize>,
}

impl ExploreConfig {
	/// an example ExploreConfig that turns around as soon as possible
	///
	/// Values:
	/// ```
	/// # use cavern_pathfinding::explore::ExploreConfig;
	/// assert_eq!(
	///     ExploreConfig {
	///         turnaround_threshold: 0,
	///         best_node_tolerance: 0,
	///         max_moves: None,
	///     },
	///     ExploreConfig::GREEDY
	/// );
	/// ```
	pub const GREEDY: ExploreConfig = ExploreConfig {
		turnaround_threshold: 0,
		best_node_tolerance: 0,
		max_moves: None,
	};
	/// an example ExploreConfig that follows a corridor for a long time before turning around
	///
	/// Values:
	/// ```
	/// # use cavern_pathfinding::explore::ExploreConfig;
	/// assert_eq!(
	///     ExploreConfig {
	///         turnaround_threshold: 8,
	///         best_node_tolerance: 2,
	///         max_moves: None,
	///     },
	///     ExploreConfig::PATIENT
	/// );
	/// ```
	pub const PATIENT: ExploreConfig = ExploreConfig {
		turnaround_threshold: 8,
		best_node_tolerance: 2,
		max_moves: None,
	};

	/// Returns the Default config with the given `turnaround_threshold`
	pub fn with_turnaround_threshold(turnaround_threshold: Distance) -> ExploreConfig {
		ExploreConfig {
			turnaround_threshold,
			..Default::default()
		}
	}
}

impl Default for ExploreConfig {
	fn default() -> ExploreConfig {
		ExploreConfig {
			turnaround_threshold: 4,
			best_node_tolerance: 1,
			max_moves: None,
		}
	}
}
