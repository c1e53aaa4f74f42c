use std::time::Duration;

/// Options for configuring the [`Escaper`](super::Escaper) and
/// [`EscapePath::optimise`](super::EscapePath::optimise)
///
/// Default options:
/// ```
/// # use cavern_pathfinding::escape::EscapeConfig;
/// use std::time::Duration;
///
/// assert_eq!(
/// 	EscapeConfig {
/// 		prune_goldless_loops: true,
/// 		min_loop_size: 3,
/// 		max_rounds: None,
/// 		brute_force_deadline: Duration::from_secs(1),
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapeConfig {
	/// `true` (default): after every round of growing detours, loops that collect no gold are
	/// cut out of the Path again, freeing their cost for the next round.
	///
	/// `false`: detours are kept as they are.
	pub prune_goldless_loops: bool,
	/// The smallest number of Nodes (including both ends) a loop needs to be pruned (defaults
	/// to `3`, which is the smallest possible loop `A -> B -> A`).
	pub min_loop_size: usize,
	/// Stop optimising after this many rounds (defaults to `None`, which runs until the Path
	/// stops growing or the budget is used up).
	pub max_rounds: Option<usize>,
	/// How long the exhaustive search of [`brute_force`](super::brute_force) may run before
	/// it settles for the best Path found so far (defaults to one second).
	pub brute_force_deadline: Duration,
}

impl EscapeConfig {
	/// an example EscapeConfig that only runs a single round of the optimiser
	///
	/// Values:
	/// ```
	/// # use cavern_pathfinding::escape::EscapeConfig;
	/// use std::time::Duration;
	///
	/// assert_eq!(
	/// 	EscapeConfig {
	/// 		prune_goldless_loops: true,
	/// 		min_loop_size: 3,
	/// 		max_rounds: Some(1),
	/// 		brute_force_deadline: Duration::from_millis(100),
	/// 	},
	/// 	EscapeConfig::QUICK
	/// );
	/// ```
	pub const QUICK: EscapeConfig = EscapeConfig {
		prune_goldless_loops: true,
		min_loop_size: 3,
		max_rounds: Some(1),
		brute_force_deadline: Duration::from_millis(100),
	};

	/// Returns the Default config with the given `brute_force_deadline`
	pub fn with_deadline(brute_force_deadline: Duration) -> EscapeConfig {
		EscapeConfig {
			brute_force_deadline,
			..Default::default()
		}
	}
}

impl Default for EscapeConfig {
	fn default() -> EscapeConfig {
		EscapeConfig {
			prune_goldless_loops: true,
			min_loop_size: 3,
			max_rounds: None,
			brute_force_deadline: Duration::from_secs(1),
		}
	}
}
