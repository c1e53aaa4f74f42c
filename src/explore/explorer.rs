use super::{ExploreConfig, ExploreGraph};
use crate::{Distance, NodeId, Result, SearchError};

use log::{debug, trace};

/// What the host reveals to the explorer at its current location.
///
/// Only the current tile and its open neighbours are ever known. Moves are only valid to an
/// adjacent id that has been reported by [`neighbours`](ExplorationFeed::neighbours).
pub trait ExplorationFeed {
	/// The id of the tile the explorer is standing on
	fn current_location(&self) -> NodeId;
	/// The distance from the current tile to the target. `0` means the target was found.
	fn distance_to_target(&self) -> Distance;
	/// The open neighbours of the current tile with their distance to the target
	fn neighbours(&self) -> Vec<(NodeId, Distance)>;
	/// Moves to an adjacent tile
	fn move_to(&mut self, id: NodeId);
}

/// The two states of the [`Explorer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExploreMode {
	/// Trying the most promising unexplored Neighbor of the current location
	Probe,
	/// Walking back to the most promising unexplored Node of the whole Graph
	Backtrack,
}

/// The outcome of a single [`Explorer::step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExploreStep {
	/// The explorer is standing on the target
	Found,
	/// Moved to the given Neighbor
	Probed(NodeId),
	/// Walked `moves` steps back towards the given unexplored Node. The walk ends early if it
	/// passes the target or runs out of moves.
	Backtracked {
		/// the Node that was walked towards
		to: NodeId,
		/// the number of moves it took
		moves: usize,
	},
	/// There is no unexplored Node left to walk to
	Stuck,
	/// [`max_moves`](ExploreConfig::max_moves) moves were made without finding the target
	OutOfMoves,
}

/// Statistics about a finished exploration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExploreReport {
	/// total number of moves
	pub moves: usize,
	/// number of single moves to a Neighbor
	pub probes: usize,
	/// number of walks back to a better Node
	pub backtracks: usize,
}

/// Searches for a target in a Graph that is revealed one Node at a time.
///
/// The Explorer greedily probes the unexplored Neighbor that is closest to the target, as long
/// as that Neighbor is not much worse (see
/// [`turnaround_threshold`](ExploreConfig::turnaround_threshold)) than the best unexplored
/// Node seen anywhere so far. Otherwise it walks back over known territory to the most
/// promising unexplored Node.
///
/// ## Examples
/// ```
/// use cavern_pathfinding::prelude::*;
///
/// // a corridor 0 - 1 - 2 - 3 with the target on 3
/// struct Corridor(NodeId);
/// impl ExplorationFeed for Corridor {
///     fn current_location(&self) -> NodeId { self.0 }
///     fn distance_to_target(&self) -> Distance { 3 - self.0 as Distance }
///     fn neighbours(&self) -> Vec<(NodeId, Distance)> {
///         [self.0.wrapping_sub(1), self.0 + 1]
///             .into_iter()
///             .filter(|&id| id <= 3)
///             .map(|id| (id, 3 - id as Distance))
///             .collect()
///     }
///     fn move_to(&mut self, id: NodeId) { self.0 = id }
/// }
///
/// let mut feed = Corridor(0);
/// let report = Explorer::new(ExploreConfig::default()).explore(&mut feed).unwrap();
///
/// assert_eq!(feed.0, 3);
/// assert_eq!(report.moves, 3);
/// ```
#[derive(Clone, Debug)]
pub struct Explorer {
	graph: ExploreGraph,
	config: ExploreConfig,
	mode: ExploreMode,
	report: ExploreReport,
}

impl Explorer {
	/// Creates a new Explorer that has not seen anything yet
	pub fn new(config: ExploreConfig) -> Explorer {
		Explorer {
			graph: ExploreGraph::new(),
			config,
			mode: ExploreMode::Probe,
			report: ExploreReport::default(),
		}
	}

	/// Everything discovered so far
	pub fn graph(&self) -> &ExploreGraph {
		&self.graph
	}

	/// The config this Explorer was created with
	pub fn config(&self) -> &ExploreConfig {
		&self.config
	}

	/// The state the Explorer is currently in
	pub fn mode(&self) -> ExploreMode {
		self.mode
	}

	/// Statistics about the moves made so far
	pub fn report(&self) -> ExploreReport {
		self.report
	}

	/// Moves until the target is found.
	///
	/// ## Errors
	/// - [`SearchError::NoUnexploredNodes`] if every reachable Node was visited without
	///   finding the target
	/// - [`SearchError::MoveLimitExceeded`] if [`max_moves`](ExploreConfig::max_moves) is set
	///   and that many moves did not reach the target
	pub fn explore(&mut self, feed: &mut impl ExplorationFeed) -> Result<ExploreReport> {
		loop {
			match self.step(feed) {
				ExploreStep::Found => break,
				ExploreStep::Stuck => return Err(SearchError::NoUnexploredNodes),
				ExploreStep::OutOfMoves => {
					let max_moves = self.config.max_moves.unwrap_or(self.report.moves);
					return Err(SearchError::MoveLimitExceeded(max_moves));
				}
				ExploreStep::Probed(_) | ExploreStep::Backtracked { .. } => {}
			}
		}
		debug!(
			"target found after {} moves ({} probes, {} backtracks)",
			self.report.moves, self.report.probes, self.report.backtracks
		);
		Ok(self.report)
	}

	/// Records the current location and makes one decision.
	///
	/// In [`ExploreMode::Probe`] this is a single move, in [`ExploreMode::Backtrack`] it is the
	/// whole walk back to the chosen Node. Every location walked over is recorded before the
	/// next move.
	pub fn step(&mut self, feed: &mut impl ExplorationFeed) -> ExploreStep {
		self.record(&*feed);
		if feed.distance_to_target() == 0 {
			return ExploreStep::Found;
		}
		if self.moves_left() == Some(0) {
			return ExploreStep::OutOfMoves;
		}

		let current = feed.current_location();
		if let Some(next) = self.next_probe(current) {
			trace!("probing {} from {}", next, current);
			feed.move_to(next);
			self.report.moves += 1;
			self.report.probes += 1;
			return ExploreStep::Probed(next);
		}

		self.mode = ExploreMode::Backtrack;
		let path = self
			.graph
			.path_to_best_node(current, self.config.best_node_tolerance)
			.ids();
		let step = if path.len() < 2 {
			ExploreStep::Stuck
		} else {
			let to = path[path.len() - 1];
			trace!("backtracking from {} to {} over {} moves", current, to, path.len() - 1);
			let moves_left = self.moves_left();
			let mut moves = 0;
			for &id in path.iter().skip(1) {
				if moves_left == Some(moves) {
					break;
				}
				feed.move_to(id);
				moves += 1;
				self.record(&*feed);
				if feed.distance_to_target() == 0 {
					break;
				}
			}
			self.report.moves += moves;
			self.report.backtracks += 1;
			ExploreStep::Backtracked { to, moves }
		};
		self.mode = ExploreMode::Probe;
		step
	}

	fn moves_left(&self) -> Option<usize> {
		self.config
			.max_moves
			.map(|max| max.saturating_sub(self.report.moves))
	}

	fn record(&mut self, feed: &impl ExplorationFeed) {
		self.graph.record_visit(
			feed.current_location(),
			feed.distance_to_target(),
			feed.neighbours(),
		);
	}

	/// the Neighbor to probe next, if it is still worth probing
	fn next_probe(&self, current: NodeId) -> Option<NodeId> {
		let target = *self.graph.unexplored_neighbours(current).first()?;
		let closest = self.graph.closest_unexplored_to_target()?;
		let limit = closest
			.distance_to_target()
			.saturating_add(self.config.turnaround_threshold);
		if target.distance_to_target() <= limit {
			Some(target.id())
		} else {
			None
		}
	}
}
