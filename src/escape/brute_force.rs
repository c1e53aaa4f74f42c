//! An exhaustive search for the richest escape that gives up after a deadline.
//!
//! Every walk from the start is tried, as long as it fits into the budget and never uses the
//! same edge twice in the same direction. Whenever a walk stands on the exit it is compared
//! with the best one found so far. The search runs on a background thread, so that it can be
//! abandoned when the deadline fires, and the best walk found up to that point is returned.
//!
//! This is far slower than [`find_escape_path`](super::find_escape_path) on anything but
//! small Graphs, but it is not fooled by detours that only pay off further away.

use super::escaper::shortest_escape;
use super::{EscapeGraph, EscapePath};
use crate::node_id::NodeIdMap;
use crate::{Cost, Gold, NodeId, Result};

use hashbrown::HashSet;
use log::{debug, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Searches all walks from `start` to `exit` for at most `deadline` and returns the one that
/// collects the most gold within `max_weight`. Among equally rich walks, the lighter one wins.
///
/// The search is seeded with the shortest Path, so the result is never worse than that.
///
/// ## Errors
/// - [`SearchError::UnknownNode`](crate::SearchError::UnknownNode) if `start` or `exit` are
///   not part of the Graph
/// - [`SearchError::UnreachableTarget`](crate::SearchError::UnreachableTarget) if the exit
///   cannot be reached at all
/// - [`SearchError::BudgetTooSmall`](crate::SearchError::BudgetTooSmall) if even the shortest
///   Path is heavier than `max_weight`
///
/// ## Examples
/// ```
/// use cavern_pathfinding::escape::{brute_force, Cavern};
/// use std::time::Duration;
///
/// // 1 -1- 2 -1- 3, with 9 gold two steps away from 1
/// let mut cavern = Cavern::new();
/// for (id, gold) in [(1, 0), (2, 0), (3, 0), (4, 0), (5, 9)] {
/// 	cavern.add_node(id, gold);
/// }
/// cavern.add_edge(1, 2, 1);
/// cavern.add_edge(2, 3, 1);
/// cavern.add_edge(1, 4, 1);
/// cavern.add_edge(4, 5, 1);
///
/// let path = brute_force::escape_with_deadline(&cavern, 1, 3, 6, Duration::from_secs(1))
/// 	.unwrap();
/// assert_eq!(path.ids(), vec![1, 4, 5, 4, 1, 2, 3]);
/// ```
pub fn escape_with_deadline<'g, G: EscapeGraph + Sync + ?Sized>(
	graph: &'g G,
	start: NodeId,
	exit: NodeId,
	max_weight: Cost,
	deadline: Duration,
) -> Result<EscapePath<'g, G>> {
	let seed = shortest_escape(graph, start, exit, max_weight)?;
	let best = Mutex::new(Candidate {
		ids: seed.ids(),
		weight: seed.weight(),
		gold: seed.value(),
	});
	let cancel = AtomicBool::new(false);

	let (best_ref, cancel_ref) = (&best, &cancel);
	let finished = std::thread::scope(|scope| {
		let (done_sender, done) = mpsc::channel();
		let search = scope.spawn(move || {
			let root = Walk::new(graph, start, exit, max_weight, cancel_ref, best_ref);
			root.search_all();
			let _ = done_sender.send(());
		});

		let finished = match done.recv_timeout(deadline) {
			Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
			Err(RecvTimeoutError::Timeout) => {
				cancel_ref.store(true, Ordering::Relaxed);
				false
			}
		};
		if search.join().is_err() {
			warn!("exhaustive search panicked, using the best path found before that");
		}
		finished
	});

	let best = best.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
	debug!(
		"exhaustive search {}: weight {}/{}, gold {}",
		if finished { "finished" } else { "hit the deadline" },
		best.weight,
		max_weight,
		best.gold
	);
	EscapePath::new(graph, best.ids)
}

/// A finished walk, detached from the Graph so it can be shared between threads
#[derive(Clone, Debug, PartialEq, Eq)]
struct Candidate {
	ids: Vec<NodeId>,
	weight: Cost,
	gold: Gold,
}

impl Candidate {
	fn is_better_than(&self, other: &Candidate) -> bool {
		self.gold > other.gold || (self.gold == other.gold && self.weight < other.weight)
	}
}

fn lock(best: &Mutex<Candidate>) -> MutexGuard<'_, Candidate> {
	best.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The steps still to try from one Node of a [`Walk`]
struct Frame {
	moves: Vec<(NodeId, Cost)>,
	cursor: usize,
	/// what the step onto this Node cost
	cost: Cost,
}

/// The walk that is currently being extended, with everything needed to undo a step
struct Walk<'a, G: ?Sized> {
	graph: &'a G,
	exit: NodeId,
	max_weight: Cost,
	cancel: &'a AtomicBool,
	best: &'a Mutex<Candidate>,
	ids: Vec<NodeId>,
	weight: Cost,
	gold: Gold,
	visits: NodeIdMap<usize>,
	used_edges: HashSet<(NodeId, NodeId)>,
}

impl<'a, G: EscapeGraph + Sync + ?Sized> Walk<'a, G> {
	fn new(
		graph: &'a G,
		start: NodeId,
		exit: NodeId,
		max_weight: Cost,
		cancel: &'a AtomicBool,
		best: &'a Mutex<Candidate>,
	) -> Walk<'a, G> {
		let mut visits = NodeIdMap::default();
		visits.insert(start, 1);
		Walk {
			graph,
			exit,
			max_weight,
			cancel,
			best,
			ids: vec![start],
			weight: 0,
			gold: graph.gold(start),
			visits,
			used_edges: HashSet::new(),
		}
	}

	#[cfg(feature = "parallel")]
	fn fork(&self) -> Walk<'a, G> {
		Walk {
			graph: self.graph,
			exit: self.exit,
			max_weight: self.max_weight,
			cancel: self.cancel,
			best: self.best,
			ids: self.ids.clone(),
			weight: self.weight,
			gold: self.gold,
			visits: self.visits.clone(),
			used_edges: self.used_edges.clone(),
		}
	}

	fn current(&self) -> NodeId {
		self.ids[self.ids.len() - 1]
	}

	/// the steps that can still be taken from the current Node
	fn moves(&self) -> Vec<(NodeId, Cost)> {
		let current = self.current();
		let mut neighbours = vec![];
		self.graph.neighbours(current, &mut neighbours);
		neighbours
			.into_iter()
			.filter(|&next| !self.used_edges.contains(&(current, next)))
			.filter_map(|next| Some((next, self.graph.edge_weight(current, next)?)))
			.filter(|&(_, cost)| self.weight + cost <= self.max_weight)
			.collect()
	}

	fn step(&mut self, next: NodeId, cost: Cost) {
		let current = self.current();
		self.used_edges.insert((current, next));
		self.ids.push(next);
		self.weight += cost;
		let visits = self.visits.entry(next).or_insert(0);
		if *visits == 0 {
			self.gold += self.graph.gold(next);
		}
		*visits += 1;
	}

	fn undo(&mut self, cost: Cost) {
		if let Some(last) = self.ids.pop() {
			if let Some(visits) = self.visits.get_mut(&last) {
				*visits -= 1;
				if *visits == 0 {
					self.gold -= self.graph.gold(last);
				}
			}
			let previous = self.current();
			self.used_edges.remove(&(previous, last));
			self.weight -= cost;
		}
	}

	fn offer(&self) {
		let candidate = Candidate {
			ids: self.ids.clone(),
			weight: self.weight,
			gold: self.gold,
		};
		let mut best = lock(self.best);
		if candidate.is_better_than(&best) {
			trace!(
				"new best walk: weight {}, gold {}",
				candidate.weight,
				candidate.gold
			);
			*best = candidate;
		}
	}

	/// Explores every walk that starts with the current one.
	///
	/// Walks can get as long as the budget allows, so the pending steps are kept on the heap
	/// instead of the call stack.
	fn search(&mut self) {
		if self.current() == self.exit {
			self.offer();
		}
		let mut frames = vec![Frame {
			moves: self.moves(),
			cursor: 0,
			cost: 0,
		}];
		loop {
			if self.cancel.load(Ordering::Relaxed) {
				break;
			}
			let frame = match frames.last_mut() {
				Some(frame) => frame,
				None => break,
			};
			match frame.moves.get(frame.cursor).copied() {
				Some((next, cost)) => {
					frame.cursor += 1;
					self.step(next, cost);
					if self.current() == self.exit {
						self.offer();
					}
					frames.push(Frame {
						moves: self.moves(),
						cursor: 0,
						cost,
					});
				}
				None => {
					let cost = frame.cost;
					frames.pop();
					if !frames.is_empty() {
						self.undo(cost);
					}
				}
			}
		}
		// leave the walk as it was when cancelled halfway
		while frames.len() > 1 {
			if let Some(frame) = frames.pop() {
				self.undo(frame.cost);
			}
		}
	}

	/// Explores every walk from the start, splitting the work by the first step
	#[cfg(feature = "parallel")]
	fn search_all(self) {
		use rayon::prelude::*;

		if self.current() == self.exit {
			self.offer();
		}
		self.moves().into_par_iter().for_each(|(next, cost)| {
			let mut walk = self.fork();
			walk.step(next, cost);
			walk.search();
		});
	}

	/// Explores every walk from the start
	#[cfg(not(feature = "parallel"))]
	fn search_all(mut self) {
		self.search();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::escape::Cavern;
	use crate::SearchError;

	fn cavern(gold: &[(NodeId, Gold)], edges: &[(NodeId, NodeId, Cost)]) -> Cavern {
		let mut cavern = Cavern::new();
		for &(id, gold) in gold {
			cavern.add_node(id, gold);
		}
		for &(a, b, weight) in edges {
			cavern.add_edge(a, b, weight);
		}
		cavern
	}

	const DEADLINE: Duration = Duration::from_secs(5);

	#[test]
	fn candidate_order() {
		let rich = Candidate {
			ids: vec![],
			weight: 10,
			gold: 5,
		};
		let light = Candidate {
			ids: vec![],
			weight: 4,
			gold: 5,
		};
		let poor = Candidate {
			ids: vec![],
			weight: 1,
			gold: 0,
		};
		assert!(rich.is_better_than(&poor));
		assert!(light.is_better_than(&rich));
		assert!(!rich.is_better_than(&light));
		assert!(!rich.is_better_than(&rich.clone()));
	}

	#[test]
	fn finds_the_shortest_path_without_gold() {
		let cavern = cavern(&[(1, 0), (2, 0), (3, 0)], &[(1, 2, 1), (2, 3, 1), (1, 3, 5)]);
		let path = escape_with_deadline(&cavern, 1, 3, 10, DEADLINE).unwrap();
		assert_eq!(path.ids(), vec![1, 2, 3]);
	}

	#[test]
	fn finds_distant_gold() {
		// the greedy optimiser hands 3 of the spare 6 to each of 1 and 2, which is not enough
		// to reach 6 from either of them
		let cavern = cavern(
			&[(1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 40)],
			&[(1, 2, 1), (2, 3, 1), (1, 4, 1), (4, 5, 1), (5, 6, 1)],
		);
		let path = escape_with_deadline(&cavern, 1, 3, 8, DEADLINE).unwrap();
		assert_eq!(path.ids(), vec![1, 4, 5, 6, 5, 4, 1, 2, 3]);
		assert_eq!(path.value(), 40);
		assert_eq!(path.weight(), 8);
	}

	#[test]
	fn walks_through_the_exit() {
		// the gold is behind the exit
		let cavern = cavern(&[(1, 0), (2, 0), (3, 7)], &[(1, 2, 1), (2, 3, 1)]);
		let path = escape_with_deadline(&cavern, 1, 2, 3, DEADLINE).unwrap();
		assert_eq!(path.ids(), vec![1, 2, 3, 2]);
	}

	#[test]
	fn start_is_exit() {
		let cavern = cavern(&[(1, 0), (2, 3)], &[(1, 2, 1)]);
		let path = escape_with_deadline(&cavern, 1, 1, 1, DEADLINE).unwrap();
		assert_eq!(path.ids(), vec![1]);

		let path = escape_with_deadline(&cavern, 1, 1, 2, DEADLINE).unwrap();
		assert_eq!(path.ids(), vec![1, 2, 1]);
	}

	#[test]
	fn errors() {
		let cavern = cavern(&[(1, 0), (2, 0), (3, 0)], &[(1, 2, 4)]);
		assert_eq!(
			escape_with_deadline(&cavern, 1, 2, 3, DEADLINE).unwrap_err(),
			SearchError::BudgetTooSmall {
				required: 4,
				available: 3
			}
		);
		assert_eq!(
			escape_with_deadline(&cavern, 1, 3, 3, DEADLINE).unwrap_err(),
			SearchError::UnreachableTarget {
				start: 1,
				target: 3
			}
		);
	}

	#[test]
	fn deadline_returns_best_so_far() {
		// a complete graph is far too large to search in no time at all
		let size = 12;
		let mut cavern = Cavern::new();
		for id in 0..size {
			cavern.add_node(id, id as Gold);
		}
		for a in 0..size {
			for b in a + 1..size {
				cavern.add_edge(a, b, 1);
			}
		}
		let path = escape_with_deadline(&cavern, 0, 1, 1000, Duration::from_millis(10)).unwrap();
		assert_eq!(path.first().map(|n| n.id()), Some(0));
		assert_eq!(path.last().map(|n| n.id()), Some(1));
		assert!(path.weight() <= 1000);
		assert!(path.value() >= 1);
	}
}
