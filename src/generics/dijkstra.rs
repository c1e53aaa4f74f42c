use super::{GraphNode, SearchPath};
use crate::node_id::*;
use crate::{NodeId, Result, SearchError};

use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Searches a Graph using [Dijkstra's Algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
///
/// Unlike a textbook implementation, the cost of a Path is not a single number: two Paths are
/// compared with the `Ord` implementation of [`GraphNode::Path`]. This allows for example to
/// prefer the richer of two equally long Paths. Paths that compare equal are expanded in
/// ascending order of the id of their last Node, so the result is deterministic.
///
/// This function can be used to search for several Goals and will try to calculate a Path for
/// every provided Goal. It stops as soon as the shortest Path to every Goal is known, or, if
/// `only_closest_goal` is set, as soon as the shortest Path to any Goal is known. That Path is
/// then the smallest of all Paths to any of the Goals.
///
/// ## Arguments
/// - `start` - the starting Node
/// - `goals` - the ids of the Goals that this function is supposed to search for
/// - `only_closest_goal` - stop after the first Goal has been reached
///
/// ## Returns
/// a Map with the Goal's ids as the Key and the shortest Path to reach that Goal as Value.
/// The first Node in the Path is always the `start` and the last is the corresponding Goal.
///
/// ## Errors
/// [`SearchError::UnreachableTarget`] if every reachable Node was expanded and a Goal is still
/// missing (or no Goal at all was found when `only_closest_goal` is set).
pub fn dijkstra_search<N: GraphNode>(
	start: N,
	goals: &[NodeId],
	only_closest_goal: bool,
) -> Result<NodeIdMap<N::Path>> {
	let mut remaining_goals: NodeIdSet = goals.iter().copied().collect();
	let mut goal_data = node_id_map_with_cap(remaining_goals.len());
	if remaining_goals.is_empty() {
		return Ok(goal_data);
	}

	let mut best: NodeIdMap<N::Path> = NodeIdMap::default();
	let mut complete = NodeIdSet::default();
	let mut next = BinaryHeap::new();

	let start_path = start.wrap_to_path();
	best.insert(start.id(), start_path.clone());
	next.push(Element(start, start_path));

	let mut all_neighbors = vec![];
	let mut expansions = 0usize;

	while let Some(Element(current, current_path)) = next.pop() {
		let current_id = current.id();
		if complete.contains(&current_id) {
			continue;
		}
		if best[&current_id] < current_path {
			// a better Path was found after this one was queued
			continue;
		}
		complete.insert(current_id);
		expansions += 1;
		trace!(
			"finalized node {} (weight {}, value {})",
			current_id,
			current_path.weight(),
			current_path.value()
		);

		if remaining_goals.remove(&current_id) {
			goal_data.insert(current_id, current_path.clone());
			if only_closest_goal || remaining_goals.is_empty() {
				break;
			}
		}

		all_neighbors.clear();
		current.neighbors(&mut all_neighbors);
		for &other in all_neighbors.iter() {
			let other_id = other.id();
			if complete.contains(&other_id) {
				continue;
			}
			let other_path = current_path.clone_with_node(other);

			let needs_visit = match best.get(&other_id) {
				Some(prev_path) => other_path < *prev_path,
				None => true,
			};
			if needs_visit {
				best.insert(other_id, other_path.clone());
				next.push(Element(other, other_path));
			}
		}
	}

	debug!(
		"dijkstra from {}: {} expansions, {}/{} goals reached",
		start.id(),
		expansions,
		goal_data.len(),
		goal_data.len() + remaining_goals.len()
	);

	let missing = if only_closest_goal {
		goal_data.is_empty()
	} else {
		!remaining_goals.is_empty()
	};
	if missing {
		let target = remaining_goals.iter().copied().min().unwrap_or(start.id());
		return Err(SearchError::UnreachableTarget {
			start: start.id(),
			target,
		});
	}

	Ok(goal_data)
}

/// An entry of the frontier. Ordered in reverse so that `BinaryHeap` pops the smallest Path.
struct Element<N: GraphNode>(N, N::Path);

impl<N: GraphNode> PartialEq for Element<N> {
	fn eq(&self, rhs: &Self) -> bool {
		self.cmp(rhs) == Ordering::Equal
	}
}
impl<N: GraphNode> Eq for Element<N> {}
impl<N: GraphNode> PartialOrd for Element<N> {
	fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
		Some(self.cmp(rhs))
	}
}
impl<N: GraphNode> Ord for Element<N> {
	fn cmp(&self, rhs: &Self) -> Ordering {
		rhs.1
			.cmp(&self.1)
			.then_with(|| rhs.0.id().cmp(&self.0.id()))
	}
}
