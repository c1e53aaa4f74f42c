use super::{EscapeConfig, EscapeGraph, EscapeNode};
use crate::generics::{compare_weight_then_value, SearchPath};
use crate::node_id::NodeIdSet;
use crate::{Cost, Gold, NodeId, Result, SearchError};

use log::{debug, trace};

/// A walk through an [`EscapeGraph`] that collects the gold on its Nodes.
///
/// Consecutive Nodes are always adjacent. Nodes may appear several times, which is how loops
/// are represented, but the gold of a Node only counts once. The weight is kept up to date on
/// every change, so [`weight`](EscapePath::weight) is cheap.
///
/// Two Paths are equal if they walk the same Nodes. The ordering only looks at weight and
/// value (see [`compare_weight_then_value`]), so two different routes can compare as
/// `Ordering::Equal` without being `==`.
pub struct EscapePath<'g, G: ?Sized> {
	nodes: Vec<EscapeNode<'g, G>>,
	weight: Cost,
}

impl<'g, G: EscapeGraph + ?Sized> EscapePath<'g, G> {
	/// Creates a Path from a list of ids.
	///
	/// ## Errors
	/// - [`SearchError::UnknownNode`] if an id is not part of the Graph
	/// - [`SearchError::AdjacencyViolation`] if two consecutive ids are not connected
	///
	/// ## Examples
	/// ```
	/// use cavern_pathfinding::escape::{Cavern, EscapePath};
	/// use cavern_pathfinding::SearchError;
	///
	/// let mut cavern = Cavern::new();
	/// for id in 1..=3 {
	/// 	cavern.add_node(id, 0);
	/// }
	/// cavern.add_edge(1, 2, 4);
	///
	/// assert_eq!(EscapePath::new(&cavern, [1, 2, 1]).unwrap().weight(), 8);
	/// assert_eq!(
	/// 	EscapePath::new(&cavern, [1, 3]).unwrap_err(),
	/// 	SearchError::AdjacencyViolation { from: 1, to: 3 }
	/// );
	/// ```
	pub fn new(graph: &'g G, ids: impl IntoIterator<Item = NodeId>) -> Result<EscapePath<'g, G>> {
		let mut path = EscapePath::empty();
		for id in ids {
			path.push(EscapeNode::new(graph, id)?)?;
		}
		Ok(path)
	}

	/// Creates a Path without any Nodes
	pub fn empty() -> EscapePath<'g, G> {
		EscapePath {
			nodes: vec![],
			weight: 0,
		}
	}

	/// Creates a Path that only contains `node`
	pub fn from_node(node: EscapeNode<'g, G>) -> EscapePath<'g, G> {
		EscapePath {
			nodes: vec![node],
			weight: 0,
		}
	}

	pub(super) fn from_parts(nodes: Vec<EscapeNode<'g, G>>, weight: Cost) -> EscapePath<'g, G> {
		EscapePath { nodes, weight }
	}

	/// Appends a Node to the end of the Path.
	///
	/// ## Errors
	/// [`SearchError::AdjacencyViolation`] if `node` is not a Neighbor of the current last Node.
	/// The Path is left unchanged in that case.
	pub fn push(&mut self, node: EscapeNode<'g, G>) -> Result<()> {
		if let Some(last) = self.nodes.last() {
			self.weight += last.edge_weight(node.id())?;
		}
		self.nodes.push(node);
		Ok(())
	}

	/// Appends all Nodes of `other`.
	///
	/// If `other` starts on the Node this Path ends on, that Node is not repeated. Otherwise
	/// the two ends have to be adjacent.
	///
	/// ## Errors
	/// [`SearchError::AdjacencyViolation`] if the Paths cannot be connected. The Path is left
	/// unchanged in that case.
	pub fn join(&mut self, other: &EscapePath<'g, G>) -> Result<()> {
		let (last, first) = match (self.nodes.last(), other.nodes.first()) {
			(Some(last), Some(first)) => (*last, *first),
			_ => {
				self.nodes.extend_from_slice(&other.nodes);
				self.weight += other.weight;
				return Ok(());
			}
		};
		if last == first {
			self.nodes.extend_from_slice(&other.nodes[1..]);
		} else {
			self.weight += last.edge_weight(first.id())?;
			self.nodes.extend_from_slice(&other.nodes);
		}
		self.weight += other.weight;
		Ok(())
	}

	/// Replaces the Node at `index` with `nodes`.
	///
	/// ## Errors
	/// - [`SearchError::InvalidIndex`] if `index` is out of bounds
	/// - [`SearchError::AdjacencyViolation`] if the result would not be contiguous
	///
	/// The Path is left unchanged on error.
	pub fn replace_at(&mut self, index: usize, nodes: &[EscapeNode<'g, G>]) -> Result<()> {
		if index >= self.nodes.len() {
			return Err(SearchError::InvalidIndex {
				index,
				len: self.nodes.len(),
			});
		}
		let mut replaced = Vec::with_capacity(self.nodes.len() + nodes.len());
		replaced.extend_from_slice(&self.nodes[..index]);
		replaced.extend_from_slice(nodes);
		replaced.extend_from_slice(&self.nodes[index + 1..]);

		self.weight = weight_of(&replaced)?;
		self.nodes = replaced;
		Ok(())
	}

	/// The number of Nodes, counting repeated Nodes every time
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// `true` if the Path has no Nodes
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The total cost of walking the Path
	pub fn weight(&self) -> Cost {
		self.weight
	}

	/// The gold collected by walking the Path. Every Node is only counted once.
	pub fn value(&self) -> Gold {
		let mut seen = NodeIdSet::default();
		self.nodes
			.iter()
			.filter(|node| seen.insert(node.id()))
			.map(|node| node.gold())
			.sum()
	}

	/// The Node at `index`, or `None` if it is out of bounds
	pub fn get(&self, index: usize) -> Option<EscapeNode<'g, G>> {
		self.nodes.get(index).copied()
	}

	/// The first Node, if any
	pub fn first(&self) -> Option<EscapeNode<'g, G>> {
		self.nodes.first().copied()
	}

	/// The last Node, if any
	pub fn last(&self) -> Option<EscapeNode<'g, G>> {
		self.nodes.last().copied()
	}

	/// The ids of the Nodes in walking order
	pub fn ids(&self) -> Vec<NodeId> {
		self.nodes.iter().map(|node| node.id()).collect()
	}

	/// Returns an Iterator over the Nodes of the Path
	pub fn iter(&self) -> std::slice::Iter<'_, EscapeNode<'g, G>> {
		self.nodes.iter()
	}

	/// `true` if the Path has at least two Nodes and starts and ends on the same one
	pub fn is_loop(&self) -> bool {
		match (self.nodes.first(), self.nodes.last()) {
			(Some(first), Some(last)) => self.nodes.len() >= 2 && first == last,
			_ => false,
		}
	}

	/// The `size` Nodes starting at `start`.
	///
	/// ## Errors
	/// [`SearchError::InvalidIndex`] if the range does not fit into the Path
	pub fn sub_path(&self, start: usize, size: usize) -> Result<EscapePath<'g, G>> {
		let end = start.saturating_add(size);
		if end > self.nodes.len() {
			return Err(SearchError::InvalidIndex {
				index: end - 1,
				len: self.nodes.len(),
			});
		}
		let nodes = self.nodes[start..end].to_vec();
		let weight = span_weight(&nodes);
		Ok(EscapePath { nodes, weight })
	}

	/// Repeatedly grows and prunes the Path until it stops growing or uses up the budget.
	///
	/// Every round first calls [`extend`](EscapePath::extend) and then, if enabled in the
	/// `config`, removes loops without gold. The weight never exceeds `max_weight`, unless it
	/// already did before the call, in which case the Path is left unchanged.
	pub fn optimise(&mut self, max_weight: Cost, config: &EscapeConfig) {
		let initial_value = self.value();
		let mut old_size = self.len();
		let mut rounds = 0;

		while self.weight < max_weight {
			if config.max_rounds.map_or(false, |max| rounds >= max) {
				break;
			}
			rounds += 1;

			self.extend(max_weight);
			if config.prune_goldless_loops {
				self.prune_goldless_loops(config.min_loop_size);
			}
			trace!(
				"round {}: {} nodes, weight {}/{}",
				rounds,
				self.len(),
				self.weight,
				max_weight
			);

			if self.len() <= old_size {
				break;
			}
			old_size = self.len();
		}

		debug!(
			"optimised path in {} rounds: weight {}/{}, gold {} -> {}",
			rounds,
			self.weight,
			max_weight,
			initial_value,
			self.value()
		);
	}

	/// Grows detour loops at the Nodes of the Path, using the budget not needed to walk it.
	///
	/// The spare budget `max_weight - weight` is split evenly over all Nodes except the last
	/// one (the exit), and the remainder is handed out one unit at a time starting at the
	/// first Node. Each Node then tries to [`extend`](EscapeNode::extend) itself into a loop
	/// through Nodes that are not on the Path yet. A loop is only kept if it collects more
	/// gold than the Node alone. Whatever a Node does not spend is added to the budget of the
	/// next Node.
	///
	/// A Path with a single Node gets the entire budget for that Node.
	pub fn extend(&mut self, max_weight: Cost) {
		let slack = max_weight.saturating_sub(self.weight);
		let mut visited: NodeIdSet = self.nodes.iter().map(|node| node.id()).collect();

		let (exit, rest) = match self.nodes.split_last() {
			Some((exit, rest)) => (*exit, rest),
			None => return,
		};
		if rest.is_empty() {
			*self = exit.extend(&mut visited, slack);
			return;
		}

		let mut extended = Vec::with_capacity(self.nodes.len());
		let mut added_weight: Cost = 0;
		let mut leftover: Cost = 0;
		for (&node, budget) in rest.iter().zip(split_budget(slack, rest.len())) {
			let budget = budget + leftover;
			let detour = node.extend(&mut visited, budget);
			if detour.value() > node.gold() {
				leftover = budget - detour.weight;
				added_weight += detour.weight;
				extended.extend(detour.nodes);
			} else {
				leftover = budget;
				extended.push(node);
			}
		}
		extended.push(exit);

		self.nodes = extended;
		self.weight += added_weight;
	}

	/// Removes all loops of at least 3 Nodes that collect no gold.
	///
	/// Returns the number of removed Nodes. See
	/// [`prune_goldless_loops`](EscapePath::prune_goldless_loops).
	pub fn remove_goldless_loops(&mut self) -> usize {
		self.prune_goldless_loops(3)
	}

	/// Removes all loops of at least `min_loop_size` Nodes that collect no gold.
	///
	/// A loop is a stretch of the Path that starts and ends on the same Node. Of every loop
	/// whose Nodes all have no gold, only the last Node is kept. Loop sizes are checked from
	/// small to large, and the whole sweep is repeated until nothing changes, so calling this
	/// again on the result never removes anything.
	///
	/// Returns the number of removed Nodes.
	pub fn prune_goldless_loops(&mut self, min_loop_size: usize) -> usize {
		let min_loop_size = min_loop_size.max(2);
		let mut removed = 0;
		loop {
			let before = removed;
			let mut size = min_loop_size;
			while size <= self.nodes.len() {
				let mut i = 0;
				while i + size <= self.nodes.len() {
					let window = &self.nodes[i..i + size];
					if window[0] == window[size - 1] && window.iter().all(|n| n.gold() == 0) {
						self.weight -= span_weight(window);
						self.nodes.drain(i..i + size - 1);
						removed += size - 1;
					} else {
						i += 1;
					}
				}
				size += 1;
			}
			if removed == before {
				break;
			}
		}
		if removed > 0 {
			trace!("pruned {} nodes of goldless loops", removed);
		}
		removed
	}
}

/// Splits `total` into `count` parts that differ by at most one, larger parts first
fn split_budget(total: Cost, count: usize) -> impl Iterator<Item = Cost> {
	let share = total / count;
	let remainder = total % count;
	(0..count).map(move |i| if i < remainder { share + 1 } else { share })
}

/// The weight of a sequence of Nodes, checking that consecutive Nodes are adjacent
fn weight_of<G: EscapeGraph + ?Sized>(nodes: &[EscapeNode<'_, G>]) -> Result<Cost> {
	nodes
		.windows(2)
		.map(|pair| pair[0].edge_weight(pair[1].id()))
		.sum()
}

/// The weight of a stretch of a Path. Adjacency was checked when the Nodes were added.
fn span_weight<G: EscapeGraph + ?Sized>(nodes: &[EscapeNode<'_, G>]) -> Cost {
	weight_of(nodes).unwrap_or_default()
}

impl<G: ?Sized> Clone for EscapePath<'_, G> {
	fn clone(&self) -> Self {
		EscapePath {
			nodes: self.nodes.clone(),
			weight: self.weight,
		}
	}
}

impl<G: EscapeGraph + ?Sized> Default for EscapePath<'_, G> {
	fn default() -> Self {
		EscapePath::empty()
	}
}

impl<'g, G: EscapeGraph + ?Sized> SearchPath for EscapePath<'g, G> {
	type Node = EscapeNode<'g, G>;

	fn nodes(&self) -> &[EscapeNode<'g, G>] {
		&self.nodes
	}

	fn weight(&self) -> Cost {
		self.weight
	}

	fn value(&self) -> Gold {
		EscapePath::value(self)
	}

	fn clone_with_node(&self, node: EscapeNode<'g, G>) -> Self {
		// only ever called with Neighbors of the last Node
		let step = self
			.nodes
			.last()
			.map_or(0, |last| last.edge_weight(node.id()).unwrap_or_default());
		let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
		nodes.extend_from_slice(&self.nodes);
		nodes.push(node);
		EscapePath {
			nodes,
			weight: self.weight + step,
		}
	}
}

use std::ops::Index;

impl<'g, G: ?Sized> Index<usize> for EscapePath<'g, G> {
	type Output = EscapeNode<'g, G>;
	#[track_caller]
	fn index(&self, index: usize) -> &EscapeNode<'g, G> {
		&self.nodes[index]
	}
}

use std::cmp::Ordering;

impl<G: ?Sized> PartialEq for EscapePath<'_, G> {
	fn eq(&self, rhs: &Self) -> bool {
		self.nodes == rhs.nodes
	}
}
impl<G: ?Sized> Eq for EscapePath<'_, G> {}

impl<G: EscapeGraph + ?Sized> Ord for EscapePath<'_, G> {
	fn cmp(&self, rhs: &Self) -> Ordering {
		compare_weight_then_value((self.weight, || self.value()), (rhs.weight, || rhs.value()))
	}
}
impl<G: EscapeGraph + ?Sized> PartialOrd for EscapePath<'_, G> {
	fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
		Some(self.cmp(rhs))
	}
}

use std::fmt;
impl<G: ?Sized> fmt::Debug for EscapePath<'_, G> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		fmt.debug_struct("EscapePath")
			.field("nodes", &self.nodes)
			.field("weight", &self.weight)
			.finish()
	}
}
impl<G: ?Sized> fmt::Display for EscapePath<'_, G> {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "Path[Cost = {}]: ", self.weight)?;
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
