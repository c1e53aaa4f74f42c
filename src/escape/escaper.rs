use super::{brute_force, EscapeConfig, EscapeGraph, EscapeNode, EscapePath};
use crate::generics::dijkstra_search;
use crate::{Cost, Gold, NodeId, Result, SearchError};

use log::{debug, trace};

/// Finds a Path from `start` to `exit` that collects as much gold as possible without
/// exceeding `max_weight`.
///
/// The starting point is the shortest Path to the exit (the richest one, if there are several),
/// which is then [optimised](EscapePath::optimise).
///
/// ## Errors
/// - [`SearchError::UnknownNode`] if `start` or `exit` are not part of the Graph
/// - [`SearchError::UnreachableTarget`] if the exit cannot be reached at all
/// - [`SearchError::BudgetTooSmall`] if even the shortest Path is heavier than `max_weight`
///
/// ## Examples
/// ```
/// use cavern_pathfinding::prelude::*;
///
/// // 1 -2- 2 -2- 3, with a side room 4 next to 2
/// let mut cavern = Cavern::new();
/// for (id, gold) in [(1, 0), (2, 0), (3, 0), (4, 25)] {
/// 	cavern.add_node(id, gold);
/// }
/// cavern.add_edge(1, 2, 2);
/// cavern.add_edge(2, 3, 2);
/// cavern.add_edge(2, 4, 1);
///
/// let short = find_escape_path(&cavern, 1, 3, 4, &EscapeConfig::default()).unwrap();
/// assert_eq!(short.ids(), vec![1, 2, 3]);
///
/// let rich = find_escape_path(&cavern, 1, 3, 6, &EscapeConfig::default()).unwrap();
/// assert_eq!(rich.ids(), vec![1, 2, 4, 2, 3]);
/// assert_eq!(rich.value(), 25);
/// ```
pub fn find_escape_path<'g, G: EscapeGraph + ?Sized>(
	graph: &'g G,
	start: NodeId,
	exit: NodeId,
	max_weight: Cost,
	config: &EscapeConfig,
) -> Result<EscapePath<'g, G>> {
	let mut path = shortest_escape(graph, start, exit, max_weight)?;
	path.optimise(max_weight, config);
	Ok(path)
}

/// The shortest (and among those the richest) Path to the exit, if it fits into the budget
pub(super) fn shortest_escape<'g, G: EscapeGraph + ?Sized>(
	graph: &'g G,
	start: NodeId,
	exit: NodeId,
	max_weight: Cost,
) -> Result<EscapePath<'g, G>> {
	let start_node = EscapeNode::new(graph, start)?;
	EscapeNode::new(graph, exit)?;

	let path = dijkstra_search(start_node, &[exit], false)?
		.remove(&exit)
		.ok_or(SearchError::UnreachableTarget {
			start,
			target: exit,
		})?;

	if path.weight() > max_weight {
		return Err(SearchError::BudgetTooSmall {
			required: path.weight(),
			available: max_weight,
		});
	}
	Ok(path)
}

/// What the host reveals to the escaper and the actions it can take.
pub trait EscapeFeed {
	/// The id of the Node the escaper is standing on
	fn current_node(&self) -> NodeId;
	/// The id of the exit
	fn exit(&self) -> NodeId;
	/// The time left before the exit has to be reached
	fn time_remaining(&self) -> Cost;
	/// The gold lying on the current Node
	fn gold_here(&self) -> Gold;
	/// Picks up all gold on the current Node
	fn pick_up_gold(&mut self);
	/// Moves to an adjacent Node, which takes the weight of the edge in time
	fn move_to(&mut self, id: NodeId);
}

/// Statistics about a finished escape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EscapeReport {
	/// number of moves
	pub moves: usize,
	/// the time spent walking
	pub time_used: Cost,
	/// the gold that was picked up on the way
	pub gold_collected: Gold,
}

/// Walks from the current location of an [`EscapeFeed`] to its exit, collecting gold on the way.
///
/// ## Examples
/// ```
/// use cavern_pathfinding::prelude::*;
///
/// struct Host {
/// 	cavern: Cavern,
/// 	current: NodeId,
/// 	time: Cost,
/// 	purse: Gold,
/// }
/// impl EscapeFeed for Host {
/// 	fn current_node(&self) -> NodeId { self.current }
/// 	fn exit(&self) -> NodeId { 3 }
/// 	fn time_remaining(&self) -> Cost { self.time }
/// 	fn gold_here(&self) -> Gold { self.cavern.gold(self.current) }
/// 	fn pick_up_gold(&mut self) {
/// 		self.purse += self.cavern.set_gold(self.current, 0).unwrap_or(0);
/// 	}
/// 	fn move_to(&mut self, id: NodeId) {
/// 		self.time -= self.cavern.edge_weight(self.current, id).unwrap();
/// 		self.current = id;
/// 	}
/// }
///
/// let mut cavern = Cavern::new();
/// for (id, gold) in [(1, 5), (2, 0), (3, 0), (4, 25)] {
/// 	cavern.add_node(id, gold);
/// }
/// cavern.add_edge(1, 2, 2);
/// cavern.add_edge(2, 3, 2);
/// cavern.add_edge(2, 4, 1);
///
/// let mut host = Host { cavern: cavern.clone(), current: 1, time: 6, purse: 0 };
/// let report = Escaper::new(EscapeConfig::default())
/// 	.escape(&mut host, &cavern)
/// 	.unwrap();
///
/// assert_eq!(host.current, 3);
/// assert_eq!(host.purse, 30);
/// assert_eq!(report.time_used, 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Escaper {
	config: EscapeConfig,
}

impl Escaper {
	/// Creates a new Escaper
	pub fn new(config: EscapeConfig) -> Escaper {
		Escaper { config }
	}

	/// The config this Escaper was created with
	pub fn config(&self) -> &EscapeConfig {
		&self.config
	}

	/// Plans a Path with [`find_escape_path`] and walks it.
	///
	/// `graph` has to describe the same Graph the feed walks through.
	///
	/// ## Errors
	/// see [`find_escape_path`]. Nothing is moved if planning fails.
	pub fn escape<G: EscapeGraph + ?Sized>(
		&self,
		feed: &mut impl EscapeFeed,
		graph: &G,
	) -> Result<EscapeReport> {
		let path = find_escape_path(
			graph,
			feed.current_node(),
			feed.exit(),
			feed.time_remaining(),
			&self.config,
		)?;
		Ok(walk(feed, &path))
	}

	/// Like [`escape`](Escaper::escape), but plans with the exhaustive search of
	/// [`brute_force`](super::brute_force) that runs for at most
	/// [`brute_force_deadline`](EscapeConfig::brute_force_deadline).
	pub fn escape_exhaustive<G: EscapeGraph + Sync + ?Sized>(
		&self,
		feed: &mut impl EscapeFeed,
		graph: &G,
	) -> Result<EscapeReport> {
		let path = brute_force::escape_with_deadline(
			graph,
			feed.current_node(),
			feed.exit(),
			feed.time_remaining(),
			self.config.brute_force_deadline,
		)?;
		Ok(walk(feed, &path))
	}
}

/// Walks `path`, picking up gold at the start and after every move
fn walk<G: EscapeGraph + ?Sized>(feed: &mut impl EscapeFeed, path: &EscapePath<G>) -> EscapeReport {
	let mut report = EscapeReport::default();
	let start_time = feed.time_remaining();

	report.gold_collected += pick_up(feed);
	for node in path.iter().skip(1) {
		feed.move_to(node.id());
		report.moves += 1;
		report.gold_collected += pick_up(feed);
	}

	report.time_used = start_time.saturating_sub(feed.time_remaining());
	debug!(
		"escaped in {} moves: time {}/{}, gold {}",
		report.moves, report.time_used, start_time, report.gold_collected
	);
	report
}

fn pick_up(feed: &mut impl EscapeFeed) -> Gold {
	let gold = feed.gold_here();
	if gold > 0 {
		trace!("picking up {} gold on {}", gold, feed.current_node());
		feed.pick_up_gold();
	}
	gold
}
