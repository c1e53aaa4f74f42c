#![warn(
	missing_docs,
	missing_debug_implementations,
	missing_copy_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications
)]

//! A crate to find your way through caverns that are either unknown or known but dangerous.
//!
//! ## Introduction
//! This crate solves two related problems on Graphs whose Nodes are identified by opaque ids:
//!
//! **Exploring**: The Graph is unknown. All that can be observed is the id of the current
//! location, the ids of its open Neighbors and, for each of them, a hint of how far it is from
//! the target. The [`Explorer`](explore::Explorer) records every observation into an
//! [`ExploreGraph`](explore::ExploreGraph) and uses it to greedily walk towards the target.
//! When the Neighbors start leading away from the target, it walks back over known territory to
//! the most promising Node it has seen so far.
//!
//! **Escaping**: The Graph is fully known, its edges have weights and some of its Nodes have
//! gold on them. The exit has to be reached within a time budget, and as much gold as possible
//! should be collected on the way. [`find_escape_path`](escape::find_escape_path) starts from
//! the shortest Path to the exit and spends the remaining budget on detours to nearby gold.
//!
//! Both are built on the same [Dijkstra search](generics::dijkstra_search), which works with
//! any kind of Node and Path that implement the Traits in [`generics`].
//!
//! ## Examples
//! Exploring a corridor with a side passage:
//! ```
//! use cavern_pathfinding::prelude::*;
//!
//! //  0 - 1 - 2 - 3 (target)
//! //      |
//! //      4
//! struct Maze {
//!     position: NodeId,
//! }
//! impl Maze {
//!     fn distance(id: NodeId) -> Distance {
//!         match id {
//!             4 => 3,
//!             id => 3 - id as Distance,
//!         }
//!     }
//!     fn adjacent(id: NodeId) -> &'static [NodeId] {
//!         match id {
//!             0 => &[1],
//!             1 => &[0, 2, 4],
//!             2 => &[1, 3],
//!             3 => &[2],
//!             _ => &[1],
//!         }
//!     }
//! }
//! impl ExplorationFeed for Maze {
//!     fn current_location(&self) -> NodeId {
//!         self.position
//!     }
//!     fn distance_to_target(&self) -> Distance {
//!         Maze::distance(self.position)
//!     }
//!     fn neighbours(&self) -> Vec<(NodeId, Distance)> {
//!         Maze::adjacent(self.position)
//!             .iter()
//!             .map(|&id| (id, Maze::distance(id)))
//!             .collect()
//!     }
//!     fn move_to(&mut self, id: NodeId) {
//!         self.position = id;
//!     }
//! }
//!
//! let mut maze = Maze { position: 0 };
//! let mut explorer = Explorer::new(ExploreConfig::default());
//! let report = explorer.explore(&mut maze).unwrap();
//!
//! assert_eq!(maze.position, 3);
//! assert_eq!(report.moves, 3);
//! ```
//!
//! Escaping a cavern with some gold lying around:
//! ```
//! use cavern_pathfinding::prelude::*;
//!
//! //  1 --3-- 2 --3-- 3 (exit)
//! //          |
//! //          1
//! //          |
//! //          4 (20 gold)
//! let mut cavern = Cavern::new();
//! for (id, gold) in [(1, 0), (2, 0), (3, 0), (4, 20)] {
//!     cavern.add_node(id, gold);
//! }
//! cavern.add_edge(1, 2, 3);
//! cavern.add_edge(2, 3, 3);
//! cavern.add_edge(2, 4, 1);
//!
//! // not enough time for the detour
//! let path = find_escape_path(&cavern, 1, 3, 7, &EscapeConfig::default()).unwrap();
//! assert_eq!(path.ids(), vec![1, 2, 3]);
//!
//! // just enough
//! let path = find_escape_path(&cavern, 1, 3, 8, &EscapeConfig::default()).unwrap();
//! assert_eq!(path.ids(), vec![1, 2, 4, 2, 3]);
//! assert_eq!(path.weight(), 8);
//!
//! // way too little
//! assert_eq!(
//!     find_escape_path(&cavern, 1, 3, 5, &EscapeConfig::default()).unwrap_err(),
//!     SearchError::BudgetTooSmall { required: 6, available: 5 }
//! );
//! ```
//!
//! ### Configuration
//! Both searches take a config object: [`ExploreConfig`](explore::ExploreConfig) decides how
//! far the Explorer is willing to walk away from the target before turning around, and
//! [`EscapeConfig`](escape::EscapeConfig) controls the rounds of the escape optimiser. Both
//! provide a few presets besides their `Default`.
//!
//! ### Logging
//! The searches report their decisions through the [`log`](https://docs.rs/log) facade:
//! `trace` for every single step, `debug` for a summary of every search and `warn` when an
//! exploration runs out of options. No logger is installed by this crate.
//!
//! ## Crate Features
//! - `parallel` (default): the exhaustive [`brute_force`](escape::brute_force) search splits
//!   its work over a [`rayon`](https://docs.rs/rayon) thread pool.

/// The id the host uses to identify a Node
pub type NodeId = u64;

/// The cost of walking an edge or a whole Path
pub type Cost = usize;

/// The amount of gold on a Node or collected along a Path
pub type Gold = usize;

/// The distance hint the host gives for a Node while exploring
pub type Distance = u32;

mod error;
pub use self::error::{Result, SearchError};

pub mod node_id;

pub mod generics;

pub mod explore;

pub mod escape;

/// The types needed for most uses of this crate
pub mod prelude {
	pub use crate::escape::{
		find_escape_path, Cavern, EscapeConfig, EscapeFeed, EscapeGraph, EscapePath, Escaper,
	};
	pub use crate::explore::{ExplorationFeed, ExploreConfig, ExploreGraph, Explorer};
	pub use crate::generics::SearchPath;
	pub use crate::{Cost, Distance, Gold, NodeId, SearchError};
}
