//! Escaping a fully known Graph within a time budget while collecting as much gold as possible.
//!
//! The Graph is accessed through the [`EscapeGraph`] Trait, with [`Cavern`] as a ready-made
//! implementation. [`find_escape_path`] starts from the shortest Path to the exit and then
//! spends the remaining budget on detours to gold (see [`EscapePath::optimise`]). The result is
//! a greedy approximation. [`brute_force`] offers an exhaustive alternative for small Graphs.

mod config;
pub use self::config::EscapeConfig;

mod graph;
pub use self::graph::{Cavern, EscapeGraph};

mod node;
pub use self::node::EscapeNode;

mod path;
pub use self::path::EscapePath;

mod escaper;
pub use self::escaper::{find_escape_path, EscapeFeed, EscapeReport, Escaper};

pub mod brute_force;
