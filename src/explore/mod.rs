//! Finding a target in a Graph that is only revealed while walking through it.
//!
//! At every step the explorer only knows the id of its current location, the ids of the open
//! neighbours and a hint for how far each of them is from the target. The [`ExploreGraph`]
//! collects these observations into a map of the known territory, and the [`Explorer`] uses it
//! to decide where to go next.

mod config;
pub use self::config::ExploreConfig;

mod node;
pub use self::node::{ExploreNode, ExploreNodeRef};

mod path;
pub use self::path::ExplorePath;

mod graph;
pub use self::graph::ExploreGraph;

mod explorer;
pub use self::explorer::{ExplorationFeed, ExploreMode, ExploreReport, ExploreStep, Explorer};
