//! Multi-observer Monte Carlo Tree Search.
//!
//! ## Overview
//!
//! Each side searches its own information-set tree, keyed only by that
//! side's decisions. Workers share both trees and a success/failure
//! `Statistic`. Key features:
//!
//! - **Two trees**: one per side; values are complementary (`v` and `1 - v`)
//! - **Chance by sampling**: every iteration starts from a fresh board built
//!   from a new seed, and flow transitions draw from the board's seed
//! - **Parallel**: scoped worker threads with atomic counters and
//!   check-and-create child expansion
//! - **Configurable policies**: selection (UCB1), simulation (heuristic,
//!   random)
//! - **Structural faults stop the run**: they are never counted as failures
//!
//! ## Usage
//!
//! ```rust
//! use ccg_search::core::Side;
//! use ccg_search::games::SkirmishBuilder;
//! use ccg_search::mcts::{SearchConfig, SearchDriver, SilentProgress};
//! use ccg_search::phases::standard_registry;
//!
//! let registry = standard_registry().unwrap();
//! let builder = SkirmishBuilder::new(registry).deck_size(12);
//!
//! let mut driver = SearchDriver::new(SearchConfig::default()).with_progress(SilentProgress);
//! driver.run_iterations(20, 2, &|seed| builder.build(seed)).unwrap();
//!
//! let stats = driver.statistic();
//! assert_eq!(stats.total(), 40);
//! assert_eq!(u64::from(driver.root(Side::Player).visits()), stats.succeeded);
//! println!("best opening move: {:?}", driver.best_move(Side::Player));
//! ```

pub mod config;
pub mod driver;
pub mod node;
pub mod policy;
pub mod progress;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::SearchConfig;
pub use driver::{SearchDriver, SearchError};
pub use node::{AtomicF64, TreeNode};
pub use policy::{
    heuristic_value, side_value, terminal_value, HeuristicPlayout, RandomPlayout,
    SelectionPolicy, SimulationPolicy, UCB1,
};
pub use progress::{LogProgress, ProgressSink, SilentProgress};
pub use search::SearchEngine;
pub use stats::{SearchStats, Statistic, StatisticSnapshot};
pub use tree::TreeStats;
