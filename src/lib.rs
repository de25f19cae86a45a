//! # ccg-search
//!
//! A phase-dispatched card game state machine with a parallel two-tree
//! Monte Carlo Tree Search on top.
//!
//! ## Design Principles
//!
//! 1. **Table-Driven Phases**: A `Board` never matches on its phase beyond
//!    the coarse class. Every phase-specific operation is routed through a
//!    `PhaseRegistry`, whose coverage is checked at startup.
//!
//! 2. **Reproducible Randomness**: Each board operation reseeds a local
//!    random stream from the board's stored seed, so identical boards give
//!    identical answers.
//!
//! 3. **Information Sets per Side**: Search keeps one tree per side, keyed
//!    only by that side's own decisions.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) board cloning via `im-rs`.
//!
//! - **Shared Trees**: Nodes are reference counted with atomic counters;
//!   workers expand children with check-and-create under a lock.
//!
//! - **Explicit Faults**: Integration defects surface as `BoardError` and
//!   stop the search instead of being counted as failed iterations.
//!
//! ## Modules
//!
//! - `core`: Sides, moves, random stream, configuration, errors
//! - `board`: Phases, side state, transient data, the `Board`
//! - `dispatch`: Phase to handler registry
//! - `phases`: Reference duel rules for every phase
//! - `games`: Starting position builders
//! - `mcts`: Two-tree parallel search

pub mod board;
pub mod core;
pub mod dispatch;
pub mod games;
pub mod mcts;
pub mod phases;

// Re-export commonly used types
pub use crate::core::{
    BoardError, Character, GameConfig, Move, MoveAction, RandomStream, Side, SideMap,
};

pub use crate::board::{Board, NextMoves, Phase, PhaseClass, PhaseData, SideState};

pub use crate::dispatch::{Operation, PhaseHandler, PhaseRegistry};

pub use crate::games::SkirmishBuilder;

pub use crate::phases::standard_registry;

pub use crate::mcts::{
    SearchConfig, SearchDriver, SearchEngine, SearchError, SearchStats, Statistic,
    StatisticSnapshot, TreeNode, TreeStats,
};
