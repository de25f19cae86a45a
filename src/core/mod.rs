//! Core types: sides, moves, the random stream, configuration, errors.
//!
//! These are the leaf building blocks shared by the board, the phase
//! handlers and the search engine.

pub mod config;
pub mod error;
pub mod moves;
pub mod rng;
pub mod side;

pub use config::GameConfig;
pub use error::BoardError;
pub use moves::{Character, Move, MoveAction};
pub use rng::RandomStream;
pub use side::{Side, SideMap};
