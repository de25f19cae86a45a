//! Starting positions.
//!
//! `SkirmishBuilder` deals two shuffled decks from a basic card pool and
//! produces a board at the Player's first turn start. Its `build(seed)`
//! is the board factory the search driver calls once per iteration.

mod skirmish;

pub use skirmish::{SkirmishBuilder, BASIC_POOL};
