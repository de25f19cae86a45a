//! Game configuration.
//!
//! `GameConfig` carries the numeric limits the phase handlers enforce
//! (board size, hand size, crystal cap) and the defaults the starting-state
//! builder uses. It is shared by every board of one run.

use serde::{Deserialize, Serialize};

/// Rule limits and starting values for a duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Hero health at the start of the game.
    pub hero_health: i32,

    /// Crystal cap reached on later turns.
    pub max_crystals: u8,

    /// Maximum minions on one side of the board.
    pub max_minions: usize,

    /// Maximum cards in hand. Overdrawn cards are burned.
    pub max_hand_size: usize,

    /// Cards in each deck before the opening draw.
    pub deck_size: usize,

    /// Cards drawn before the first turn.
    pub starting_hand_size: usize,

    /// Turns each side may start before the game is declared a draw.
    pub turn_limit: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hero_health: 30,
            max_crystals: 10,
            max_minions: 7,
            max_hand_size: 10,
            deck_size: 30,
            starting_hand_size: 3,
            turn_limit: 40,
        }
    }
}

impl GameConfig {
    /// Set the starting hero health.
    #[must_use]
    pub fn with_hero_health(mut self, health: i32) -> Self {
        self.hero_health = health;
        self
    }

    /// Set the board limit.
    #[must_use]
    pub fn with_max_minions(mut self, max: usize) -> Self {
        self.max_minions = max;
        self
    }

    /// Set the deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the per-side turn limit.
    #[must_use]
    pub fn with_turn_limit(mut self, limit: u32) -> Self {
        self.turn_limit = limit;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }
}
