//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// Search configuration parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Maximum tree depth per side (0 = unlimited).
    /// Past this depth a side stops descending and plays heuristic moves.
    pub max_tree_depth: u32,

    /// Maximum playout moves before the position is scored heuristically
    /// (0 = play to the end of the game).
    pub max_simulation_depth: u32,

    /// Base seed for the per-worker random streams.
    /// Same seed and single worker produce deterministic searches.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            max_tree_depth: 0,
            max_simulation_depth: 200,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Create a new config with custom exploration constant.
    #[must_use]
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom max tree depth.
    #[must_use]
    pub fn with_max_tree_depth(mut self, depth: u32) -> Self {
        self.max_tree_depth = depth;
        self
    }

    /// Create a new config with custom playout length.
    #[must_use]
    pub fn with_max_simulation_depth(mut self, depth: u32) -> Self {
        self.max_simulation_depth = depth;
        self
    }
}
