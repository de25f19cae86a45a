//! Skirmish starting positions.

use std::sync::Arc;

use im::Vector;

use crate::board::{Board, Card, SideState};
use crate::core::{GameConfig, RandomStream, Side};
use crate::dispatch::PhaseRegistry;

/// Cards both decks are drawn from.
pub const BASIC_POOL: [Card; 12] = [
    Card::minion(1, 1, 1, 2),
    Card::minion(2, 1, 2, 1),
    Card::minion(3, 2, 3, 2),
    Card::taunt_minion(4, 2, 1, 4),
    Card::minion(5, 3, 3, 3),
    Card::taunt_minion(6, 3, 2, 5),
    Card::minion(7, 4, 4, 5),
    Card::minion(8, 5, 5, 4),
    Card::taunt_minion(9, 6, 4, 7),
    Card::minion(10, 7, 7, 7),
    Card::weapon(11, 2, 3, 2),
    Card::weapon(12, 4, 4, 2),
];

/// Builder for skirmish starting boards.
///
/// `build(seed)` is a pure function of the builder settings and the seed,
/// which makes it usable as a search board factory.
#[derive(Clone, Debug)]
pub struct SkirmishBuilder {
    registry: Arc<PhaseRegistry>,
    config: GameConfig,
}

impl SkirmishBuilder {
    pub fn new(registry: Arc<PhaseRegistry>) -> Self {
        Self {
            registry,
            config: GameConfig::default(),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hero_health(mut self, health: i32) -> Self {
        self.config.hero_health = health;
        self
    }

    pub fn deck_size(mut self, size: usize) -> Self {
        self.config.deck_size = size;
        self
    }

    pub fn starting_hand_size(mut self, size: usize) -> Self {
        self.config.starting_hand_size = size;
        self
    }

    pub fn max_minions(mut self, max: usize) -> Self {
        self.config.max_minions = max;
        self
    }

    pub fn turn_limit(mut self, limit: u32) -> Self {
        self.config.turn_limit = limit;
        self
    }

    /// Build a board at `PlayerTurnStart` with decks shuffled from `seed`.
    pub fn build(&self, seed: u64) -> Board {
        let mut random = RandomStream::new(seed);
        let config = Arc::new(self.config.clone());

        let mut deal = |side: Side| {
            let mut state = SideState::new(side, config.hero_health);
            let mut deck: Vec<Card> = (0..config.deck_size)
                .map(|i| BASIC_POOL[i % BASIC_POOL.len()])
                .collect();
            random.shuffle(&mut deck);

            let opening = config.starting_hand_size.min(deck.len());
            state.hand = deck.drain(..opening).collect::<Vector<Card>>();
            state.deck = deck.into_iter().collect();
            state
        };
        let player = deal(Side::Player);
        let opponent = deal(Side::Opponent);

        Board::new(Arc::clone(&self.registry), config, player, opponent)
            .with_rng_seed(random.next_seed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Phase;
    use crate::phases::standard_registry;

    fn builder() -> SkirmishBuilder {
        SkirmishBuilder::new(standard_registry().unwrap())
    }

    #[test]
    fn test_build_starting_position() {
        let board = builder().deck_size(10).starting_hand_size(3).build(42);

        assert_eq!(board.phase(), Phase::PlayerTurnStart);
        for side in Side::ALL {
            let state = board.side(side);
            assert_eq!(state.side(), side);
            assert_eq!(state.hand.len(), 3);
            assert_eq!(state.deck.len(), 7);
            assert_eq!(state.hero.health, 30);
        }
        assert!(board.validate_sides().is_ok());
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = builder();
        let a = builder.build(7);
        let b = builder.build(7);

        assert_eq!(a, b);
        assert_eq!(a.rng_seed(), b.rng_seed());
    }

    #[test]
    fn test_different_seeds_shuffle_differently() {
        let builder = builder();
        let differs = (1..20).any(|seed| builder.build(0) != builder.build(seed));
        assert!(differs);
    }

    #[test]
    fn test_builder_settings() {
        let board = builder().hero_health(12).max_minions(2).turn_limit(3).build(1);

        assert_eq!(board.player.hero.health, 12);
        assert_eq!(board.config().max_minions, 2);
        assert_eq!(board.config().turn_limit, 3);
    }
}
