//! Per-side state: stat block, hand, deck, minions, hero.
//!
//! Lists use `im` persistent vectors so cloning a board is O(1) and a
//! mutated clone never shares visible state with its source.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::cards::{Card, Hero, Minion};
use crate::core::Side;

/// Turn counters and resources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stat {
    /// Turns this side has started.
    pub turn: u32,
    /// Crystals available this turn.
    pub crystals: u8,
    /// Crystal cap for this turn.
    pub total_crystals: u8,
    /// Damage dealt by the next empty-deck draw.
    pub fatigue: i32,
}

/// Everything one side owns on the board.
///
/// `side` is a non-owning handle naming the board slot this state occupies.
/// The board checks it before dispatching any operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideState {
    side: Side,
    pub stat: Stat,
    pub hand: Vector<Card>,
    pub deck: Vector<Card>,
    pub minions: Vector<Minion>,
    pub hero: Hero,
}

impl SideState {
    /// Create an empty side with a fresh hero.
    #[must_use]
    pub fn new(side: Side, hero_health: i32) -> Self {
        Self {
            side,
            stat: Stat::default(),
            hand: Vector::new(),
            deck: Vector::new(),
            minions: Vector::new(),
            hero: Hero::new(hero_health),
        }
    }

    /// The board slot this state belongs to.
    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Whether any minion of this side has taunt.
    #[must_use]
    pub fn has_taunt(&self) -> bool {
        self.minions.iter().any(|m| m.taunt)
    }

    /// Total attack this side could still deal this turn.
    #[must_use]
    pub fn available_attack(&self) -> i32 {
        let minions: i32 = self
            .minions
            .iter()
            .filter(|m| m.can_attack())
            .map(|m| m.attack)
            .sum();
        let hero = if self.hero.can_attack() {
            self.hero.attack()
        } else {
            0
        };
        minions + hero
    }

    /// Remove dead minions.
    pub fn clear_dead_minions(&mut self) {
        self.minions.retain(|m| !m.is_dead());
    }
}
