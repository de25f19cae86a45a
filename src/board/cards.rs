//! Card, minion, weapon and hero values.
//!
//! Cards carry only the numbers the reference phase handlers need: a cost
//! and either minion or weapon stats. There is no card text.

use serde::{Deserialize, Serialize};

/// Stats printed on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Minion { attack: i32, health: i32, taunt: bool },
    Weapon { attack: i32, durability: i32 },
}

/// A card in hand or deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: u16,
    pub cost: u8,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn minion(id: u16, cost: u8, attack: i32, health: i32) -> Self {
        Self {
            id,
            cost,
            kind: CardKind::Minion {
                attack,
                health,
                taunt: false,
            },
        }
    }

    #[must_use]
    pub const fn taunt_minion(id: u16, cost: u8, attack: i32, health: i32) -> Self {
        Self {
            id,
            cost,
            kind: CardKind::Minion {
                attack,
                health,
                taunt: true,
            },
        }
    }

    #[must_use]
    pub const fn weapon(id: u16, cost: u8, attack: i32, durability: i32) -> Self {
        Self {
            id,
            cost,
            kind: CardKind::Weapon { attack, durability },
        }
    }

    #[must_use]
    pub const fn is_minion(&self) -> bool {
        matches!(self.kind, CardKind::Minion { .. })
    }

    #[must_use]
    pub const fn is_weapon(&self) -> bool {
        matches!(self.kind, CardKind::Weapon { .. })
    }
}

/// A minion on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Minion {
    pub card_id: u16,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub taunt: bool,
    /// Played this turn; cannot attack yet.
    pub summoning_sick: bool,
    /// Already attacked this turn.
    pub attacked: bool,
}

impl Minion {
    /// Summon a minion from a card. Returns `None` for non-minion cards.
    #[must_use]
    pub fn from_card(card: &Card) -> Option<Self> {
        match card.kind {
            CardKind::Minion {
                attack,
                health,
                taunt,
            } => Some(Self {
                card_id: card.id,
                attack,
                health,
                max_health: health,
                taunt,
                summoning_sick: true,
                attacked: false,
            }),
            CardKind::Weapon { .. } => None,
        }
    }

    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.attack > 0 && !self.summoning_sick && !self.attacked
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// An equipped weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Weapon {
    pub card_id: u16,
    pub attack: i32,
    pub durability: i32,
}

impl Weapon {
    /// Equip from a card. Returns `None` for non-weapon cards.
    #[must_use]
    pub fn from_card(card: &Card) -> Option<Self> {
        match card.kind {
            CardKind::Weapon { attack, durability } => Some(Self {
                card_id: card.id,
                attack,
                durability,
            }),
            CardKind::Minion { .. } => None,
        }
    }
}

/// A side's hero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
    pub health: i32,
    pub weapon: Option<Weapon>,
    pub attacked: bool,
}

impl Hero {
    #[must_use]
    pub fn new(health: i32) -> Self {
        Self {
            health,
            weapon: None,
            attacked: false,
        }
    }

    /// Attack value; heroes only hit with a weapon.
    #[must_use]
    pub fn attack(&self) -> i32 {
        self.weapon.map_or(0, |w| w.attack)
    }

    #[must_use]
    pub fn can_attack(&self) -> bool {
        self.attack() > 0 && !self.attacked
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minion_from_card() {
        let card = Card::taunt_minion(3, 2, 1, 4);
        let minion = Minion::from_card(&card).unwrap();

        assert_eq!(minion.health, 4);
        assert_eq!(minion.max_health, 4);
        assert!(minion.taunt);
        assert!(minion.summoning_sick);
        assert!(!minion.can_attack());

        assert!(Minion::from_card(&Card::weapon(9, 2, 3, 2)).is_none());
    }

    #[test]
    fn test_hero_attack_requires_weapon() {
        let mut hero = Hero::new(30);
        assert!(!hero.can_attack());

        hero.weapon = Weapon::from_card(&Card::weapon(9, 2, 3, 2));
        assert_eq!(hero.attack(), 3);
        assert!(hero.can_attack());

        hero.attacked = true;
        assert!(!hero.can_attack());
    }
}
