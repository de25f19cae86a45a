//! Move representation: action discriminator + small argument payload.
//!
//! Moves are compositional: an action (the "verb") plus a few byte-sized
//! arguments (hand slots, board locations, characters). A move only means something in the phase that
//! produced it; phase handlers reject moves that do not belong to them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// The kind of command a move carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveAction {
    /// Sentinel move taken in game flow phases.
    GameFlow,
    /// Choose a minion card from hand (argument: hand slot).
    PlayMinion,
    /// Choose a weapon card from hand (argument: hand slot).
    EquipWeapon,
    /// Choose an attacker (argument: encoded character).
    Attack,
    /// End the current turn.
    EndTurn,
    /// Place the chosen minion (argument: board location).
    PutMinion,
    /// Confirm equipping the chosen weapon.
    ConfirmEquip,
    /// Pick the defender of an attack (argument: encoded character).
    ChooseTarget,
}

/// A hero or minion on one side of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    /// The side's hero.
    Hero,
    /// A minion by board index.
    Minion(u8),
}

impl Character {
    const HERO_CODE: u8 = u8::MAX;

    /// Encode as a single move argument.
    #[must_use]
    pub const fn encode(self) -> u8 {
        match self {
            Character::Hero => Self::HERO_CODE,
            Character::Minion(idx) => idx,
        }
    }

    /// Decode a move argument.
    #[must_use]
    pub const fn decode(code: u8) -> Self {
        if code == Self::HERO_CODE {
            Character::Hero
        } else {
            Character::Minion(code)
        }
    }
}

/// A complete move.
///
/// ## Example
///
/// ```
/// use ccg_search::core::{Character, Move, MoveAction};
///
/// let end = Move::end_turn();
/// assert!(end.args.is_empty());
///
/// let attack = Move::attack(Character::Minion(2));
/// assert_eq!(attack.action, MoveAction::Attack);
/// assert_eq!(attack.character(), Some(Character::Minion(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// What the move does.
    pub action: MoveAction,

    /// Phase-specific payload.
    /// SmallVec keeps the common 0-2 arguments inline.
    pub args: SmallVec<[u8; 2]>,
}

impl Move {
    /// Create a move with no arguments.
    #[must_use]
    pub fn new(action: MoveAction) -> Self {
        Self {
            action,
            args: SmallVec::new(),
        }
    }

    /// Create a move with the given arguments.
    #[must_use]
    pub fn with_args(action: MoveAction, args: &[u8]) -> Self {
        Self {
            action,
            args: SmallVec::from_slice(args),
        }
    }

    /// The sentinel move of game flow phases.
    #[must_use]
    pub fn game_flow() -> Self {
        Self::new(MoveAction::GameFlow)
    }

    #[must_use]
    pub fn end_turn() -> Self {
        Self::new(MoveAction::EndTurn)
    }

    #[must_use]
    pub fn play_minion(hand_slot: u8) -> Self {
        Self::with_args(MoveAction::PlayMinion, &[hand_slot])
    }

    #[must_use]
    pub fn equip_weapon(hand_slot: u8) -> Self {
        Self::with_args(MoveAction::EquipWeapon, &[hand_slot])
    }

    #[must_use]
    pub fn attack(attacker: Character) -> Self {
        Self::with_args(MoveAction::Attack, &[attacker.encode()])
    }

    #[must_use]
    pub fn put_minion(location: u8) -> Self {
        Self::with_args(MoveAction::PutMinion, &[location])
    }

    #[must_use]
    pub fn confirm_equip() -> Self {
        Self::new(MoveAction::ConfirmEquip)
    }

    #[must_use]
    pub fn choose_target(defender: Character) -> Self {
        Self::with_args(MoveAction::ChooseTarget, &[defender.encode()])
    }

    /// The first argument, if any.
    #[must_use]
    pub fn arg(&self) -> Option<u8> {
        self.args.first().copied()
    }

    /// The first argument decoded as a character.
    #[must_use]
    pub fn character(&self) -> Option<Character> {
        self.arg().map(Character::decode)
    }

    /// Whether this is the game flow sentinel.
    #[must_use]
    pub fn is_game_flow(&self) -> bool {
        self.action == MoveAction::GameFlow
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.action)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_no_args() {
        let mv = Move::end_turn();

        assert_eq!(mv.action, MoveAction::EndTurn);
        assert!(mv.args.is_empty());
        assert_eq!(mv.arg(), None);
    }

    #[test]
    fn test_move_with_args() {
        let mv = Move::put_minion(3);

        assert_eq!(mv.action, MoveAction::PutMinion);
        assert_eq!(mv.arg(), Some(3));
        assert_eq!(format!("{}", mv), "PutMinion 3");
    }

    #[test]
    fn test_character_encoding() {
        assert_eq!(Character::decode(Character::Hero.encode()), Character::Hero);
        assert_eq!(
            Character::decode(Character::Minion(4).encode()),
            Character::Minion(4)
        );
        assert_eq!(
            Move::choose_target(Character::Hero).character(),
            Some(Character::Hero)
        );
    }

    #[test]
    fn test_move_equality() {
        assert_eq!(Move::play_minion(1), Move::play_minion(1));
        assert_ne!(Move::play_minion(1), Move::play_minion(2));
        assert_ne!(Move::play_minion(1), Move::equip_weapon(1));
    }

    #[test]
    fn test_move_hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let hash = |m: &Move| {
            let mut h = DefaultHasher::new();
            m.hash(&mut h);
            h.finish()
        };

        assert_eq!(hash(&Move::attack(Character::Hero)), hash(&Move::attack(Character::Hero)));
        assert_ne!(hash(&Move::attack(Character::Hero)), hash(&Move::attack(Character::Minion(0))));
    }

    #[test]
    fn test_move_serialization() {
        let mv = Move::choose_target(Character::Minion(1));
        let json = serde_json::to_string(&mv).unwrap();
        let deserialized: Move = serde_json::from_str(&json).unwrap();

        assert_eq!(mv, deserialized);
    }
}
