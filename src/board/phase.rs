//! Turn phases and their coarse classes.
//!
//! Every phase belongs to exactly one `PhaseClass`. Decision phases come in a
//! Player and an Opponent variant; turn start and turn end are game flow
//! phases resolved by a single sentinel move; the end phases are terminal.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Coarse category of a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseClass {
    /// The player chooses among legal moves.
    PlayerTurn,
    /// The opponent chooses among legal moves.
    OpponentTurn,
    /// The game advances on its own; the outcome may depend on chance.
    GameFlow,
    /// The game is over.
    GameEnd,
}

/// One discrete step of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurnStart,
    PlayerChooseBoardMove,
    PlayerPutMinion,
    PlayerEquipWeapon,
    PlayerAttack,
    PlayerTurnEnd,
    OpponentTurnStart,
    OpponentChooseBoardMove,
    OpponentPutMinion,
    OpponentEquipWeapon,
    OpponentAttack,
    OpponentTurnEnd,
    PlayerWon,
    OpponentWon,
    Draw,
}

impl Phase {
    /// Every declared phase. Registries are checked against this list.
    pub const ALL: [Phase; 15] = [
        Phase::PlayerTurnStart,
        Phase::PlayerChooseBoardMove,
        Phase::PlayerPutMinion,
        Phase::PlayerEquipWeapon,
        Phase::PlayerAttack,
        Phase::PlayerTurnEnd,
        Phase::OpponentTurnStart,
        Phase::OpponentChooseBoardMove,
        Phase::OpponentPutMinion,
        Phase::OpponentEquipWeapon,
        Phase::OpponentAttack,
        Phase::OpponentTurnEnd,
        Phase::PlayerWon,
        Phase::OpponentWon,
        Phase::Draw,
    ];

    /// The class this phase belongs to.
    #[must_use]
    pub const fn class(self) -> PhaseClass {
        match self {
            Phase::PlayerTurnStart
            | Phase::PlayerTurnEnd
            | Phase::OpponentTurnStart
            | Phase::OpponentTurnEnd => PhaseClass::GameFlow,
            Phase::PlayerChooseBoardMove
            | Phase::PlayerPutMinion
            | Phase::PlayerEquipWeapon
            | Phase::PlayerAttack => PhaseClass::PlayerTurn,
            Phase::OpponentChooseBoardMove
            | Phase::OpponentPutMinion
            | Phase::OpponentEquipWeapon
            | Phase::OpponentAttack => PhaseClass::OpponentTurn,
            Phase::PlayerWon | Phase::OpponentWon | Phase::Draw => PhaseClass::GameEnd,
        }
    }

    /// The side whose turn this phase belongs to. `None` for end phases.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Phase::PlayerTurnStart
            | Phase::PlayerChooseBoardMove
            | Phase::PlayerPutMinion
            | Phase::PlayerEquipWeapon
            | Phase::PlayerAttack
            | Phase::PlayerTurnEnd => Some(Side::Player),
            Phase::OpponentTurnStart
            | Phase::OpponentChooseBoardMove
            | Phase::OpponentPutMinion
            | Phase::OpponentEquipWeapon
            | Phase::OpponentAttack
            | Phase::OpponentTurnEnd => Some(Side::Opponent),
            Phase::PlayerWon | Phase::OpponentWon | Phase::Draw => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self.class(), PhaseClass::GameEnd)
    }

    #[must_use]
    pub const fn turn_start(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerTurnStart,
            Side::Opponent => Phase::OpponentTurnStart,
        }
    }

    #[must_use]
    pub const fn choose_board_move(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerChooseBoardMove,
            Side::Opponent => Phase::OpponentChooseBoardMove,
        }
    }

    #[must_use]
    pub const fn put_minion(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerPutMinion,
            Side::Opponent => Phase::OpponentPutMinion,
        }
    }

    #[must_use]
    pub const fn equip_weapon(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerEquipWeapon,
            Side::Opponent => Phase::OpponentEquipWeapon,
        }
    }

    #[must_use]
    pub const fn attack(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerAttack,
            Side::Opponent => Phase::OpponentAttack,
        }
    }

    #[must_use]
    pub const fn turn_end(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerTurnEnd,
            Side::Opponent => Phase::OpponentTurnEnd,
        }
    }

    /// The end phase in which `side` has won.
    #[must_use]
    pub const fn won(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerWon,
            Side::Opponent => Phase::OpponentWon,
        }
    }
}

impl PhaseClass {
    /// The deciding side for a decision class.
    #[must_use]
    pub const fn mover(self) -> Option<Side> {
        match self {
            PhaseClass::PlayerTurn => Some(Side::Player),
            PhaseClass::OpponentTurn => Some(Side::Opponent),
            PhaseClass::GameFlow | PhaseClass::GameEnd => None,
        }
    }
}
