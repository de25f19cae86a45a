//! Reference phase handlers.
//!
//! A compact duel ruleset wired into a `PhaseRegistry`: turn start draws a
//! card and refreshes crystals; the acting side plays minions, equips
//! weapons and attacks; turn end hands over to the other side. A hero at
//! zero health ends the game, as does reaching the turn limit.
//!
//! Every handler works out the acting side from the board's phase, so one
//! set of functions serves both the Player and the Opponent variants.
//!
//! ## Usage
//!
//! ```
//! use ccg_search::phases::standard_registry;
//!
//! let registry = standard_registry().unwrap();
//! assert!(registry.verify().is_ok());
//! ```

mod attack;
mod choose;
mod end;
mod minion;
mod turn;
mod weapon;

use std::sync::Arc;

use log::debug;

use crate::board::{Board, Phase};
use crate::core::{BoardError, Move, Side};
use crate::dispatch::{Operation, PhaseRegistry};

/// Build the registry covering every declared phase.
///
/// # Errors
///
/// `BoardError::IncompleteRegistry` if any phase lacks a handler.
pub fn standard_registry() -> Result<Arc<PhaseRegistry>, BoardError> {
    let mut registry = PhaseRegistry::new();
    for side in Side::ALL {
        registry.register(Phase::turn_start(side), turn::TURN_START);
        registry.register(Phase::choose_board_move(side), choose::CHOOSE_BOARD_MOVE);
        registry.register(Phase::put_minion(side), minion::PUT_MINION);
        registry.register(Phase::equip_weapon(side), weapon::EQUIP_WEAPON);
        registry.register(Phase::attack(side), attack::ATTACK);
        registry.register(Phase::turn_end(side), turn::TURN_END);
    }
    for phase in [Phase::PlayerWon, Phase::OpponentWon, Phase::Draw] {
        registry.register(phase, end::GAME_END);
    }

    registry.verify()?;
    debug!("standard phase registry covers {} phases", Phase::ALL.len());
    Ok(Arc::new(registry))
}

fn acting_side(board: &Board, operation: Operation) -> Result<Side, BoardError> {
    board.phase().side().ok_or(BoardError::UnhandledPhase {
        phase: board.phase(),
        operation,
    })
}

fn illegal(phase: Phase, mv: &Move) -> BoardError {
    BoardError::IllegalMove {
        phase,
        mv: mv.clone(),
    }
}

/// Pick one candidate, using `seed` as the tie-break.
fn pick<T: Clone>(candidates: &[T], seed: u64) -> Option<T> {
    if candidates.is_empty() {
        return None;
    }
    let index = (seed % candidates.len() as u64) as usize;
    candidates.get(index).cloned()
}

fn by_side(phase: Phase, player: &'static str, opponent: &'static str) -> &'static str {
    match phase.side() {
        Some(Side::Opponent) => opponent,
        _ => player,
    }
}
