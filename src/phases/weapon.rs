//! Equip weapon: confirm the selected weapon card.

use super::{acting_side, by_side, illegal};
use crate::board::{Board, Card, Phase, Weapon};
use crate::core::{BoardError, Move, MoveAction, RandomStream, Side};
use crate::dispatch::{Operation, PhaseHandler};

pub(super) const EQUIP_WEAPON: PhaseHandler = PhaseHandler {
    enumerate,
    propose,
    apply,
    display_name,
};

fn pending_card(board: &Board, side: Side) -> Option<Card> {
    let me = board.side(side);
    let slot = usize::from(board.transient.equip_weapon.hand_slot);
    me.hand
        .get(slot)
        .copied()
        .filter(|card| card.is_weapon() && card.cost <= me.stat.crystals)
}

fn enumerate(board: &Board, _: &mut RandomStream) -> Result<(Vec<Move>, bool), BoardError> {
    let side = acting_side(board, Operation::EnumerateMoves)?;
    let moves = match pending_card(board, side) {
        Some(_) => vec![Move::confirm_equip()],
        None => Vec::new(),
    };
    Ok((moves, true))
}

fn propose(board: &Board, _: &mut RandomStream, _: u64) -> Result<Move, BoardError> {
    let side = acting_side(board, Operation::ProposeGoodMove)?;
    pending_card(board, side)
        .map(|_| Move::confirm_equip())
        .ok_or(BoardError::NoLegalMove(board.phase()))
}

/// Replaces any equipped weapon.
fn apply(board: &mut Board, _: &mut RandomStream, mv: &Move) -> Result<(), BoardError> {
    let phase = board.phase();
    let side = acting_side(board, Operation::ApplyMove)?;
    if mv.action != MoveAction::ConfirmEquip {
        return Err(illegal(phase, mv));
    }
    let card = pending_card(board, side).ok_or_else(|| illegal(phase, mv))?;
    let weapon = Weapon::from_card(&card).ok_or_else(|| illegal(phase, mv))?;
    let slot = usize::from(board.transient.equip_weapon.hand_slot);

    let me = board.side_mut(side);
    me.stat.crystals -= card.cost;
    me.hand.remove(slot);
    me.hero.weapon = Some(weapon);

    board.set_state_to_choose_board_move(side);
    Ok(())
}

fn display_name(phase: Phase) -> &'static str {
    by_side(phase, "Player Equip Weapon", "Opponent Equip Weapon")
}
