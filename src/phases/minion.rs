//! Put minion: choose where the selected minion card lands.

use super::{acting_side, by_side, illegal, pick};
use crate::board::{Board, Card, Minion, Phase};
use crate::core::{BoardError, Move, MoveAction, RandomStream, Side};
use crate::dispatch::{Operation, PhaseHandler};

pub(super) const PUT_MINION: PhaseHandler = PhaseHandler {
    enumerate,
    propose,
    apply,
    display_name,
};

/// The minion card selected in choose-board-move, if it is still playable.
fn pending_card(board: &Board, side: Side) -> Option<Card> {
    let me = board.side(side);
    let slot = usize::from(board.transient.put_minion.hand_slot);
    me.hand
        .get(slot)
        .copied()
        .filter(|card| card.is_minion() && card.cost <= me.stat.crystals)
        .filter(|_| me.minions.len() < board.config().max_minions)
}

fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    if pending_card(board, side).is_none() {
        return Vec::new();
    }
    let count = board.side(side).minions.len();
    (0..=count)
        .filter_map(|location| u8::try_from(location).ok())
        .map(Move::put_minion)
        .collect()
}

fn enumerate(board: &Board, _: &mut RandomStream) -> Result<(Vec<Move>, bool), BoardError> {
    let side = acting_side(board, Operation::EnumerateMoves)?;
    Ok((legal_moves(board, side), true))
}

fn propose(board: &Board, _: &mut RandomStream, seed: u64) -> Result<Move, BoardError> {
    let side = acting_side(board, Operation::ProposeGoodMove)?;
    pick(&legal_moves(board, side), seed).ok_or(BoardError::NoLegalMove(board.phase()))
}

fn apply(board: &mut Board, _: &mut RandomStream, mv: &Move) -> Result<(), BoardError> {
    let phase = board.phase();
    let side = acting_side(board, Operation::ApplyMove)?;
    if mv.action != MoveAction::PutMinion {
        return Err(illegal(phase, mv));
    }
    let card = pending_card(board, side).ok_or_else(|| illegal(phase, mv))?;
    let minion = Minion::from_card(&card).ok_or_else(|| illegal(phase, mv))?;
    let location = usize::from(mv.arg().ok_or_else(|| illegal(phase, mv))?);
    let slot = usize::from(board.transient.put_minion.hand_slot);

    let me = board.side_mut(side);
    if location > me.minions.len() {
        return Err(illegal(phase, mv));
    }
    me.stat.crystals -= card.cost;
    me.hand.remove(slot);
    me.minions.insert(location, minion);

    board.set_state_to_choose_board_move(side);
    Ok(())
}

fn display_name(phase: Phase) -> &'static str {
    by_side(phase, "Player Put Minion", "Opponent Put Minion")
}
