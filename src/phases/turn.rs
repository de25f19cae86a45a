//! Turn start and turn end.

use log::trace;

use super::{acting_side, by_side, illegal};
use crate::board::{Board, Phase};
use crate::core::{BoardError, Move, RandomStream};
use crate::dispatch::{Operation, PhaseHandler};

pub(super) const TURN_START: PhaseHandler = PhaseHandler {
    enumerate: flow_enumerate,
    propose: flow_propose,
    apply: turn_start_apply,
    display_name: turn_start_name,
};

pub(super) const TURN_END: PhaseHandler = PhaseHandler {
    enumerate: flow_enumerate,
    propose: flow_propose,
    apply: turn_end_apply,
    display_name: turn_end_name,
};

fn flow_enumerate(_: &Board, _: &mut RandomStream) -> Result<(Vec<Move>, bool), BoardError> {
    Ok((vec![Move::game_flow()], false))
}

fn flow_propose(_: &Board, _: &mut RandomStream, _: u64) -> Result<Move, BoardError> {
    Ok(Move::game_flow())
}

/// Refresh crystals, ready minions, draw one random card from the deck.
///
/// An empty deck deals increasing fatigue damage instead. A full hand
/// burns the drawn card.
fn turn_start_apply(
    board: &mut Board,
    random: &mut RandomStream,
    mv: &Move,
) -> Result<(), BoardError> {
    if !mv.is_game_flow() {
        return Err(illegal(board.phase(), mv));
    }
    let side = acting_side(board, Operation::ApplyMove)?;
    let turn_limit = board.config().turn_limit;
    let max_crystals = board.config().max_crystals;
    let max_hand_size = board.config().max_hand_size;

    let me = board.side_mut(side);
    me.stat.turn += 1;
    if me.stat.turn > turn_limit {
        trace!("{side} reached the turn limit");
        board.set_phase(Phase::Draw);
        return Ok(());
    }

    let total = u8::try_from(me.stat.turn)
        .unwrap_or(u8::MAX)
        .min(max_crystals);
    me.stat.total_crystals = total;
    me.stat.crystals = total;
    me.hero.attacked = false;
    for minion in me.minions.iter_mut() {
        minion.summoning_sick = false;
        minion.attacked = false;
    }

    if me.deck.is_empty() {
        me.stat.fatigue += 1;
        me.hero.health -= me.stat.fatigue;
        if me.hero.is_dead() {
            board.set_phase(Phase::won(side.opposite()));
            return Ok(());
        }
    } else {
        let index = random.gen_range_usize(0..me.deck.len());
        let card = me.deck.remove(index);
        if me.hand.len() < max_hand_size {
            me.hand.push_back(card);
        }
    }

    board.set_state_to_choose_board_move(side);
    Ok(())
}

fn turn_end_apply(board: &mut Board, _: &mut RandomStream, mv: &Move) -> Result<(), BoardError> {
    if !mv.is_game_flow() {
        return Err(illegal(board.phase(), mv));
    }
    let side = acting_side(board, Operation::ApplyMove)?;
    board.set_phase(Phase::turn_start(side.opposite()));
    Ok(())
}

fn turn_start_name(phase: Phase) -> &'static str {
    by_side(phase, "Player Turn Start", "Opponent Turn Start")
}

fn turn_end_name(phase: Phase) -> &'static str {
    by_side(phase, "Player Turn End", "Opponent Turn End")
}
