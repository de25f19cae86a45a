//! Choose board move: play a card, start an attack, or end the turn.

use super::{acting_side, by_side, illegal, pick};
use crate::board::{AttackData, Board, CardKind, EquipWeaponData, Phase, PutMinionData};
use crate::core::{BoardError, Character, Move, MoveAction, RandomStream, Side};
use crate::dispatch::{Operation, PhaseHandler};

pub(super) const CHOOSE_BOARD_MOVE: PhaseHandler = PhaseHandler {
    enumerate,
    propose,
    apply,
    display_name,
};

fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let me = board.side(side);
    let board_full = me.minions.len() >= board.config().max_minions;
    let mut moves = Vec::new();

    for (slot, card) in me.hand.iter().enumerate() {
        if card.cost > me.stat.crystals {
            continue;
        }
        let Ok(slot) = u8::try_from(slot) else {
            continue;
        };
        match card.kind {
            CardKind::Minion { .. } if !board_full => moves.push(Move::play_minion(slot)),
            CardKind::Weapon { .. } => moves.push(Move::equip_weapon(slot)),
            CardKind::Minion { .. } => {}
        }
    }

    for (index, minion) in me.minions.iter().enumerate() {
        if !minion.can_attack() {
            continue;
        }
        if let Ok(index) = u8::try_from(index) {
            moves.push(Move::attack(Character::Minion(index)));
        }
    }
    if me.hero.can_attack() {
        moves.push(Move::attack(Character::Hero));
    }

    moves.push(Move::end_turn());
    moves
}

fn enumerate(board: &Board, _: &mut RandomStream) -> Result<(Vec<Move>, bool), BoardError> {
    let side = acting_side(board, Operation::EnumerateMoves)?;
    Ok((legal_moves(board, side), true))
}

/// Lethal attacks first, then the most expensive playable card, then any
/// attack, then end turn.
fn propose(board: &Board, _: &mut RandomStream, seed: u64) -> Result<Move, BoardError> {
    let side = acting_side(board, Operation::ProposeGoodMove)?;
    let me = board.side(side);
    let foe = board.side(side.opposite());
    let moves = legal_moves(board, side);

    let attacks: Vec<Move> = moves
        .iter()
        .filter(|mv| mv.action == MoveAction::Attack)
        .cloned()
        .collect();
    if !attacks.is_empty() && !foe.has_taunt() && me.available_attack() >= foe.hero.health {
        if let Some(mv) = pick(&attacks, seed) {
            return Ok(mv);
        }
    }

    let cost_of = |mv: &Move| {
        mv.arg()
            .and_then(|slot| me.hand.get(usize::from(slot)))
            .map_or(0, |card| card.cost)
    };
    let plays: Vec<&Move> = moves
        .iter()
        .filter(|mv| matches!(mv.action, MoveAction::PlayMinion | MoveAction::EquipWeapon))
        .collect();
    if let Some(top) = plays.iter().map(|mv| cost_of(mv)).max() {
        let best: Vec<Move> = plays
            .into_iter()
            .filter(|mv| cost_of(mv) == top)
            .cloned()
            .collect();
        if let Some(mv) = pick(&best, seed) {
            return Ok(mv);
        }
    }

    Ok(pick(&attacks, seed).unwrap_or_else(Move::end_turn))
}

fn apply(board: &mut Board, _: &mut RandomStream, mv: &Move) -> Result<(), BoardError> {
    let phase = board.phase();
    let side = acting_side(board, Operation::ApplyMove)?;
    if !legal_moves(board, side).contains(mv) {
        return Err(illegal(phase, mv));
    }

    match mv.action {
        MoveAction::PlayMinion => {
            let hand_slot = mv.arg().ok_or_else(|| illegal(phase, mv))?;
            board.transient.put_minion = PutMinionData { hand_slot };
            board.set_phase(Phase::put_minion(side));
        }
        MoveAction::EquipWeapon => {
            let hand_slot = mv.arg().ok_or_else(|| illegal(phase, mv))?;
            board.transient.equip_weapon = EquipWeaponData { hand_slot };
            board.set_phase(Phase::equip_weapon(side));
        }
        MoveAction::Attack => {
            let attacker = mv.character().ok_or_else(|| illegal(phase, mv))?;
            board.transient.attack = AttackData { attacker };
            board.set_phase(Phase::attack(side));
        }
        MoveAction::EndTurn => board.set_phase(Phase::turn_end(side)),
        _ => return Err(illegal(phase, mv)),
    }
    Ok(())
}

fn display_name(phase: Phase) -> &'static str {
    by_side(phase, "Player Choose Board Move", "Opponent Choose Board Move")
}
