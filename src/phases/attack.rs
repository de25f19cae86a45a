//! Attack: choose a defender for the selected attacker and trade damage.
//!
//! Taunt minions must be attacked first. A defending hero deals no damage
//! back. A hero attack spends one weapon durability.

use super::{acting_side, by_side, illegal, pick};
use crate::board::{Board, Phase, SideState};
use crate::core::{BoardError, Character, Move, MoveAction, RandomStream, Side};
use crate::dispatch::{Operation, PhaseHandler};

pub(super) const ATTACK: PhaseHandler = PhaseHandler {
    enumerate,
    propose,
    apply,
    display_name,
};

fn attack_of(state: &SideState, character: Character) -> Option<i32> {
    match character {
        Character::Hero => Some(state.hero.attack()),
        Character::Minion(index) => state.minions.get(usize::from(index)).map(|m| m.attack),
    }
}

fn health_of(state: &SideState, character: Character) -> Option<i32> {
    match character {
        Character::Hero => Some(state.hero.health),
        Character::Minion(index) => state.minions.get(usize::from(index)).map(|m| m.health),
    }
}

fn can_attack(state: &SideState, attacker: Character) -> bool {
    match attacker {
        Character::Hero => state.hero.can_attack(),
        Character::Minion(index) => state
            .minions
            .get(usize::from(index))
            .is_some_and(|m| m.can_attack()),
    }
}

fn targets(board: &Board, side: Side) -> Vec<Character> {
    if !can_attack(board.side(side), board.transient.attack.attacker) {
        return Vec::new();
    }
    let foe = board.side(side.opposite());
    let taunt = foe.has_taunt();

    let mut targets = Vec::new();
    if !taunt {
        targets.push(Character::Hero);
    }
    for (index, minion) in foe.minions.iter().enumerate() {
        if taunt && !minion.taunt {
            continue;
        }
        if let Ok(index) = u8::try_from(index) {
            targets.push(Character::Minion(index));
        }
    }
    targets
}

fn enumerate(board: &Board, _: &mut RandomStream) -> Result<(Vec<Move>, bool), BoardError> {
    let side = acting_side(board, Operation::EnumerateMoves)?;
    let moves = targets(board, side)
        .into_iter()
        .map(Move::choose_target)
        .collect();
    Ok((moves, true))
}

/// Go face for lethal, else take the best trade that the attacker
/// survives, else go face, else any target.
fn propose(board: &Board, _: &mut RandomStream, seed: u64) -> Result<Move, BoardError> {
    let side = acting_side(board, Operation::ProposeGoodMove)?;
    let targets = targets(board, side);
    let me = board.side(side);
    let foe = board.side(side.opposite());
    let attacker = board.transient.attack.attacker;
    let power = attack_of(me, attacker).unwrap_or(0);
    let durability = health_of(me, attacker).unwrap_or(0);

    let face = targets.contains(&Character::Hero);
    if face && power >= foe.hero.health {
        return Ok(Move::choose_target(Character::Hero));
    }

    let trade = targets
        .iter()
        .copied()
        .filter(|&target| {
            let health = health_of(foe, target).unwrap_or(0);
            let counter = attack_of(foe, target).unwrap_or(0);
            target != Character::Hero && power >= health && counter < durability
        })
        .max_by_key(|&target| attack_of(foe, target).unwrap_or(0));
    if let Some(target) = trade {
        return Ok(Move::choose_target(target));
    }
    if face {
        return Ok(Move::choose_target(Character::Hero));
    }

    pick(&targets, seed)
        .map(Move::choose_target)
        .ok_or(BoardError::NoLegalMove(board.phase()))
}

fn apply(board: &mut Board, _: &mut RandomStream, mv: &Move) -> Result<(), BoardError> {
    let phase = board.phase();
    let side = acting_side(board, Operation::ApplyMove)?;
    if mv.action != MoveAction::ChooseTarget {
        return Err(illegal(phase, mv));
    }
    let target = mv.character().ok_or_else(|| illegal(phase, mv))?;
    if !targets(board, side).contains(&target) {
        return Err(illegal(phase, mv));
    }
    let attacker = board.transient.attack.attacker;

    let (me, foe) = board.sides_mut(side);
    let power = attack_of(me, attacker).ok_or_else(|| illegal(phase, mv))?;
    let counter = match target {
        Character::Hero => 0,
        Character::Minion(_) => attack_of(foe, target).ok_or_else(|| illegal(phase, mv))?,
    };

    match target {
        Character::Hero => foe.hero.health -= power,
        Character::Minion(index) => {
            if let Some(defender) = foe.minions.get_mut(usize::from(index)) {
                defender.health -= power;
            }
        }
    }
    match attacker {
        Character::Hero => {
            me.hero.health -= counter;
            me.hero.attacked = true;
            if let Some(weapon) = me.hero.weapon.as_mut() {
                weapon.durability -= 1;
                if weapon.durability <= 0 {
                    me.hero.weapon = None;
                }
            }
        }
        Character::Minion(index) => {
            if let Some(minion) = me.minions.get_mut(usize::from(index)) {
                minion.health -= counter;
                minion.attacked = true;
            }
        }
    }
    me.clear_dead_minions();
    foe.clear_dead_minions();

    let next = match (me.hero.is_dead(), foe.hero.is_dead()) {
        (true, true) => Phase::Draw,
        (false, true) => Phase::won(side),
        (true, false) => Phase::won(side.opposite()),
        (false, false) => Phase::choose_board_move(side),
    };
    board.set_phase(next);
    Ok(())
}

fn display_name(phase: Phase) -> &'static str {
    by_side(phase, "Player Attack", "Opponent Attack")
}
