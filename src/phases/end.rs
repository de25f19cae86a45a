//! Game end phases. Every operation except the name is a fault.

use crate::board::{Board, Phase};
use crate::core::{BoardError, Move, RandomStream};
use crate::dispatch::PhaseHandler;

pub(super) const GAME_END: PhaseHandler = PhaseHandler {
    enumerate,
    propose,
    apply,
    display_name,
};

fn enumerate(board: &Board, _: &mut RandomStream) -> Result<(Vec<Move>, bool), BoardError> {
    Err(BoardError::NoMovesAfterTermination(board.phase()))
}

fn propose(board: &Board, _: &mut RandomStream, _: u64) -> Result<Move, BoardError> {
    Err(BoardError::NoMovesAfterTermination(board.phase()))
}

fn apply(board: &mut Board, _: &mut RandomStream, _: &Move) -> Result<(), BoardError> {
    Err(BoardError::NoMovesAfterTermination(board.phase()))
}

fn display_name(phase: Phase) -> &'static str {
    match phase {
        Phase::PlayerWon => "Player Won",
        Phase::OpponentWon => "Opponent Won",
        _ => "Draw",
    }
}
