//! Structural faults raised by the board and the phase dispatcher.
//!
//! These signal an integration defect (a phase without handlers, a query made
//! in the wrong kind of phase, a move that does not belong to the current
//! phase). They are never expected during a correctly wired search and must
//! propagate instead of being counted as failed iterations.

use thiserror::Error;

use super::moves::Move;
use super::side::Side;
use crate::board::Phase;
use crate::dispatch::Operation;

/// A structural fault.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The registry has no handler for this phase.
    #[error("unhandled phase {phase:?} in phase dispatcher ({operation})")]
    UnhandledPhase {
        /// Phase that was dispatched.
        phase: Phase,
        /// Operation that was requested.
        operation: Operation,
    },

    /// A registry was built without handlers for every declared phase.
    #[error("phase registry is missing handlers for {0:?}")]
    IncompleteRegistry(Vec<Phase>),

    /// A query was made on a finished game.
    #[error("game end phase {0:?} has no next move")]
    NoMovesAfterTermination(Phase),

    /// The single-flow-move query was made on a decision phase.
    #[error("phase {0:?} is not a game flow phase; enumerate its moves instead")]
    NotFlowPhase(Phase),

    /// A decision query was made on a game flow phase.
    #[error("phase {0:?} is a game flow phase; take its single flow move instead")]
    FlowPhase(Phase),

    /// A decision phase has nothing to propose.
    #[error("phase {0:?} has no legal move to propose")]
    NoLegalMove(Phase),

    /// The move does not apply to the current phase or position.
    #[error("move {mv:?} is not legal in phase {phase:?}")]
    IllegalMove {
        /// Phase the move was applied in.
        phase: Phase,
        /// The offending move.
        mv: Move,
    },

    /// A side state sits in the wrong slot of its board.
    #[error("side state for {found} found in the {expected} slot")]
    SideMismatch {
        /// Slot being validated.
        expected: Side,
        /// Handle stored in the side state.
        found: Side,
    },

    /// A board snapshot could not be encoded or decoded.
    #[error("board snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
}
