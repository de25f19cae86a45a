use std::fmt;

use rustc_hash::FxHashMap;

use crate::board::{Board, Phase};
use crate::core::{BoardError, Move, RandomStream};

/// Enumerate the legal moves of a decision phase.
///
/// Returns the moves and whether the set is deterministic (independent of
/// the random stream).
pub type EnumerateFn = fn(&Board, &mut RandomStream) -> Result<(Vec<Move>, bool), BoardError>;

/// Propose one heuristically good move. The `u64` is a tie-break seed.
pub type ProposeFn = fn(&Board, &mut RandomStream, u64) -> Result<Move, BoardError>;

/// Mutate the board by applying a move.
pub type ApplyFn = fn(&mut Board, &mut RandomStream, &Move) -> Result<(), BoardError>;

/// Human-readable name of the dispatched phase.
pub type DisplayNameFn = fn(Phase) -> &'static str;

/// The four operations a phase handler provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    EnumerateMoves,
    ProposeGoodMove,
    ApplyMove,
    DisplayName,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::EnumerateMoves,
        Operation::ProposeGoodMove,
        Operation::ApplyMove,
        Operation::DisplayName,
    ];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::EnumerateMoves => "enumerate moves",
            Operation::ProposeGoodMove => "propose good move",
            Operation::ApplyMove => "apply move",
            Operation::DisplayName => "display name",
        };
        f.write_str(name)
    }
}

/// Handler functions for one phase.
#[derive(Clone, Copy)]
pub struct PhaseHandler {
    pub enumerate: EnumerateFn,
    pub propose: ProposeFn,
    pub apply: ApplyFn,
    pub display_name: DisplayNameFn,
}

impl fmt::Debug for PhaseHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseHandler").finish_non_exhaustive()
    }
}

/// Phase to handler table.
#[derive(Clone, Debug, Default)]
pub struct PhaseRegistry {
    handlers: FxHashMap<Phase, PhaseHandler>,
}

impl PhaseRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for `phase`, replacing any previous one.
    #[must_use]
    pub fn with_handler(mut self, phase: Phase, handler: PhaseHandler) -> Self {
        self.register(phase, handler);
        self
    }

    /// Register the handler for `phase`, replacing any previous one.
    pub fn register(&mut self, phase: Phase, handler: PhaseHandler) {
        self.handlers.insert(phase, handler);
    }

    #[must_use]
    pub fn contains(&self, phase: Phase) -> bool {
        self.handlers.contains_key(&phase)
    }

    /// Phases declared in `Phase::ALL` that have no handler.
    #[must_use]
    pub fn missing(&self) -> Vec<Phase> {
        Phase::ALL
            .into_iter()
            .filter(|phase| !self.handlers.contains_key(phase))
            .collect()
    }

    /// Check that every declared phase has a handler.
    ///
    /// # Errors
    ///
    /// `BoardError::IncompleteRegistry` listing the uncovered phases.
    pub fn verify(&self) -> Result<(), BoardError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BoardError::IncompleteRegistry(missing))
        }
    }

    /// Look up the handler for an operation on `phase`.
    ///
    /// # Errors
    ///
    /// `BoardError::UnhandledPhase` if `phase` has no handler.
    pub fn resolve(&self, phase: Phase, operation: Operation) -> Result<&PhaseHandler, BoardError> {
        self.handlers
            .get(&phase)
            .ok_or(BoardError::UnhandledPhase { phase, operation })
    }

    /// Route an enumerate-moves query for `phase`.
    pub fn enumerate_moves(
        &self,
        phase: Phase,
        board: &Board,
        random: &mut RandomStream,
    ) -> Result<(Vec<Move>, bool), BoardError> {
        let handler = self.resolve(phase, Operation::EnumerateMoves)?;
        (handler.enumerate)(board, random)
    }

    /// Route a propose-good-move query for `phase`.
    pub fn propose_good_move(
        &self,
        phase: Phase,
        board: &Board,
        random: &mut RandomStream,
        seed: u64,
    ) -> Result<Move, BoardError> {
        let handler = self.resolve(phase, Operation::ProposeGoodMove)?;
        (handler.propose)(board, random, seed)
    }

    /// Route an apply-move mutation for `phase`.
    pub fn apply_move(
        &self,
        phase: Phase,
        board: &mut Board,
        random: &mut RandomStream,
        mv: &Move,
    ) -> Result<(), BoardError> {
        let apply = self.resolve(phase, Operation::ApplyMove)?.apply;
        apply(board, random, mv)
    }

    /// Route a display-name query for `phase`.
    pub fn display_name(&self, phase: Phase) -> Result<&'static str, BoardError> {
        let handler = self.resolve(phase, Operation::DisplayName)?;
        Ok((handler.display_name)(phase))
    }
}
