use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::data::PhaseData;
use super::phase::{Phase, PhaseClass};
use super::side_state::SideState;
use crate::core::{BoardError, GameConfig, Move, RandomStream, Side};
use crate::dispatch::PhaseRegistry;

/// A full game position.
///
/// Holds the current phase, both sides, the transient phase data, and the
/// seed the next operation will draw from. Equality and hashing cover the
/// phase, both sides, and the transient slice relevant to the phase; the
/// seed, config and registry are excluded.
///
/// Every operation reseeds a local `RandomStream` from the stored seed, so
/// the same board yields the same answers. `apply_move` then advances the
/// stored seed from that stream.
#[derive(Clone, Debug)]
pub struct Board {
    phase: Phase,
    pub player: SideState,
    pub opponent: SideState,
    pub transient: PhaseData,
    rng_seed: u64,
    config: Arc<GameConfig>,
    registry: Arc<PhaseRegistry>,
}

/// Lazy sequence of legal moves.
#[derive(Clone, Debug)]
pub struct NextMoves {
    inner: std::vec::IntoIter<Move>,
}

impl NextMoves {
    fn new(moves: Vec<Move>) -> Self {
        Self {
            inner: moves.into_iter(),
        }
    }
}

impl Iterator for NextMoves {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NextMoves {}

#[derive(Serialize, Deserialize)]
struct BoardSnapshot {
    phase: Phase,
    player: SideState,
    opponent: SideState,
    transient: PhaseData,
    rng_seed: u64,
    config: GameConfig,
}

impl Board {
    /// Create a board at `PlayerTurnStart` with seed 0.
    #[must_use]
    pub fn new(
        registry: Arc<PhaseRegistry>,
        config: Arc<GameConfig>,
        player: SideState,
        opponent: SideState,
    ) -> Self {
        Self {
            phase: Phase::PlayerTurnStart,
            player,
            opponent,
            transient: PhaseData::default(),
            rng_seed: 0,
            config,
            registry,
        }
    }

    #[must_use]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn phase_class(&self) -> PhaseClass {
        self.phase.class()
    }

    /// Move to `phase`. Used by phase handlers.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Seed the next operation will draw from.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng_seed = seed;
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<PhaseRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Borrow `side` mutably together with its opponent.
    pub fn sides_mut(&mut self, side: Side) -> (&mut SideState, &mut SideState) {
        match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        }
    }

    /// Check that each side state sits in its own slot.
    ///
    /// # Errors
    ///
    /// `BoardError::SideMismatch` naming the first misplaced state.
    pub fn validate_sides(&self) -> Result<(), BoardError> {
        for side in Side::ALL {
            let found = self.side(side).side();
            if found != side {
                return Err(BoardError::SideMismatch {
                    expected: side,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Name of the current phase, as reported by its handler.
    ///
    /// # Errors
    ///
    /// `SideMismatch` if a side state is misplaced, `UnhandledPhase` if the
    /// registry has no handler for the phase.
    pub fn display_name(&self) -> Result<&'static str, BoardError> {
        self.validate_sides()?;
        self.registry.display_name(self.phase)
    }

    /// The sentinel move of a game flow phase.
    ///
    /// The flag is always `false`: a flow transition may depend on chance.
    ///
    /// # Errors
    ///
    /// `NoMovesAfterTermination` on end phases, `NotFlowPhase` on decision
    /// phases.
    pub fn get_single_flow_move(&self) -> Result<(Move, bool), BoardError> {
        match self.phase.class() {
            PhaseClass::GameFlow => Ok((Move::game_flow(), false)),
            PhaseClass::GameEnd => Err(BoardError::NoMovesAfterTermination(self.phase)),
            PhaseClass::PlayerTurn | PhaseClass::OpponentTurn => {
                Err(BoardError::NotFlowPhase(self.phase))
            }
        }
    }

    /// Legal moves of the current decision phase, and whether the set is
    /// deterministic.
    ///
    /// # Errors
    ///
    /// `FlowPhase` on game flow phases, `NoMovesAfterTermination` on end
    /// phases, or whatever the phase handler reports.
    pub fn enumerate_moves(&self) -> Result<(NextMoves, bool), BoardError> {
        self.expect_decision_phase()?;
        self.validate_sides()?;

        let mut stream = RandomStream::new(self.rng_seed);
        let (moves, deterministic) = self
            .registry
            .enumerate_moves(self.phase, self, &mut stream)?;
        Ok((NextMoves::new(moves), deterministic))
    }

    /// One heuristically good move for the current phase.
    ///
    /// `seed` breaks ties between equally ranked candidates.
    ///
    /// # Errors
    ///
    /// `FlowPhase` on game flow phases, `NoMovesAfterTermination` on end
    /// phases, `NoLegalMove` if the phase has nothing to offer, or whatever
    /// else the phase handler reports.
    pub fn propose_good_move(&self, seed: u64) -> Result<Move, BoardError> {
        self.expect_decision_phase()?;
        self.validate_sides()?;
        let mut stream = RandomStream::new(self.rng_seed);
        self.registry
            .propose_good_move(self.phase, self, &mut stream, seed)
    }

    /// Apply `mv` to the current phase and advance the stored seed.
    ///
    /// # Errors
    ///
    /// `SideMismatch`, `UnhandledPhase`, `IllegalMove` for a move that does
    /// not belong to the position, or `NoMovesAfterTermination` on end
    /// phases.
    pub fn apply_move(&mut self, mv: &Move) -> Result<(), BoardError> {
        self.apply(mv).map(|_| ())
    }

    /// Apply `mv` and report whether the transition drew any randomness.
    ///
    /// # Errors
    ///
    /// Same as [`Board::apply_move`].
    pub fn apply_move_tracked(&mut self, mv: &Move) -> Result<bool, BoardError> {
        self.apply(mv)
    }

    fn expect_decision_phase(&self) -> Result<(), BoardError> {
        match self.phase.class() {
            PhaseClass::GameFlow => Err(BoardError::FlowPhase(self.phase)),
            PhaseClass::GameEnd => Err(BoardError::NoMovesAfterTermination(self.phase)),
            PhaseClass::PlayerTurn | PhaseClass::OpponentTurn => Ok(()),
        }
    }

    fn apply(&mut self, mv: &Move) -> Result<bool, BoardError> {
        self.validate_sides()?;
        let mut stream = RandomStream::new(self.rng_seed);
        stream.clear_invoked();

        let registry = Arc::clone(&self.registry);
        registry.apply_move(self.phase, self, &mut stream, mv)?;

        let used = stream.invoked();
        self.rng_seed = stream.next_seed();
        Ok(used)
    }

    /// Return `side` to its choose-board-move phase.
    pub fn set_state_to_choose_board_move(&mut self, side: Side) {
        self.phase = Phase::choose_board_move(side);
    }

    /// Encode the position (including seed and config) with bincode.
    ///
    /// # Errors
    ///
    /// `Snapshot` if encoding fails.
    pub fn snapshot(&self) -> Result<Vec<u8>, BoardError> {
        let snapshot = BoardSnapshot {
            phase: self.phase,
            player: self.player.clone(),
            opponent: self.opponent.clone(),
            transient: self.transient,
            rng_seed: self.rng_seed,
            config: GameConfig::clone(&self.config),
        };
        Ok(bincode::serialize(&snapshot)?)
    }

    /// Decode a position written by `snapshot`, attaching `registry`.
    ///
    /// # Errors
    ///
    /// `Snapshot` for bytes that do not decode, `SideMismatch` if the
    /// decoded side states are swapped.
    pub fn restore(bytes: &[u8], registry: Arc<PhaseRegistry>) -> Result<Self, BoardError> {
        let snapshot: BoardSnapshot = bincode::deserialize(bytes)?;
        let board = Self {
            phase: snapshot.phase,
            player: snapshot.player,
            opponent: snapshot.opponent,
            transient: snapshot.transient,
            rng_seed: snapshot.rng_seed,
            config: Arc::new(snapshot.config),
            registry,
        };
        board.validate_sides()?;
        Ok(board)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.phase == other.phase
            && self.player == other.player
            && self.opponent == other.opponent
            && self.transient.relevant(self.phase) == other.transient.relevant(other.phase)
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.phase.hash(state);
        self.player.hash(state);
        self.opponent.hash(state);
        self.transient.relevant(self.phase).hash(state);
    }
}
