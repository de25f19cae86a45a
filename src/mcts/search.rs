//! Single-iteration search over two information-set trees.
//!
//! Each side owns a tree whose nodes are that side's own decision points.
//! A tree's cursor advances only on its side's decisions; game flow moves
//! are applied directly and never create nodes. Each side descends its tree
//! by UCB1 until it expands one new node, after which it plays moves from
//! the simulation policy. When the game ends (or the playout budget runs
//! out) the value is backed up along both paths, root first.

use std::sync::Arc;
use std::time::Instant;

use log::trace;

use crate::board::{Board, PhaseClass};
use crate::core::{BoardError, Move, RandomStream, Side, SideMap};

use super::config::SearchConfig;
use super::node::TreeNode;
use super::policy::{
    heuristic_value, side_value, terminal_value, HeuristicPlayout, SelectionPolicy,
    SimulationPolicy, UCB1,
};
use super::stats::SearchStats;

/// Per-worker search context bound to a pair of shared trees.
pub struct SearchEngine {
    /// Tree roots, one per side.
    trees: SideMap<Arc<TreeNode>>,

    /// Search configuration.
    config: SearchConfig,

    /// Worker stream for board seeds, tie-breaks and playouts.
    rng: RandomStream,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy>,

    /// Search statistics.
    stats: SearchStats,
}

impl SearchEngine {
    /// Create an engine over `trees` drawing from `rng`.
    pub fn new(trees: SideMap<Arc<TreeNode>>, config: SearchConfig, rng: RandomStream) -> Self {
        Self {
            trees,
            config,
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(HeuristicPlayout),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn root(&self, side: Side) -> &Arc<TreeNode> {
        &self.trees[side]
    }

    /// Run one iteration on a fresh board from `factory`.
    ///
    /// `Ok(true)` on success, `Ok(false)` if a decision phase had no legal
    /// move. Structural faults are returned as errors.
    pub fn iterate<F>(&mut self, factory: &F) -> Result<bool, BoardError>
    where
        F: Fn(u64) -> Board + ?Sized,
    {
        let seed = self.rng.next_u64();
        let mut board = factory(seed);
        self.iterate_from(&mut board)
    }

    /// Run one iteration starting from `board`, which is consumed in place.
    pub fn iterate_from(&mut self, board: &mut Board) -> Result<bool, BoardError> {
        let start = Instant::now();
        let mut paths: SideMap<Vec<Arc<TreeNode>>> =
            SideMap::new(|side| vec![Arc::clone(&self.trees[side])]);
        let mut in_tree: SideMap<bool> = SideMap::with_value(true);
        let mut playout_moves: u32 = 0;

        let value = loop {
            let side = match board.phase_class() {
                PhaseClass::GameEnd => match terminal_value(board.phase()) {
                    Some(value) => break value,
                    None => return Err(BoardError::NoMovesAfterTermination(board.phase())),
                },
                PhaseClass::GameFlow => {
                    let (mv, _) = board.get_single_flow_move()?;
                    if board.apply_move_tracked(&mv)? {
                        self.stats.chance_transitions += 1;
                    }
                    continue;
                }
                PhaseClass::PlayerTurn => Side::Player,
                PhaseClass::OpponentTurn => Side::Opponent,
            };

            let depth_limited = self.config.max_tree_depth > 0
                && paths[side].len() > self.config.max_tree_depth as usize;
            if in_tree[side] && !depth_limited {
                match self.descend(board, &mut paths[side])? {
                    Descent::Expanded => in_tree[side] = false,
                    Descent::Selected => {}
                    Descent::NoMoves => return Ok(false),
                }
                continue;
            }
            in_tree[side] = false;

            if self.config.max_simulation_depth > 0
                && playout_moves >= self.config.max_simulation_depth
            {
                break heuristic_value(board);
            }
            let Some(mv) = self.simulation.choose_move(board, &mut self.rng)? else {
                return Ok(false);
            };
            board.apply_move(&mv)?;
            playout_moves += 1;
        };

        for (side, path) in paths.iter() {
            let value = side_value(value, side);
            for node in path {
                node.record(value);
            }
            let depth = u32::try_from(path.len() - 1).unwrap_or(u32::MAX);
            self.stats.max_depth = self.stats.max_depth.max(depth);
        }
        self.stats.iterations += 1;
        self.stats.simulation_moves += u64::from(playout_moves);
        self.stats.time_us += start.elapsed().as_micros() as u64;
        Ok(true)
    }

    /// One in-tree step for the side to move.
    fn descend(
        &mut self,
        board: &mut Board,
        path: &mut Vec<Arc<TreeNode>>,
    ) -> Result<Descent, BoardError> {
        let (moves, _) = board.enumerate_moves()?;
        let moves: Vec<Move> = moves.collect();
        if moves.is_empty() {
            return Ok(Descent::NoMoves);
        }
        let Some(node) = path.last().map(Arc::clone) else {
            return Ok(Descent::NoMoves);
        };

        let unexpanded: Vec<&Move> = moves.iter().filter(|mv| node.child(mv).is_none()).collect();
        let (mv, child, descent) = if let Some(&mv) = self.rng.choose(&unexpanded) {
            let (child, created) = node.get_or_create_child(mv);
            if created {
                self.stats.nodes_expanded += 1;
            }
            (mv.clone(), child, Descent::Expanded)
        } else {
            match self.selection.select(&node, &moves, &self.config) {
                Some((mv, child)) => (mv, child, Descent::Selected),
                None => return Ok(Descent::NoMoves),
            }
        };

        if board.apply_move_tracked(&mv)? {
            child.mark_chance();
            self.stats.chance_transitions += 1;
        }
        trace!("descend {} to depth {}", mv, path.len());
        path.push(child);
        Ok(descent)
    }
}

enum Descent {
    Expanded,
    Selected,
    NoMoves,
}
