//! Search policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to descend into (UCB1)
//! - `SimulationPolicy`: How a side picks moves once it has left its tree
//!   (heuristic proposals, uniform random)
//!
//! Values are always expressed from the Player's point of view in `[0, 1]`;
//! `side_value` converts to the perspective of either tree.

use std::sync::Arc;

use crate::board::{Board, Phase};
use crate::core::{BoardError, Move, RandomStream, Side};

use super::config::SearchConfig;
use super::node::TreeNode;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to descend into.
pub trait SelectionPolicy: Send + Sync {
    /// Select among the children of `node` reachable by a move in `legal`.
    ///
    /// Returns `None` if none of the legal moves has a child yet.
    fn select(
        &self,
        node: &TreeNode,
        legal: &[Move],
        config: &SearchConfig,
    ) -> Option<(Move, Arc<TreeNode>)>;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high value) with exploration (low visits).
/// Formula: Q(a) + c * sqrt(ln(N) / n(a))
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(
        &self,
        node: &TreeNode,
        legal: &[Move],
        config: &SearchConfig,
    ) -> Option<(Move, Arc<TreeNode>)> {
        let ln_parent = f64::from(node.visits().max(1)).ln();

        legal
            .iter()
            .filter_map(|mv| node.child(mv).map(|child| (mv, child)))
            .map(|(mv, child)| {
                let visits = child.visits();
                let score = if visits == 0 {
                    f64::INFINITY
                } else {
                    child.mean_value()
                        + config.exploration_constant * (ln_parent / f64::from(visits)).sqrt()
                };
                (mv, child, score)
            })
            .max_by(|(_, _, a), (_, _, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(mv, child, _)| (mv.clone(), child))
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for choosing moves outside the tree.
pub trait SimulationPolicy: Send + Sync {
    /// Choose a move for the current decision phase.
    ///
    /// Returns `Ok(None)` if the phase has no legal move.
    fn choose_move(
        &self,
        board: &Board,
        rng: &mut RandomStream,
    ) -> Result<Option<Move>, BoardError>;
}

/// Play the board's heuristic proposal, tie-broken by the stream.
#[derive(Clone, Debug, Default)]
pub struct HeuristicPlayout;

impl SimulationPolicy for HeuristicPlayout {
    fn choose_move(
        &self,
        board: &Board,
        rng: &mut RandomStream,
    ) -> Result<Option<Move>, BoardError> {
        match board.propose_good_move(rng.next_u64()) {
            Ok(mv) => Ok(Some(mv)),
            Err(BoardError::NoLegalMove(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Play uniformly random legal moves.
#[derive(Clone, Debug, Default)]
pub struct RandomPlayout;

impl SimulationPolicy for RandomPlayout {
    fn choose_move(
        &self,
        board: &Board,
        rng: &mut RandomStream,
    ) -> Result<Option<Move>, BoardError> {
        let (moves, _) = board.enumerate_moves()?;
        let moves: Vec<Move> = moves.collect();
        Ok(rng.choose(&moves).cloned())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Value of a finished game for the Player. `None` if not finished.
#[must_use]
pub fn terminal_value(phase: Phase) -> Option<f64> {
    match phase {
        Phase::PlayerWon => Some(1.0),
        Phase::OpponentWon => Some(0.0),
        Phase::Draw => Some(0.5),
        _ => None,
    }
}

/// Simple heuristic evaluation based on hero health.
///
/// Returns the Player's share of total remaining health.
#[must_use]
pub fn heuristic_value(board: &Board) -> f64 {
    let player = i64::from(board.player.hero.health.max(0));
    let opponent = i64::from(board.opponent.hero.health.max(0));
    let total = player + opponent;
    if total <= 0 {
        0.5
    } else {
        player as f64 / total as f64
    }
}

/// Convert a Player-perspective value to `side`'s perspective.
#[must_use]
pub fn side_value(value: f64, side: Side) -> f64 {
    match side {
        Side::Player => value,
        Side::Opponent => 1.0 - value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SkirmishBuilder;
    use crate::phases::standard_registry;

    fn make_test_node() -> TreeNode {
        let node = TreeNode::new();

        // Edge 0: high value, many visits
        let (a, _) = node.get_or_create_child(&Move::put_minion(0));
        for i in 0..100 {
            a.record(if i < 80 { 1.0 } else { 0.0 });
        }

        // Edge 1: lower value, fewer visits
        let (b, _) = node.get_or_create_child(&Move::put_minion(1));
        for i in 0..10 {
            b.record(if i < 7 { 1.0 } else { 0.0 });
        }

        // Edge 2: created but unvisited
        node.get_or_create_child(&Move::put_minion(2));

        for _ in 0..111 {
            node.record(0.5);
        }
        node
    }

    #[test]
    fn test_ucb1_selects_unvisited() {
        let node = make_test_node();
        let legal = [Move::put_minion(0), Move::put_minion(1), Move::put_minion(2)];

        let (mv, _) = UCB1.select(&node, &legal, &SearchConfig::default()).unwrap();
        assert_eq!(mv, Move::put_minion(2));
    }

    #[test]
    fn test_ucb1_respects_legal_moves() {
        let node = make_test_node();
        let legal = [Move::put_minion(1), Move::end_turn()];

        let (mv, _) = UCB1.select(&node, &legal, &SearchConfig::default()).unwrap();
        assert_eq!(mv, Move::put_minion(1));

        assert!(UCB1
            .select(&node, &[Move::end_turn()], &SearchConfig::default())
            .is_none());
    }

    #[test]
    fn test_ucb1_zero_exploration_is_greedy() {
        let node = make_test_node();
        let legal = [Move::put_minion(0), Move::put_minion(1)];
        let config = SearchConfig::default().with_exploration(0.0);

        let (mv, _) = UCB1.select(&node, &legal, &config).unwrap();
        assert_eq!(mv, Move::put_minion(0));
    }

    #[test]
    fn test_terminal_value() {
        assert_eq!(terminal_value(Phase::PlayerWon), Some(1.0));
        assert_eq!(terminal_value(Phase::OpponentWon), Some(0.0));
        assert_eq!(terminal_value(Phase::Draw), Some(0.5));
        assert_eq!(terminal_value(Phase::PlayerAttack), None);
    }

    #[test]
    fn test_side_value() {
        assert_eq!(side_value(0.75, Side::Player), 0.75);
        assert_eq!(side_value(0.75, Side::Opponent), 0.25);
    }

    #[test]
    fn test_heuristic_value() {
        let mut board = SkirmishBuilder::new(standard_registry().unwrap()).build(1);
        board.player.hero.health = 30;
        board.opponent.hero.health = 10;

        assert!((heuristic_value(&board) - 0.75).abs() < 0.01);

        board.player.hero.health = -3;
        board.opponent.hero.health = 0;
        assert_eq!(heuristic_value(&board), 0.5);
    }

    #[test]
    fn test_playouts_choose_legal_moves() {
        let mut board = SkirmishBuilder::new(standard_registry().unwrap()).build(3);
        let (flow, _) = board.get_single_flow_move().unwrap();
        board.apply_move(&flow).unwrap();
        let legal: Vec<Move> = board.enumerate_moves().unwrap().0.collect();
        let mut rng = RandomStream::new(5);

        let heuristic = HeuristicPlayout.choose_move(&board, &mut rng).unwrap().unwrap();
        let random = RandomPlayout.choose_move(&board, &mut rng).unwrap().unwrap();

        assert!(legal.contains(&heuristic));
        assert!(legal.contains(&random));
    }
}
