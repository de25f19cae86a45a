//! Search integration tests using skirmish boards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ccg_search::board::{Board, Phase};
use ccg_search::core::{BoardError, Move, Side};
use ccg_search::dispatch::{Operation, PhaseRegistry};
use ccg_search::games::SkirmishBuilder;
use ccg_search::mcts::{SearchConfig, SearchDriver, SearchError, SilentProgress, TreeNode};
use ccg_search::phases::standard_registry;

fn builder() -> SkirmishBuilder {
    SkirmishBuilder::new(standard_registry().unwrap()).deck_size(12)
}

fn driver(seed: u64) -> SearchDriver {
    SearchDriver::new(SearchConfig::default().with_seed(seed)).with_progress(SilentProgress)
}

fn visit_map(driver: &SearchDriver, side: Side) -> HashMap<Move, u32> {
    driver.move_visits(side).into_iter().collect()
}

fn assert_visits_bounded(root: &Arc<TreeNode>) {
    let mut stack = vec![Arc::clone(root)];
    while let Some(node) = stack.pop() {
        let children = node.children();
        let sum: u64 = children.iter().map(|(_, c)| u64::from(c.visits())).sum();
        assert!(sum <= u64::from(node.visits()));
        for (_, child) in &children {
            assert!(child.visits() <= node.visits());
        }
        stack.extend(children.into_iter().map(|(_, c)| c));
    }
}

// =============================================================================
// Counting
// =============================================================================

#[test]
fn test_iteration_totals_match_workers() {
    let builder = builder();
    let mut driver = driver(1);

    driver
        .run_iterations(30, 4, &|seed| builder.build(seed))
        .unwrap();

    let stats = driver.statistic();
    assert_eq!(stats.succeeded, 120);
    assert_eq!(stats.failed, 0);
    for side in Side::ALL {
        assert_eq!(u64::from(driver.root(side).visits()), stats.succeeded);
    }
}

#[test]
fn test_runs_accumulate() {
    let builder = builder();
    let mut driver = driver(2);

    driver.run_iterations(10, 2, &|seed| builder.build(seed)).unwrap();
    driver.run_iterations(10, 2, &|seed| builder.build(seed)).unwrap();

    assert_eq!(driver.statistic().succeeded, 40);
    assert_eq!(driver.root(Side::Opponent).visits(), 40);
    assert_eq!(driver.search_stats().iterations, 40);
}

#[test]
fn test_trees_hold_complementary_values() {
    let builder = builder();
    let mut driver = driver(3);
    driver.run_iterations(50, 2, &|seed| builder.build(seed)).unwrap();

    let player = driver.root(Side::Player);
    let opponent = driver.root(Side::Opponent);
    let visits = f64::from(player.visits());
    assert!((player.total_value() + opponent.total_value() - visits).abs() < 1e-6);
    assert!((0.0..=1.0).contains(&player.mean_value()));
}

#[test]
fn test_parent_visits_bound_children_after_parallel_run() {
    let builder = builder();
    let mut driver = driver(4);
    driver.run_iterations(60, 4, &|seed| builder.build(seed)).unwrap();

    for side in Side::ALL {
        assert_visits_bounded(driver.root(side));
        assert!(driver.root(side).stats().node_count > 1);
    }
}

// =============================================================================
// Failures and Faults
// =============================================================================

#[test]
fn test_no_legal_move_counts_as_failure() {
    let builder = builder();
    let mut driver = driver(5);

    // Put-minion with nothing pending has no legal location.
    driver
        .run_iterations(8, 2, &|seed| builder.build(seed).with_phase(Phase::PlayerPutMinion))
        .unwrap();

    let stats = driver.statistic();
    assert_eq!(stats.succeeded, 0);
    assert_eq!(stats.failed, 16);
    assert_eq!(driver.root(Side::Player).visits(), 0);
    assert!(driver.best_move(Side::Player).is_none());
}

#[test]
fn test_structural_fault_stops_the_run() {
    let standard = standard_registry().unwrap();
    // The same rules without a handler for the player's choose phase.
    let mut partial = PhaseRegistry::new();
    for phase in Phase::ALL {
        if phase != Phase::PlayerChooseBoardMove {
            let handler = *standard.resolve(phase, Operation::ApplyMove).unwrap();
            partial.register(phase, handler);
        }
    }
    let builder = SkirmishBuilder::new(Arc::new(partial)).deck_size(12);
    let calls = AtomicU64::new(0);
    let mut driver = driver(6);

    let result = driver.run(Duration::from_secs(30), 3, &|seed| {
        calls.fetch_add(1, Ordering::Relaxed);
        builder.build(seed)
    });

    match result {
        Err(SearchError::Fault { source, .. }) => assert!(matches!(
            source,
            BoardError::UnhandledPhase {
                phase: Phase::PlayerChooseBoardMove,
                ..
            }
        )),
        other => panic!("expected a structural fault, got {other:?}"),
    }
    assert_eq!(driver.statistic().total(), 0);
    assert!(calls.load(Ordering::Relaxed) <= 3);
}

#[test]
fn test_zero_workers_rejected() {
    let builder = builder();
    let mut driver = driver(7);
    let result = driver.run(Duration::from_millis(10), 0, &|seed| builder.build(seed));
    assert!(matches!(result, Err(SearchError::NoWorkers)));
}

// =============================================================================
// Timing and Determinism
// =============================================================================

#[test]
fn test_timed_run_respects_deadline() {
    let builder = builder();
    let mut driver = driver(8);

    let start = Instant::now();
    driver
        .run(Duration::from_millis(200), 2, &|seed| builder.build(seed))
        .unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(5));
    assert!(driver.statistic().succeeded > 0);
}

#[test]
fn test_single_worker_is_deterministic() {
    let builder = builder();
    let mut a = driver(9);
    let mut b = driver(9);

    a.run_iterations(40, 1, &|seed| builder.build(seed)).unwrap();
    b.run_iterations(40, 1, &|seed| builder.build(seed)).unwrap();

    for side in Side::ALL {
        assert_eq!(visit_map(&a, side), visit_map(&b, side));
    }
    assert_eq!(a.best_move(Side::Player), b.best_move(Side::Player));
}

#[test]
fn test_best_move_is_legal_opening() {
    let builder = builder();
    let mut driver = driver(10);
    driver.run_iterations(100, 2, &|seed| builder.build(seed)).unwrap();

    let best = driver.best_move(Side::Player).unwrap();
    let mut board: Board = builder.build(0);
    let (flow, _) = board.get_single_flow_move().unwrap();
    board.apply_move(&flow).unwrap();

    // Every opening position offers ending the turn, and the tree only
    // stores moves that were legal in some sampled opening.
    assert!(board.enumerate_moves().unwrap().0.any(|mv| mv == Move::end_turn()));
    assert!(driver.move_visits(Side::Player).iter().any(|(mv, _)| *mv == best));
}
