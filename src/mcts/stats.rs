//! Search counters.
//!
//! `Statistic` is the shared success/failure tally every worker updates.
//! `SearchStats` holds per-worker diagnostics that are merged after a run.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Shared iteration outcome counters.
///
/// Safe to update from any number of workers. Totals are exact once all
/// workers have been joined.
#[derive(Debug, Default)]
pub struct Statistic {
    succeeded: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of a `Statistic`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticSnapshot {
    pub succeeded: u64,
    pub failed: u64,
}

impl Statistic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self) {
        self.succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatisticSnapshot {
        StatisticSnapshot {
            succeeded: self.succeeded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

impl StatisticSnapshot {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }

    /// Fraction of iterations that succeeded.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.succeeded as f64 / self.total() as f64
        }
    }
}

/// Statistics collected by one worker.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total iterations performed.
    pub iterations: u64,

    /// Nodes expanded (added to a tree).
    pub nodes_expanded: u64,

    /// Moves played by the simulation policy.
    pub simulation_moves: u64,

    /// Transitions that consumed randomness.
    pub chance_transitions: u64,

    /// Maximum tree depth reached by either side.
    pub max_depth: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another worker's counters into these.
    ///
    /// Time is the maximum, since workers run concurrently.
    pub fn merge(&mut self, other: &SearchStats) {
        self.iterations += other.iterations;
        self.nodes_expanded += other.nodes_expanded;
        self.simulation_moves += other.simulation_moves;
        self.chance_transitions += other.chance_transitions;
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_us = self.time_us.max(other.time_us);
    }

    /// Calculate iterations per second.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average nodes added per iteration.
    #[must_use]
    pub fn avg_nodes_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / self.iterations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_statistic_counts() {
        let statistic = Statistic::new();
        statistic.record_success();
        statistic.record_success();
        statistic.record_failure();

        let snapshot = statistic.snapshot();
        assert_eq!(snapshot.succeeded, 2);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.total(), 3);
        assert!((snapshot.success_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_statistic_concurrent_updates() {
        let statistic = Statistic::new();
        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..1000 {
                        statistic.record_success();
                    }
                });
            }
        });
        assert_eq!(statistic.snapshot().succeeded, 4000);
    }

    #[test]
    fn test_stats_iterations_per_second() {
        let mut stats = SearchStats::new();
        stats.iterations = 1000;
        stats.time_us = 1_000_000;

        assert_eq!(stats.iterations_per_second(), 1000.0);
    }

    #[test]
    fn test_stats_merge_and_reset() {
        let mut a = SearchStats::new();
        a.iterations = 10;
        a.max_depth = 3;
        a.time_us = 50;
        let mut b = SearchStats::new();
        b.iterations = 5;
        b.max_depth = 7;
        b.time_us = 40;

        a.merge(&b);
        assert_eq!(a.iterations, 15);
        assert_eq!(a.max_depth, 7);
        assert_eq!(a.time_us, 50);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = StatisticSnapshot {
            succeeded: 42,
            failed: 1,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: StatisticSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);
    }
}
