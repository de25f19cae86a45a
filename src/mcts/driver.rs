//! Multi-worker search driver.
//!
//! Spawns worker threads that share one pair of trees and one `Statistic`.
//! Each worker owns its `SearchEngine` and its forked random stream and
//! loops until the budget is spent. A timed run reports the remaining
//! seconds from the calling thread while the workers search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, log_enabled, warn, Level};
use thiserror::Error;

use crate::board::Board;
use crate::core::{BoardError, Move, RandomStream, Side, SideMap};

use super::config::SearchConfig;
use super::node::TreeNode;
use super::progress::{LogProgress, ProgressSink};
use super::search::SearchEngine;
use super::stats::{SearchStats, Statistic, StatisticSnapshot};

/// Errors that stop a search run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A worker hit a structural fault; all workers were stopped.
    #[error("search worker {worker} stopped on a structural fault: {source}")]
    Fault {
        worker: usize,
        #[source]
        source: BoardError,
    },

    /// A worker thread panicked.
    #[error("search worker {0} panicked")]
    WorkerPanicked(usize),

    /// A run was requested with zero workers.
    #[error("a search run needs at least one worker")]
    NoWorkers,
}

#[derive(Clone, Copy, Debug)]
enum Budget {
    Until(Instant),
    Iterations(u64),
}

impl Budget {
    fn allows(self, completed: u64) -> bool {
        match self {
            Budget::Until(deadline) => Instant::now() < deadline,
            Budget::Iterations(limit) => completed < limit,
        }
    }
}

/// Owns the shared trees and statistic and runs workers over them.
///
/// Trees persist across runs, so consecutive runs keep refining the same
/// statistics.
pub struct SearchDriver {
    trees: SideMap<Arc<TreeNode>>,
    statistic: Statistic,
    config: SearchConfig,
    seeds: RandomStream,
    progress: Box<dyn ProgressSink>,
    stats: SearchStats,
}

impl SearchDriver {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            trees: SideMap::new(|_| Arc::new(TreeNode::new())),
            statistic: Statistic::new(),
            seeds: RandomStream::new(config.seed),
            config,
            progress: Box::new(LogProgress),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom progress sink.
    pub fn with_progress<P: ProgressSink + 'static>(mut self, progress: P) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Search for `duration` with `workers` threads.
    ///
    /// `factory` builds a fresh starting board from a seed and is called
    /// once per iteration.
    ///
    /// # Errors
    ///
    /// `NoWorkers` if `workers` is zero, `Fault` if any worker hit a
    /// structural fault, `WorkerPanicked` if a worker panicked.
    pub fn run<F>(&mut self, duration: Duration, workers: usize, factory: &F) -> Result<(), SearchError>
    where
        F: Fn(u64) -> Board + Sync,
    {
        let deadline = Instant::now() + duration;
        info!(
            "Starting search with {} workers for {:.1}s",
            workers,
            duration.as_secs_f64()
        );
        self.run_workers(Budget::Until(deadline), workers, factory)
    }

    /// Run exactly `iterations` iterations on each of `workers` threads.
    ///
    /// # Errors
    ///
    /// Same as [`SearchDriver::run`].
    pub fn run_iterations<F>(
        &mut self,
        iterations: u64,
        workers: usize,
        factory: &F,
    ) -> Result<(), SearchError>
    where
        F: Fn(u64) -> Board + Sync,
    {
        debug!("Starting search with {workers} workers x {iterations} iterations");
        self.run_workers(Budget::Iterations(iterations), workers, factory)
    }

    fn run_workers<F>(&mut self, budget: Budget, workers: usize, factory: &F) -> Result<(), SearchError>
    where
        F: Fn(u64) -> Board + Sync,
    {
        if workers == 0 {
            return Err(SearchError::NoWorkers);
        }

        let streams: Vec<RandomStream> = (0..workers).map(|_| self.seeds.fork()).collect();
        let stop = AtomicBool::new(false);
        let trees = &self.trees;
        let statistic = &self.statistic;
        let config = &self.config;
        let progress = &*self.progress;

        let results: Vec<Result<SearchStats, SearchError>> = thread::scope(|scope| {
            let handles: Vec<_> = streams
                .into_iter()
                .enumerate()
                .map(|(worker, rng)| {
                    let stop = &stop;
                    scope.spawn(move || {
                        let mut engine = SearchEngine::new(trees.clone(), config.clone(), rng);
                        let mut completed = 0u64;
                        while budget.allows(completed) && !stop.load(Ordering::Relaxed) {
                            match engine.iterate(factory) {
                                Ok(true) => statistic.record_success(),
                                Ok(false) => statistic.record_failure(),
                                Err(source) => {
                                    warn!("Worker {worker} stopped: {source}");
                                    stop.store(true, Ordering::Relaxed);
                                    return Err(SearchError::Fault { worker, source });
                                }
                            }
                            completed += 1;
                        }
                        debug!("Worker {worker} finished after {completed} iterations");
                        Ok(engine.stats().clone())
                    })
                })
                .collect();

            if let Budget::Until(deadline) = budget {
                report_progress(deadline, progress, &stop);
            }

            handles
                .into_iter()
                .enumerate()
                .map(|(worker, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        stop.store(true, Ordering::Relaxed);
                        Err(SearchError::WorkerPanicked(worker))
                    })
                })
                .collect()
        });

        let mut first_error = None;
        for result in results {
            match result {
                Ok(stats) => self.stats.merge(&stats),
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        let snapshot = self.statistic.snapshot();
        info!(
            "Search done: {} succeeded, {} failed",
            snapshot.succeeded, snapshot.failed
        );
        if log_enabled!(Level::Debug) {
            debug!(
                "{:.0} iterations/s, {:.2} nodes/iteration, max depth {}",
                self.stats.iterations_per_second(),
                self.stats.avg_nodes_per_iteration(),
                self.stats.max_depth
            );
            for (side, root) in self.trees.iter() {
                let shape = root.stats();
                debug!(
                    "{side} tree: {} nodes, branching {:.2}",
                    shape.node_count,
                    shape.branching_factor()
                );
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Root of `side`'s tree.
    #[must_use]
    pub fn root(&self, side: Side) -> &Arc<TreeNode> {
        &self.trees[side]
    }

    /// Success and failure totals across all runs.
    #[must_use]
    pub fn statistic(&self) -> StatisticSnapshot {
        self.statistic.snapshot()
    }

    /// Merged per-worker diagnostics across all runs.
    #[must_use]
    pub fn search_stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Most visited first move of `side`'s tree.
    #[must_use]
    pub fn best_move(&self, side: Side) -> Option<Move> {
        self.move_visits(side).into_iter().next().map(|(mv, _)| mv)
    }

    /// Visit count per first move of `side`'s tree, most visited first.
    /// Ties go to the higher mean value.
    #[must_use]
    pub fn move_visits(&self, side: Side) -> Vec<(Move, u32)> {
        let mut children = self.trees[side].children();
        children.sort_by(|(_, a), (_, b)| {
            b.visits().cmp(&a.visits()).then_with(|| {
                b.mean_value()
                    .partial_cmp(&a.mean_value())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
        });
        children
            .into_iter()
            .map(|(mv, child)| (mv, child.visits()))
            .collect()
    }

    /// Visit distribution over the first moves of `side`'s tree.
    #[must_use]
    pub fn move_probabilities(&self, side: Side) -> Vec<(Move, f64)> {
        let visits = self.move_visits(side);
        let total: u64 = visits.iter().map(|(_, v)| u64::from(*v)).sum();
        if total == 0 {
            return Vec::new();
        }
        visits
            .into_iter()
            .map(|(mv, v)| (mv, f64::from(v) / total as f64))
            .collect()
    }
}

/// Report remaining whole seconds until `deadline`, waking at most once
/// per second and never sleeping past the deadline.
fn report_progress(deadline: Instant, progress: &dyn ProgressSink, stop: &AtomicBool) {
    loop {
        let now = Instant::now();
        if now >= deadline || stop.load(Ordering::Relaxed) {
            break;
        }
        let remaining = deadline - now;
        progress.remaining(remaining.as_secs());
        thread::sleep(remaining.min(Duration::from_secs(1)));
    }
}
