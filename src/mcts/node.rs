//! Shared search tree nodes.
//!
//! Nodes are reference counted and updated in place by every worker.
//! Counters are atomics; the child map sits behind an `RwLock` and child
//! creation is check-and-create under the write lock, so two workers
//! expanding the same move end up with the same child.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use super::tree::{collect_stats, TreeStats};
use crate::core::Move;

/// Atomic f64 stored as bits in an `AtomicU64`.
#[derive(Debug, Default)]
pub struct AtomicF64 {
    bits: AtomicU64,
}

impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self, ordering: Ordering) -> f64 {
        f64::from_bits(self.bits.load(ordering))
    }

    /// Lock-free add via compare-and-swap. Returns the previous value.
    #[inline]
    pub fn fetch_add(&self, value: f64, ordering: Ordering) -> f64 {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + value).to_bits();
            match self
                .bits
                .compare_exchange_weak(current, next, ordering, Ordering::Relaxed)
            {
                Ok(previous) => return f64::from_bits(previous),
                Err(actual) => current = actual,
            }
        }
    }
}

/// One information-set node.
///
/// Children are keyed by the move that leads to them.
#[derive(Debug, Default)]
pub struct TreeNode {
    visits: AtomicU32,
    total_value: AtomicF64,
    chance: AtomicBool,
    children: RwLock<FxHashMap<Move, Arc<TreeNode>>>,
}

impl TreeNode {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn visits(&self) -> u32 {
        self.visits.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.total_value.load(Ordering::Acquire)
    }

    /// Mean value from this tree's side's point of view.
    #[must_use]
    pub fn mean_value(&self) -> f64 {
        let visits = self.visits();
        if visits == 0 {
            0.0
        } else {
            self.total_value() / f64::from(visits)
        }
    }

    /// Record one visit with value `value`.
    pub fn record(&self, value: f64) {
        self.total_value.fetch_add(value, Ordering::AcqRel);
        self.visits.fetch_add(1, Ordering::AcqRel);
    }

    /// Mark that reaching this node consumed randomness at least once.
    pub fn mark_chance(&self) {
        self.chance.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_chance(&self) -> bool {
        self.chance.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn child(&self, mv: &Move) -> Option<Arc<TreeNode>> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(mv)
            .cloned()
    }

    /// Get the child for `mv`, creating it if absent.
    ///
    /// Returns the child and whether this call created it.
    pub fn get_or_create_child(&self, mv: &Move) -> (Arc<TreeNode>, bool) {
        if let Some(child) = self.child(mv) {
            return (child, false);
        }
        let mut children = self
            .children
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(child) = children.get(mv) {
            return (Arc::clone(child), false);
        }
        let child = Arc::new(TreeNode::new());
        children.insert(mv.clone(), Arc::clone(&child));
        (child, true)
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Snapshot of the children.
    #[must_use]
    pub fn children(&self) -> Vec<(Move, Arc<TreeNode>)> {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(mv, child)| (mv.clone(), Arc::clone(child)))
            .collect()
    }

    /// Shape statistics for the subtree rooted here.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        collect_stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_atomic_f64_fetch_add() {
        let value = AtomicF64::new(1.5);
        let previous = value.fetch_add(2.0, Ordering::AcqRel);

        assert_eq!(previous, 1.5);
        assert_eq!(value.load(Ordering::Acquire), 3.5);
    }

    #[test]
    fn test_record_and_mean() {
        let node = TreeNode::new();
        assert_eq!(node.mean_value(), 0.0);

        node.record(1.0);
        node.record(0.0);
        node.record(0.5);

        assert_eq!(node.visits(), 3);
        assert!((node.mean_value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_get_or_create_child() {
        let node = TreeNode::new();
        let mv = Move::end_turn();

        let (first, created) = node.get_or_create_child(&mv);
        assert!(created);
        let (second, created) = node.get_or_create_child(&mv);
        assert!(!created);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(node.child_count(), 1);
        assert!(node.child(&Move::game_flow()).is_none());
    }

    #[test]
    fn test_concurrent_child_creation_yields_one_child() {
        let node = TreeNode::new();
        let mv = Move::put_minion(2);

        let created: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| node.get_or_create_child(&mv).1))
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });

        assert_eq!(created, 1);
        assert_eq!(node.child_count(), 1);
    }

    #[test]
    fn test_concurrent_record() {
        let node = TreeNode::new();
        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..250 {
                        node.record(1.0);
                    }
                });
            }
        });

        assert_eq!(node.visits(), 1000);
        assert!((node.total_value() - 1000.0).abs() < 1e-9);
    }
}
