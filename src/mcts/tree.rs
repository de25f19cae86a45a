//! Tree shape statistics.

use serde::{Deserialize, Serialize};

use super::node::TreeNode;

/// Statistics about a tree's shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of nodes, root included.
    pub node_count: usize,

    /// Maximum depth reached (root is depth 0).
    pub max_depth: usize,

    /// Nodes without children.
    pub leaf_count: usize,

    /// Nodes reached through a transition that drew randomness.
    pub chance_count: usize,
}

impl TreeStats {
    /// Average children per interior node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        let interior = self.node_count - self.leaf_count;
        if interior == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / interior as f64
        }
    }
}

/// Walk the subtree under `root`.
pub(super) fn collect_stats(root: &TreeNode) -> TreeStats {
    let mut stats = TreeStats {
        node_count: 1,
        leaf_count: 0,
        max_depth: 0,
        chance_count: usize::from(root.is_chance()),
    };

    let mut stack: Vec<(std::sync::Arc<TreeNode>, usize)> = root
        .children()
        .into_iter()
        .map(|(_, child)| (child, 1))
        .collect();
    if stack.is_empty() {
        stats.leaf_count = 1;
    }

    while let Some((node, depth)) = stack.pop() {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(depth);
        if node.is_chance() {
            stats.chance_count += 1;
        }
        let children = node.children();
        if children.is_empty() {
            stats.leaf_count += 1;
        }
        stack.extend(children.into_iter().map(|(_, child)| (child, depth + 1)));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;

    #[test]
    fn test_single_node() {
        let stats = TreeNode::new().stats();
        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.leaf_count, 1);
        assert_eq!(stats.max_depth, 0);
        assert_eq!(stats.branching_factor(), 0.0);
    }

    #[test]
    fn test_stats_walk() {
        let root = TreeNode::new();
        let (a, _) = root.get_or_create_child(&Move::put_minion(0));
        root.get_or_create_child(&Move::put_minion(1));
        let (deep, _) = a.get_or_create_child(&Move::end_turn());
        deep.mark_chance();

        let stats = root.stats();
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.leaf_count, 2);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.chance_count, 1);
        assert!((stats.branching_factor() - 1.5).abs() < 1e-9);
    }
}
