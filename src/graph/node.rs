//! Disjoint-set forest element
//!
//! One node per original index, reused for the whole run.
//! Union-find fields (`parent`, `size`) and adjacency are kept apart so that
//! "no neighbors left" never doubles as a membership test.

use std::collections::BTreeSet;
use std::fmt;

/// Graph node: plateau representative or dissolved member of one
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode<V> {
    /// Stable identity, also the index into the node array
    pub tag: usize,

    /// Function value; reused as flattening target and pulse height
    pub value: V,

    /// Original nodes merged into this plateau (≥ 1)
    pub size: usize,

    /// Disjoint-set link (`parent == tag` for representatives)
    pub parent: usize,

    /// Tags adjacent in the contracted graph
    pub neighbors: BTreeSet<usize>,
}

impl<V> GraphNode<V> {
    /// Create a singleton plateau
    pub fn new(tag: usize, value: V) -> Self {
        Self {
            tag,
            value,
            size: 1,
            parent: tag,
            neighbors: BTreeSet::new(),
        }
    }

    /// Check if this node currently stands for its plateau
    #[inline]
    pub fn is_representative(&self) -> bool {
        self.parent == self.tag
    }

    /// Scheduled entry is still valid: representative and not resized since
    #[inline]
    pub fn is_active(&self, size: usize) -> bool {
        self.is_representative() && self.size == size
    }
}

impl<V: fmt::Debug> fmt::Display for GraphNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}({:?})=>{};{:?}",
            self.tag, self.size, self.value, self.parent, self.neighbors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_singleton_representative() {
        let node = GraphNode::new(4, 9_i64);
        assert!(node.is_representative());
        assert!(node.is_active(1));
        assert!(!node.is_active(2));
        assert!(node.neighbors.is_empty());
    }

    #[test]
    fn test_absorbed_node_is_inactive() {
        let mut node = GraphNode::new(2, 0_i64);
        node.parent = 5;
        assert!(!node.is_representative());
        assert!(!node.is_active(node.size));
    }

    #[test]
    fn test_display_lists_size_value_parent_and_neighbors() {
        let mut node = GraphNode::new(1, 7_i64);
        node.neighbors.extend([0, 3]);
        assert_eq!(node.to_string(), "1_1(7)=>1;{0, 3}");
    }
}
