//! Pulse tree node
//!
//! A finalized graph node. `value` is the pulse height relative to the
//! parent until the tree is revalued; the root holds the background level.

use std::fmt;

/// Node of the finalized pulse tree
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct PulseNode<V> {
    /// Original node index
    pub tag: usize,

    /// Pulse height, or recovered value after revaluing
    pub value: V,

    /// Original nodes covered by this node's subtree
    pub size: usize,

    /// Tree parent (`parent == tag` only at the root)
    pub parent: usize,

    /// Child tags in ascending order
    pub children: Vec<usize>,
}

impl<V> PulseNode<V> {
    /// Check if this is the root
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent == self.tag
    }

    /// Check if nothing was merged into this node
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<V: fmt::Debug> fmt::Display for PulseNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}({:?}) -> {}",
            self.tag, self.size, self.value, self.parent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_leaf() {
        let root = PulseNode {
            tag: 2,
            value: 4_i64,
            size: 3,
            parent: 2,
            children: vec![0, 1],
        };
        assert!(root.is_root());
        assert!(!root.is_leaf());
        assert_eq!(root.to_string(), "2_3(4) -> 2");

        let leaf = PulseNode {
            tag: 0,
            value: -1_i64,
            size: 1,
            parent: 2,
            children: Vec::new(),
        };
        assert!(!leaf.is_root());
        assert!(leaf.is_leaf());
    }
}
