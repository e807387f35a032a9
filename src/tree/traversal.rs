//! Breadth-first traversal
//!
//! Each call owns a fresh agenda, so traversals are restartable and never
//! share state. Parents are always yielded before their children.

use std::collections::VecDeque;

use super::PulseNode;

/// Lazy breadth-first iterator over a subtree
#[derive(Debug, Clone)]
pub struct BreadthFirst<'a, V> {
    nodes: &'a [PulseNode<V>],
    agenda: VecDeque<usize>,
}

impl<'a, V> BreadthFirst<'a, V> {
    /// Descendants of `root`, preceded by `root` itself when `include_root`
    pub(crate) fn new(nodes: &'a [PulseNode<V>], root: usize, include_root: bool) -> Self {
        let agenda = if include_root {
            VecDeque::from([root])
        } else {
            nodes[root].children.iter().copied().collect()
        };
        Self { nodes, agenda }
    }
}

impl<'a, V> Iterator for BreadthFirst<'a, V> {
    type Item = &'a PulseNode<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.agenda.pop_front()?;
        let node = &self.nodes[tag];
        self.agenda.extend(node.children.iter().copied());
        Some(node)
    }
}
