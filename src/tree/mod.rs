//! Pulse tree: the finished decomposition
//!
//! Every non-root node stores the height of the pulse extracted at that tag
//! (zero for nodes absorbed at equal level), relative to its parent's level.
//! The root stores the background level. Summing heights along the path
//! from the root recovers the original value of every node.

mod node;
mod traversal;

pub use node::PulseNode;
pub use traversal::BreadthFirst;

use crate::graph::GraphNode;
use crate::transform::TransformStats;
use crate::{DptError, PulseValue};

/// Extracted pulse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Pulse<V> {
    /// Tag of the plateau representative it was extracted from
    pub tag: usize,

    /// Number of original nodes it covers
    pub size: usize,

    /// Height relative to the surrounding level
    pub height: V,
}

/// Rooted tree produced by the transform
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct PulseTree<V> {
    nodes: Vec<PulseNode<V>>,
    root: usize,
    stats: TransformStats,
    revalued: bool,
}

impl<V: PulseValue> PulseTree<V> {
    /// Build the explicit tree from a fully contracted forest
    pub(crate) fn from_forest(forest: Vec<GraphNode<V>>, root: usize, stats: TransformStats) -> Self {
        let mut nodes: Vec<PulseNode<V>> = forest
            .into_iter()
            .map(|node| PulseNode {
                tag: node.tag,
                value: node.value,
                size: node.size,
                parent: node.parent,
                children: Vec::new(),
            })
            .collect();

        for tag in 0..nodes.len() {
            if tag != root {
                let parent = nodes[tag].parent;
                nodes[parent].children.push(tag);
            }
        }

        Self {
            nodes,
            root,
            stats,
            revalued: false,
        }
    }

    /// Tag of the root (last surviving plateau)
    pub fn root(&self) -> usize {
        self.root
    }

    /// Number of nodes
    pub fn nnodes(&self) -> usize {
        self.stats.nnodes
    }

    /// Number of arcs in the input graph
    pub fn narcs(&self) -> usize {
        self.stats.narcs
    }

    /// Work counters of the transform
    pub fn stats(&self) -> TransformStats {
        self.stats
    }

    /// All nodes, indexed by tag
    pub fn nodes(&self) -> &[PulseNode<V>] {
        &self.nodes
    }

    /// Node by tag
    pub fn node(&self, tag: usize) -> Option<&PulseNode<V>> {
        self.nodes.get(tag)
    }

    /// Background level left at the root
    pub fn background(&self) -> V {
        self.nodes[self.root].value
    }

    /// Whether `revalue` has already run
    pub fn is_revalued(&self) -> bool {
        self.revalued
    }

    /// Stored node values, indexed by tag
    pub fn values(&self) -> Vec<V> {
        self.nodes.iter().map(|node| node.value).collect()
    }

    /// Breadth-first over all nodes below the root
    pub fn traverse(&self) -> BreadthFirst<'_, V> {
        BreadthFirst::new(&self.nodes, self.root, false)
    }

    /// Breadth-first over all nodes, root first
    pub fn iter(&self) -> BreadthFirst<'_, V> {
        BreadthFirst::new(&self.nodes, self.root, true)
    }

    /// Breadth-first over the subtree of `tag`
    pub fn traverse_from(
        &self,
        tag: usize,
        include_root: bool,
    ) -> Result<BreadthFirst<'_, V>, DptError> {
        self.check_tag(tag)?;
        Ok(BreadthFirst::new(&self.nodes, tag, include_root))
    }

    /// Original nodes covered by the pulse extracted at `tag`
    pub fn support(&self, tag: usize) -> Result<Vec<usize>, DptError> {
        Ok(self.traverse_from(tag, true)?.map(|node| node.tag).collect())
    }

    /// Non-zero pulses in tag order
    pub fn pulses(&self) -> Result<Vec<Pulse<V>>, DptError> {
        self.check_heights()?;
        let zero = V::default();
        Ok(self
            .nodes
            .iter()
            .filter(|node| !node.is_root() && node.value != zero)
            .map(|node| Pulse {
                tag: node.tag,
                size: node.size,
                height: node.value,
            })
            .collect())
    }

    /// Original values, without touching the tree
    pub fn reconstruct(&self) -> Result<Vec<V>, DptError> {
        self.reconstruct_above(0)
    }

    /// Values rebuilt from the pulses wider than `scale` nodes
    ///
    /// Pulses of size `scale` or less are dropped, which removes every
    /// feature up to that scale. `scale == 0` gives back the original
    /// function; `scale >= nnodes()` gives the constant background.
    pub fn reconstruct_above(&self, scale: usize) -> Result<Vec<V>, DptError> {
        self.check_heights()?;

        let mut values = vec![V::default(); self.nodes.len()];
        values[self.root] = self.background();
        for node in self.traverse() {
            let base = values[node.parent];
            values[node.tag] = if node.size > scale {
                base.checked_add(node.value)
                    .ok_or(DptError::Overflow { tag: node.tag })?
            } else {
                base
            };
        }
        Ok(values)
    }

    /// Replace every pulse height with the recovered original value
    ///
    /// Parents are visited before children, so each parent already holds
    /// its original value when its children are updated. Runs once.
    pub fn revalue(&mut self) -> Result<(), DptError> {
        let values = self.reconstruct()?;
        for (node, value) in self.nodes.iter_mut().zip(values) {
            node.value = value;
        }
        self.revalued = true;
        Ok(())
    }

    /// Hash of the tree shape (root, parents and sizes)
    ///
    /// Two runs produce the same fingerprint exactly when they built the same
    /// tree.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.root as u64).to_le_bytes());
        for node in &self.nodes {
            hasher.update(&(node.parent as u64).to_le_bytes());
            hasher.update(&(node.size as u64).to_le_bytes());
        }
        hasher.finalize()
    }

    fn check_tag(&self, tag: usize) -> Result<(), DptError> {
        if tag < self.nodes.len() {
            Ok(())
        } else {
            Err(DptError::UnknownNode {
                tag,
                nnodes: self.nodes.len(),
            })
        }
    }

    fn check_heights(&self) -> Result<(), DptError> {
        if self.revalued {
            Err(DptError::AlreadyRevalued)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphFunction;
    use crate::schedule::TieBreak;

    fn sample() -> PulseTree<i64> {
        let values = vec![3, 1, 4, 1, 5];
        let arcs = [(0, 1), (1, 2), (2, 3), (3, 4)];
        GraphFunction::new(values, arcs).unwrap().dpt().unwrap()
    }

    #[test]
    fn test_tree_shape() {
        let tree = sample();
        assert_eq!(tree.root(), 2);
        assert_eq!(tree.background(), 4);
        assert_eq!(tree.nodes()[2].children, vec![0, 3, 4]);
        assert_eq!(tree.nodes()[0].children, vec![1]);
        assert_eq!(tree.nodes()[2].size, 5);
        assert_eq!(tree.nnodes(), 5);
        assert_eq!(tree.narcs(), 4);
    }

    #[test]
    fn test_pulses_and_support() {
        let tree = sample();
        let pulses = tree.pulses().unwrap();
        assert_eq!(
            pulses,
            vec![
                Pulse { tag: 0, size: 2, height: -1 },
                Pulse { tag: 1, size: 1, height: -2 },
                Pulse { tag: 3, size: 1, height: -3 },
                Pulse { tag: 4, size: 1, height: 1 },
            ]
        );
        assert_eq!(tree.support(0).unwrap(), vec![0, 1]);
        assert_eq!(tree.support(2).unwrap().len(), 5);
    }

    #[test]
    fn test_reconstruct_above_drops_small_pulses() {
        let tree = sample();
        assert_eq!(tree.reconstruct().unwrap(), vec![3, 1, 4, 1, 5]);
        assert_eq!(tree.reconstruct_above(1).unwrap(), vec![3, 3, 4, 4, 4]);
        assert_eq!(tree.reconstruct_above(5).unwrap(), vec![4; 5]);
    }

    #[test]
    fn test_revalue_runs_once() {
        let mut tree = sample();
        tree.revalue().unwrap();
        assert!(tree.is_revalued());
        assert_eq!(tree.values(), vec![3, 1, 4, 1, 5]);
        assert_eq!(tree.revalue(), Err(DptError::AlreadyRevalued));
        assert_eq!(tree.pulses(), Err(DptError::AlreadyRevalued));
        assert_eq!(tree.background(), 4);
    }

    #[test]
    fn test_unknown_traversal_root() {
        let tree = sample();
        let err = tree.traverse_from(9, false).unwrap_err();
        assert_eq!(err, DptError::UnknownNode { tag: 9, nnodes: 5 });
    }

    #[test]
    fn test_traverse_visits_every_non_root_once() {
        let tree = sample();
        let mut tags: Vec<_> = tree.traverse().map(|node| node.tag).collect();
        tags.sort_unstable();
        assert_eq!(tags, vec![0, 1, 3, 4]);
        assert_eq!(tree.iter().count(), 5);
    }

    #[test]
    fn test_fingerprint_tracks_shape() {
        let values = vec![2_i64, 9, 2, 9, 2];
        let arcs = [(0, 1), (1, 2), (2, 3), (3, 4)];
        let ceiling = GraphFunction::new(values.clone(), arcs).unwrap().dpt().unwrap();
        let again = GraphFunction::new(values, arcs).unwrap().dpt().unwrap();
        assert_eq!(ceiling.fingerprint(), again.fingerprint());

        let floor = GraphFunction::new(vec![2_i64, 9, 2, 9, 2], arcs)
            .unwrap()
            .dpt_with(TieBreak::Floor)
            .unwrap();
        assert_ne!(ceiling.fingerprint(), floor.fingerprint());
    }
}
