//! Graph function: values on the nodes of a connected graph
//!
//! Nodes live in one array indexed by tag. Adjacency is symmetric and, while
//! the transform runs, only ever links plateau representatives.

mod contract;
mod node;

pub use contract::{Contraction, ContractionReport, Extremum};
pub use node::GraphNode;

use bitvec::prelude::*;
use std::collections::VecDeque;

use crate::schedule::{ScheduleConfig, TieBreak, TieBreakPolicy};
use crate::transform::Transform;
use crate::tree::PulseTree;
use crate::{DptError, PulseValue};

/// Scalar function on the nodes of an undirected graph
#[derive(Debug, Clone)]
pub struct GraphFunction<V> {
    nodes: Vec<GraphNode<V>>,
    narcs: usize,
}

impl<V: PulseValue> GraphFunction<V> {
    /// Build a graph function from node values and undirected arcs
    ///
    /// Duplicate arcs are idempotent and self-loops are ignored. Every arc
    /// endpoint must be below `values.len()`, and the graph must be connected.
    /// Values must be ordered with themselves, so NaN is rejected.
    pub fn new<I>(values: Vec<V>, arcs: I) -> Result<Self, DptError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        if values.is_empty() {
            return Err(DptError::EmptyGraph);
        }

        if let Some(tag) = values.iter().position(|v| v.partial_cmp(v).is_none()) {
            return Err(DptError::Unordered { tag });
        }

        let nnodes = values.len();
        let mut nodes: Vec<GraphNode<V>> = values
            .into_iter()
            .enumerate()
            .map(|(tag, value)| GraphNode::new(tag, value))
            .collect();

        for (a, b) in arcs {
            for index in [a, b] {
                if index >= nnodes {
                    return Err(DptError::IndexOutOfBounds { index, nnodes });
                }
            }
            if a != b {
                nodes[a].neighbors.insert(b);
                nodes[b].neighbors.insert(a);
            }
        }

        let narcs = nodes.iter().map(|node| node.neighbors.len()).sum::<usize>() / 2;
        let graph = Self { nodes, narcs };

        let components = graph.count_components();
        if components > 1 {
            return Err(DptError::Disconnected { components });
        }

        Ok(graph)
    }

    /// Number of original nodes
    pub fn nnodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct undirected arcs supplied at construction
    pub fn narcs(&self) -> usize {
        self.narcs
    }

    /// All nodes, indexed by tag
    pub fn nodes(&self) -> &[GraphNode<V>] {
        &self.nodes
    }

    /// Node by tag
    pub fn node(&self, tag: usize) -> Option<&GraphNode<V>> {
        self.nodes.get(tag)
    }

    /// Tags of the current plateau representatives
    pub fn representatives(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.is_representative())
            .map(|node| node.tag)
    }

    /// Sum of plateau sizes over representatives; always `nnodes()`
    pub fn represented_size(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.is_representative())
            .map(|node| node.size)
            .sum()
    }

    /// Scheduled entry `(tag, size)` is still valid; false for unknown tags
    #[inline]
    pub fn is_active(&self, tag: usize, size: usize) -> bool {
        self.nodes.get(tag).is_some_and(|node| node.is_active(size))
    }

    /// Transform with the default tie-break (ceiling at every size)
    pub fn dpt(self) -> Result<PulseTree<V>, DptError> {
        self.dpt_with(TieBreak::Ceiling)
    }

    /// Transform with a caller-supplied tie-break policy
    pub fn dpt_with<P: TieBreakPolicy>(self, policy: P) -> Result<PulseTree<V>, DptError> {
        let config = ScheduleConfig::for_nodes(self.nnodes());
        self.transform(policy, config).run()
    }

    /// Start a transform that the caller drives step by step
    pub fn transform<P: TieBreakPolicy>(self, policy: P, config: ScheduleConfig) -> Transform<V, P> {
        Transform::new(self, policy, config)
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [GraphNode<V>] {
        &mut self.nodes
    }

    pub(crate) fn into_nodes(self) -> Vec<GraphNode<V>> {
        self.nodes
    }

    fn link(&mut self, a: usize, b: usize) {
        self.nodes[a].neighbors.insert(b);
        self.nodes[b].neighbors.insert(a);
    }

    fn count_components(&self) -> usize {
        let mut visited = bitvec![0; self.nodes.len()];
        let mut agenda = VecDeque::new();
        let mut components = 0;

        for start in 0..self.nodes.len() {
            if visited[start] {
                continue;
            }
            components += 1;
            visited.set(start, true);
            agenda.push_back(start);

            while let Some(tag) = agenda.pop_front() {
                for &next in &self.nodes[tag].neighbors {
                    if !visited[next] {
                        visited.set(next, true);
                        agenda.push_back(next);
                    }
                }
            }
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency_is_symmetric() {
        let graph = GraphFunction::new(vec![1_i64, 2, 3], [(0, 1), (2, 1)]).unwrap();
        assert!(graph.nodes()[1].neighbors.contains(&0));
        assert!(graph.nodes()[1].neighbors.contains(&2));
        assert!(graph.nodes()[0].neighbors.contains(&1));
        assert!(graph.nodes()[2].neighbors.contains(&1));
        assert_eq!(graph.narcs(), 2);
    }

    #[test]
    fn test_duplicate_arcs_and_self_loops() {
        let graph =
            GraphFunction::new(vec![1_i64, 2], [(0, 1), (1, 0), (0, 1), (1, 1)]).unwrap();
        assert_eq!(graph.narcs(), 1);
        assert!(!graph.nodes()[1].neighbors.contains(&1));
    }

    #[test]
    fn test_out_of_bounds_arc() {
        let err = GraphFunction::new(vec![1_i64, 2], [(0, 2)]).unwrap_err();
        assert_eq!(err, DptError::IndexOutOfBounds { index: 2, nnodes: 2 });
    }

    #[test]
    fn test_empty_and_disconnected_graphs_are_rejected() {
        let err = GraphFunction::<i64>::new(Vec::new(), std::iter::empty()).unwrap_err();
        assert_eq!(err, DptError::EmptyGraph);

        let err = GraphFunction::new(vec![1_i64, 2, 3, 4], [(0, 1), (2, 3)]).unwrap_err();
        assert_eq!(err, DptError::Disconnected { components: 2 });
    }

    #[test]
    fn test_single_node_is_connected() {
        let graph = GraphFunction::new(vec![42_i64], std::iter::empty()).unwrap();
        assert_eq!(graph.nnodes(), 1);
        assert_eq!(graph.narcs(), 0);
        assert_eq!(graph.represented_size(), 1);
    }

    #[test]
    fn test_nan_value_is_rejected() {
        let err = GraphFunction::new(vec![1.0_f64, f64::NAN, 2.0], [(0, 1), (1, 2)]).unwrap_err();
        assert_eq!(err, DptError::Unordered { tag: 1 });
    }

    #[test]
    fn test_is_active_for_unknown_tag() {
        let graph = GraphFunction::new(vec![1_i64, 2], [(0, 1)]).unwrap();
        assert!(graph.is_active(1, 1));
        assert!(!graph.is_active(1, 2));
        assert!(!graph.is_active(2, 1));
    }
}
