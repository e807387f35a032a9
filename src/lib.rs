//! # Discrete Pulse Transform on graphs
//!
//! This library decomposes a scalar function on the nodes of a connected
//! graph into localized pulses of increasing support, and records the
//! decomposition as a rooted tree from which the function can be rebuilt
//! exactly.
//!
//! ## Core Algorithm
//!
//! 1. **Contraction**: adjacent nodes of equal value are merged into plateaus
//!    (disjoint-set forest with an explicit adjacency set per plateau)
//! 2. **Scheduling**: strict local extrema wait in a bucket queue keyed by
//!    plateau size, smallest first
//! 3. **Extraction**: the smallest extremum is flattened to its nearest
//!    neighbor's level; the difference is its pulse height
//! 4. **Finalization**: the forest becomes a tree whose root holds the
//!    background level
//!
//! Reconstruction adds each pulse to its parent's recovered value in
//! breadth-first order.
//!
//! ## Usage Example
//!
//! ```
//! use dpt::GraphFunction;
//!
//! let values = vec![3_i64, 1, 4, 1, 5];
//! let arcs = [(0, 1), (1, 2), (2, 3), (3, 4)];
//!
//! let graph = GraphFunction::new(values.clone(), arcs)?;
//! let mut tree = graph.dpt()?;
//! tree.revalue()?;
//! assert_eq!(tree.values(), values);
//! # Ok::<(), dpt::DptError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod generate;  // Benchmark graph families
pub mod graph;     // Node forest and plateau contraction
pub mod schedule;  // Size-ordered bucket queue
pub mod transform; // Forward transform driver
pub mod tree;      // Pulse tree, traversal and reconstruction

// Re-exports for convenience
pub use graph::{Contraction, ContractionReport, Extremum, GraphFunction, GraphNode};
pub use schedule::{Schedule, ScheduleConfig, TieBreak, TieBreakPolicy};
pub use transform::{Extraction, Transform, TransformStats};
pub use tree::{Pulse, PulseNode, PulseTree};

use std::fmt::Debug;

use thiserror::Error;

/// Numeric type carried by graph nodes.
///
/// Implemented for the signed integers and for `f32`/`f64`. Pulse heights
/// are differences of node values, so integer inputs whose spread does not
/// fit the type fail with [`DptError::Overflow`]. Reconstruction is exact
/// for integers; float sums in [`PulseTree::revalue`] are subject to
/// rounding. NaN has no order and is rejected by [`GraphFunction::new`].
pub trait PulseValue: Copy + PartialOrd + Default + Debug {
    /// `self + rhs`, or `None` when the result is not representable
    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// `self - rhs`, or `None` when the result is not representable
    fn checked_sub(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_pulse_value_int {
    ($($t:ty),*) => {
        $(
            impl PulseValue for $t {
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_sub(self, rhs)
                }
            }
        )*
    };
}

macro_rules! impl_pulse_value_float {
    ($($t:ty),*) => {
        $(
            impl PulseValue for $t {
                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    Some(self - rhs)
                }
            }
        )*
    };
}

impl_pulse_value_int!(i8, i16, i32, i64, i128, isize);
impl_pulse_value_float!(f32, f64);

/// Errors raised while building, transforming or reconstructing a graph function
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DptError {
    /// An arc refers to a node index outside `[0, n)`
    #[error("arc endpoint {index} out of bounds for {nnodes} nodes")]
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Number of nodes in the graph
        nnodes: usize,
    },

    /// No values were supplied
    #[error("graph function must have at least one node")]
    EmptyGraph,

    /// The graph splits into several connected components
    #[error("graph has {components} connected components; the transform needs exactly one")]
    Disconnected {
        /// Number of connected components found
        components: usize,
    },

    /// A traversal was requested from a node that does not exist
    #[error("node {tag} does not exist in a tree of {nnodes} nodes")]
    UnknownNode {
        /// Requested tag
        tag: usize,
        /// Number of nodes in the tree
        nnodes: usize,
    },

    /// Pulse heights were already replaced by reconstructed values
    #[error("tree has already been revalued")]
    AlreadyRevalued,

    /// A scheduled extremum had no neighbors left
    #[error("extremal plateau {tag} has no neighbors")]
    IsolatedPlateau {
        /// Representative of the isolated plateau
        tag: usize,
    },

    /// A node value has no order with itself (NaN)
    #[error("value at node {tag} is not ordered")]
    Unordered {
        /// Offending node
        tag: usize,
    },

    /// A pulse height or reconstructed value does not fit the value type
    #[error("arithmetic overflow at node {tag}")]
    Overflow {
        /// Node whose height or value overflowed
        tag: usize,
    },

    /// Extraction finished without a single surviving plateau
    #[error("transform finished without a root plateau")]
    NoRoot,
}
