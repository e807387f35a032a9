//! Forward transform driver
//!
//! Two phases over one graph function:
//! 1. Seed: contract every node that is still its own representative,
//!    scheduling every initial extremum
//! 2. Extraction: flatten the smallest pending extremum to its nearest
//!    neighbor's level, re-contract, repeat until one plateau remains
//!
//! `finish` then turns the disjoint-set forest into a [`PulseTree`].

use tracing::{debug, trace};

use crate::graph::{Contraction, ContractionReport, GraphFunction};
use crate::schedule::{Schedule, ScheduleConfig, TieBreakPolicy};
use crate::tree::PulseTree;
use crate::{DptError, PulseValue};

/// Work counters for benchmarking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TransformStats {
    /// Number of original nodes
    pub nnodes: usize,

    /// Number of distinct arcs
    pub narcs: usize,

    /// Edges inspected by all contractions
    pub count: usize,

    /// Plateau boundary sizes summed over the seed phase
    pub border1: usize,

    /// Plateau boundary sizes summed over the extraction phase
    pub border: usize,

    /// Pulses extracted
    pub extractions: usize,
}

/// One extraction step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction<V> {
    /// Representative of the flattened plateau
    pub tag: usize,

    /// Plateau size at extraction
    pub size: usize,

    /// Pulse height (plateau level minus merge level)
    pub height: V,

    /// Neighbor plateau it merged into
    pub survivor: usize,
}

/// Transform in progress
#[derive(Debug)]
pub struct Transform<V, P> {
    graph: GraphFunction<V>,
    schedule: Schedule<P>,
    root: Option<usize>,
    stats: TransformStats,
    seeded: bool,
}

impl<V: PulseValue, P: TieBreakPolicy> Transform<V, P> {
    /// Prepare a transform; nothing is contracted yet
    pub fn new(graph: GraphFunction<V>, policy: P, config: ScheduleConfig) -> Self {
        let stats = TransformStats {
            nnodes: graph.nnodes(),
            narcs: graph.narcs(),
            ..TransformStats::default()
        };

        Self {
            graph,
            schedule: Schedule::new(config, policy),
            root: None,
            stats,
            seeded: false,
        }
    }

    /// Run both phases and build the tree
    pub fn run(self) -> Result<PulseTree<V>, DptError> {
        self.finish()
    }

    /// Seed phase: contract every remaining representative
    ///
    /// Runs at most once; `step` calls it on demand.
    pub fn seed(&mut self) {
        if self.seeded {
            return;
        }
        self.seeded = true;

        for tag in 0..self.graph.nnodes() {
            if self.graph.nodes()[tag].is_representative() {
                let report = self.graph.shrink(tag);
                self.stats.border1 += report.border;
                self.record(report);
            }
        }

        debug!(
            nnodes = self.stats.nnodes,
            narcs = self.stats.narcs,
            plateaus = self.graph.representatives().count(),
            pending = self.schedule.len(),
            "seed phase complete"
        );
    }

    /// Extract the next pulse; `None` once a single plateau remains
    pub fn step(&mut self) -> Result<Option<Extraction<V>>, DptError> {
        self.seed();

        let Some(tag) = self.schedule.pop(&self.graph) else {
            return Ok(None);
        };
        let survivor = self
            .graph
            .nearest(tag)
            .ok_or(DptError::IsolatedPlateau { tag })?;

        let nodes = self.graph.nodes_mut();
        let size = nodes[tag].size;
        let level = nodes[survivor].value;
        let height = nodes[tag]
            .value
            .checked_sub(level)
            .ok_or(DptError::Overflow { tag })?;
        nodes[tag].value = level;

        let report = self.graph.shrink(survivor);
        self.stats.border += report.border;
        self.record(report);

        self.graph.nodes_mut()[tag].value = height;
        self.stats.extractions += 1;

        trace!(tag, size, survivor, ?height, "pulse extracted");

        Ok(Some(Extraction {
            tag,
            size,
            height,
            survivor,
        }))
    }

    /// Convert the forest into the pulse tree
    ///
    /// Drains any pending extractions first.
    pub fn finish(mut self) -> Result<PulseTree<V>, DptError> {
        while self.step()?.is_some() {}
        let root = self.root.ok_or(DptError::NoRoot)?;

        debug!(
            root,
            extractions = self.stats.extractions,
            count = self.stats.count,
            border1 = self.stats.border1,
            border = self.stats.border,
            "transform complete"
        );

        Ok(PulseTree::from_forest(
            self.graph.into_nodes(),
            root,
            self.stats,
        ))
    }

    /// Graph function in its current (partially contracted) state
    pub fn graph(&self) -> &GraphFunction<V> {
        &self.graph
    }

    /// Pending extrema
    pub fn schedule(&self) -> &Schedule<P> {
        &self.schedule
    }

    /// Counters so far
    pub fn stats(&self) -> TransformStats {
        self.stats
    }

    fn record(&mut self, report: ContractionReport) {
        self.stats.count += report.edges_inspected;
        match report.outcome {
            Contraction::Root => self.root = Some(report.plateau),
            Contraction::Extremum(extremum) => {
                let size = self.graph.nodes()[report.plateau].size;
                self.schedule.push(report.plateau, size, extremum);
            }
            Contraction::Mixed => {}
        }
    }
}
