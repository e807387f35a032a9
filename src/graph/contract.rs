//! Plateau contraction and nearest-level search
//!
//! Contraction floods out from a representative through equal-valued
//! neighbors, absorbing them, and re-links every unequal neighbor to the
//! grown plateau. The borders it leaves behind decide whether the plateau is
//! a strict local extremum.

use std::collections::VecDeque;

use super::GraphFunction;
use crate::PulseValue;

/// Kind of strict local extremum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Extremum {
    /// Every border neighbor is higher
    Minimum,

    /// Every border neighbor is lower
    Maximum,
}

/// Outcome of contracting one plateau
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contraction {
    /// No neighbors left: the plateau covers the whole graph
    Root,

    /// Strict local extremum, ready to be scheduled
    Extremum(Extremum),

    /// Borders both higher and lower
    Mixed,
}

/// Work done by one contraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractionReport {
    /// Representative of the contracted plateau
    pub plateau: usize,

    /// Classification after contraction
    pub outcome: Contraction,

    /// Edges inspected while flooding
    pub edges_inspected: usize,

    /// Neighbors of the plateau afterwards
    pub border: usize,
}

impl<V: PulseValue> GraphFunction<V> {
    /// Merge every equal-valued neighbor plateau into `plateau`
    ///
    /// `plateau` must be a representative. Absorbed nodes point at it, carry
    /// the zero value and lose their adjacency.
    pub fn shrink(&mut self, plateau: usize) -> ContractionReport {
        debug_assert!(self.nodes[plateau].is_representative());

        let level = self.nodes[plateau].value;
        let mut agenda = VecDeque::from([plateau]);
        let mut edges_inspected = 0;
        let mut has_higher = false;
        let mut has_lower = false;

        while let Some(item) = agenda.pop_front() {
            let adjacent = std::mem::take(&mut self.nodes[item].neighbors);

            for tag in adjacent {
                edges_inspected += 1;
                let child = &mut self.nodes[tag];
                child.neighbors.remove(&item);
                if child.parent == plateau {
                    continue;
                }

                if child.value == level {
                    child.parent = plateau;
                    child.value = V::default();
                    let absorbed = child.size;
                    agenda.push_back(tag);

                    let grown = &mut self.nodes[plateau];
                    grown.neighbors.remove(&tag);
                    grown.size += absorbed;
                } else {
                    if child.value > level {
                        has_higher = true;
                    } else {
                        has_lower = true;
                    }
                    self.link(plateau, tag);
                }
            }
        }

        let border = self.nodes[plateau].neighbors.len();
        let outcome = if border == 0 {
            Contraction::Root
        } else {
            match (has_higher, has_lower) {
                (true, false) => Contraction::Extremum(Extremum::Minimum),
                (false, true) => Contraction::Extremum(Extremum::Maximum),
                _ => Contraction::Mixed,
            }
        };

        ContractionReport {
            plateau,
            outcome,
            edges_inspected,
            border,
        }
    }

    /// Neighbor whose value is closest to the plateau's, on its extremal side
    ///
    /// For a maximum: the largest lower neighbor value. For a minimum: the
    /// smallest higher one. Values are only compared, never subtracted.
    /// Ties go to the lowest tag.
    pub fn nearest(&self, plateau: usize) -> Option<usize> {
        let level = self.nodes[plateau].value;
        let mut best: Option<(usize, V)> = None;

        for &tag in &self.nodes[plateau].neighbors {
            let value = self.nodes[tag].value;
            let closer = match best {
                None => true,
                Some((_, best_value)) if value < level => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if closer {
                best = Some((tag, value));
            }
        }

        best.map(|(tag, _)| tag)
    }
}
