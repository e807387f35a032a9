//! Size-ordered schedule of pending extrema
//!
//! Bucket queue: bucket `k` holds plateaus of size `k + 1`.
//! Small sizes (below the cutoff ≈ √n) live in a pre-allocated array;
//! larger plateaus are rare and go to a sparse map.
//!
//! Entries are never removed when a plateau merges. Instead `pop` drops
//! entries that are no longer active (lazy invalidation).

mod policy;

pub use policy::{Inverted, TieBreak, TieBreakPolicy};

use std::collections::{HashMap, VecDeque};

use crate::graph::{Extremum, GraphFunction};
use crate::PulseValue;

/// Schedule sizing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Number of pre-allocated buckets
    pub cutoff: usize,
}

impl ScheduleConfig {
    /// Cutoff ⌊√n⌋ for a graph of `nnodes` nodes
    pub fn for_nodes(nnodes: usize) -> Self {
        Self {
            cutoff: (nnodes as f64).sqrt() as usize,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { cutoff: 100 }
    }
}

/// Bucket priority queue over plateau sizes
#[derive(Debug)]
pub struct Schedule<P> {
    cutoff: usize,
    boxes: Vec<VecDeque<usize>>,
    store: HashMap<usize, VecDeque<usize>>,

    /// Bucket the next entry is drawn from
    start: usize,

    /// One past the highest bucket ever used
    stop: usize,

    tiebreak: TieBreak,
    policy: P,
}

impl<P: TieBreakPolicy> Schedule<P> {
    /// Create an empty schedule
    pub fn new(config: ScheduleConfig, policy: P) -> Self {
        Self {
            cutoff: config.cutoff,
            boxes: (0..config.cutoff).map(|_| VecDeque::new()).collect(),
            store: HashMap::new(),
            start: 0,
            stop: 0,
            tiebreak: policy.tie_break(1),
            policy,
        }
    }

    /// Queue plateau `tag` of `size`
    ///
    /// Minima join the tail of their bucket, maxima the head.
    pub fn push(&mut self, tag: usize, size: usize, extremum: Extremum) {
        debug_assert!(size >= 1, "plateaus are never empty");
        debug_assert!(size > self.start, "size {size} is behind the cursor");

        self.stop = self.stop.max(size);
        let bucket = self.bucket_mut(size - 1);
        match extremum {
            Extremum::Minimum => bucket.push_back(tag),
            Extremum::Maximum => bucket.push_front(tag),
        }
    }

    /// Smallest pending plateau that is still active in `graph`
    pub fn pop<V: PulseValue>(&mut self, graph: &GraphFunction<V>) -> Option<usize> {
        while self.advance() {
            let size = self.start + 1;
            let tiebreak = self.tiebreak;
            let bucket = self.bucket_mut(self.start);
            let candidate = match tiebreak {
                TieBreak::Ceiling => bucket.pop_back(),
                TieBreak::Floor => bucket.pop_front(),
            };

            match candidate {
                Some(tag) if graph.is_active(tag, size) => return Some(tag),
                _ => continue,
            }
        }
        None
    }

    /// Plateau size the cursor currently points at
    pub fn cursor(&self) -> usize {
        self.start + 1
    }

    /// Tie-break in force at the cursor
    pub fn tiebreak(&self) -> TieBreak {
        self.tiebreak
    }

    /// Entries still queued, stale ones included
    pub fn len(&self) -> usize {
        self.boxes.iter().map(VecDeque::len).sum::<usize>()
            + self.store.values().map(VecDeque::len).sum::<usize>()
    }

    /// No entries queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the cursor to the first non-empty bucket; false once past `stop`
    fn advance(&mut self) -> bool {
        while self.start < self.stop {
            if !self.bucket_is_empty(self.start) {
                return true;
            }
            if self.start >= self.cutoff {
                self.store.remove(&self.start);
            }
            self.start += 1;
            self.tiebreak = self.policy.tie_break(self.start + 1);
        }
        false
    }

    fn bucket_is_empty(&self, index: usize) -> bool {
        if index < self.cutoff {
            self.boxes[index].is_empty()
        } else {
            self.store.get(&index).map_or(true, VecDeque::is_empty)
        }
    }

    fn bucket_mut(&mut self, index: usize) -> &mut VecDeque<usize> {
        if index < self.cutoff {
            &mut self.boxes[index]
        } else {
            self.store.entry(index).or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Star graph: centre 0 joined to `n - 1` leaves, all values distinct
    fn star(n: usize) -> GraphFunction<i64> {
        let values = (0..n as i64).collect();
        let arcs: Vec<_> = (1..n).map(|k| (0, k)).collect();
        GraphFunction::new(values, arcs).unwrap()
    }

    #[test]
    fn test_cutoff_is_square_root() {
        assert_eq!(ScheduleConfig::for_nodes(13).cutoff, 3);
        assert_eq!(ScheduleConfig::for_nodes(100).cutoff, 10);
        assert_eq!(ScheduleConfig::for_nodes(1).cutoff, 1);
    }

    #[test]
    fn test_ceiling_draws_from_tail() {
        let graph = star(8);
        let mut schedule = Schedule::new(ScheduleConfig { cutoff: 2 }, TieBreak::Ceiling);

        // Every node has size 1 in a fresh graph; sizes here only pick buckets
        schedule.push(3, 1, Extremum::Maximum);
        schedule.push(5, 1, Extremum::Minimum);
        schedule.push(1, 1, Extremum::Maximum);

        // Bucket reads [1, 3, 5]: maxima at the head, minima at the tail
        assert_eq!(schedule.pop(&graph), Some(5));
        assert_eq!(schedule.pop(&graph), Some(3));
        assert_eq!(schedule.pop(&graph), Some(1));
        assert_eq!(schedule.pop(&graph), None);
    }

    #[test]
    fn test_floor_draws_from_head() {
        let graph = star(8);
        let mut schedule = Schedule::new(ScheduleConfig { cutoff: 4 }, TieBreak::Floor);
        schedule.push(2, 1, Extremum::Minimum);
        schedule.push(4, 1, Extremum::Maximum);
        schedule.push(6, 1, Extremum::Minimum);

        assert_eq!(schedule.pop(&graph), Some(4));
        assert_eq!(schedule.pop(&graph), Some(2));
        assert_eq!(schedule.pop(&graph), Some(6));
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        let mut graph = star(4);
        let mut schedule = Schedule::new(ScheduleConfig { cutoff: 2 }, TieBreak::Ceiling);
        schedule.push(1, 1, Extremum::Minimum);
        schedule.push(2, 1, Extremum::Minimum);

        // Node 2 merges away
        graph.nodes_mut()[2].parent = 0;

        assert_eq!(schedule.pop(&graph), Some(1));
        assert_eq!(schedule.pop(&graph), None);
    }

    #[test]
    fn test_resized_entries_are_skipped() {
        let mut graph = star(4);
        let mut schedule = Schedule::new(ScheduleConfig { cutoff: 1 }, TieBreak::Ceiling);
        schedule.push(3, 1, Extremum::Maximum);
        graph.nodes_mut()[3].size = 2;

        assert_eq!(schedule.pop(&graph), None);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_sparse_buckets_beyond_cutoff() {
        let mut graph = star(10);
        graph.nodes_mut()[7].size = 6;
        graph.nodes_mut()[8].size = 4;

        let mut schedule = Schedule::new(ScheduleConfig { cutoff: 2 }, TieBreak::Ceiling);
        schedule.push(7, 6, Extremum::Minimum);
        schedule.push(8, 4, Extremum::Maximum);
        schedule.push(9, 1, Extremum::Maximum);
        assert_eq!(schedule.len(), 3);

        assert_eq!(schedule.pop(&graph), Some(9));
        assert_eq!(schedule.pop(&graph), Some(8));
        assert_eq!(schedule.cursor(), 4);
        assert_eq!(schedule.pop(&graph), Some(7));
        assert_eq!(schedule.cursor(), 6);
        assert_eq!(schedule.pop(&graph), None);
    }

    #[test]
    fn test_cursor_never_moves_backward() {
        let mut graph = star(12);
        for (tag, size) in [(1, 3), (2, 1), (3, 5), (4, 2), (5, 5)] {
            graph.nodes_mut()[tag].size = size;
        }

        let mut schedule = Schedule::new(ScheduleConfig { cutoff: 3 }, TieBreak::Floor);
        for (tag, size) in [(1, 3), (2, 1), (3, 5), (4, 2), (5, 5)] {
            schedule.push(tag, size, Extremum::Minimum);
        }

        let mut last = schedule.cursor();
        let mut sizes = Vec::new();
        while let Some(tag) = schedule.pop(&graph) {
            assert!(schedule.cursor() >= last);
            last = schedule.cursor();
            sizes.push(graph.nodes()[tag].size);
        }
        assert_eq!(sizes, vec![1, 2, 3, 5, 5]);
    }

    #[test]
    fn test_policy_reevaluated_per_size() {
        let mut graph = star(8);
        graph.nodes_mut()[3].size = 2;
        graph.nodes_mut()[4].size = 2;

        let policy = |size: usize| {
            if size == 1 {
                TieBreak::Floor
            } else {
                TieBreak::Ceiling
            }
        };
        let mut schedule = Schedule::new(ScheduleConfig { cutoff: 4 }, policy);
        assert_eq!(schedule.tiebreak(), TieBreak::Floor);

        schedule.push(1, 1, Extremum::Minimum);
        schedule.push(2, 1, Extremum::Maximum);
        schedule.push(3, 2, Extremum::Minimum);
        schedule.push(4, 2, Extremum::Maximum);

        assert_eq!(schedule.pop(&graph), Some(2));
        assert_eq!(schedule.pop(&graph), Some(1));
        assert_eq!(schedule.pop(&graph), Some(3));
        assert_eq!(schedule.tiebreak(), TieBreak::Ceiling);
        assert_eq!(schedule.pop(&graph), Some(4));
    }
}
