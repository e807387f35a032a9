//! Graph function families for benchmarks and tests
//!
//! Each family maps a size parameter to a connected graph with integer
//! values. Random values are drawn from `[0, VALUE_RANGE)`.

use rand::seq::index;
use rand::Rng;

use crate::graph::GraphFunction;
use crate::DptError;

/// Upper bound (exclusive) for random node values
pub const VALUE_RANGE: i64 = 1 << 15;

/// Values of the 13-node reference example
pub const EXAMPLE_VALUES: [i64; 13] = [9, 7, 6, 0, 8, 13, 6, 7, 7, 0, 13, 13, 8];

/// Arcs of the 13-node reference example
pub const EXAMPLE_ARCS: [(usize, usize); 18] = [
    (12, 4),
    (4, 6),
    (4, 8),
    (6, 2),
    (0, 2),
    (8, 7),
    (8, 1),
    (0, 1),
    (0, 3),
    (2, 3),
    (2, 5),
    (2, 10),
    (11, 10),
    (7, 1),
    (1, 3),
    (3, 5),
    (5, 10),
    (3, 9),
];

/// Small hand-made graph with plateaus, a cycle and pendant nodes
pub fn reference_example() -> Result<GraphFunction<i64>, DptError> {
    GraphFunction::new(EXAMPLE_VALUES.to_vec(), EXAMPLE_ARCS)
}

/// Benchmark graph family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Path of `m` nodes with random values
    Path,

    /// Cycle of `m` nodes with random values
    Cycle,

    /// `m × m` grid with 4-neighborhoods and random values
    Grid,

    /// Complete graph on `m` nodes with values `0..m`
    Complete,

    /// Random spanning tree on `m` nodes plus `m√m / 10` random arcs,
    /// values `0..m`
    Random,
}

impl Family {
    /// Families timed by default
    pub const BENCHMARKS: [Family; 4] = [Family::Path, Family::Grid, Family::Complete, Family::Random];

    /// Human-readable title
    pub fn description(self) -> &'static str {
        match self {
            Family::Path => "Random sequences",
            Family::Cycle => "Random cyclic sequences",
            Family::Grid => "Random squares",
            Family::Complete => "Complete graphs with distinct values",
            Family::Random => "Random sparse graphs with distinct values",
        }
    }

    /// Largest exponent used by `cases` when none is given
    pub fn default_kmax(self) -> u32 {
        match self {
            Family::Path | Family::Cycle => 6,
            Family::Grid => 9,
            Family::Complete => 11,
            Family::Random => 12,
        }
    }

    /// Size parameters for `k = 1..=kmax`
    pub fn cases(self, kmax: Option<u32>) -> Vec<usize> {
        let kmax = kmax.unwrap_or_else(|| self.default_kmax());
        (1..=kmax)
            .map(|k| match self {
                Family::Path | Family::Cycle => 10usize.pow(k) + 1,
                Family::Grid => (1usize << k) + 1,
                Family::Complete | Family::Random => 1usize << k,
            })
            .collect()
    }

    /// Build the family member with size parameter `m`
    pub fn build<R: Rng + ?Sized>(self, m: usize, rng: &mut R) -> Result<GraphFunction<i64>, DptError> {
        match self {
            Family::Path => path(m, false, rng),
            Family::Cycle => path(m, true, rng),
            Family::Grid => grid(m, m, rng),
            Family::Complete => complete(m),
            Family::Random => sparse_random(m, sparse_extra_arcs(m), rng),
        }
    }
}

/// Path (or cycle) of `n` nodes with random values
pub fn path<R: Rng + ?Sized>(n: usize, cyclic: bool, rng: &mut R) -> Result<GraphFunction<i64>, DptError> {
    let values = random_values(n, rng);
    let mut arcs: Vec<_> = (1..n).map(|k| (k - 1, k)).collect();
    if cyclic && n > 2 {
        arcs.push((n - 1, 0));
    }
    GraphFunction::new(values, arcs)
}

/// `rows × cols` grid with random values
pub fn grid<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<GraphFunction<i64>, DptError> {
    let values = random_values(rows * cols, rng);
    let across = (0..rows).flat_map(|j| (1..cols).map(move |k| (j * cols + k - 1, j * cols + k)));
    let down = (1..rows).flat_map(|j| (0..cols).map(move |k| ((j - 1) * cols + k, j * cols + k)));
    GraphFunction::new(values, across.chain(down))
}

/// Complete graph on `m` nodes with values `0..m`
pub fn complete(m: usize) -> Result<GraphFunction<i64>, DptError> {
    let values = (0..m as i64).collect();
    let arcs = (0..m).flat_map(|i| (0..i).map(move |j| (i, j)));
    GraphFunction::new(values, arcs)
}

/// Random spanning tree on `m` nodes plus `extra` random arcs, values `0..m`
pub fn sparse_random<R: Rng + ?Sized>(
    m: usize,
    extra: usize,
    rng: &mut R,
) -> Result<GraphFunction<i64>, DptError> {
    let values = (0..m as i64).collect();
    let mut arcs: Vec<_> = (1..m).map(|k| (k, rng.gen_range(0..k))).collect();
    if m >= 2 {
        for _ in 0..extra {
            let pair = index::sample(rng, m, 2);
            arcs.push((pair.index(0), pair.index(1)));
        }
    }
    GraphFunction::new(values, arcs)
}

fn sparse_extra_arcs(m: usize) -> usize {
    (m as f64 * (m as f64).sqrt() / 10.0) as usize
}

fn random_values<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(0..VALUE_RANGE)).collect()
}
