//! Tie-break policies for equal-size extrema
//!
//! Minima are queued at the tail of their bucket and maxima at the head, so
//! the end a bucket is drawn from decides which kind goes first.

/// End of a size bucket to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum TieBreak {
    /// Draw from the tail: minima before maxima
    #[default]
    Ceiling,

    /// Draw from the head: maxima before minima
    Floor,
}

impl TieBreak {
    /// The other end
    pub fn inverse(self) -> Self {
        match self {
            TieBreak::Ceiling => TieBreak::Floor,
            TieBreak::Floor => TieBreak::Ceiling,
        }
    }
}

/// Size-indexed tie-break rule
///
/// Evaluated for size 1 when a schedule is created and again every time the
/// schedule's cursor reaches a new size.
pub trait TieBreakPolicy {
    /// Tie-break for pending extrema of `size`
    fn tie_break(&self, size: usize) -> TieBreak;
}

impl TieBreakPolicy for TieBreak {
    fn tie_break(&self, _size: usize) -> TieBreak {
        *self
    }
}

impl<F> TieBreakPolicy for F
where
    F: Fn(usize) -> TieBreak,
{
    fn tie_break(&self, size: usize) -> TieBreak {
        self(size)
    }
}

/// Policy that swaps ceiling and floor at every size
#[derive(Debug, Clone, Copy)]
pub struct Inverted<P>(pub P);

impl<P: TieBreakPolicy> TieBreakPolicy for Inverted<P> {
    fn tie_break(&self, size: usize) -> TieBreak {
        self.0.tie_break(size).inverse()
    }
}
