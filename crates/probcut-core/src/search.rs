//! Interface between ProbCut and the alpha-beta search it prunes.

use crate::types::{Depth, Score};

/// Search-side hooks ProbCut needs from the engine.
///
/// Implemented by the per-thread search context. The position being probed
/// is whatever node the context currently sits on; ProbCut never inspects it.
pub trait ProbeSearch {
    /// Searches the current node to `depth` within `(alpha, beta)`.
    ///
    /// Returns `None` if the search was aborted before producing a value.
    fn probe(&mut self, depth: Depth, alpha: Score, beta: Score) -> Option<Score>;

    /// Whether this context is currently running a ProbCut probe.
    fn is_probing(&self) -> bool;

    /// Marks the start or end of a probe.
    fn set_probing(&mut self, probing: bool);
}

/// Kind of bound a cutoff value represents.
///
/// - `Lower`: the deep value is at least the returned score (fail-high)
/// - `Upper`: the deep value is at most the returned score (fail-low)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Bound {
    Lower = 1,
    Upper = 2,
}

/// Outcome of a ProbCut attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The full-depth search must be performed.
    NoCutoff,
    /// The subtree can be cut with `value` as a bound.
    Cutoff { value: Score, bound: Bound },
}

impl Decision {
    /// A cutoff only ever yields a bound, never the exact minimax value.
    #[inline]
    pub fn is_exact(self) -> bool {
        false
    }
}
