//! rank_correlation::ties — tie-run detection and tie-correction terms.
//!
//! Purpose
//! -------
//! Find maximal runs of equal adjacent values in a sorted sequence and turn
//! them into the combinatorial correction terms of the tau-b numerator.
//!
//! Key behaviors
//! -------------
//! - [`tie_runs`] yields each maximal run of length ≥ 2 as an index range,
//!   including a run that reaches the end of the slice.
//! - [`tie_correction`] sums `L·(L−1)/2` over those runs, the number of
//!   index pairs tied within each run.
//! - [`pair_count`] computes `n·(n−1)/2` in `u64` without forming the
//!   intermediate product.
//!
//! Invariants & assumptions
//! ------------------------
//! - Callers pass sorted data; on unsorted data only *adjacent* equal values
//!   are grouped, which undercounts ties but never panics.
//! - Equality is IEEE `==`, so `-0.0` and `0.0` share a run and NaN never
//!   joins one.
use std::ops::Range;

/// Number of unordered index pairs among `n` items, `n·(n−1)/2`.
///
/// One of `n`, `n − 1` is even, so it is halved before multiplying.
#[inline]
pub fn pair_count(n: u64) -> u64 {
    if n < 2 {
        0
    } else if n % 2 == 0 {
        (n / 2) * (n - 1)
    } else {
        n * ((n - 1) / 2)
    }
}

/// TieRuns — iterator over maximal runs of equal adjacent values.
///
/// Yields half-open ranges `lo..hi` with `hi - lo >= 2`. Singletons are
/// skipped.
#[derive(Debug, Clone)]
pub struct TieRuns<'a> {
    data: &'a [f64],
    pos: usize,
}

impl Iterator for TieRuns<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let n = self.data.len();
        while self.pos + 1 < n {
            let lo = self.pos;
            let mut hi = lo + 1;
            while hi < n && self.data[hi] == self.data[hi - 1] {
                hi += 1;
            }
            self.pos = hi;
            if hi - lo >= 2 {
                return Some(lo..hi);
            }
        }
        self.pos = n;
        None
    }
}

/// Iterate over the maximal tie runs of a sorted slice.
pub fn tie_runs(data: &[f64]) -> TieRuns<'_> {
    TieRuns { data, pos: 0 }
}

/// Sum of `L·(L−1)/2` over the maximal tie runs of a sorted slice.
///
/// Parameters
/// ----------
/// - `sorted`: `&[f64]`
///   Sequence assumed sorted non-descending.
///
/// Returns
/// -------
/// `u64`
///   Number of index pairs `(i, j)` with `sorted[i] == sorted[j]` found in
///   adjacent runs; `0` when `sorted.len() < 2`.
pub fn tie_correction(sorted: &[f64]) -> u64 {
    tie_runs(sorted).map(|run| pair_count(run.len() as u64)).sum()
}
