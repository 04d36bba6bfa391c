//! rank_correlation::naive — O(N²) reference sign counters.
//!
//! Purpose
//! -------
//! Provide brute-force pairwise counters used to validate the merge-sort
//! engine and to serve the single-sequence entry point.
//!
//! Key behaviors
//! -------------
//! - [`sign_sum`] returns `Σ_{i<j} −sign(x[i] − x[j])` over one sequence:
//!   +1 for every ascending pair, −1 for every descending pair, 0 for ties.
//! - [`pair_sign_sum`] returns `Σ_{i<j} sign(x[i] − x[j])·sign(y[i] − y[j])`,
//!   the exact concordant − discordant count of two sequences.
//! - [`NaivePairCounter`] wraps [`pair_sign_sum`] behind the same boundary
//!   checks as the engine.
//!
//! Invariants & assumptions
//! ------------------------
//! - The result of [`sign_sum`] lies in `[−nPair, nPair]`.
//! - A NaN difference contributes 0 (unordered pairs count as ties); the
//!   validated entry points reject NaN before reaching here.
//!
//! Conventions
//! -----------
//! - On the same two sequences, the engine with the strict merge tie rule
//!   and [`pair_sign_sum`] agree exactly.
use crate::rank_correlation::{data::PairedSample, errors::KTauResult};
use std::cmp::Ordering;

#[inline]
fn sign(a: f64, b: f64) -> i64 {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => 1,
        Some(Ordering::Less) => -1,
        _ => 0,
    }
}

/// Ascending minus descending pairs of a single sequence.
///
/// Examples
/// --------
/// ```rust
/// # use rust_kendall::rank_correlation::sign_sum;
/// assert_eq!(sign_sum(&[1.0, 2.0, 3.0]), 3);
/// assert_eq!(sign_sum(&[3.0, 2.0, 2.0]), -2);
/// ```
pub fn sign_sum(x: &[f64]) -> i64 {
    let mut s = 0_i64;
    for (i, &xi) in x.iter().enumerate() {
        for &xj in &x[i + 1..] {
            s -= sign(xi, xj);
        }
    }
    s
}

/// Concordant minus discordant pairs of two equal-length sequences.
///
/// Panics
/// ------
/// - Debug builds assert `x.len() == y.len()`; release builds use the
///   shorter length.
pub fn pair_sign_sum(x: &[f64], y: &[f64]) -> i64 {
    debug_assert_eq!(x.len(), y.len());
    let n = x.len().min(y.len());
    let mut s = 0_i64;
    for i in 0..n {
        for j in i + 1..n {
            s += sign(x[i], x[j]) * sign(y[i], y[j]);
        }
    }
    s
}

/// NaivePairCounter — validated O(N²) numerator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaivePairCounter;

impl NaivePairCounter {
    /// Numerator of a validated sample; never needs the joint sort.
    pub fn count(&self, sample: &PairedSample) -> i64 {
        let (x, y) = (sample.x().to_vec(), sample.y().to_vec());
        pair_sign_sum(&x, &y)
    }

    /// Validate two raw series and count.
    ///
    /// Errors
    /// ------
    /// - Every error of [`PairedSample::new`].
    pub fn count_slices(&self, x: &[f64], y: &[f64]) -> KTauResult<i64> {
        let sample = PairedSample::from_slices(x, y)?;
        Ok(self.count(&sample))
    }
}
