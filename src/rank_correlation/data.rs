//! rank_correlation::data — validated paired samples and the joint sort.
//!
//! Purpose
//! -------
//! Provide the containers through which observations enter the Kendall
//! stack. [`PairedSample`] holds raw `(x, y)` pairs after boundary checks;
//! [`PresortedPair`] holds the same pairs reordered so `x` is non-descending
//! and `y` follows in lockstep, which is the precondition of the engine.
//!
//! Key behaviors
//! -------------
//! - [`PairedSample::new`] rejects length mismatches, NaN values, and
//!   lengths beyond [`MAX_OBSERVATIONS`].
//! - [`PairedSample::joint_sort`] produces a [`PresortedPair`] by a stable
//!   sort of the pairs on `x` (`f64::total_cmp`).
//! - [`PresortedPair::new`] accepts data the caller already sorted and
//!   verifies the ordering of `x`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.len() == y.len() <= MAX_OBSERVATIONS`.
//! - No NaN in either series; ±∞ are allowed and ordered as usual.
//! - For a [`PresortedPair`], `x[i - 1] <= x[i]` for every `i`.
//!
//! Conventions
//! -----------
//! - Ties in `x` keep their input order in the joint sort; the engine orders
//!   `y` within each tie group itself.
//! - `total_cmp` places `-0.0` directly before `0.0`, so equal zeros remain
//!   one adjacent tie run under `==`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every rejection branch, the lockstep property of the
//!   joint sort, and `PresortedPair::new` on sorted and unsorted input.
use crate::rank_correlation::errors::{KTauError, KTauResult};
use ndarray::{Array1, ArrayView1};

/// Largest N for which `nPair`, the tie terms, and `2·swaps` all fit `i64`.
pub const MAX_OBSERVATIONS: usize = 1 << 31;

/// `PairedSample` — validated pair of equal-length observation series.
///
/// Fields
/// ------
/// - `x`: `Array1<f64>`
///   First series; the joint sort orders pairs by it.
/// - `y`: `Array1<f64>`
///   Second series; `(x[i], y[i])` is one observation.
///
/// Invariants
/// ----------
/// - Fields are private so every value passes [`validate_pair`]; read them
///   through [`PairedSample::x`] and [`PairedSample::y`].
///
/// ```compile_fail
/// # use ndarray::array;
/// # use rust_kendall::rank_correlation::PairedSample;
/// let unchecked = PairedSample { x: array![1.0, 2.0, 3.0], y: array![3.0, 2.0] };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PairedSample {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl PairedSample {
    /// Construct a validated sample.
    ///
    /// Errors
    /// ------
    /// - `KTauError::LengthMismatch` when `x.len() != y.len()`.
    /// - `KTauError::TooManyObservations` when the length exceeds
    ///   [`MAX_OBSERVATIONS`].
    /// - `KTauError::InvalidData` for the first NaN, scanning `x` then `y`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_kendall::rank_correlation::data::PairedSample;
    /// let sample = PairedSample::new(array![3.0, 1.0, 2.0], array![30.0, 10.0, 20.0]).unwrap();
    /// let sorted = sample.joint_sort();
    /// assert_eq!(sorted.x().to_vec(), vec![1.0, 2.0, 3.0]);
    /// assert_eq!(sorted.y().to_vec(), vec![10.0, 20.0, 30.0]);
    /// ```
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> KTauResult<Self> {
        validate_pair(x.view(), y.view())?;
        Ok(PairedSample { x, y })
    }

    /// Copy two slices into a validated sample.
    pub fn from_slices(x: &[f64], y: &[f64]) -> KTauResult<Self> {
        PairedSample::new(Array1::from(x.to_vec()), Array1::from(y.to_vec()))
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    /// Number of observation pairs.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Reorder the pairs so `x` is non-descending, moving `y` in lockstep.
    pub fn joint_sort(&self) -> PresortedPair {
        let mut pairs: Vec<(f64, f64)> = self.x.iter().copied().zip(self.y.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        PresortedPair { x: Array1::from(x), y: Array1::from(y) }
    }
}

/// `PresortedPair` — pairs ordered by `x`, the engine's input.
#[derive(Debug, Clone, PartialEq)]
pub struct PresortedPair {
    x: Array1<f64>,
    y: Array1<f64>,
}

impl PresortedPair {
    /// Wrap data the caller has already sorted by `x`.
    ///
    /// Errors
    /// ------
    /// - Every error of [`PairedSample::new`].
    /// - `KTauError::NotPresorted { index }` at the first `i` with
    ///   `x[i] < x[i - 1]`.
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> KTauResult<Self> {
        let sample = PairedSample::new(x, y)?;
        verify_presorted(sample.x.view())?;
        Ok(PresortedPair { x: sample.x, y: sample.y })
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Owned copies of both series as contiguous vectors.
    pub fn to_vecs(&self) -> (Vec<f64>, Vec<f64>) {
        (self.x.to_vec(), self.y.to_vec())
    }
}

/// Check the boundary constraints on a raw pair of series.
///
/// Errors
/// ------
/// - `KTauError::LengthMismatch`, `KTauError::TooManyObservations`,
///   `KTauError::InvalidData` as documented on [`PairedSample::new`].
pub fn validate_pair<'a>(x: ArrayView1<'a, f64>, y: ArrayView1<'a, f64>) -> KTauResult<()> {
    let (x_len, y_len) = (x.len(), y.len());
    if x_len != y_len {
        return Err(KTauError::LengthMismatch { x_len, y_len });
    }
    if x_len > MAX_OBSERVATIONS {
        return Err(KTauError::TooManyObservations { len: x_len, max: MAX_OBSERVATIONS });
    }
    for (series, values) in [("x", x), ("y", y)] {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| v.is_nan()) {
            return Err(KTauError::InvalidData { series, index, value });
        }
    }
    Ok(())
}

/// Verify `x` is non-descending.
///
/// Errors
/// ------
/// - `KTauError::NotPresorted { index }` at the first `i` where
///   `x[i - 1] <= x[i]` fails, which also catches NaN.
pub fn verify_presorted(x: ArrayView1<'_, f64>) -> KTauResult<()> {
    for (i, w) in x.windows(2).into_iter().enumerate() {
        if !(w[0] <= w[1]) {
            return Err(KTauError::NotPresorted { index: i + 1 });
        }
    }
    Ok(())
}
