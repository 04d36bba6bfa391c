//! rank_correlation::errors — shared error type and Python bridge.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the Kendall numerator stack,
//! together with a conversion layer to Python exceptions for PyO3-based
//! bindings. The numerical core is total over valid input, so every variant
//! here originates at a boundary: data validation, option validation, the
//! optional sortedness check, or narrowing of the final result.
//!
//! Key behaviors
//! -------------
//! - Define [`KTauResult`] and [`KTauError`] as the canonical result and
//!   error types for boundary validation and engine entry points.
//! - Attach human-readable `Display` messages to each variant, phrased in
//!   terms of the violated constraint and embedding the offending payload.
//! - Implement `From<KTauError> for PyErr` so Python callers see a
//!   `ValueError` carrying the Rust message.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing inside the merge sort, insertion sort, or tie scans returns an
//!   error; a violated precondition there yields a wrong count, not a
//!   `KTauError`.
//! - Variants are small and cloneable so tests and orchestration code can
//!   match on them freely.
//!
//! Conventions
//! -----------
//! - Indices in payloads are 0-based.
//! - `series` payloads name the offending input as `"x"` or `"y"`.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` embeds each payload. The PyO3
//!   conversion requires the Python C API and is exercised from Python.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

pub type KTauResult<T> = Result<T, KTauError>;

/// KTauError — boundary failures for the Kendall numerator stack.
///
/// Variants
/// --------
/// - `LengthMismatch { x_len, y_len }`
///   The two sequences do not pair up one-to-one.
/// - `InvalidData { series, index, value }`
///   A NaN was found; NaN has no place in the joint sort order.
/// - `TooManyObservations { len, max }`
///   N exceeds the range for which the `i64` numerator cannot overflow.
/// - `NotPresorted { index }`
///   The first sequence decreases between `index - 1` and `index`. Only
///   emitted when sortedness verification is requested.
/// - `NarrowingOverflow { value }`
///   The numerator does not fit the legacy 32-bit output.
/// - `InvalidParallelCutoff { min_len }`
///   A rayon split threshold below the insertion-sort cutoff.
/// - `InvalidTieRule { name }`
///   An unknown merge tie rule name.
#[derive(Debug, Clone, PartialEq)]
pub enum KTauError {
    // ---- Input validation ----
    LengthMismatch { x_len: usize, y_len: usize },
    InvalidData { series: &'static str, index: usize, value: f64 },
    TooManyObservations { len: usize, max: usize },
    NotPresorted { index: usize },

    // ---- Output ----
    NarrowingOverflow { value: i64 },

    // ---- Options ----
    InvalidParallelCutoff { min_len: usize },
    InvalidTieRule { name: String },
}

impl std::error::Error for KTauError {}

impl std::fmt::Display for KTauError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KTauError::LengthMismatch { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} observations, y has {y_len}.")
            }
            KTauError::InvalidData { series, index, value } => {
                write!(f, "Invalid value {value} in {series} at index {index}. NaN is not ordered.")
            }
            KTauError::TooManyObservations { len, max } => {
                write!(f, "Too many observations: {len} (at most {max} supported).")
            }
            KTauError::NotPresorted { index } => {
                write!(f, "First sequence is not sorted: it decreases at index {index}.")
            }
            KTauError::NarrowingOverflow { value } => {
                write!(f, "Numerator {value} does not fit in a 32-bit signed integer.")
            }
            KTauError::InvalidParallelCutoff { min_len } => {
                write!(
                    f,
                    "Invalid parallel cutoff {min_len}. Must be at least the insertion-sort cutoff."
                )
            }
            KTauError::InvalidTieRule { name } => {
                write!(f, "Invalid tie rule {name:?} (expected 'inclusive' or 'strict').")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<KTauError> for PyErr {
    fn from(err: KTauError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
