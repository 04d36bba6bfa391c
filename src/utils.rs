//! utils — conversion helpers for the PyO3 boundary.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! maps Python arguments onto the Rust types of [`crate::rank_correlation`].

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use crate::rank_correlation::options::{DEFAULT_PARALLEL_MIN_LEN, KTauOptions, MergeTieRule, Parallelism};

/// Copy a Python series into an owned `Vec<f64>`.
///
/// Accepts, in order of preference:
/// - a 1-D float64 `numpy.ndarray` (strided views are copied element-wise);
/// - any object with `to_numpy()` returning one, e.g. `pandas.Series`;
/// - any Python sequence of floats.
///
/// Errors
/// ------
/// - `TypeError` naming `name` when none of the above applies.
#[cfg(feature = "python-bindings")]
pub fn extract_series<'py>(raw: &Bound<'py, PyAny>, name: &str) -> PyResult<Vec<f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(readonly_to_vec(&arr));
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(arr) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(readonly_to_vec(&arr));
        }
    }

    raw.extract::<Vec<f64>>().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name} must be a 1-D numpy.ndarray, pandas.Series, or sequence of float64"
        ))
    })
}

#[cfg(feature = "python-bindings")]
fn readonly_to_vec(arr: &PyReadonlyArray1<'_, f64>) -> Vec<f64> {
    match arr.as_slice() {
        Ok(slice) => slice.to_vec(),
        Err(_) => arr.as_array().to_vec(),
    }
}

/// Build [`KTauOptions`] from optional Python keyword arguments.
///
/// Parameters
/// ----------
/// - `tie_rule`: `Option<&str>`
///   `"inclusive"` (default) or `"strict"`.
/// - `parallel`: `Option<bool>`
///   Use rayon for large inputs; defaults to `false`.
/// - `parallel_min_len`: `Option<usize>`
///   Rayon split threshold; defaults to [`DEFAULT_PARALLEL_MIN_LEN`]. Only valid
///   with `parallel=True`.
/// - `verify_presorted`: `Option<bool>`
///   Check sortedness of caller-presorted input; defaults to `false`.
/// - `verbose`: `Option<bool>`
///   Log each call when built with `obs_slog`; defaults to `false`.
///
/// Errors
/// ------
/// - `ValueError` for an unknown tie rule, a cutoff below the insertion
///   sort cutoff, or a cutoff given without `parallel=True`.
#[cfg(feature = "python-bindings")]
pub fn extract_ktau_options(
    tie_rule: Option<&str>, parallel: Option<bool>, parallel_min_len: Option<usize>,
    verify_presorted: Option<bool>, verbose: Option<bool>,
) -> PyResult<KTauOptions> {
    let rule = match tie_rule {
        Some(name) => name.parse::<MergeTieRule>()?,
        None => MergeTieRule::Inclusive,
    };

    let parallelism = match (parallel.unwrap_or(false), parallel_min_len) {
        (true, min_len) => {
            Parallelism::Rayon { min_len: min_len.unwrap_or(DEFAULT_PARALLEL_MIN_LEN) }
        }
        (false, Some(_)) => {
            return Err(PyValueError::new_err("parallel_min_len requires parallel=True"));
        }
        (false, None) => Parallelism::Sequential,
    };

    let opts = KTauOptions::new(
        rule,
        parallelism,
        true,
        verify_presorted.unwrap_or(false),
        verbose.unwrap_or(false),
    )?;
    Ok(opts)
}
