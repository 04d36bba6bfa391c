//! rust_kendall — O(N log N) Kendall tau-b numerator with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Kendall numerator engine to Python via the `_rust_kendall`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module [`rank_correlation`] as the public crate
//!   surface.
//! - Define the `KendallTau` `#[pyclass]`, the `ktau_numer` and `sign_sum`
//!   `#[pyfunction]`s, and the `#[pymodule]` initializer.
//! - Create and register the `rank_correlation` Python submodule so dotted
//!   imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in [`rank_correlation`]; this file performs
//!   only FFI glue, argument conversion, and error mapping.
//! - Inputs are copied out of Python before the GIL is released, so
//!   computations never touch Python-owned memory.
//!
//! Conventions
//! -----------
//! - Python results are Python `int`s carrying the full `i64` numerator. The
//!   legacy 32-bit value is available through `KendallTau.numerator_i32()`.
//! - Errors from core Rust code surface as `ValueError`; argument-type
//!   failures surface as `TypeError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`rank_correlation`] directly and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_kendall_pipeline.rs`. The bindings are exercised
//!   from Python.

pub mod rank_correlation;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::ArrayView1;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    rank_correlation::{
        data::{PairedSample, validate_pair},
        engine::{KTauScratch, KendallEngine, KendallNumerator},
        naive,
    },
    utils::{extract_ktau_options, extract_series},
};

/// KendallTau — Python-facing result of the Kendall numerator engine.
///
/// Purpose
/// -------
/// Run [`KendallEngine`] on two Python series and expose the numerator with
/// every term of its decomposition.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `KendallTau(x, y, tie_rule=None, parallel=None, parallel_min_len=None,
/// presorted=False, verify_presorted=None, verbose=None)`:
/// - `x`, `y`: `&PyAny`
///   One-dimensional array-likes of equal length with no NaN.
/// - `tie_rule`: `Option<&str>`
///   `"inclusive"` (default) or `"strict"`.
/// - `parallel`, `parallel_min_len`: rayon options, see
///   [`extract_ktau_options`].
/// - `presorted`: `bool`
///   Skip the joint sort; `x` must already be non-descending.
/// - `verify_presorted`: `Option<bool>`
///   With `presorted=True`, check `x` before computing.
/// - `verbose`: `Option<bool>`
///   Log the call when built with `obs_slog`.
///
/// Fields
/// ------
/// - `inner`: [`KendallNumerator`]
/// - `tie_rule`: name of the merge tie rule used.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_kendall.rank_correlation", frozen)]
pub struct KendallTau {
    inner: KendallNumerator,
    tie_rule: String,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl KendallTau {
    #[new]
    #[pyo3(
        text_signature = "(x, y, /, tie_rule=None, parallel=None, parallel_min_len=None, presorted=False, verify_presorted=None, verbose=None)",
        signature = (x, y, tie_rule = None, parallel = None, parallel_min_len = None, presorted = false, verify_presorted = None, verbose = None)
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, tie_rule: Option<&str>,
        parallel: Option<bool>, parallel_min_len: Option<usize>, presorted: bool,
        verify_presorted: Option<bool>, verbose: Option<bool>,
    ) -> PyResult<KendallTau> {
        let opts =
            extract_ktau_options(tie_rule, parallel, parallel_min_len, verify_presorted, verbose)?;
        let x = extract_series(x, "x")?;
        let y = extract_series(y, "y")?;
        let engine = KendallEngine::new(opts);

        let inner = if presorted {
            validate_pair(ArrayView1::from(&x[..]), ArrayView1::from(&y[..]))?;
            py.allow_threads(|| {
                let mut scratch = KTauScratch::new(x.len());
                engine.compute_slices(&x, &y, &mut scratch)
            })?
        } else {
            let sample = PairedSample::from_slices(&x, &y)?;
            py.allow_threads(|| engine.compute(&sample))?
        };

        Ok(KendallTau { inner, tie_rule: engine.tie_rule().to_string() })
    }

    /// The tau-b numerator S.
    #[getter]
    pub fn numerator(&self) -> i64 {
        self.inner.numerator
    }

    /// S narrowed to 32 bits; raises `ValueError` when it does not fit.
    pub fn numerator_i32(&self) -> PyResult<i32> {
        Ok(self.inner.to_i32()?)
    }

    #[getter]
    pub fn n(&self) -> usize {
        self.inner.n
    }

    #[getter]
    pub fn n_pairs(&self) -> u64 {
        self.inner.n_pairs
    }

    #[getter]
    pub fn x_ties(&self) -> u64 {
        self.inner.x_ties
    }

    #[getter]
    pub fn y_ties(&self) -> u64 {
        self.inner.y_ties
    }

    #[getter]
    pub fn joint_ties(&self) -> u64 {
        self.inner.joint_ties
    }

    #[getter]
    pub fn swaps(&self) -> u64 {
        self.inner.swaps
    }

    #[getter]
    pub fn tie_rule(&self) -> &str {
        &self.tie_rule
    }

    fn __repr__(&self) -> String {
        format!(
            "KendallTau(numerator={}, n={}, tie_rule='{}')",
            self.inner.numerator, self.inner.n, self.tie_rule
        )
    }
}

/// Kendall tau-b numerator of two series.
///
/// Validates, joint-sorts by `x`, and runs the merge-sort engine with the
/// GIL released.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    text_signature = "(x, y, /, tie_rule=None, parallel=None, parallel_min_len=None)",
    signature = (x, y, tie_rule = None, parallel = None, parallel_min_len = None)
)]
pub fn ktau_numer<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, tie_rule: Option<&str>,
    parallel: Option<bool>, parallel_min_len: Option<usize>,
) -> PyResult<i64> {
    let opts = extract_ktau_options(tie_rule, parallel, parallel_min_len, None, None)?;
    let sample = PairedSample::from_slices(&extract_series(x, "x")?, &extract_series(y, "y")?)?;
    let engine = KendallEngine::new(opts);
    let out = py.allow_threads(|| engine.compute(&sample))?;
    Ok(out.numerator)
}

/// Ascending minus descending pairs of a single series, by brute force.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(text_signature = "(x, /)")]
pub fn sign_sum<'py>(py: Python<'py>, x: &Bound<'py, PyAny>) -> PyResult<i64> {
    let x = extract_series(x, "x")?;
    validate_pair(ArrayView1::from(&x[..]), ArrayView1::from(&x[..]))?;
    Ok(py.allow_threads(|| naive::sign_sum(&x)))
}

/// _rust_kendall — PyO3 module initializer for the Python extension.
///
/// Key behaviors
/// -------------
/// - Create the `rank_correlation` submodule, attach it to the parent
///   module, and register it in `sys.modules` as
///   `rust_kendall.rank_correlation`.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_kendall<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let rank_correlation_mod = PyModule::new(_py, "rank_correlation")?;
    rank_correlation(_py, m, &rank_correlation_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_kendall.rank_correlation", rank_correlation_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn rank_correlation<'py>(
    _py: Python, rust_kendall: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<KendallTau>()?;
    m.add_function(wrap_pyfunction!(ktau_numer, m)?)?;
    m.add_function(wrap_pyfunction!(sign_sum, m)?)?;
    rust_kendall.add_submodule(m)?;
    Ok(())
}
