//! rank_correlation — Kendall tau-b numerator in O(N log N).
//!
//! Purpose
//! -------
//! Compute the numerator S of Kendall's tau-b, the number of concordant
//! minus discordant pairs with tie adjustment, for two paired series using
//! Knight's merge-sort method. A brute-force O(N²) counter is kept alongside
//! as the reference and as the single-sequence entry point.
//!
//! Key behaviors
//! -------------
//! - [`ktau_numer`] is the production entry point: validate two series,
//!   joint-sort them by `x`, and return S as `i64`.
//! - [`KendallEngine`] exposes the same computation with explicit
//!   [`KTauOptions`], reusable [`KTauScratch`], and the full
//!   [`KendallNumerator`] breakdown (`nPair`, m1, m2, m3, swaps).
//! - [`sign_sum`] returns ascending minus descending pairs of one sequence.
//! - [`NumeratorAlgorithm`] lets callers swap the engine for the reference
//!   counter.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs have equal length, contain no NaN, and hold at most
//!   [`MAX_OBSERVATIONS`] pairs; [`PairedSample`] enforces all three.
//! - The core sorting and counting routines never fail. A violated
//!   precondition yields a wrong count, never a panic.
//! - Every call owns its buffers; the only shared state is the process-wide
//!   bulk-copy lock used when `serialize_copies` is set.
//!
//! Conventions
//! -----------
//! - Sorting is ascending under IEEE `<`; tie runs use IEEE `==`.
//! - The default [`MergeTieRule::Inclusive`] is the classic `<=` merge and
//!   is exact unless equal `y` values straddle a merge split;
//!   [`MergeTieRule::Strict`] is exact for every input.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_kendall::rank_correlation::prelude::*;
//!
//!   let s = ktau_numer(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0])?;
//!   assert_eq!(s, 1);
//!   # Ok::<(), KTauError>(())
//!   ```
//!
//! - Python bindings expose `ktau_numer`, `sign_sum` and a `KendallTau`
//!   result class; they rely on `From<KTauError> for PyErr` to raise
//!   `ValueError`.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each primitive (insertion sort, tie runs, merge,
//!   engine, naive counters).
//! - `tests/integration_kendall_pipeline.rs` cross-validates the engine
//!   against the naive counter on seeded random data and checks the
//!   symmetry properties of S.

pub mod data;
pub mod engine;
pub mod errors;
pub mod insertion;
pub mod merge;
pub mod naive;
pub mod options;
pub mod ties;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{MAX_OBSERVATIONS, PairedSample, PresortedPair};
pub use self::engine::{KTauScratch, KendallEngine, KendallNumerator, kendall_numerator, ktau_numer};
pub use self::errors::{KTauError, KTauResult};
pub use self::naive::{NaivePairCounter, pair_sign_sum, sign_sum};
pub use self::options::{KTauOptions, MergeTieRule, Parallelism};
pub use self::traits::NumeratorAlgorithm;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::engine::{KendallEngine, KendallNumerator, ktau_numer};
    pub use super::errors::{KTauError, KTauResult};
    pub use super::naive::sign_sum;
    pub use super::options::{KTauOptions, MergeTieRule, Parallelism};
}
