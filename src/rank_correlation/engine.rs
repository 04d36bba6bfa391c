//! rank_correlation::engine — O(N log N) Kendall tau-b numerator.
//!
//! Purpose
//! -------
//! Assemble the tie-adjusted numerator S of Kendall's tau-b from the
//! inversion-counting merge sort and the tie-run scans, following Knight's
//! (1966) method: sort the pairs by `x`, then count how far `y` is from
//! sorted.
//!
//! Key behaviors
//! -------------
//! - [`kendall_numerator`] is the core over slices: `x` sorted, `y` in
//!   lockstep (mutated), caller-owned scratch. It never fails.
//! - [`KendallEngine`] wraps the core with boundary checks, the joint sort,
//!   reusable scratch, optional sortedness verification, and optional
//!   `obs_slog` logging.
//! - [`ktau_numer`] is the one-call production entry point: validate, joint
//!   sort, run the two-sequence engine with default options.
//! - [`KendallNumerator`] reports every term of the formula and provides the
//!   explicit narrowing to the legacy 32-bit output.
//!
//! Invariants & assumptions
//! ------------------------
//! - The core requires `x` non-descending and `y` permuted in lockstep.
//!   Violations give a wrong numerator, never a panic; [`KendallEngine`] can
//!   check `x` first when `verify_presorted` is set.
//! - With [`MergeTieRule::Strict`], `|S| ≤ nPair` and S equals the pairwise
//!   sign-product sum for every input. With the default inclusive rule, that
//!   holds whenever no run of equal `y` values straddles a merge split.
//! - All counts are `u64` and S is `i64`; inputs are capped at
//!   [`MAX_OBSERVATIONS`] so neither can overflow.
//!
//! Conventions
//! -----------
//! - `x_ties` (m1), `y_ties` (m2) and `joint_ties` (m3) count tied index
//!   pairs, i.e. `Σ L·(L−1)/2` over tie runs.
//! - `S = nPair + m3 − m1 − m2 − 2·swaps`.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the documented scenarios (fully concordant, fully
//!   discordant, a tie group in `x`, degenerate N) and each term of the
//!   formula. Randomized cross-validation against the O(N²) reference lives
//!   in the integration tests.
use crate::rank_correlation::{
    data::{MAX_OBSERVATIONS, PairedSample, PresortedPair, verify_presorted},
    errors::{KTauError, KTauResult},
    insertion::insertion_sort_count,
    merge::merge_sort_count,
    options::{KTauOptions, MergeTieRule},
    ties::{pair_count, tie_correction, tie_runs},
};
use ndarray::ArrayView1;

/// KendallNumerator — the numerator S together with the terms behind it.
///
/// Fields
/// ------
/// - `n`: number of observation pairs.
/// - `n_pairs`: `n·(n−1)/2`.
/// - `x_ties`: tied pairs in `x` (m1).
/// - `y_ties`: tied pairs in `y` (m2).
/// - `joint_ties`: pairs tied in both `x` and `y` (m3).
/// - `swaps`: inversions counted while sorting `y`.
/// - `numerator`: `S = n_pairs + joint_ties − x_ties − y_ties − 2·swaps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KendallNumerator {
    pub n: usize,
    pub n_pairs: u64,
    pub x_ties: u64,
    pub y_ties: u64,
    pub joint_ties: u64,
    pub swaps: u64,
    pub numerator: i64,
}

impl KendallNumerator {
    fn assemble(
        n: usize, n_pairs: u64, x_ties: u64, y_ties: u64, joint_ties: u64, swaps: u64,
    ) -> Self {
        let numerator = n_pairs as i64 + joint_ties as i64
            - (x_ties as i64 + y_ties as i64)
            - 2 * swaps as i64;
        KendallNumerator { n, n_pairs, x_ties, y_ties, joint_ties, swaps, numerator }
    }

    /// Narrow the numerator to the legacy 32-bit output width.
    ///
    /// Errors
    /// ------
    /// - `KTauError::NarrowingOverflow` when S lies outside `i32`, which
    ///   becomes possible once N exceeds roughly 92,682.
    pub fn to_i32(&self) -> KTauResult<i32> {
        i32::try_from(self.numerator)
            .map_err(|_| KTauError::NarrowingOverflow { value: self.numerator })
    }
}

/// Compute the tau-b numerator from presorted data.
///
/// Parameters
/// ----------
/// - `x`: `&[f64]`
///   First series, sorted non-descending.
/// - `y`: `&mut [f64]`
///   Second series permuted in lockstep with `x`, same length. Sorted on
///   return.
/// - `scratch`: `&mut [f64]`
///   Merge buffer of at least `x.len()` elements; clobbered.
/// - `opts`: [`KTauOptions`]
///   Merge tie rule, parallelism, copy serialization.
///
/// Returns
/// -------
/// [`KendallNumerator`]
///   All terms and S. For `x.len() < 2` every term is 0 and `y` is left
///   untouched.
///
/// Panics
/// ------
/// - Panics if `y` or `scratch` is shorter than `x` (slice bounds).
///
/// Notes
/// -----
/// - Within each tie group of `x`, `y` is insertion-sorted first so the
///   group contributes no inversions to the merge sort, and the ties of `y`
///   inside the group are credited back as joint ties.
pub fn kendall_numerator(
    x: &[f64], y: &mut [f64], scratch: &mut [f64], opts: &KTauOptions,
) -> KendallNumerator {
    let n = x.len();
    debug_assert_eq!(n, y.len());
    if n < 2 {
        return KendallNumerator { n, ..KendallNumerator::default() };
    }

    let y = &mut y[..n];
    let n_pairs = pair_count(n as u64);
    let mut x_ties: u64 = 0;
    let mut joint_ties: u64 = 0;
    for run in tie_runs(x) {
        x_ties += pair_count(run.len() as u64);
        let group = &mut y[run];
        insertion_sort_count(group);
        joint_ties += tie_correction(group);
    }

    let swaps = merge_sort_count(y, &mut scratch[..n], opts);
    let y_ties = tie_correction(y);

    KendallNumerator::assemble(n, n_pairs, x_ties, y_ties, joint_ties, swaps)
}

/// KTauScratch — reusable buffers for repeated engine calls.
///
/// Holds a working copy of `y` and the merge buffer. Buffers grow to the
/// largest N seen and are reused afterwards.
#[derive(Debug, Clone, Default)]
pub struct KTauScratch {
    y_buf: Vec<f64>,
    merge_buf: Vec<f64>,
}

impl KTauScratch {
    /// Scratch pre-sized for series of length `n`.
    pub fn new(n: usize) -> Self {
        KTauScratch { y_buf: vec![0.0; n], merge_buf: vec![0.0; n] }
    }

    fn load(&mut self, y: &[f64]) -> (&mut [f64], &mut [f64]) {
        let n = y.len();
        if self.y_buf.len() < n {
            self.y_buf.resize(n, 0.0);
            self.merge_buf.resize(n, 0.0);
        }
        self.y_buf[..n].copy_from_slice(y);
        (&mut self.y_buf[..n], &mut self.merge_buf[..n])
    }
}

/// KendallEngine — validated front end to [`kendall_numerator`].
///
/// Owns a [`KTauOptions`]; cheap to clone and safe to share across threads.
/// Every call allocates or borrows its own buffers, so concurrent calls
/// share nothing but the bulk-copy lock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KendallEngine {
    opts: KTauOptions,
}

impl KendallEngine {
    pub fn new(opts: KTauOptions) -> Self {
        KendallEngine { opts }
    }

    pub fn options(&self) -> &KTauOptions {
        &self.opts
    }

    /// Joint-sort a validated sample and compute its numerator.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_kendall::rank_correlation::{KendallEngine, PairedSample};
    /// let sample = PairedSample::from_slices(&[1.0, 1.0, 2.0, 3.0], &[2.0, 1.0, 3.0, 4.0])?;
    /// let out = KendallEngine::default().compute(&sample)?;
    /// assert_eq!(out.numerator, 5);
    /// assert_eq!(out.x_ties, 1);
    /// # Ok::<(), rust_kendall::rank_correlation::KTauError>(())
    /// ```
    pub fn compute(&self, sample: &PairedSample) -> KTauResult<KendallNumerator> {
        self.compute_sorted(&sample.joint_sort())
    }

    /// Compute the numerator of a pair that is already sorted by `x`.
    pub fn compute_sorted(&self, pair: &PresortedPair) -> KTauResult<KendallNumerator> {
        let (x, y) = pair.to_vecs();
        let mut scratch = KTauScratch::default();
        self.compute_slices(&x, &y, &mut scratch)
    }

    /// Compute the numerator of caller-sorted slices using reusable scratch.
    ///
    /// Parameters
    /// ----------
    /// - `x`: `&[f64]`
    ///   First series, which the caller guarantees is sorted.
    /// - `y`: `&[f64]`
    ///   Second series in lockstep; copied, not mutated.
    /// - `scratch`: [`KTauScratch`]
    ///   Buffers reused across calls.
    ///
    /// Errors
    /// ------
    /// - `KTauError::LengthMismatch` when the lengths differ.
    /// - `KTauError::TooManyObservations` above [`MAX_OBSERVATIONS`].
    /// - `KTauError::NotPresorted` when `verify_presorted` is set and `x`
    ///   decreases somewhere.
    pub fn compute_slices(
        &self, x: &[f64], y: &[f64], scratch: &mut KTauScratch,
    ) -> KTauResult<KendallNumerator> {
        if x.len() != y.len() {
            return Err(KTauError::LengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        if x.len() > MAX_OBSERVATIONS {
            return Err(KTauError::TooManyObservations { len: x.len(), max: MAX_OBSERVATIONS });
        }
        if self.opts.verify_presorted {
            verify_presorted(ArrayView1::from(x))?;
        }

        let (y_work, merge_buf) = scratch.load(y);
        let out = kendall_numerator(x, y_work, merge_buf, &self.opts);
        self.report(&out);
        Ok(out)
    }

    /// Tie rule in effect for this engine.
    pub fn tie_rule(&self) -> MergeTieRule {
        self.opts.tie_rule
    }

    #[cfg(feature = "obs_slog")]
    fn report(&self, out: &KendallNumerator) {
        if self.opts.verbose {
            log_numerator(out, self.opts.tie_rule);
        }
    }

    #[cfg(not(feature = "obs_slog"))]
    fn report(&self, _out: &KendallNumerator) {}
}

/// Kendall tau-b numerator of two raw series with default options.
///
/// Validates the pair, joint-sorts it by `x`, and runs the two-sequence
/// engine.
///
/// Errors
/// ------
/// - Every error of [`PairedSample::new`].
///
/// Examples
/// --------
/// ```rust
/// # use rust_kendall::rank_correlation::ktau_numer;
/// assert_eq!(ktau_numer(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 4.0, 3.0, 2.0, 1.0]).unwrap(), -10);
/// ```
pub fn ktau_numer(x: &[f64], y: &[f64]) -> KTauResult<i64> {
    let sample = PairedSample::from_slices(x, y)?;
    Ok(KendallEngine::default().compute(&sample)?.numerator)
}

// ---- Logging ----

#[cfg(feature = "obs_slog")]
fn term_logger() -> &'static slog::Logger {
    use slog::Drain;
    static LOGGER: std::sync::OnceLock<slog::Logger> = std::sync::OnceLock::new();
    LOGGER.get_or_init(|| {
        let decorator = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain)
            .overflow_strategy(slog_async::OverflowStrategy::Drop)
            .build()
            .fuse();
        slog::Logger::root(drain, slog::o!("crate" => "rust_kendall"))
    })
}

#[cfg(feature = "obs_slog")]
fn log_numerator(out: &KendallNumerator, tie_rule: MergeTieRule) {
    slog::info!(term_logger(), "kendall numerator";
        "n" => out.n,
        "n_pairs" => out.n_pairs,
        "x_ties" => out.x_ties,
        "y_ties" => out.y_ties,
        "joint_ties" => out.joint_ties,
        "swaps" => out.swaps,
        "numerator" => out.numerator,
        "tie_rule" => %tie_rule,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank_correlation::options::Parallelism;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The documented scenarios: fully concordant, fully discordant, a tie
    //   group in x, and N = 0 / 1.
    // - Each term of the formula on small hand-computed inputs.
    // - Boundary errors of `KendallEngine::compute_slices` and narrowing.
    //
    // They intentionally DO NOT cover:
    // - Randomized cross-validation against the O(N²) reference; see
    //   `tests/integration_kendall_pipeline.rs`.
    // -------------------------------------------------------------------------

    fn run_core(x: &[f64], y: &[f64], opts: &KTauOptions) -> KendallNumerator {
        let mut y = y.to_vec();
        let mut scratch = vec![0.0; x.len()];
        kendall_numerator(x, &mut y, &mut scratch, opts)
    }

    #[test]
    // Purpose
    // -------
    // Identical order gives S = nPair; reversed order gives S = −nPair.
    //
    // Given
    // -----
    // - x = [1..5], y = [1..5] and y = [5..1].
    //
    // Expect
    // ------
    // - S = 10 and S = −10; swaps 0 and 10.
    fn kendall_numerator_concordant_and_discordant_scenarios() {
        // Arrange
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let opts = KTauOptions::default();

        // Act
        let up = run_core(&x, &[1.0, 2.0, 3.0, 4.0, 5.0], &opts);
        let down = run_core(&x, &[5.0, 4.0, 3.0, 2.0, 1.0], &opts);

        // Assert
        assert_eq!(up.numerator, 10);
        assert_eq!(up.swaps, 0);
        assert_eq!(down.numerator, -10);
        assert_eq!(down.swaps, 10);
        assert_eq!(down.n_pairs, 10);
    }

    #[test]
    // Purpose
    // -------
    // Walk the tie-group scenario term by term.
    //
    // Given
    // -----
    // - x = [1, 1, 2, 3], y = [2, 1, 3, 4].
    //
    // Expect
    // ------
    // - nPair 6, m1 1, m3 0, swaps 0, m2 0, S 5; y ends sorted.
    fn kendall_numerator_tie_group_in_x_scenario() {
        // Arrange
        let x = [1.0, 1.0, 2.0, 3.0];
        let mut y = vec![2.0, 1.0, 3.0, 4.0];
        let mut scratch = vec![0.0; 4];

        // Act
        let out = kendall_numerator(&x, &mut y, &mut scratch, &KTauOptions::default());

        // Assert
        assert_eq!(
            out,
            KendallNumerator {
                n: 4,
                n_pairs: 6,
                x_ties: 1,
                y_ties: 0,
                joint_ties: 0,
                swaps: 0,
                numerator: 5
            }
        );
        assert_eq!(y, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    // Purpose
    // -------
    // Joint ties are credited back so doubly tied pairs count as neither
    // concordant nor discordant.
    //
    // Given
    // -----
    // - x = [1, 1, 1, 2], y = [3, 3, 1, 0].
    //   Pairs: (0,1) tied in both; (0,2), (1,2) tied in x only;
    //   (0,3), (1,3), (2,3) discordant.
    //
    // Expect
    // ------
    // - m1 3, m3 1, m2 1, S = −3.
    fn kendall_numerator_credits_joint_ties() {
        // Act
        let out = run_core(&[1.0, 1.0, 1.0, 2.0], &[3.0, 3.0, 1.0, 0.0], &KTauOptions::default());

        // Assert
        assert_eq!(out.x_ties, 3);
        assert_eq!(out.joint_ties, 1);
        assert_eq!(out.y_ties, 1);
        assert_eq!(out.numerator, -3);
    }

    #[test]
    // Purpose
    // -------
    // N = 0 and N = 1 yield zero regardless of values and leave y alone.
    //
    // Given
    // -----
    // - Empty input; a single pair (7, −3).
    //
    // Expect
    // ------
    // - Both numerators are 0; y is unchanged.
    fn kendall_numerator_degenerate_lengths_return_zero() {
        let empty = run_core(&[], &[], &KTauOptions::default());
        let mut y = vec![-3.0];
        let single = kendall_numerator(&[7.0], &mut y, &mut [0.0], &KTauOptions::default());

        assert_eq!(empty.numerator, 0);
        assert_eq!(single.numerator, 0);
        assert_eq!(single.n, 1);
        assert_eq!(y, vec![-3.0]);
    }

    #[test]
    // Purpose
    // -------
    // The tie rules diverge once equal y values straddle a merge split.
    //
    // Given
    // -----
    // - x = [1..10], y all equal (every pair is tied in y, so the exact
    //   numerator is 0).
    //
    // Expect
    // ------
    // - Strict: S = 0. Inclusive: the 5 | 5 split adds 25 swaps, S = −50.
    fn kendall_numerator_tie_rules_on_constant_y() {
        // Arrange
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let y = vec![0.0; 10];

        // Act
        let strict = run_core(&x, &y, &KTauOptions::with_tie_rule(MergeTieRule::Strict));
        let inclusive = run_core(&x, &y, &KTauOptions::with_tie_rule(MergeTieRule::Inclusive));

        // Assert
        assert_eq!(strict.numerator, 0);
        assert_eq!(inclusive.swaps, 25);
        assert_eq!(inclusive.numerator, -50);
    }

    #[test]
    // Purpose
    // -------
    // The engine front end reports length mismatch and, when asked,
    // unsorted x; reused scratch gives the same answer as fresh scratch.
    //
    // Given
    // -----
    // - Mismatched slices; x = [2, 1, 3] with verification on; two calls
    //   of different lengths sharing one scratch.
    //
    // Expect
    // ------
    // - LengthMismatch, NotPresorted { index: 1 }, and matching results.
    fn kendall_engine_compute_slices_checks_boundary() {
        // Arrange
        let verifying = KendallEngine::new(KTauOptions {
            verify_presorted: true,
            ..KTauOptions::default()
        });
        let plain = KendallEngine::default();
        let mut scratch = KTauScratch::new(2);

        // Act
        let mismatch = plain.compute_slices(&[1.0, 2.0], &[1.0], &mut scratch);
        let unsorted = verifying.compute_slices(&[2.0, 1.0, 3.0], &[1.0, 2.0, 3.0], &mut scratch);
        let long = plain.compute_slices(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.0, 4.0, 3.0, 2.0, 1.0], &mut scratch);
        let short = plain.compute_slices(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0], &mut scratch);

        // Assert
        assert_eq!(mismatch, Err(KTauError::LengthMismatch { x_len: 2, y_len: 1 }));
        assert_eq!(unsorted, Err(KTauError::NotPresorted { index: 1 }));
        assert_eq!(long.map(|o| o.numerator), Ok(-10));
        assert_eq!(short.map(|o| o.numerator), Ok(1));
    }

    #[test]
    // Purpose
    // -------
    // `compute` joint-sorts unsorted input before running the core, and the
    // rayon path agrees with the sequential one.
    //
    // Given
    // -----
    // - Pairs (3,30), (1,10), (2,20), (4,5) given out of order.
    //   Sorted by x: y = [10, 20, 30, 5] → 3 concordant, 3 discordant.
    //
    // Expect
    // ------
    // - S = 0 for both engines.
    fn kendall_engine_compute_joint_sorts_first() {
        // Arrange
        let sample =
            PairedSample::from_slices(&[3.0, 1.0, 2.0, 4.0], &[30.0, 10.0, 20.0, 5.0]).unwrap();
        let parallel = KendallEngine::new(
            KTauOptions::new(
                MergeTieRule::Inclusive,
                Parallelism::Rayon { min_len: 10 },
                true,
                false,
                false,
            )
            .unwrap(),
        );

        // Act
        let seq = KendallEngine::default().compute(&sample).unwrap();
        let par = parallel.compute(&sample).unwrap();

        // Assert
        assert_eq!(seq.numerator, 0);
        assert_eq!(seq, par);
    }

    #[test]
    // Purpose
    // -------
    // Narrowing to i32 succeeds in range and fails loudly outside it.
    //
    // Given
    // -----
    // - S = −10 and S = 2^31.
    //
    // Expect
    // ------
    // - Ok(−10) and NarrowingOverflow { value: 2^31 }.
    fn kendall_numerator_to_i32_narrows_or_errors() {
        let small = KendallNumerator { numerator: -10, ..KendallNumerator::default() };
        let big = KendallNumerator { numerator: 1_i64 << 31, ..KendallNumerator::default() };

        assert_eq!(small.to_i32(), Ok(-10));
        assert_eq!(big.to_i32(), Err(KTauError::NarrowingOverflow { value: 1_i64 << 31 }));
    }

    #[test]
    // Purpose
    // -------
    // `ktau_numer` is the validated production entry point.
    //
    // Given
    // -----
    // - Concordant input, and a mismatched pair.
    //
    // Expect
    // ------
    // - 10 and LengthMismatch.
    fn ktau_numer_validates_and_computes() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(ktau_numer(&x, &x), Ok(10));
        assert_eq!(
            ktau_numer(&x, &[1.0]),
            Err(KTauError::LengthMismatch { x_len: 5, y_len: 1 })
        );
    }

    #[cfg(feature = "obs_slog")]
    #[test]
    // Purpose
    // -------
    // A verbose engine logs through the shared terminal logger without
    // changing its result.
    //
    // Given
    // -----
    // - The tie-group sample x = [1, 1, 2, 3], y = [2, 1, 3, 4], computed by
    //   a verbose and a quiet engine.
    //
    // Expect
    // ------
    // - Identical outcomes (S = 5); `term_logger` is built once and reused.
    fn verbose_engine_logs_and_matches_quiet_engine() {
        // Arrange
        let sample =
            PairedSample::from_slices(&[1.0, 1.0, 2.0, 3.0], &[2.0, 1.0, 3.0, 4.0]).unwrap();
        let verbose = KendallEngine::new(KTauOptions { verbose: true, ..KTauOptions::default() });

        // Act
        let logged = verbose.compute(&sample).unwrap();
        let quiet = KendallEngine::default().compute(&sample).unwrap();
        log_numerator(&logged, MergeTieRule::Strict);

        // Assert
        assert_eq!(logged, quiet);
        assert_eq!(logged.numerator, 5);
        assert!(std::ptr::eq(term_logger(), term_logger()));
    }
}
