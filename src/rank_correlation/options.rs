//! rank_correlation::options — configuration for the Kendall numerator engine.
//!
//! Purpose
//! -------
//! Collect the knobs that change *how* the numerator is computed in one
//! small, cloneable value that can be threaded through the engine, the merge
//! sort, and the Python layer.
//!
//! Key behaviors
//! -------------
//! - [`MergeTieRule`] selects how the merge step treats equal values that
//!   straddle a split.
//! - [`Parallelism`] selects sequential recursion or `rayon::join` above a
//!   length cutoff.
//! - [`KTauOptions`] bundles both with the bulk-copy serialization flag, the
//!   optional sortedness check, and the verbosity flag for `obs_slog`.
//!
//! Invariants & assumptions
//! ------------------------
//! - A rayon cutoff is never below [`INSERTION_SORT_CUTOFF`]; ranges that
//!   short are handled by the insertion sort and have no halves to join.
//!
//! Conventions
//! -----------
//! - `KTauOptions::default()` is the classic Knight configuration: inclusive tie
//!   rule, sequential recursion, serialized bulk copies.
//! - Tie rules parse from `"inclusive"` / `"strict"` (case-insensitive).
use crate::rank_correlation::errors::{KTauError, KTauResult};
use std::str::FromStr;

/// Ranges shorter than this are sorted by the counting insertion sort.
pub const INSERTION_SORT_CUTOFF: usize = 10;

/// Default rayon split threshold for [`Parallelism::Rayon`].
pub const DEFAULT_PARALLEL_MIN_LEN: usize = 1 << 14;

/// MergeTieRule — comparison used when merging two sorted halves.
///
/// Variants
/// --------
/// - `Inclusive`
///   Take the right head when `right <= left`. Equal values across the split
///   count as inversions. This is the classic merge and the default. The
///   formula is exact whenever no run of equal `y` values straddles a merge
///   split, which always holds for N < 10 or tie-free `y`.
/// - `Strict`
///   Take the right head only when `right < left`. Equal values never count,
///   matching the insertion sort, and the numerator equals the pairwise
///   concordant − discordant count for any input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeTieRule {
    #[default]
    Inclusive,
    Strict,
}

impl FromStr for MergeTieRule {
    type Err = KTauError;

    fn from_str(s: &str) -> KTauResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "inclusive" | "le" | "<=" => Ok(MergeTieRule::Inclusive),
            "strict" | "lt" | "<" => Ok(MergeTieRule::Strict),
            _ => Err(KTauError::InvalidTieRule { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for MergeTieRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeTieRule::Inclusive => write!(f, "inclusive"),
            MergeTieRule::Strict => write!(f, "strict"),
        }
    }
}

/// Parallelism — how the two recursive halves of the merge sort run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// Plain recursion on the calling thread.
    #[default]
    Sequential,
    /// `rayon::join` the halves of every range with at least `min_len`
    /// elements; shorter ranges recurse sequentially.
    Rayon { min_len: usize },
}

/// KTauOptions — configuration for one engine.
///
/// Fields
/// ------
/// - `tie_rule`: [`MergeTieRule`]
///   Merge comparison policy.
/// - `parallelism`: [`Parallelism`]
///   Intra-call recursion strategy.
/// - `serialize_copies`: `bool`
///   Route bulk copies through the process-wide copy lock.
/// - `verify_presorted`: `bool`
///   Check that the first sequence is sorted before running the engine on
///   caller-supplied presorted data.
/// - `verbose`: `bool`
///   Log one record per call when the `obs_slog` feature is enabled.
///
/// Invariants
/// ----------
/// - Values built through [`KTauOptions::new`] have a valid rayon cutoff.
///   Struct-literal construction bypasses that check; the merge sort then
///   treats any cutoff below [`INSERTION_SORT_CUTOFF`] as equal to it.
#[derive(Debug, Clone, PartialEq)]
pub struct KTauOptions {
    pub tie_rule: MergeTieRule,
    pub parallelism: Parallelism,
    pub serialize_copies: bool,
    pub verify_presorted: bool,
    pub verbose: bool,
}

impl KTauOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `KTauError::InvalidParallelCutoff`
    ///   Returned for `Parallelism::Rayon { min_len }` with
    ///   `min_len < INSERTION_SORT_CUTOFF`.
    pub fn new(
        tie_rule: MergeTieRule, parallelism: Parallelism, serialize_copies: bool,
        verify_presorted: bool, verbose: bool,
    ) -> KTauResult<Self> {
        if let Parallelism::Rayon { min_len } = parallelism {
            if min_len < INSERTION_SORT_CUTOFF {
                return Err(KTauError::InvalidParallelCutoff { min_len });
            }
        }
        Ok(KTauOptions { tie_rule, parallelism, serialize_copies, verify_presorted, verbose })
    }

    /// Default options with a different tie rule.
    pub fn with_tie_rule(tie_rule: MergeTieRule) -> Self {
        KTauOptions { tie_rule, ..KTauOptions::default() }
    }
}

impl Default for KTauOptions {
    fn default() -> Self {
        KTauOptions {
            tie_rule: MergeTieRule::Inclusive,
            parallelism: Parallelism::Sequential,
            serialize_copies: true,
            verify_presorted: false,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Defaults matching the classic configuration.
    // - Rejection of a rayon cutoff below the insertion-sort cutoff.
    // - Parsing and display of MergeTieRule.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Pin the default configuration.
    //
    // Given
    // -----
    // - `KTauOptions::default()`.
    //
    // Expect
    // ------
    // - Inclusive, sequential, serialized copies, no verification, quiet.
    fn ktau_options_default_is_classic_configuration() {
        let opts = KTauOptions::default();
        assert_eq!(opts.tie_rule, MergeTieRule::Inclusive);
        assert_eq!(opts.parallelism, Parallelism::Sequential);
        assert!(opts.serialize_copies);
        assert!(!opts.verify_presorted);
        assert!(!opts.verbose);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `new` validates the rayon cutoff.
    //
    // Given
    // -----
    // - min_len = 4 (invalid) and min_len = INSERTION_SORT_CUTOFF (valid).
    //
    // Expect
    // ------
    // - `InvalidParallelCutoff { min_len: 4 }` for the first, `Ok` for the
    //   second.
    fn ktau_options_new_rejects_short_parallel_cutoff() {
        // Act
        let bad =
            KTauOptions::new(MergeTieRule::Strict, Parallelism::Rayon { min_len: 4 }, true, false, false);
        let good = KTauOptions::new(
            MergeTieRule::Strict,
            Parallelism::Rayon { min_len: INSERTION_SORT_CUTOFF },
            true,
            false,
            false,
        );

        // Assert
        assert_eq!(bad, Err(KTauError::InvalidParallelCutoff { min_len: 4 }));
        assert!(good.is_ok(), "expected Ok, got {good:?}");
    }

    #[test]
    // Purpose
    // -------
    // Parse tie rules by name and reject unknown names.
    //
    // Given
    // -----
    // - "Strict", "inclusive", "<" and "fuzzy".
    //
    // Expect
    // ------
    // - Strict, Inclusive, Strict, and InvalidTieRule.
    fn merge_tie_rule_from_str_parses_known_names() {
        assert_eq!("Strict".parse::<MergeTieRule>(), Ok(MergeTieRule::Strict));
        assert_eq!("inclusive".parse::<MergeTieRule>(), Ok(MergeTieRule::Inclusive));
        assert_eq!("<".parse::<MergeTieRule>(), Ok(MergeTieRule::Strict));
        match "fuzzy".parse::<MergeTieRule>() {
            Err(KTauError::InvalidTieRule { name }) => assert_eq!(name, "fuzzy"),
            other => panic!("expected InvalidTieRule, got {other:?}"),
        }
        assert_eq!(MergeTieRule::Strict.to_string(), "strict");
    }
}
