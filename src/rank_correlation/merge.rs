//! rank_correlation::merge — inversion-counting merge sort.
//!
//! Purpose
//! -------
//! Sort a buffer non-descending while counting the inversions discovered at
//! every merge step, delegating short ranges to the counting insertion sort.
//! This is the O(N log N) heart of the Kendall numerator.
//!
//! Key behaviors
//! -------------
//! - [`merge_sort_count`] recurses over explicit slice halves of the data and
//!   of a caller-owned scratch slice of the same length; recursion depth is
//!   ⌈log₂(N / 10)⌉.
//! - [`merge_count`] merges two sorted halves into the scratch slice and
//!   counts cross-half inversions under the configured [`MergeTieRule`].
//! - With [`Parallelism::Rayon`], the two halves of long ranges run through
//!   `rayon::join`; the merge and copy-back always run after both finish.
//! - Bulk copies (leftover tail of a merge, scratch → data copy-back) go
//!   through [`bulk_copy`], which holds the process-wide copy lock for the
//!   duration of the copy only.
//!
//! Invariants & assumptions
//! ------------------------
//! - `scratch.len() == data.len()`; checked with `debug_assert!`. Public
//!   engine entry points size the scratch themselves.
//! - After return, `data` is sorted and `scratch` holds unspecified values.
//! - The two halves touched by `rayon::join` are disjoint `split_at_mut`
//!   borrows of both buffers; nothing else is shared between them.
//!
//! Testing notes
//! -------------
//! - Unit tests compare counts against brute-force inversion counting for
//!   both tie rules, check the inclusive rule's extra counting of straddling
//!   ties, and check that parallel and sequential runs agree.
use crate::rank_correlation::{
    insertion::insertion_sort_count,
    options::{INSERTION_SORT_CUTOFF, KTauOptions, MergeTieRule, Parallelism},
};
use std::sync::{Mutex, PoisonError};

/// Process-wide critical section for bulk memory copies.
static BULK_COPY_LOCK: Mutex<()> = Mutex::new(());

/// Copy `src` into `dst`, under the copy lock when `serialized` is set.
///
/// The lock guards no data; a poisoned lock is simply reacquired.
#[inline]
pub fn bulk_copy(dst: &mut [f64], src: &[f64], serialized: bool) {
    if serialized {
        let _guard = BULK_COPY_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        dst.copy_from_slice(src);
    } else {
        dst.copy_from_slice(src);
    }
}

/// Merge the sorted halves `src[..mid]` and `src[mid..]` into `dst`.
///
/// Parameters
/// ----------
/// - `src`: `&[f64]`
///   Source range whose two halves are each sorted.
/// - `mid`: `usize`
///   Split point, `0 < mid < src.len()` in practice; any value in
///   `0..=src.len()` is accepted.
/// - `dst`: `&mut [f64]`
///   Destination of the same length as `src`.
/// - `opts`: [`KTauOptions`]
///   Supplies the tie rule and the copy serialization flag.
///
/// Returns
/// -------
/// `u64`
///   Cross-half inversions: each time the right head is taken, the number of
///   left elements not yet emitted.
pub fn merge_count(src: &[f64], mid: usize, dst: &mut [f64], opts: &KTauOptions) -> u64 {
    debug_assert_eq!(src.len(), dst.len());
    let (left, right) = src.split_at(mid);
    let (mut l, mut r, mut k) = (0_usize, 0_usize, 0_usize);
    let mut swaps: u64 = 0;

    while l < left.len() && r < right.len() {
        let take_right = match opts.tie_rule {
            MergeTieRule::Inclusive => right[r] <= left[l],
            MergeTieRule::Strict => right[r] < left[l],
        };
        if take_right {
            dst[k] = right[r];
            swaps += (left.len() - l) as u64;
            r += 1;
        } else {
            dst[k] = left[l];
            l += 1;
        }
        k += 1;
    }

    if l < left.len() {
        bulk_copy(&mut dst[k..], &left[l..], opts.serialize_copies);
    } else if r < right.len() {
        bulk_copy(&mut dst[k..], &right[r..], opts.serialize_copies);
    }
    swaps
}

/// Sort `data` non-descending and return the number of inversions counted.
///
/// Parameters
/// ----------
/// - `data`: `&mut [f64]`
///   Buffer to sort in place.
/// - `scratch`: `&mut [f64]`
///   Caller-owned scratch of the same length; clobbered.
/// - `opts`: [`KTauOptions`]
///   Tie rule, parallelism, and copy serialization.
///
/// Returns
/// -------
/// `u64`
///   Insertion-sort shifts of every base-case range plus the cross-half
///   inversions of every merge.
///
/// Panics
/// ------
/// - Panics if `scratch.len() < data.len()` (slice bounds).
pub fn merge_sort_count(data: &mut [f64], scratch: &mut [f64], opts: &KTauOptions) -> u64 {
    debug_assert_eq!(data.len(), scratch.len());
    let scratch = &mut scratch[..data.len()];
    sort_range(data, scratch, opts)
}

fn sort_range(data: &mut [f64], scratch: &mut [f64], opts: &KTauOptions) -> u64 {
    let len = data.len();
    if len < INSERTION_SORT_CUTOFF {
        return insertion_sort_count(data);
    }

    let half = len / 2;
    let mut swaps = {
        let (data_l, data_r) = data.split_at_mut(half);
        let (scratch_l, scratch_r) = scratch.split_at_mut(half);
        match opts.parallelism {
            Parallelism::Rayon { min_len } if len >= min_len.max(INSERTION_SORT_CUTOFF) => {
                let (a, b) = rayon::join(
                    || sort_range(data_l, scratch_l, opts),
                    || sort_range(data_r, scratch_r, opts),
                );
                a + b
            }
            _ => sort_range(data_l, scratch_l, opts) + sort_range(data_r, scratch_r, opts),
        }
    };

    swaps += merge_count(data, half, scratch, opts);
    bulk_copy(data, scratch, opts.serialize_copies);
    swaps
}
