//! rank_correlation::insertion — counting insertion sort for short ranges.
//!
//! Sorts a small buffer in place and reports the bubble-sort distance to the
//! sorted order, i.e. the number of strict inversions. Used as the base case
//! of the merge sort and to order `y` inside each tie group of `x`.

/// Sort `buf` non-descending in place and return the number of
/// single-position shifts performed.
///
/// Parameters
/// ----------
/// - `buf`: `&mut [f64]`
///   Buffer to sort. Any length; lengths below 2 are returned untouched.
///
/// Returns
/// -------
/// `u64`
///   Total shift distance, equal to the number of pairs `i < j` with
///   `buf[j] < buf[i]` in the original order.
///
/// Notes
/// -----
/// - Positions are processed from the second-to-last down to the first. Each
///   held value slides right past every following element strictly less than
///   it, so equal values keep their relative order and never count.
/// - Quadratic; callers only hand it ranges shorter than the merge-sort
///   cutoff or single tie groups.
pub fn insertion_sort_count(buf: &mut [f64]) -> u64 {
    let len = buf.len();
    if len < 2 {
        return 0;
    }

    let max_j = len - 1;
    let mut shifts: u64 = 0;
    for i in (0..max_j).rev() {
        let val = buf[i];
        let mut j = i;
        while j < max_j && buf[j + 1] < val {
            buf[j] = buf[j + 1];
            j += 1;
        }
        buf[j] = val;
        shifts += (j - i) as u64;
    }
    shifts
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Degenerate lengths (0, 1).
    // - Exact inversion counts on sorted, reversed and mixed buffers.
    // - Equal values are neither counted nor reordered past each other.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure buffers shorter than 2 are left alone and report 0.
    //
    // Given
    // -----
    // - An empty buffer and a single-element buffer.
    //
    // Expect
    // ------
    // - Both return 0 and are unchanged.
    fn insertion_sort_count_short_buffers_return_zero() {
        // Arrange
        let mut empty: [f64; 0] = [];
        let mut single = [3.5_f64];

        // Act
        let a = insertion_sort_count(&mut empty);
        let b = insertion_sort_count(&mut single);

        // Assert
        assert_eq!((a, b), (0, 0));
        assert_eq!(single, [3.5]);
    }

    #[test]
    // Purpose
    // -------
    // Verify the shift count equals the inversion count.
    //
    // Given
    // -----
    // - [5, 4, 3, 2, 1] (10 inversions) and [2, 3, 1, 5, 4] (3 inversions).
    //
    // Expect
    // ------
    // - Counts 10 and 3; both buffers end sorted.
    fn insertion_sort_count_matches_inversion_count() {
        // Arrange
        let mut reversed = [5.0_f64, 4.0, 3.0, 2.0, 1.0];
        let mut mixed = [2.0_f64, 3.0, 1.0, 5.0, 4.0];

        // Act
        let r = insertion_sort_count(&mut reversed);
        let m = insertion_sort_count(&mut mixed);

        // Assert
        assert_eq!(r, 10);
        assert_eq!(m, 3);
        assert_eq!(reversed, [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(mixed, [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    // Purpose
    // -------
    // Check that ties are not counted as inversions.
    //
    // Given
    // -----
    // - [2, 1, 2, 1]: strict inversions are (0,1), (0,3), (2,3) = 3.
    //
    // Expect
    // ------
    // - Count 3 and sorted output [1, 1, 2, 2].
    fn insertion_sort_count_ignores_equal_values() {
        // Arrange
        let mut buf = [2.0_f64, 1.0, 2.0, 1.0];

        // Act
        let shifts = insertion_sort_count(&mut buf);

        // Assert
        assert_eq!(shifts, 3);
        assert_eq!(buf, [1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    // Purpose
    // -------
    // An already sorted buffer needs no shifts.
    //
    // Given
    // -----
    // - [1, 1, 2, 3, 3, 9].
    //
    // Expect
    // ------
    // - Count 0.
    fn insertion_sort_count_sorted_input_is_zero() {
        let mut buf = [1.0_f64, 1.0, 2.0, 3.0, 3.0, 9.0];
        assert_eq!(insertion_sort_count(&mut buf), 0);
    }
}
