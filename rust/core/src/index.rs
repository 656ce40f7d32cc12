// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Row/column decomposition of a linear section index.
//!
//! A level lays its sections out row-major: `max_in_row` sections per row,
//! `max_count` sections in total. Every placement rule is expressed in terms
//! of these helpers. Callers guarantee `max_in_row >= 1`; use
//! [`coerce_max_in_row`] at the boundary where configuration enters.
//!
//! Integer division and remainder follow Rust semantics (truncation toward
//! zero), which is what the wall rules rely on for negative offsets.

/// Clamps a configured row width to at least one section, logging when the
/// configuration was invalid.
pub fn coerce_max_in_row(max_in_row: i32) -> i32 {
    if max_in_row < 1 {
        tracing::warn!(max_in_row, "row width must be at least 1, using 1");
        1
    } else {
        max_in_row
    }
}

/// Column of `index` within its row.
#[inline]
pub fn adjusted_index(index: i32, max_in_row: i32) -> i32 {
    index % max_in_row
}

/// Row of `index`. Index 0 and negative offsets are row 0.
#[inline]
pub fn current_row(index: i32, max_in_row: i32) -> i32 {
    if index > 0 {
        index / max_in_row
    } else {
        0
    }
}

/// Number of complete rows in a level.
#[inline]
pub fn max_row(max_count: i32, max_in_row: i32) -> i32 {
    max_count / max_in_row
}

/// Row counter for the middle block of a wall perimeter, where each row holds
/// a front/back pair. The first middle row is row 1.
#[inline]
pub fn wall_current_row(index: i32, max_in_row: i32) -> i32 {
    current_row(index - max_in_row, 2) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_is_identity() {
        for max_in_row in 1..8 {
            for index in 0..max_in_row {
                assert_eq!(adjusted_index(index, max_in_row), index);
                assert_eq!(current_row(index, max_in_row), 0);
            }
        }
    }

    #[test]
    fn adjusted_index_is_periodic() {
        for max_in_row in 1..8 {
            for index in 0..40 {
                assert_eq!(
                    adjusted_index(index, max_in_row),
                    adjusted_index(index + max_in_row, max_in_row)
                );
            }
        }
    }

    #[test]
    fn row_and_column_reassemble_index() {
        for max_in_row in 1..8 {
            for index in 0..40 {
                let row = current_row(index, max_in_row);
                let column = adjusted_index(index, max_in_row);
                assert_eq!(row * max_in_row + column, index);
            }
        }
    }

    #[test]
    fn max_row_floors() {
        assert_eq!(max_row(4, 2), 2);
        assert_eq!(max_row(5, 2), 2);
        assert_eq!(max_row(1, 2), 0);
        assert_eq!(max_row(0, 1), 0);
    }

    #[test]
    fn current_row_guards_negative() {
        assert_eq!(current_row(-3, 2), 0);
        assert_eq!(current_row(0, 5), 0);
    }

    #[test]
    fn wall_rows_pair_after_left_block() {
        // max_in_row = 4: indices 4,5 are row 1, 6,7 row 2
        assert_eq!(wall_current_row(4, 4), 1);
        assert_eq!(wall_current_row(5, 4), 1);
        assert_eq!(wall_current_row(6, 4), 2);
        assert_eq!(wall_current_row(7, 4), 2);
        // inside the left block the offset is negative and clamps to row 1
        assert_eq!(wall_current_row(1, 4), 1);
    }

    #[test]
    fn coerce_clamps_to_one() {
        assert_eq!(coerce_max_in_row(0), 1);
        assert_eq!(coerce_max_in_row(-2), 1);
        assert_eq!(coerce_max_in_row(3), 3);
    }
}
