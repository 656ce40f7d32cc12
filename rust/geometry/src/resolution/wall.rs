// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perimeter walk for Wall and Roof modes.
//!
//! A wall level of footprint `(X, Y)` uses `max_in_row = X + 2` and
//! `max_count = 2 * (X + Y)`. The walk visits the left block (first front
//! piece, `X` left pieces, first back piece), then front/back pairs row by row,
//! then the right side. Each index resolves to a [`PerimeterPiece`] in section
//! coordinates; the footprint covers columns `[0, X]` and rows `[-1, Y - 1]`.
//!
//! Gen2 and Gen3 differ only in the right block. Gen3 places right pieces with
//! a modulus over the whole walk; Gen2 has its own right-front and right-back
//! pieces and re-bases the right block with a remainder.

use stackhouse_core::facing::{classify_wall, WallSegment};
use stackhouse_core::{adjusted_index, wall_current_row, AlgorithmGeneration, Bounds};

/// Side of the footprint a wall piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
    Left,
    Right,
}

/// A wall piece in section coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterPiece {
    pub side: Side,
    pub column: i32,
    pub row: i32,
    pub yaw: f64,
}

impl PerimeterPiece {
    const fn new(side: Side, column: i32, row: i32, yaw: f64) -> Self {
        Self {
            side,
            column,
            row,
            yaw,
        }
    }
}

/// Resolves a perimeter index for the given generation.
pub fn perimeter_piece(
    index: i32,
    max_in_row: i32,
    max_count: i32,
    bounds: Bounds,
    generation: AlgorithmGeneration,
) -> PerimeterPiece {
    match generation {
        AlgorithmGeneration::Gen3 => gen3_piece(index, max_in_row, max_count, bounds),
        AlgorithmGeneration::Gen2 => gen2_piece(index, max_in_row, max_count, bounds),
    }
}

/// Column the back side runs on. Lines up with the left block's back piece
/// when `max_in_row == bounds.x + 2`.
#[inline]
pub fn back_column(max_in_row: i32) -> i32 {
    max_in_row - 2
}

fn left_block_piece(segment: WallSegment, index: i32, max_in_row: i32, bounds: Bounds) -> PerimeterPiece {
    match segment {
        WallSegment::LeftFront => PerimeterPiece::new(Side::Front, 0, -1, 90.0),
        WallSegment::LeftBack => PerimeterPiece::new(Side::Back, bounds.x, 0, -90.0),
        _ => PerimeterPiece::new(Side::Left, adjusted_index(index, max_in_row), -1, 180.0),
    }
}

fn middle_piece(front: bool, index: i32, max_in_row: i32) -> PerimeterPiece {
    let row = wall_current_row(index, max_in_row);
    if front {
        PerimeterPiece::new(Side::Front, 0, row - 1, 90.0)
    } else {
        PerimeterPiece::new(Side::Back, back_column(max_in_row), row, -90.0)
    }
}

/// Modulus base of the Gen3 right block.
///
/// Adds 2 when middle walls exist, or when the walk splits evenly into two
/// row-halves with nothing in between. Every other case keeps the raw base,
/// which is known to misorder the right side for one-row footprints such as
/// `Bounds = (3, 1)`.
pub fn gen3_right_modulus(max_count: i32, max_in_row: i32) -> i32 {
    let remainder = max_count % (max_in_row * 2);
    let middle_walls_count = max_count - max_in_row * 2;
    let correction = if middle_walls_count > 0 || (remainder == 0 && middle_walls_count == 0) {
        2
    } else {
        0
    };
    max_count - max_in_row + correction
}

fn gen3_piece(index: i32, max_in_row: i32, max_count: i32, bounds: Bounds) -> PerimeterPiece {
    let segment = classify_wall(index, max_in_row, max_count);
    match segment {
        WallSegment::LeftFront | WallSegment::Left | WallSegment::LeftBack => {
            left_block_piece(segment, index, max_in_row, bounds)
        }
        // Only Right, no Right-Front/Right-Back
        WallSegment::Right => {
            let modulus = gen3_right_modulus(max_count, max_in_row);
            let column = index.checked_rem(modulus).unwrap_or_else(|| {
                tracing::warn!(index, max_count, max_in_row, "empty right wall modulus");
                0
            });
            PerimeterPiece::new(Side::Right, column, bounds.y - 1, 0.0)
        }
        WallSegment::MiddleFront => middle_piece(true, index, max_in_row),
        WallSegment::MiddleBack => middle_piece(false, index, max_in_row),
    }
}

/// Sections missing from the last row of the walk. Re-bases the Gen2 right
/// block so its first index has a right-adjusted index of 0.
#[inline]
fn gen2_remainder(max_count: i32, max_in_row: i32) -> i32 {
    (max_in_row - max_count % max_in_row) % max_in_row
}

fn gen2_piece(index: i32, max_in_row: i32, max_count: i32, bounds: Bounds) -> PerimeterPiece {
    if index < max_in_row {
        let segment = classify_wall(index, max_in_row, max_count);
        return left_block_piece(segment, index, max_in_row, bounds);
    }

    // A single-row footprint has no right-front or right-back piece: the
    // left block already owns both, so the right block starts two indices
    // late and its columns shift down by two.
    let single_row = bounds.y == 1;
    let right_start = if single_row {
        max_count - max_in_row + 2
    } else {
        max_count - max_in_row
    };

    if index >= right_start {
        let remainder = gen2_remainder(max_count, max_in_row);
        let right_adjusted_index = (adjusted_index(index, max_in_row) + remainder) % max_in_row;

        if single_row {
            return PerimeterPiece::new(Side::Right, right_adjusted_index - 2, bounds.y - 1, 0.0);
        }
        return if right_adjusted_index == 0 {
            PerimeterPiece::new(Side::Front, 0, bounds.y - 2, 90.0)
        } else if right_adjusted_index == max_in_row - 1 {
            PerimeterPiece::new(Side::Back, bounds.x, bounds.y - 1, -90.0)
        } else {
            PerimeterPiece::new(Side::Right, right_adjusted_index - 1, bounds.y - 1, 0.0)
        };
    }

    middle_piece(adjusted_index(index, 2) == 0, index, max_in_row)
}
