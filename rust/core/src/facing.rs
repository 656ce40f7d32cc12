// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facing predicates for the two coordinate systems a level can use.
//!
//! ## Grid facing
//!
//! Default, Rooftop and Corner modes treat the level as a plain grid: the
//! first column faces front, the last column faces back, the first row faces
//! left and the last complete row faces right.
//!
//! ## Wall facing
//!
//! Wall and Roof modes walk the perimeter instead:
//!
//! ```text
//! [0, max_in_row)                          left block  (front, left.., back)
//! [max_in_row, max_count - max_in_row + 2) middle      (front/back pairs)
//! [max_count - max_in_row + 2, max_count)  right block
//! ```
//!
//! The left block owns the first front piece and the first back piece, which
//! is why the right block starts two indices late. Inside the middle, the
//! index parity decides front (even) or back (odd).

use crate::index::{adjusted_index, max_row};

/// First column of the grid.
#[inline]
pub fn is_facing_front(adjusted_index: i32) -> bool {
    adjusted_index == 0
}

/// Last column of the grid.
#[inline]
pub fn is_facing_back(adjusted_index: i32, max_in_row: i32) -> bool {
    adjusted_index == max_in_row - 1
}

/// First row of the grid.
#[inline]
pub fn is_facing_left(current_row: i32) -> bool {
    current_row == 0
}

/// Last complete row of the grid.
#[inline]
pub fn is_facing_right(current_row: i32, max_count: i32, max_in_row: i32) -> bool {
    current_row == max_row(max_count, max_in_row) - 1
}

/// Block of the perimeter walk an index falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallBlock {
    Left,
    Middle,
    Right,
}

/// Side a wall piece sits on within its block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSegment {
    /// Index 0: first piece of the front side.
    LeftFront,
    /// Interior of the left block.
    Left,
    /// Index `max_in_row - 1`: first piece of the back side.
    LeftBack,
    /// Even middle index.
    MiddleFront,
    /// Odd middle index.
    MiddleBack,
    /// Right block.
    Right,
}

impl WallSegment {
    pub fn block(&self) -> WallBlock {
        match self {
            WallSegment::LeftFront | WallSegment::Left | WallSegment::LeftBack => WallBlock::Left,
            WallSegment::MiddleFront | WallSegment::MiddleBack => WallBlock::Middle,
            WallSegment::Right => WallBlock::Right,
        }
    }

    /// Pieces that belong to the front side of the footprint.
    pub fn is_front(&self) -> bool {
        matches!(self, WallSegment::LeftFront | WallSegment::MiddleFront)
    }

    /// Pieces that belong to the back side of the footprint.
    pub fn is_back(&self) -> bool {
        matches!(self, WallSegment::LeftBack | WallSegment::MiddleBack)
    }
}

/// First index of the right block.
#[inline]
pub fn wall_right_start(max_count: i32, max_in_row: i32) -> i32 {
    max_count - max_in_row + 2
}

#[inline]
pub fn is_wall_left(index: i32, max_in_row: i32) -> bool {
    index < max_in_row
}

#[inline]
pub fn is_wall_right(index: i32, max_count: i32, max_in_row: i32) -> bool {
    index >= wall_right_start(max_count, max_in_row)
}

#[inline]
pub fn is_wall_middle(index: i32, max_count: i32, max_in_row: i32) -> bool {
    !is_wall_left(index, max_in_row) && !is_wall_right(index, max_count, max_in_row)
}

/// Front member of a middle pair.
#[inline]
pub fn is_wall_middle_front(index: i32) -> bool {
    adjusted_index(index, 2) == 0
}

/// Classifies an index of the perimeter walk. The left block takes priority
/// over the right block when the two overlap on tiny levels.
pub fn classify_wall(index: i32, max_in_row: i32, max_count: i32) -> WallSegment {
    if is_wall_left(index, max_in_row) {
        if index == 0 {
            WallSegment::LeftFront
        } else if index == max_in_row - 1 {
            WallSegment::LeftBack
        } else {
            WallSegment::Left
        }
    } else if is_wall_right(index, max_count, max_in_row) {
        WallSegment::Right
    } else if is_wall_middle_front(index) {
        WallSegment::MiddleFront
    } else {
        WallSegment::MiddleBack
    }
}
