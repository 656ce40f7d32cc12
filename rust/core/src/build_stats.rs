// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Running statistics of a building across its levels.
//!
//! Right- and back-edge decisions (corner X shift, right wall Y) need the
//! widest row and the footprint of the whole building, not of the level being
//! placed. A build pass folds every level into one [`BuildStats`] before any
//! section is placed.

use serde::{Deserialize, Serialize};

use crate::index::max_row;
use crate::math::Bounds;

/// Shaped footprint queries. Implemented by footprint shapes that carve
/// sections out of the rectangle.
///
/// Indices are inclusive section indices along one axis, given a section
/// index along the other axis.
pub trait ShapedBounds {
    fn shaped_max_index_x(&self, bounds: Bounds, y_index: i32) -> i32 {
        let _ = y_index;
        bounds.x - 1
    }

    fn shaped_min_index_x(&self, bounds: Bounds, y_index: i32) -> i32 {
        let _ = (bounds, y_index);
        0
    }

    fn shaped_max_index_y(&self, bounds: Bounds, x_index: i32) -> i32 {
        let _ = x_index;
        bounds.y - 1
    }

    fn shaped_min_index_y(&self, bounds: Bounds, x_index: i32) -> i32 {
        let _ = (bounds, x_index);
        0
    }
}

/// Largest counts and footprint seen across the levels of a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildStats {
    /// Footprint in section units. Set once, then only by override.
    pub bounds: Bounds,
    pub level_count: i32,
    pub max_total_count: i32,
    pub max_total_rows: i32,
    pub max_count_in_row: i32,
    pub initialized: bool,
}

impl BuildStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of a single level. `max_in_row` must already be coerced.
    pub fn from_level(max_in_row: i32, max_count: i32, bounds: Bounds) -> Self {
        Self {
            bounds,
            level_count: 1,
            max_total_count: max_count,
            max_total_rows: max_row(max_count, max_in_row),
            max_count_in_row: max_in_row,
            initialized: true,
        }
    }

    /// Merges another level's statistics, keeping the largest value of every
    /// counter. Each bounds axis is taken from `other` only while unset.
    pub fn update(&mut self, other: &BuildStats) {
        if self.bounds.x <= 0 {
            self.bounds.x = other.bounds.x;
        }
        if self.bounds.y <= 0 {
            self.bounds.y = other.bounds.y;
        }
        self.level_count = self.level_count.max(other.level_count);
        self.max_total_count = self.max_total_count.max(other.max_total_count);
        self.max_total_rows = self.max_total_rows.max(other.max_total_rows);
        self.max_count_in_row = self.max_count_in_row.max(other.max_count_in_row);
        self.initialized = true;
    }

    pub fn override_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn override_level_count(&mut self, level_count: i32) {
        self.level_count = level_count;
    }

    /// Clears every field, including the initialized flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn max_section_index_x(&self, shape: Option<&dyn ShapedBounds>, y_index: i32) -> i32 {
        match shape {
            Some(shape) => shape.shaped_max_index_x(self.bounds, y_index),
            None => self.bounds.x - 1,
        }
    }

    pub fn min_section_index_x(&self, shape: Option<&dyn ShapedBounds>, y_index: i32) -> i32 {
        match shape {
            Some(shape) => shape.shaped_min_index_x(self.bounds, y_index),
            None => 0,
        }
    }

    pub fn max_section_index_y(&self, shape: Option<&dyn ShapedBounds>, x_index: i32) -> i32 {
        match shape {
            Some(shape) => shape.shaped_max_index_y(self.bounds, x_index),
            None => self.bounds.y - 1,
        }
    }

    pub fn min_section_index_y(&self, shape: Option<&dyn ShapedBounds>, x_index: i32) -> i32 {
        match shape {
            Some(shape) => shape.shaped_min_index_y(self.bounds, x_index),
            None => 0,
        }
    }
}
