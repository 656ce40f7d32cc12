// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! L-shaped footprint: a rectangle with a `depth x depth` notch cut from its
//! far (high-Y) side.
//!
//! The lower variant cuts the notch at the low-X end of the far rows, the
//! upper variant at the high-X end. Each snap mode carves the notch its own
//! way:
//!
//! - Default skips floor sections inside the notch. Rooftop grids carry one
//!   overhang row past the footprint, so their notch starts one row further
//!   out and spans `depth` rows of that larger grid.
//! - Wall and Roof move the right-side pieces along the notch in by `depth`
//!   rows, and the front (upper: back) pieces beside it in by `depth`
//!   columns. Which piece an index is comes from the perimeter walk, so the
//!   same rule holds for every footprint width and both generations.
//! - Corner moves the corner at the notch in by `depth` columns and adds two
//!   inner corners through [`Shape::place_remaining_actors`].

use serde::{Deserialize, Serialize};
use stackhouse_core::{adjusted_index, Bounds, ShapedBounds, SnapMode};

use super::{
    HouseShape, RemainingActors, RemainingActorsRequest, SectionInitializer, Shape, ShapeOutcome,
    ShapeRequest,
};
use crate::error::{Error, Result};
use crate::request::Placement;
use crate::resolution::{perimeter_piece, Side};

/// Corner pieces an L-shape adds at its notch.
const NOTCH_CORNERS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LShape {
    depth: i32,
    #[serde(default)]
    upper: bool,
}

impl LShape {
    pub fn new(depth: i32, upper: bool) -> Result<Self> {
        if depth < 1 {
            return Err(Error::InvalidShape(format!(
                "L-shape depth must be at least 1, got {}",
                depth
            )));
        }
        Ok(Self { depth, upper })
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn is_upper(&self) -> bool {
        self.upper
    }

    /// Checks the notch leaves at least one section on both axes.
    pub fn validate(&self, bounds: Bounds) -> Result<()> {
        if self.fits(bounds) {
            Ok(())
        } else {
            Err(Error::InvalidShape(format!(
                "L-shape depth {} does not fit bounds {}x{}",
                self.depth, bounds.x, bounds.y
            )))
        }
    }

    fn fits(&self, bounds: Bounds) -> bool {
        self.depth >= 1 && self.depth < bounds.x && self.depth < bounds.y
    }

    /// Grid sections inside the notch. `notch_rows` is the number of far rows
    /// the notch spans.
    fn in_notch(&self, index: i32, max_in_row: i32, bounds: Bounds, notch_rows: i32) -> bool {
        if index < max_in_row * (bounds.y - notch_rows) {
            return false;
        }
        let column = adjusted_index(index, max_in_row);
        if self.upper {
            column >= max_in_row - self.depth
        } else {
            column < self.depth
        }
    }

    fn carve_corner(&self, request: &ShapeRequest<'_>, outcome: &mut ShapeOutcome) {
        let size = request.resolution.size;
        let last = request.placement.max_count - 1;
        if self.upper && request.index() == last {
            outcome.transform.location.x -= f64::from(self.depth) * size.x;
        } else if !self.upper && request.index() == last - 1 {
            outcome.transform.location.x += f64::from(self.depth) * size.x;
        }
    }

    /// Moves each wall piece onto the shaped edge of the grid row or column
    /// it closes. Pieces away from the notch see no difference between the
    /// shaped and rectangular edges and stay put.
    fn carve_wall(&self, request: &ShapeRequest<'_>, outcome: &mut ShapeOutcome) {
        let placement = request.placement;
        let stats = placement.build_stats;
        let size = request.resolution.size;
        let piece = perimeter_piece(
            placement.index,
            placement.max_in_row,
            placement.max_count,
            stats.bounds,
            request.generation(),
        );

        let shaped: Option<&dyn ShapedBounds> = Some(self);
        let location = &mut outcome.transform.location;
        match piece.side {
            Side::Right => {
                let rows = stats.max_section_index_y(shaped, piece.column)
                    - stats.max_section_index_y(None, piece.column);
                location.y += f64::from(rows) * size.y;
            }
            // front pieces sit one row behind the grid row they close
            Side::Front => {
                let columns = stats.min_section_index_x(shaped, piece.row + 1)
                    - stats.min_section_index_x(None, piece.row + 1);
                location.x += f64::from(columns) * size.x;
            }
            Side::Back => {
                let columns = stats.max_section_index_x(shaped, piece.row)
                    - stats.max_section_index_x(None, piece.row);
                location.x += f64::from(columns) * size.x;
            }
            Side::Left => {}
        }
    }
}

impl ShapedBounds for LShape {
    fn shaped_max_index_x(&self, bounds: Bounds, y_index: i32) -> i32 {
        if self.upper && y_index >= bounds.y - self.depth {
            bounds.x - self.depth - 1
        } else {
            bounds.x - 1
        }
    }

    fn shaped_min_index_x(&self, bounds: Bounds, y_index: i32) -> i32 {
        if !self.upper && y_index >= bounds.y - self.depth {
            self.depth
        } else {
            0
        }
    }

    fn shaped_max_index_y(&self, bounds: Bounds, x_index: i32) -> i32 {
        let in_notch = if self.upper {
            x_index >= bounds.x - self.depth
        } else {
            x_index < self.depth
        };
        if in_notch {
            bounds.y - self.depth - 1
        } else {
            bounds.y - 1
        }
    }
}

impl Shape for LShape {
    fn name(&self) -> &str {
        "l_shape"
    }

    fn shape_transform(&self, request: &ShapeRequest<'_>) -> ShapeOutcome {
        let mut outcome = ShapeOutcome::unchanged(request);
        let placement = request.placement;
        let bounds = placement.build_stats.bounds;
        if !self.fits(bounds) {
            tracing::warn!(
                depth = self.depth,
                bounds_x = bounds.x,
                bounds_y = bounds.y,
                "L-shape does not fit the footprint, leaving section unshaped"
            );
            return outcome;
        }

        match request.shape_mode() {
            Some(SnapMode::Default) => {
                outcome.skip |=
                    self.in_notch(placement.index, placement.max_in_row, bounds, self.depth);
            }
            Some(SnapMode::Rooftop) => {
                outcome.skip |=
                    self.in_notch(placement.index, placement.max_in_row, bounds, self.depth - 1);
            }
            Some(SnapMode::Corner) => self.carve_corner(request, &mut outcome),
            Some(SnapMode::Wall | SnapMode::Roof) => self.carve_wall(request, &mut outcome),
            Some(SnapMode::Custom) | None => {}
        }
        outcome
    }

    fn place_remaining_actors(&self, request: &RemainingActorsRequest<'_>) -> RemainingActors {
        let mut actors = RemainingActors::new();
        let bounds = request.build_stats.bounds;
        if request.snap_mode != Some(SnapMode::Corner) || !self.fits(bounds) {
            return actors;
        }

        let row = bounds.y - 1 - self.depth;
        let back = request.build_stats.max_count_in_row - 2;
        let corners = if self.upper {
            [(back - self.depth, 180.0), (back, -90.0)]
        } else {
            [(self.depth, 180.0), (0, 0.0)]
        };

        for (offset, (column, yaw)) in (0..).zip(corners) {
            let mut placement = Placement::new();
            placement.offset_sections(&request.resolution.size, column, row);
            placement.add_yaw(yaw);
            placement.add_level(request.level_z_multiplier - 1.0);
            actors.push((request.layout_count + offset, placement.compose(&request.base)));
        }
        actors
    }

    fn update_section_initializer(&self, initializer: &mut SectionInitializer) {
        if initializer.snap_mode == SnapMode::Corner {
            initializer.total_count += NOTCH_CORNERS;
        }
    }

    fn as_house_shape(&self) -> Option<&dyn HouseShape> {
        Some(self)
    }
}

impl HouseShape for LShape {
    fn shape_house_wall(&self, request: &ShapeRequest<'_>) -> ShapeOutcome {
        let mut outcome = ShapeOutcome::unchanged(request);
        if self.fits(request.build_stats().bounds) {
            self.carve_wall(request, &mut outcome);
        } else {
            tracing::warn!(
                depth = self.depth,
                "L-shape does not fit the footprint, leaving wall unshaped"
            );
        }
        outcome
    }
}
