// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint whose far (high-Y) row is shallower than the others.
//!
//! The far row is `side_ratio` of a section deep. Floors in that row are
//! scaled down, right walls pulled in to the short edge, and the front/back
//! wall pieces closing the row are scaled and may swap to a dedicated mesh.

use serde::{Deserialize, Serialize};
use stackhouse_core::facing::is_facing_right;
use stackhouse_core::{current_row, max_row, ShapedBounds, SnapMode};

use super::{HouseShape, MeshId, Shape, ShapeOutcome, ShapeRequest};
use crate::error::{Error, Result};
use crate::resolution::{perimeter_piece, Side};

/// How rooftop tiles over the short row are fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofStrategy {
    /// Scale the last row.
    #[default]
    V1,
    /// Keep full-size tiles and slide the last row back.
    V2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonUniformSides {
    side_ratio: f64,
    #[serde(default)]
    roof_strategy: RoofStrategy,
    #[serde(default)]
    small_side_wall_mesh: Option<MeshId>,
    #[serde(default)]
    small_floor_mesh: Option<MeshId>,
}

impl NonUniformSides {
    pub fn new(side_ratio: f64) -> Result<Self> {
        if !(side_ratio > 0.0 && side_ratio <= 1.0) {
            return Err(Error::InvalidShape(format!(
                "side ratio must be in (0, 1], got {}",
                side_ratio
            )));
        }
        Ok(Self {
            side_ratio,
            roof_strategy: RoofStrategy::default(),
            small_side_wall_mesh: None,
            small_floor_mesh: None,
        })
    }

    pub fn with_roof_strategy(mut self, strategy: RoofStrategy) -> Self {
        self.roof_strategy = strategy;
        self
    }

    pub fn with_small_side_wall_mesh(mut self, mesh: MeshId) -> Self {
        self.small_side_wall_mesh = Some(mesh);
        self
    }

    pub fn with_small_floor_mesh(mut self, mesh: MeshId) -> Self {
        self.small_floor_mesh = Some(mesh);
        self
    }

    pub fn side_ratio(&self) -> f64 {
        self.side_ratio
    }

    pub fn roof_strategy(&self) -> RoofStrategy {
        self.roof_strategy
    }

    /// Depth missing from the short row, in world units.
    fn pull_in(&self, section_y: f64) -> f64 {
        (1.0 - self.side_ratio) * section_y
    }
}

impl ShapedBounds for NonUniformSides {}

impl Shape for NonUniformSides {
    fn name(&self) -> &str {
        "non_uniform_sides"
    }

    fn shape_transform(&self, request: &ShapeRequest<'_>) -> ShapeOutcome {
        let mut outcome = ShapeOutcome::unchanged(request);
        let placement = request.placement;
        let size = request.resolution.size;
        let row = current_row(placement.index, placement.max_in_row);

        match request.shape_mode() {
            Some(SnapMode::Default) => {
                if row == placement.build_stats.bounds.y - 1 {
                    outcome.transform.scale.y *= self.side_ratio;
                    outcome.mesh_override = self.small_floor_mesh.clone();
                }
            }
            Some(SnapMode::Rooftop) => {
                if row == max_row(placement.max_count, placement.max_in_row) - 1 {
                    match self.roof_strategy {
                        RoofStrategy::V1 => outcome.transform.scale.y *= self.side_ratio,
                        RoofStrategy::V2 => outcome.transform.location.y -= self.pull_in(size.y),
                    }
                }
            }
            Some(SnapMode::Corner) => {
                if is_facing_right(row, placement.max_count, placement.max_in_row) {
                    outcome.transform.location.y -= self.pull_in(size.y);
                }
            }
            Some(SnapMode::Wall | SnapMode::Roof) => return self.shape_house_wall(request),
            Some(SnapMode::Custom) | None => {}
        }
        outcome
    }

    fn as_house_shape(&self) -> Option<&dyn HouseShape> {
        Some(self)
    }
}

impl HouseShape for NonUniformSides {
    fn shape_house_wall(&self, request: &ShapeRequest<'_>) -> ShapeOutcome {
        let mut outcome = ShapeOutcome::unchanged(request);
        let placement = request.placement;
        let bounds = placement.build_stats.bounds;
        let pull_in = self.pull_in(request.resolution.size.y);
        let piece = perimeter_piece(
            placement.index,
            placement.max_in_row,
            placement.max_count,
            bounds,
            request.generation(),
        );

        let transform = &mut outcome.transform;
        match piece.side {
            Side::Right => transform.location.y -= pull_in,
            Side::Front if piece.row == bounds.y - 2 => {
                transform.scale.x *= self.side_ratio;
                outcome.mesh_override = self.small_side_wall_mesh.clone();
            }
            // back pieces face -Y after their yaw, so they also slide in
            Side::Back if piece.row == bounds.y - 1 => {
                transform.scale.x *= self.side_ratio;
                transform.location.y -= pull_in;
                outcome.mesh_override = self.small_side_wall_mesh.clone();
            }
            _ => {}
        }
        outcome
    }
}
