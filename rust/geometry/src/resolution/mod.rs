// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolution engine: one section size, one snap mode, one generation.
//!
//! [`Resolution::compute`] is the entry point for every placement. A solver
//! bound on the request replaces the built-in algorithm; otherwise the snap
//! mode selects one of the grid or perimeter rules.

pub mod grid;
pub mod wall;

use serde::{Deserialize, Serialize};
use stackhouse_core::{AlgorithmGeneration, SectionSize, SnapMode, Transform};

use crate::request::{ComputedPlacement, Placement, PlacementRequest};
use crate::solver::run_solver;

pub use grid::{corner_placement, default_placement, rooftop_placement};
pub use wall::{perimeter_piece, PerimeterPiece, Side};

/// Section size and algorithm selection of a level.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub size: SectionSize,
    pub snap_mode: SnapMode,
    #[serde(default)]
    pub generation: AlgorithmGeneration,
}

impl Resolution {
    pub fn new(size: SectionSize, snap_mode: SnapMode) -> Self {
        Self {
            size,
            snap_mode,
            generation: AlgorithmGeneration::default(),
        }
    }

    pub fn with_generation(mut self, generation: AlgorithmGeneration) -> Self {
        self.generation = generation;
        self
    }

    /// Transform and skip flag for one index.
    pub fn compute(&self, request: &PlacementRequest<'_>) -> ComputedPlacement {
        if let Some(solver) = request.solver {
            return run_solver(solver, request, self);
        }

        let placement = self.builtin_placement(request);
        ComputedPlacement {
            transform: placement.compose(&request.base),
            skip: placement.skip,
        }
    }

    /// Transform for one index, ignoring the skip flag.
    pub fn compute_next_transform(&self, request: &PlacementRequest<'_>) -> Transform {
        self.compute(request).transform
    }

    /// Delta from the built-in algorithm of this resolution's snap mode.
    pub fn builtin_placement(&self, request: &PlacementRequest<'_>) -> Placement {
        match self.snap_mode {
            SnapMode::Default => default_placement(request, &self.size),
            SnapMode::Wall => self.wall_placement(request),
            SnapMode::Roof => self.roof_placement(request),
            SnapMode::Rooftop => rooftop_placement(request, &self.size),
            SnapMode::Corner => corner_placement(request, &self.size),
            SnapMode::Custom => {
                tracing::warn!(
                    index = request.index,
                    "custom snap mode without a solver, using default placement"
                );
                default_placement(request, &self.size)
            }
        }
    }

    /// Perimeter walk for the configured generation.
    pub fn wall_placement(&self, request: &PlacementRequest<'_>) -> Placement {
        let piece = perimeter_piece(
            request.index,
            request.max_in_row,
            request.max_count,
            request.build_stats.bounds,
            self.generation,
        );
        let mut placement = Placement::new();
        placement.add_yaw(piece.yaw);
        placement.offset_sections(&self.size, piece.column, piece.row);
        placement.add_level(request.level_z_multiplier);
        placement
    }

    pub fn roof_placement(&self, request: &PlacementRequest<'_>) -> Placement {
        self.wall_placement(request)
    }
}
