// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input and output of one placement computation.
//!
//! A [`PlacementRequest`] is built fresh for every index of every level and
//! borrowed by the engine, a solver and a shape in turn. Results flow back
//! through [`Placement`] (a delta relative to the base transform) and
//! [`ComputedPlacement`] (the composed transform).

use nalgebra::Vector3;
use stackhouse_core::{
    coerce_max_in_row, BuildStats, Rotator, SectionSize, Transform, DEFAULT_SECTION_SIZE,
};

use crate::solver::TransformSolver;
use crate::spline::SplinePath;

/// Everything a placement rule may read for one index.
#[derive(Clone, Copy)]
pub struct PlacementRequest<'a> {
    /// Transform the computed delta is applied to.
    pub base: Transform,
    pub index: i32,
    /// Row width, always at least 1.
    pub max_in_row: i32,
    pub max_count: i32,
    /// Floor number, fractional for half levels.
    pub level_z_multiplier: f64,
    pub build_stats: &'a BuildStats,
    /// Section size of the level below, for stacking rooftops.
    pub previous_level: Option<SectionSize>,
    /// Overrides the resolution's own algorithm when bound.
    pub solver: Option<&'a dyn TransformSolver>,
    pub spline: Option<&'a dyn SplinePath>,
}

impl<'a> PlacementRequest<'a> {
    /// Creates a request for `index`, coercing a zero or negative row width
    /// to 1.
    pub fn new(index: i32, max_in_row: i32, max_count: i32, build_stats: &'a BuildStats) -> Self {
        Self {
            base: Transform::identity(),
            index,
            max_in_row: coerce_max_in_row(max_in_row),
            max_count,
            level_z_multiplier: 0.0,
            build_stats,
            previous_level: None,
            solver: None,
            spline: None,
        }
    }

    pub fn with_base(mut self, base: Transform) -> Self {
        self.base = base;
        self
    }

    pub fn with_level(mut self, level_z_multiplier: f64) -> Self {
        self.level_z_multiplier = level_z_multiplier;
        self
    }

    pub fn with_previous_level(mut self, previous_level: Option<SectionSize>) -> Self {
        self.previous_level = previous_level;
        self
    }

    pub fn with_solver(mut self, solver: Option<&'a dyn TransformSolver>) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_spline(mut self, spline: Option<&'a dyn SplinePath>) -> Self {
        self.spline = spline;
        self
    }
}

impl std::fmt::Debug for PlacementRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacementRequest")
            .field("index", &self.index)
            .field("max_in_row", &self.max_in_row)
            .field("max_count", &self.max_count)
            .field("level_z_multiplier", &self.level_z_multiplier)
            .field("bounds", &self.build_stats.bounds)
            .field("previous_level", &self.previous_level)
            .field("solver", &self.solver.map(|s| s.name()))
            .field("spline", &self.spline.is_some())
            .finish()
    }
}

/// Delta produced for one index, relative to the request's base transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub location: Vector3<f64>,
    pub rotation: Rotator,
    pub scale: Vector3<f64>,
    pub skip: bool,
}

impl Placement {
    pub fn new() -> Self {
        Self {
            location: Vector3::zeros(),
            rotation: Rotator::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
            skip: false,
        }
    }

    /// Moves by whole sections of `size` along X and Y.
    pub fn offset_sections(&mut self, size: &SectionSize, x: i32, y: i32) {
        self.location.x += size.x * f64::from(x);
        self.location.y += size.y * f64::from(y);
    }

    pub fn add_yaw(&mut self, degrees: f64) {
        self.rotation.yaw += degrees;
    }

    /// Lifts to the given floor using [`DEFAULT_SECTION_SIZE`].
    pub fn add_level(&mut self, level_z_multiplier: f64) {
        self.location.z += DEFAULT_SECTION_SIZE * level_z_multiplier;
    }

    /// Applies the delta to `base`: locations and rotations add, scales
    /// multiply.
    pub fn compose(&self, base: &Transform) -> Transform {
        Transform {
            location: base.location + self.location,
            rotation: base.rotation.combine(&self.rotation),
            scale: base.scale.component_mul(&self.scale),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new()
    }
}

/// Final transform of one index plus whether it should be left out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedPlacement {
    pub transform: Transform,
    pub skip: bool,
}
