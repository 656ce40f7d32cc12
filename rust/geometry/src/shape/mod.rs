// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint shapes: overlays that perturb or skip sections of an otherwise
//! rectangular layout.
//!
//! A shape sees each computed transform after the resolution engine (or a
//! solver) produced it and may move, scale, skip or re-mesh it. Shapes that
//! also carve perimeter walls expose [`HouseShape`]; [`shape_section`]
//! routes Wall and Roof sections through that capability when present.
//!
//! The rules a shape applies follow [`shaping_mode`]: the resolution's snap
//! mode, or the mode a bound solver declares it lays out. Sections from a
//! solver that declares no mode are left as the solver placed them.
//!
//! Shapes are stateless across calls. Their only state is configuration that
//! stays fixed for a build pass, so one shape value can be shared across
//! threads and buildings.

pub mod l_shape;
pub mod non_uniform;
pub mod rectangular;

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stackhouse_core::{AlgorithmGeneration, BuildStats, ShapedBounds, SnapMode, Transform};

use crate::request::{ComputedPlacement, PlacementRequest};
use crate::resolution::Resolution;
use crate::solver::TransformSolver;

pub use l_shape::LShape;
pub use non_uniform::{NonUniformSides, RoofStrategy};
pub use rectangular::Rectangular;

/// Name of a mesh asset a shape asks the builder to use instead of the
/// level's own mesh.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshId(pub String);

impl MeshId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One section handed to a shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeRequest<'a> {
    pub placement: &'a PlacementRequest<'a>,
    pub resolution: &'a Resolution,
    /// Transform computed for the section, base included.
    pub transform: Transform,
    /// Skip flag raised before shaping, e.g. by a solver.
    pub skip: bool,
}

impl<'a> ShapeRequest<'a> {
    pub fn new(
        placement: &'a PlacementRequest<'a>,
        resolution: &'a Resolution,
        computed: ComputedPlacement,
    ) -> Self {
        Self {
            placement,
            resolution,
            transform: computed.transform,
            skip: computed.skip,
        }
    }

    #[inline]
    pub fn index(&self) -> i32 {
        self.placement.index
    }

    #[inline]
    pub fn build_stats(&self) -> &BuildStats {
        self.placement.build_stats
    }

    /// Snap mode whose shaping rules apply to this section.
    pub fn shape_mode(&self) -> Option<SnapMode> {
        shaping_mode(self.resolution.snap_mode, self.placement.solver)
    }

    /// Perimeter walk the section was placed by.
    pub fn generation(&self) -> AlgorithmGeneration {
        self.placement
            .solver
            .and_then(|solver| solver.wall_generation())
            .unwrap_or(self.resolution.generation)
    }
}

/// Snap mode a level is shaped as. A bound solver decides through
/// [`TransformSolver::shape_mode`]; Custom without a solver lays out, and is
/// shaped, like Default. `None` means no shaping rules apply.
pub fn shaping_mode(
    snap_mode: SnapMode,
    solver: Option<&dyn TransformSolver>,
) -> Option<SnapMode> {
    let mode = match solver {
        Some(solver) => solver.shape_mode(),
        None if snap_mode == SnapMode::Custom => Some(SnapMode::Default),
        None => Some(snap_mode),
    };
    mode.filter(|mode| *mode != SnapMode::Custom)
}

/// Result of shaping one section.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOutcome {
    pub transform: Transform,
    pub skip: bool,
    pub mesh_override: Option<MeshId>,
}

impl ShapeOutcome {
    /// The request's transform and skip flag, unchanged.
    pub fn unchanged(request: &ShapeRequest<'_>) -> Self {
        Self {
            transform: request.transform,
            skip: request.skip,
            mesh_override: None,
        }
    }
}

/// Context for the extra sections a shape adds after a level's layout.
#[derive(Debug, Clone, Copy)]
pub struct RemainingActorsRequest<'a> {
    pub resolution: &'a Resolution,
    /// Mode the level is shaped as, see [`shaping_mode`].
    pub snap_mode: Option<SnapMode>,
    pub build_stats: &'a BuildStats,
    pub base: Transform,
    pub level_z_multiplier: f64,
    /// Sections placed by the regular layout. Extra sections continue the
    /// index sequence from here.
    pub layout_count: i32,
}

/// Extra sections as `(index, transform)`.
pub type RemainingActors = SmallVec<[(i32, Transform); 2]>;

/// Section counts of a level before layout starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionInitializer {
    /// Mode the level is shaped as; Custom when no shaping rules apply.
    pub snap_mode: SnapMode,
    pub max_in_row: i32,
    /// Indices the resolution engine lays out.
    pub layout_count: i32,
    /// Sections the level ends up with, extras included.
    pub total_count: i32,
}

impl SectionInitializer {
    pub fn new(snap_mode: SnapMode, max_in_row: i32, layout_count: i32) -> Self {
        Self {
            snap_mode,
            max_in_row,
            layout_count,
            total_count: layout_count,
        }
    }

    /// Number of extra sections a shape asked for.
    pub fn extra_count(&self) -> i32 {
        (self.total_count - self.layout_count).max(0)
    }
}

/// A footprint overlay.
pub trait Shape: ShapedBounds + Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Perturbs or skips one section.
    ///
    /// # Panics
    ///
    /// The provided method panics: every concrete shape overrides it.
    fn shape_transform(&self, request: &ShapeRequest<'_>) -> ShapeOutcome {
        unimplemented!(
            "shape '{}' does not implement shape_transform (index {})",
            self.name(),
            request.index()
        )
    }

    fn place_remaining_actors(&self, request: &RemainingActorsRequest<'_>) -> RemainingActors {
        let _ = request;
        RemainingActors::new()
    }

    fn update_section_initializer(&self, initializer: &mut SectionInitializer) {
        let _ = initializer;
    }

    /// Wall-carving capability, if this shape has one.
    fn as_house_shape(&self) -> Option<&dyn HouseShape> {
        None
    }
}

/// Perimeter adjustments for shapes that change the outline of a house.
pub trait HouseShape {
    fn shape_house_wall(&self, request: &ShapeRequest<'_>) -> ShapeOutcome;
}

/// Shapes one section, preferring the wall-carving capability for sections
/// shaped as Wall or Roof.
pub fn shape_section(shape: &dyn Shape, request: &ShapeRequest<'_>) -> ShapeOutcome {
    let Some(mode) = request.shape_mode() else {
        tracing::warn!(
            index = request.index(),
            shape = shape.name(),
            solver = ?request.placement.solver.map(|solver| solver.name()),
            "solver declares no shape mode, leaving section unshaped"
        );
        return ShapeOutcome::unchanged(request);
    };
    if mode.is_perimeter() {
        if let Some(house) = shape.as_house_shape() {
            return house.shape_house_wall(request);
        }
    }
    shape.shape_transform(request)
}
