// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transform solvers: pluggable placement rules.
//!
//! A solver receives a [`SolverContext`] bound to one [`PlacementRequest`] and
//! writes its delta into the context's output. Accessors on the context are
//! thin wrappers over the index arithmetic and facing rules, so a solver reads
//! like the built-in rules it replaces.
//!
//! A context must be bound with [`SolverContext::begin`] before use. An
//! unbound context reports an error on every accessor and answers with a
//! zeroed value, so a misconfigured solver places sections at the origin
//! instead of aborting the build.

pub mod builtin;
pub mod house_wall;
pub mod registry;
pub mod tunnel;

use stackhouse_core::facing::{
    classify_wall, is_facing_back, is_facing_front, is_facing_left, is_facing_right, WallSegment,
};
use stackhouse_core::{
    adjusted_index, current_row, max_row, wall_current_row, AlgorithmGeneration, Bounds,
    BuildStats, Error, Result, SectionSize, SnapMode, Transform,
};

use crate::request::{ComputedPlacement, Placement, PlacementRequest};
use crate::resolution::Resolution;
use crate::spline::SplinePath;

pub use builtin::{CornerSolver, DefaultSolver, RooftopSolver};
pub use house_wall::HouseWallSolver;
pub use registry::{BuiltinSolver, SolverRegistry};
pub use tunnel::{TunnelRooftopSolver, TunnelWallSolver};

/// A placement rule that can stand in for a resolution's snap mode.
pub trait TransformSolver: Send + Sync {
    fn name(&self) -> &str;

    /// Writes the delta for the bound request into `ctx`.
    fn next_transform(&self, ctx: &mut SolverContext<'_>);

    /// Snap mode whose layout this solver reproduces. Shapes carve the
    /// solver's sections by that mode's rules; `None` leaves them unshaped.
    fn shape_mode(&self) -> Option<SnapMode> {
        None
    }

    /// Perimeter walk the solver follows regardless of the resolution's
    /// generation.
    fn wall_generation(&self) -> Option<AlgorithmGeneration> {
        None
    }
}

/// Axis for mirroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Runs `solver` for one request and composes the result with the request's
/// base transform.
pub fn run_solver(
    solver: &dyn TransformSolver,
    request: &PlacementRequest<'_>,
    resolution: &Resolution,
) -> ComputedPlacement {
    let mut ctx = SolverContext::begin(request, resolution);
    solver.next_transform(&mut ctx);
    ctx.finish()
}

/// Per-call view of a request plus the delta being built.
pub struct SolverContext<'a> {
    request: Option<&'a PlacementRequest<'a>>,
    resolution: Option<&'a Resolution>,
    output: Placement,
}

impl<'a> SolverContext<'a> {
    /// Binds a request for one solver call.
    pub fn begin(request: &'a PlacementRequest<'a>, resolution: &'a Resolution) -> Self {
        Self {
            request: Some(request),
            resolution: Some(resolution),
            output: Placement::new(),
        }
    }

    /// A context with nothing bound. Every accessor reports an error.
    pub fn unbound() -> Self {
        Self {
            request: None,
            resolution: None,
            output: Placement::new(),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.request.is_some()
    }

    /// Fails with [`Error::RequestNotBound`] when used outside `begin`.
    pub fn ensure_bound(&self) -> Result<()> {
        if self.is_bound() {
            Ok(())
        } else {
            Err(Error::RequestNotBound)
        }
    }

    fn bound(&self, accessor: &'static str) -> Option<&'a PlacementRequest<'a>> {
        if self.request.is_none() {
            tracing::error!(accessor, "solver request accessed before begin()");
        }
        self.request
    }

    // -- request accessors -------------------------------------------------

    pub fn index(&self) -> i32 {
        self.bound("index").map_or(0, |r| r.index)
    }

    pub fn max_in_row(&self) -> i32 {
        // 1 keeps derived divisions safe on an unbound context
        self.bound("max_in_row").map_or(1, |r| r.max_in_row)
    }

    pub fn max_count(&self) -> i32 {
        self.bound("max_count").map_or(0, |r| r.max_count)
    }

    pub fn level_z_multiplier(&self) -> f64 {
        self.bound("level_z_multiplier")
            .map_or(0.0, |r| r.level_z_multiplier)
    }

    pub fn build_stats(&self) -> BuildStats {
        self.bound("build_stats")
            .map_or_else(BuildStats::default, |r| *r.build_stats)
    }

    pub fn bounds(&self) -> Bounds {
        self.bound("bounds")
            .map_or_else(Bounds::default, |r| r.build_stats.bounds)
    }

    pub fn previous_level(&self) -> Option<SectionSize> {
        self.bound("previous_level").and_then(|r| r.previous_level)
    }

    pub fn spline(&self) -> Option<&'a dyn SplinePath> {
        self.bound("spline").and_then(|r| r.spline)
    }

    pub fn section_size(&self) -> SectionSize {
        match self.resolution {
            Some(resolution) => resolution.size,
            None => {
                tracing::error!(accessor = "section_size", "solver request accessed before begin()");
                SectionSize::new(0.0, 0.0, 0.0)
            }
        }
    }

    pub fn generation(&self) -> AlgorithmGeneration {
        match self.resolution {
            Some(resolution) => resolution.generation,
            None => {
                tracing::error!(accessor = "generation", "solver request accessed before begin()");
                AlgorithmGeneration::default()
            }
        }
    }

    // -- derived queries ---------------------------------------------------

    pub fn adjusted_index(&self) -> i32 {
        adjusted_index(self.index(), self.max_in_row())
    }

    pub fn current_row(&self) -> i32 {
        current_row(self.index(), self.max_in_row())
    }

    pub fn max_row(&self) -> i32 {
        max_row(self.max_count(), self.max_in_row())
    }

    pub fn wall_current_row(&self) -> i32 {
        wall_current_row(self.index(), self.max_in_row())
    }

    pub fn is_facing_front(&self) -> bool {
        self.bound("is_facing_front")
            .is_some_and(|r| is_facing_front(adjusted_index(r.index, r.max_in_row)))
    }

    pub fn is_facing_back(&self) -> bool {
        self.bound("is_facing_back").is_some_and(|r| {
            is_facing_back(adjusted_index(r.index, r.max_in_row), r.max_in_row)
        })
    }

    pub fn is_facing_left(&self) -> bool {
        self.bound("is_facing_left")
            .is_some_and(|r| is_facing_left(current_row(r.index, r.max_in_row)))
    }

    pub fn is_facing_right(&self) -> bool {
        self.bound("is_facing_right").is_some_and(|r| {
            is_facing_right(current_row(r.index, r.max_in_row), r.max_count, r.max_in_row)
        })
    }

    pub fn wall_segment(&self) -> WallSegment {
        classify_wall(self.index(), self.max_in_row(), self.max_count())
    }

    // -- output ------------------------------------------------------------

    pub fn placement(&self) -> &Placement {
        &self.output
    }

    /// Moves by whole sections of the resolution's size.
    pub fn offset_sections(&mut self, x: i32, y: i32) {
        let size = self.section_size();
        self.output.offset_sections(&size, x, y);
    }

    pub fn add_location(&mut self, x: f64, y: f64, z: f64) {
        self.output.location.x += x;
        self.output.location.y += y;
        self.output.location.z += z;
    }

    pub fn add_yaw(&mut self, degrees: f64) {
        self.output.add_yaw(degrees);
    }

    /// Lifts by `level_z_multiplier` floors plus `extra_levels`.
    pub fn add_level_offset(&mut self, extra_levels: f64) {
        let level = self.level_z_multiplier();
        self.output.add_level(level + extra_levels);
    }

    /// Negates the scale along `axis`.
    pub fn mirror_by_axis(&mut self, axis: Axis) {
        match axis {
            Axis::X => self.output.scale.x = -self.output.scale.x,
            Axis::Y => self.output.scale.y = -self.output.scale.y,
            Axis::Z => self.output.scale.z = -self.output.scale.z,
        }
    }

    pub fn skip_index(&mut self) {
        self.output.skip = true;
    }

    /// Composes the delta with the base transform and ends the call.
    pub fn finish(self) -> ComputedPlacement {
        let base = self.request.map_or_else(Transform::identity, |r| r.base);
        ComputedPlacement {
            transform: self.output.compose(&base),
            skip: self.output.skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mirrored;

    impl TransformSolver for Mirrored {
        fn name(&self) -> &str {
            "mirrored"
        }

        fn next_transform(&self, ctx: &mut SolverContext<'_>) {
            ctx.offset_sections(ctx.adjusted_index(), 0);
            ctx.mirror_by_axis(Axis::X);
            if ctx.index() == 2 {
                ctx.skip_index();
            }
        }
    }

    #[test]
    fn unbound_accessors_return_defaults() {
        let ctx = SolverContext::unbound();
        assert!(ctx.ensure_bound().is_err());
        assert_eq!(ctx.index(), 0);
        assert_eq!(ctx.max_in_row(), 1);
        assert_eq!(ctx.adjusted_index(), 0);
        assert_eq!(ctx.bounds(), Bounds::default());
        assert!(!ctx.is_facing_front());
        assert!(!ctx.is_facing_right());
        assert!(!ctx.is_facing_back());
        assert!(!ctx.is_facing_left());
        assert_eq!(ctx.generation(), AlgorithmGeneration::default());
        assert_eq!(ctx.section_size(), SectionSize::new(0.0, 0.0, 0.0));
        assert_eq!(ctx.finish().transform, Transform::identity());
    }

    #[test]
    fn bound_context_answers_facing_queries() {
        let stats = BuildStats::from_level(3, 9, Bounds::new(3, 3));
        let resolution = Resolution::new(SectionSize::uniform(), SnapMode::Default)
            .with_generation(AlgorithmGeneration::Gen2);
        let request = PlacementRequest::new(0, 3, 9, &stats);
        let ctx = SolverContext::begin(&request, &resolution);
        assert!(ctx.is_facing_front());
        assert!(ctx.is_facing_left());
        assert!(!ctx.is_facing_right());
        assert_eq!(ctx.generation(), AlgorithmGeneration::Gen2);
    }

    #[test]
    fn solvers_declare_no_shape_mode_by_default() {
        assert_eq!(Mirrored.shape_mode(), None);
        assert_eq!(Mirrored.wall_generation(), None);
    }

    #[test]
    fn custom_solver_runs_through_resolution() {
        let stats = BuildStats::default();
        let resolution = Resolution::new(SectionSize::uniform(), SnapMode::Custom);
        let solver = Mirrored;

        let request = PlacementRequest::new(2, 3, 6, &stats).with_solver(Some(&solver));
        let computed = resolution.compute(&request);

        assert_eq!(computed.transform.location.x, 800.0);
        assert_eq!(computed.transform.scale.x, -1.0);
        assert!(computed.skip);

        let request = PlacementRequest::new(1, 3, 6, &stats).with_solver(Some(&solver));
        assert!(!resolution.compute(&request).skip);
    }

    #[test]
    fn bound_context_exposes_request() {
        let stats = BuildStats::from_level(4, 8, Bounds::new(2, 2));
        let resolution = Resolution::new(SectionSize::uniform(), SnapMode::Wall);
        let request = PlacementRequest::new(5, 4, 8, &stats).with_level(2.0);
        let ctx = SolverContext::begin(&request, &resolution);

        assert!(ctx.ensure_bound().is_ok());
        assert_eq!(ctx.adjusted_index(), 1);
        assert_eq!(ctx.current_row(), 1);
        assert_eq!(ctx.max_row(), 2);
        assert_eq!(ctx.wall_current_row(), 1);
        assert_eq!(ctx.wall_segment(), WallSegment::MiddleBack);
        assert_eq!(ctx.level_z_multiplier(), 2.0);
        assert_eq!(ctx.bounds(), Bounds::new(2, 2));
    }
}
