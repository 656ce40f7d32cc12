// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solver counterparts of the grid-facing snap modes.
//!
//! These agree with [`crate::resolution::grid`] for every input; the
//! integration tests check both paths side by side.

use stackhouse_core::SnapMode;

use super::{SolverContext, TransformSolver};

/// Row-major grid fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSolver;

impl TransformSolver for DefaultSolver {
    fn name(&self) -> &str {
        "default"
    }

    fn shape_mode(&self) -> Option<SnapMode> {
        Some(SnapMode::Default)
    }

    fn next_transform(&self, ctx: &mut SolverContext<'_>) {
        ctx.offset_sections(ctx.adjusted_index(), ctx.current_row());
        ctx.add_level_offset(0.0);
    }
}

/// Grid fill stacked on the previous level.
#[derive(Debug, Clone, Copy, Default)]
pub struct RooftopSolver;

impl TransformSolver for RooftopSolver {
    fn name(&self) -> &str {
        "rooftop"
    }

    fn shape_mode(&self) -> Option<SnapMode> {
        Some(SnapMode::Rooftop)
    }

    fn next_transform(&self, ctx: &mut SolverContext<'_>) {
        if let Some(previous) = ctx.previous_level() {
            ctx.add_location(previous.y, previous.y, 0.0);
        }
        ctx.offset_sections(ctx.adjusted_index(), ctx.current_row());
        ctx.add_level_offset(0.0);
    }
}

/// Footprint corners, one level down.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerSolver;

impl TransformSolver for CornerSolver {
    fn name(&self) -> &str {
        "corner"
    }

    fn shape_mode(&self) -> Option<SnapMode> {
        Some(SnapMode::Corner)
    }

    fn next_transform(&self, ctx: &mut SolverContext<'_>) {
        let stats = ctx.build_stats();
        let (front, back) = (ctx.is_facing_front(), ctx.is_facing_back());
        let (left, right) = (ctx.is_facing_left(), ctx.is_facing_right());

        if back {
            ctx.offset_sections(stats.max_count_in_row - 2, 0);
            if left {
                ctx.add_yaw(90.0);
            } else if right {
                ctx.add_yaw(-90.0);
            }
        }

        if right {
            ctx.offset_sections(0, stats.bounds.y - 1);
        } else if front || left {
            ctx.add_yaw(90.0);
            ctx.offset_sections(0, -1);
        }

        ctx.add_level_offset(-1.0);
    }
}
