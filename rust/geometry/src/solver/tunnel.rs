// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunnel solvers: paired walls and a roof laid along a straight run or a
//! [`crate::spline::SplinePath`].
//!
//! Without a spline the tunnel runs along +X. With one, each section is
//! placed at its arc-length distance and turned to the path heading.

use nalgebra::Vector3;
use stackhouse_core::current_row;

use super::{Axis, SolverContext, TransformSolver};

/// Places `lateral` across the run at `distance` along it.
fn place_along(ctx: &mut SolverContext<'_>, distance: f64, lateral: f64) {
    match ctx.spline() {
        Some(spline) => {
            let point = spline.location_at_distance(distance);
            let yaw = spline.yaw_at_distance(distance);
            let (sin, cos) = yaw.to_radians().sin_cos();
            let offset = Vector3::new(-sin * lateral, cos * lateral, 0.0);
            let location = point + offset;
            ctx.add_location(location.x, location.y, location.z);
            ctx.add_yaw(yaw);
        }
        None => ctx.add_location(distance, lateral, 0.0),
    }
}

/// Alternates left and right walls; each pair advances one section.
#[derive(Debug, Clone, Copy, Default)]
pub struct TunnelWallSolver;

impl TransformSolver for TunnelWallSolver {
    fn name(&self) -> &str {
        "tunnel_wall"
    }

    fn next_transform(&self, ctx: &mut SolverContext<'_>) {
        let size = ctx.section_size();
        let index = ctx.index();
        let step = current_row(index, 2);

        let lateral = if index % 2 == 0 {
            0.0
        } else {
            ctx.mirror_by_axis(Axis::Y);
            f64::from(ctx.bounds().y.max(1)) * size.y
        };

        place_along(ctx, f64::from(step) * size.x, lateral);
        ctx.add_level_offset(0.0);
    }
}

/// Spans the tunnel width with `max_in_row` sections per step, one level up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TunnelRooftopSolver;

impl TransformSolver for TunnelRooftopSolver {
    fn name(&self) -> &str {
        "tunnel_rooftop"
    }

    fn next_transform(&self, ctx: &mut SolverContext<'_>) {
        let size = ctx.section_size();
        let step = ctx.current_row();
        let lateral = f64::from(ctx.adjusted_index()) * size.y;

        place_along(ctx, f64::from(step) * size.x, lateral);
        ctx.add_level_offset(1.0);
    }
}
