// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! House wall solver: the Gen3 perimeter walk written against the solver
//! context, for house content that always uses Gen3 regardless of the
//! resolution's generation.

use stackhouse_core::facing::WallSegment;
use stackhouse_core::{AlgorithmGeneration, SnapMode};

use super::{SolverContext, TransformSolver};

#[derive(Debug, Clone, Copy, Default)]
pub struct HouseWallSolver;

impl HouseWallSolver {
    /// Column of the Gen3 right block for the bound index.
    fn right_column(ctx: &SolverContext<'_>) -> i32 {
        let (max_count, max_in_row) = (ctx.max_count(), ctx.max_in_row());
        let remainder = max_count % (max_in_row * 2);
        let middle_walls_count = max_count - max_in_row * 2;

        let mut modulus = max_count - max_in_row;
        if middle_walls_count > 0 || (remainder == 0 && middle_walls_count == 0) {
            modulus += 2;
        }
        if modulus == 0 {
            tracing::warn!(index = ctx.index(), "empty right wall modulus");
            return 0;
        }
        ctx.index() % modulus
    }
}

impl TransformSolver for HouseWallSolver {
    fn name(&self) -> &str {
        "house_wall"
    }

    fn shape_mode(&self) -> Option<SnapMode> {
        Some(SnapMode::Wall)
    }

    fn wall_generation(&self) -> Option<AlgorithmGeneration> {
        Some(AlgorithmGeneration::Gen3)
    }

    fn next_transform(&self, ctx: &mut SolverContext<'_>) {
        let bounds = ctx.bounds();

        match ctx.wall_segment() {
            WallSegment::LeftFront => {
                ctx.add_yaw(90.0);
                ctx.offset_sections(0, -1);
            }
            WallSegment::LeftBack => {
                ctx.add_yaw(-90.0);
                ctx.offset_sections(bounds.x, 0);
            }
            WallSegment::Left => {
                ctx.add_yaw(180.0);
                ctx.offset_sections(ctx.adjusted_index(), -1);
            }
            WallSegment::Right => {
                ctx.offset_sections(Self::right_column(ctx), bounds.y - 1);
            }
            WallSegment::MiddleFront => {
                ctx.add_yaw(90.0);
                ctx.offset_sections(0, ctx.wall_current_row() - 1);
            }
            WallSegment::MiddleBack => {
                ctx.add_yaw(-90.0);
                ctx.offset_sections(ctx.max_in_row() - 2, ctx.wall_current_row());
            }
        }

        ctx.add_level_offset(0.0);
    }
}
