// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Grid-facing placement: Default, Rooftop and Corner modes.

use stackhouse_core::facing::{is_facing_back, is_facing_front, is_facing_left, is_facing_right};
use stackhouse_core::{adjusted_index, current_row, SectionSize};

use crate::request::{Placement, PlacementRequest};

/// Row-major grid fill.
pub fn default_placement(request: &PlacementRequest<'_>, size: &SectionSize) -> Placement {
    let mut placement = Placement::new();
    placement.offset_sections(
        size,
        adjusted_index(request.index, request.max_in_row),
        current_row(request.index, request.max_in_row),
    );
    placement.add_level(request.level_z_multiplier);
    placement
}

/// Grid fill shifted by the previous level's section depth on both axes.
pub fn rooftop_placement(request: &PlacementRequest<'_>, size: &SectionSize) -> Placement {
    let mut placement = Placement::new();
    if let Some(previous) = request.previous_level {
        placement.location.x += previous.y;
        placement.location.y += previous.y;
    }
    placement.offset_sections(
        size,
        adjusted_index(request.index, request.max_in_row),
        current_row(request.index, request.max_in_row),
    );
    placement.add_level(request.level_z_multiplier);
    placement
}

/// Four corners of the footprint, anchored one level below the floor they
/// belong to.
///
/// Back corners sit on the widest wall row of the building, so the X shift
/// comes from [`stackhouse_core::BuildStats::max_count_in_row`] rather than
/// the corner level's own row width.
pub fn corner_placement(request: &PlacementRequest<'_>, size: &SectionSize) -> Placement {
    let stats = request.build_stats;
    let adjusted = adjusted_index(request.index, request.max_in_row);
    let row = current_row(request.index, request.max_in_row);

    let front = is_facing_front(adjusted);
    let back = is_facing_back(adjusted, request.max_in_row);
    let left = is_facing_left(row);
    let right = is_facing_right(row, request.max_count, request.max_in_row);

    let mut placement = Placement::new();
    if back {
        placement.offset_sections(size, stats.max_count_in_row - 2, 0);
        if left {
            placement.add_yaw(90.0);
        } else if right {
            placement.add_yaw(-90.0);
        }
    }

    if right {
        placement.offset_sections(size, 0, stats.bounds.y - 1);
    } else if front || left {
        placement.add_yaw(90.0);
        placement.offset_sections(size, 0, -1);
    }

    placement.add_level(request.level_z_multiplier - 1.0);
    placement
}
