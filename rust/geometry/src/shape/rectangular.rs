// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use stackhouse_core::ShapedBounds;

use super::{Shape, ShapeOutcome, ShapeRequest};

/// The plain footprint. Never skips, never moves a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rectangular;

impl ShapedBounds for Rectangular {}

impl Shape for Rectangular {
    fn name(&self) -> &str {
        "rectangular"
    }

    fn shape_transform(&self, request: &ShapeRequest<'_>) -> ShapeOutcome {
        ShapeOutcome::unchanged(request)
    }
}
