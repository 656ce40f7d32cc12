// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Stackhouse Core
//!
//! Integer foundations of modular building placement.
//!
//! A level of a building is a linear run of section indices laid out
//! row-major. This crate decomposes those indices into rows and columns,
//! classifies which side of the footprint an index faces, and accumulates the
//! per-building statistics that edge decisions depend on. The geometry crate
//! builds transforms on top of these primitives.

pub mod build_stats;
pub mod error;
pub mod facing;
pub mod index;
pub mod math;
pub mod mode;

pub use build_stats::{BuildStats, ShapedBounds};
pub use error::{Error, Result};
pub use facing::{classify_wall, WallBlock, WallSegment};
pub use index::{adjusted_index, coerce_max_in_row, current_row, max_row, wall_current_row};
pub use math::{Bounds, Rotator, SectionSize, Transform, DEFAULT_SECTION_SIZE};
pub use mode::{AlgorithmGeneration, SnapMode};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Vector3};
