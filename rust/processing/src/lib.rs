// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building pipeline shared by hosts that spawn modular buildings.
//!
//! Loads a [`BuildingConfig`], folds its statistics, lays out every level
//! through the geometry crate and hands the result to a [`SectionSink`].

pub mod config;
pub mod error;
pub mod pipeline;
pub mod section_builder;

pub use config::{BuildingConfig, EngineConfig, LevelConfig, ShapeConfig, SolverKind};
pub use error::{Error, Result};
pub use pipeline::{
    build_building, build_buildings, BuildingLayout, LevelBuilder, LevelLayout, PlacedSection,
};
pub use section_builder::{BuildReport, SectionBuilder, SectionSink};
