// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stackhouse Geometry
//!
//! Turns section indices into transforms. The [`Resolution`] engine covers
//! the built-in snap modes, [`solver`] hosts pluggable placement rules, and
//! [`shape`] overlays carve or resize sections of a rectangular footprint.

pub mod error;
pub mod request;
pub mod resolution;
pub mod shape;
pub mod solver;
pub mod spline;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use request::{ComputedPlacement, Placement, PlacementRequest};
pub use resolution::{perimeter_piece, PerimeterPiece, Resolution, Side};
pub use shape::{
    shape_section, shaping_mode, HouseShape, LShape, MeshId, NonUniformSides, Rectangular,
    RemainingActors, RemainingActorsRequest, RoofStrategy, SectionInitializer, Shape, ShapeOutcome,
    ShapeRequest,
};
pub use solver::{
    run_solver, Axis, BuiltinSolver, CornerSolver, DefaultSolver, HouseWallSolver, RooftopSolver,
    SolverContext, SolverRegistry, TransformSolver, TunnelRooftopSolver, TunnelWallSolver,
};
pub use spline::{PolylinePath, SplinePath};
