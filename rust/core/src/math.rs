// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transform primitives shared by the resolution engine, solvers and shapes.
//!
//! Locations and scales are `nalgebra` vectors in world units. Rotations are
//! kept as Euler angles in degrees because every placement rule is phrased as
//! "rotate yaw by 90" and the composed value must stay exactly comparable in
//! regression fixtures.

use nalgebra::{Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// Edge length of one modular section, in world units.
///
/// Drives the Z offset of every level regardless of the resolution's own Z.
pub const DEFAULT_SECTION_SIZE: f64 = 400.0;

/// Size of one modular section along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionSize {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SectionSize {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A cube of [`DEFAULT_SECTION_SIZE`] on every axis.
    pub const fn uniform() -> Self {
        Self::new(DEFAULT_SECTION_SIZE, DEFAULT_SECTION_SIZE, DEFAULT_SECTION_SIZE)
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Default for SectionSize {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Footprint of a level in section units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Both axes are positive. Shaping queries are only meaningful once set.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.x > 0 && self.y > 0
    }
}

/// Euler rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator::new(0.0, 0.0, 0.0);

    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    pub const fn from_yaw(yaw: f64) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Component-wise sum. Angles are not normalized.
    pub fn combine(&self, other: &Rotator) -> Rotator {
        Rotator::new(
            self.pitch + other.pitch,
            self.yaw + other.yaw,
            self.roll + other.roll,
        )
    }

    /// Yaw wrapped into `(-180, 180]`.
    pub fn normalized_yaw(&self) -> f64 {
        let mut yaw = self.yaw % 360.0;
        if yaw > 180.0 {
            yaw -= 360.0;
        } else if yaw <= -180.0 {
            yaw += 360.0;
        }
        yaw
    }

    /// Rotation about Z (yaw), then Y (pitch), then X (roll).
    pub fn to_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(
            self.roll.to_radians(),
            self.pitch.to_radians(),
            self.yaw.to_radians(),
        )
    }
}

/// Location, rotation and scale of one placed section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Vector3<f64>,
    pub rotation: Rotator,
    pub scale: Vector3<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            location: Vector3::zeros(),
            rotation: Rotator::ZERO,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_location(location: Vector3<f64>) -> Self {
        Self {
            location,
            ..Self::identity()
        }
    }

    /// Scale, then rotate, then translate.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);
        let rotation = self.rotation.to_rotation().to_homogeneous();
        let translation = Matrix4::new_translation(&self.location);
        translation * rotation * scale
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Transform, epsilon: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= epsilon;
        (self.location - other.location).amax() <= epsilon
            && (self.scale - other.scale).amax() <= epsilon
            && close(self.rotation.pitch, other.rotation.pitch)
            && close(self.rotation.yaw, other.rotation.yaw)
            && close(self.rotation.roll, other.rotation.roll)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
