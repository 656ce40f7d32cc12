// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Paths that tunnel solvers lay sections along.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

/// A path sampled by arc length.
pub trait SplinePath: Send + Sync {
    /// Total arc length.
    fn length(&self) -> f64;

    /// Point at `distance` along the path, clamped to its ends.
    fn location_at_distance(&self, distance: f64) -> Vector3<f64>;

    /// Heading at `distance`, in degrees around Z.
    fn yaw_at_distance(&self, distance: f64) -> f64;
}

/// Piecewise-linear path through a list of points.
#[derive(Debug, Clone)]
pub struct PolylinePath {
    points: Vec<Point3<f64>>,
    /// Arc length at each point. `cumulative[0] == 0`.
    cumulative: Vec<f64>,
}

impl PolylinePath {
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidPath(
                "Path must have at least 2 points".to_string(),
            ));
        }

        let mut cumulative = Vec::with_capacity(points.len());
        cumulative.push(0.0);
        for pair in points.windows(2) {
            let last = cumulative[cumulative.len() - 1];
            cumulative.push(last + (pair[1] - pair[0]).norm());
        }

        if cumulative[cumulative.len() - 1] < 1e-10 {
            return Err(Error::InvalidPath("Path has zero length".to_string()));
        }

        Ok(Self { points, cumulative })
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Segment containing `distance` and the distance into it.
    fn locate(&self, distance: f64) -> (usize, f64) {
        let d = distance.clamp(0.0, self.length());
        // partition_point gives the first cumulative value > d
        let upper = self.cumulative.partition_point(|&c| c <= d);
        let segment = upper.saturating_sub(1).min(self.points.len() - 2);
        (segment, d - self.cumulative[segment])
    }

    fn direction(&self, segment: usize) -> Vector3<f64> {
        let delta = self.points[segment + 1] - self.points[segment];
        let norm = delta.norm();
        if norm < 1e-10 {
            Vector3::zeros()
        } else {
            delta / norm
        }
    }
}

impl SplinePath for PolylinePath {
    fn length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    fn location_at_distance(&self, distance: f64) -> Vector3<f64> {
        let (segment, along) = self.locate(distance);
        (self.points[segment] + self.direction(segment) * along).coords
    }

    fn yaw_at_distance(&self, distance: f64) -> f64 {
        let (segment, _) = self.locate(distance);
        let direction = self.direction(segment);
        direction.y.atan2(direction.x).to_degrees()
    }
}
