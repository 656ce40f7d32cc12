// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement algorithm selectors.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Placement algorithm family of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// Row-major grid fill (floors).
    #[default]
    Default,
    /// Perimeter walk.
    Wall,
    /// Same placement as [`SnapMode::Wall`].
    Roof,
    /// Grid fill stacked on the previous level.
    Rooftop,
    /// Four corners anchored one level down.
    Corner,
    /// Delegates to a bound transform solver.
    Custom,
}

impl SnapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapMode::Default => "default",
            SnapMode::Wall => "wall",
            SnapMode::Roof => "roof",
            SnapMode::Rooftop => "rooftop",
            SnapMode::Corner => "corner",
            SnapMode::Custom => "custom",
        }
    }

    /// Modes placed by the perimeter walk.
    pub fn is_perimeter(&self) -> bool {
        matches!(self, SnapMode::Wall | SnapMode::Roof)
    }
}

impl std::fmt::Display for SnapMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall/roof placement generation. Gen2 is kept for content authored before
/// the Gen3 right-block rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmGeneration {
    Gen2,
    #[default]
    Gen3,
}

impl FromStr for AlgorithmGeneration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gen2" | "2" => Ok(AlgorithmGeneration::Gen2),
            "gen3" | "3" => Ok(AlgorithmGeneration::Gen3),
            other => Err(Error::InvalidConfig(format!(
                "unknown algorithm generation '{}'",
                other
            ))),
        }
    }
}
