// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building configuration.
//!
//! A [`BuildingConfig`] is the serializable description of one building: its
//! levels, their resolutions, shapes and solvers. [`EngineConfig`] holds the
//! process-wide switches, loaded from environment variables.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stackhouse_core::{
    coerce_max_in_row, AlgorithmGeneration, Bounds, BuildStats, SectionSize, SnapMode, Transform,
};
use stackhouse_geometry::{
    BuiltinSolver, LShape, MeshId, NonUniformSides, Rectangular, Resolution, RoofStrategy, Shape,
    SolverRegistry, TransformSolver,
};

use crate::error::{Error, Result};

/// Process-wide engine switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Wall/roof algorithm for levels that do not pick one.
    pub default_generation: AlgorithmGeneration,
    /// Leave out sections a solver or shape flagged as skipped.
    pub skip_flagged: bool,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            default_generation: std::env::var("STACKHOUSE_GENERATION")
                .unwrap_or_else(|_| "gen3".into())
                .parse()
                .unwrap_or(AlgorithmGeneration::Gen3),
            skip_flagged: std::env::var("STACKHOUSE_SKIP_FLAGGED")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .unwrap_or(true),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Footprint shape of a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeConfig {
    Rectangular,
    LShape {
        depth: i32,
        #[serde(default)]
        upper: bool,
    },
    NonUniformSides {
        side_ratio: f64,
        #[serde(default)]
        roof_strategy: RoofStrategy,
        #[serde(default)]
        small_side_wall_mesh: Option<MeshId>,
        #[serde(default)]
        small_floor_mesh: Option<MeshId>,
    },
}

impl ShapeConfig {
    pub fn build(&self) -> Result<Arc<dyn Shape>> {
        let shape: Arc<dyn Shape> = match self {
            ShapeConfig::Rectangular => Arc::new(Rectangular),
            ShapeConfig::LShape { depth, upper } => Arc::new(LShape::new(*depth, *upper)?),
            ShapeConfig::NonUniformSides {
                side_ratio,
                roof_strategy,
                small_side_wall_mesh,
                small_floor_mesh,
            } => {
                let mut shape = NonUniformSides::new(*side_ratio)?.with_roof_strategy(*roof_strategy);
                if let Some(mesh) = small_side_wall_mesh {
                    shape = shape.with_small_side_wall_mesh(mesh.clone());
                }
                if let Some(mesh) = small_floor_mesh {
                    shape = shape.with_small_floor_mesh(mesh.clone());
                }
                Arc::new(shape)
            }
        };
        Ok(shape)
    }
}

/// Solver selection: a builtin by name, or any name in a [`SolverRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SolverKind {
    Builtin(BuiltinSolver),
    Named(String),
}

impl SolverKind {
    pub fn resolve(&self, registry: &SolverRegistry) -> Result<Arc<dyn TransformSolver>> {
        match self {
            SolverKind::Builtin(builtin) => Ok(Arc::new(*builtin)),
            SolverKind::Named(name) => Ok(registry.get(name)?),
        }
    }
}

/// One level of a building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub max_in_row: i32,
    pub max_count: i32,
    #[serde(default)]
    pub size: SectionSize,
    #[serde(default)]
    pub snap_mode: SnapMode,
    /// Overrides [`EngineConfig::default_generation`].
    #[serde(default)]
    pub generation: Option<AlgorithmGeneration>,
    #[serde(default)]
    pub level_z_multiplier: f64,
    /// Footprint this level contributes to the building's statistics.
    #[serde(default)]
    pub bounds: Option<Bounds>,
    pub mesh: MeshId,
    /// Spawn actors of this class instead of mesh instances.
    #[serde(default)]
    pub actor_class: Option<String>,
    #[serde(default)]
    pub shape: Option<ShapeConfig>,
    #[serde(default)]
    pub solver: Option<SolverKind>,
}

impl LevelConfig {
    pub fn new(max_in_row: i32, max_count: i32, snap_mode: SnapMode, mesh: MeshId) -> Self {
        Self {
            max_in_row,
            max_count,
            size: SectionSize::default(),
            snap_mode,
            generation: None,
            level_z_multiplier: 0.0,
            bounds: None,
            mesh,
            actor_class: None,
            shape: None,
            solver: None,
        }
    }

    pub fn resolution(&self, engine: &EngineConfig) -> Resolution {
        Resolution::new(self.size, self.snap_mode)
            .with_generation(self.generation.unwrap_or(engine.default_generation))
    }

    /// Statistics of this level alone.
    pub fn level_stats(&self) -> BuildStats {
        BuildStats::from_level(
            coerce_max_in_row(self.max_in_row),
            self.max_count,
            self.bounds.unwrap_or_default(),
        )
    }
}

fn identity_transform() -> Transform {
    Transform::identity()
}

/// A whole building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    #[serde(default)]
    pub name: String,
    pub levels: Vec<LevelConfig>,
    /// Replaces the footprint gathered from the levels.
    #[serde(default)]
    pub bounds_override: Option<Bounds>,
    #[serde(default = "identity_transform")]
    pub origin: Transform,
    /// Path for tunnel solvers, as `[x, y, z]` points.
    #[serde(default)]
    pub path: Option<Vec<[f64; 3]>>,
}

impl BuildingConfig {
    pub fn new(name: impl Into<String>, levels: Vec<LevelConfig>) -> Self {
        Self {
            name: name.into(),
            levels,
            bounds_override: None,
            origin: Transform::identity(),
            path: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Statistics over every level, with the building's overrides applied.
    pub fn build_stats(&self) -> BuildStats {
        let mut stats = BuildStats::new();
        for level in &self.levels {
            stats.update(&level.level_stats());
        }
        stats.override_level_count(self.levels.len() as i32);
        if let Some(bounds) = self.bounds_override {
            stats.override_bounds(bounds);
        }
        stats
    }

    /// Checks everything a build pass would otherwise recover from silently.
    pub fn validate(&self, registry: &SolverRegistry) -> Result<()> {
        if self.levels.is_empty() {
            return Err(Error::Config(format!(
                "building '{}' has no levels",
                self.name
            )));
        }

        let stats = self.build_stats();
        for (i, level) in self.levels.iter().enumerate() {
            if level.max_in_row < 1 {
                return Err(Error::Config(format!(
                    "level {}: max_in_row must be at least 1, got {}",
                    i, level.max_in_row
                )));
            }
            if level.max_count < 0 {
                return Err(Error::Config(format!(
                    "level {}: max_count must not be negative, got {}",
                    i, level.max_count
                )));
            }
            if let Some(ShapeConfig::LShape { depth, upper }) = &level.shape {
                LShape::new(*depth, *upper)?.validate(stats.bounds)?;
            } else if let Some(shape) = &level.shape {
                shape.build()?;
            }
            if let Some(solver) = &level.solver {
                solver.resolve(registry)?;
            }
            if level.snap_mode == SnapMode::Custom && level.solver.is_none() {
                return Err(Error::Config(format!(
                    "level {}: custom snap mode needs a solver",
                    i
                )));
            }
        }
        Ok(())
    }
}
