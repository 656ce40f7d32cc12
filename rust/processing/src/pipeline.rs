// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Build pass: configuration in, placed sections out.
//!
//! A building is processed level by level in configuration order. Statistics
//! are folded over every level before the first section is placed, so edge
//! decisions on lower levels already see the widest row of the building.
//! Buildings are independent of each other and run in parallel.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use stackhouse_core::{BuildStats, SectionSize, SnapMode, Transform};
use stackhouse_geometry::{
    shape_section, shaping_mode, MeshId, PlacementRequest, Point3, PolylinePath,
    RemainingActorsRequest, Resolution, SectionInitializer, Shape, ShapeOutcome, ShapeRequest,
    SolverRegistry, SplinePath, TransformSolver,
};

use crate::config::{BuildingConfig, EngineConfig, LevelConfig};
use crate::error::Result;

/// One section ready to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSection {
    pub index: i32,
    pub transform: Transform,
    pub skip: bool,
    pub mesh_override: Option<MeshId>,
    /// Added by a shape after the regular layout.
    pub extra: bool,
}

/// Placed sections of one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub level: usize,
    pub mesh: MeshId,
    pub actor_class: Option<String>,
    pub sections: Vec<PlacedSection>,
}

impl LevelLayout {
    pub fn visible(&self) -> impl Iterator<Item = &PlacedSection> {
        self.sections.iter().filter(|s| !s.skip)
    }

    pub fn skipped_indices(&self) -> Vec<i32> {
        self.sections
            .iter()
            .filter(|s| s.skip)
            .map(|s| s.index)
            .collect()
    }
}

/// Every level of one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingLayout {
    pub name: String,
    pub stats: BuildStats,
    pub levels: Vec<LevelLayout>,
}

impl BuildingLayout {
    pub fn section_count(&self) -> usize {
        self.levels.iter().map(|l| l.sections.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.levels
            .iter()
            .map(|l| l.sections.iter().filter(|s| s.skip).count())
            .sum()
    }
}

/// Runs initializer, placement, shape and remaining actors for one level.
pub struct LevelBuilder<'a> {
    config: &'a LevelConfig,
    resolution: Resolution,
    stats: &'a BuildStats,
    shape: Option<Arc<dyn Shape>>,
    solver: Option<Arc<dyn TransformSolver>>,
    spline: Option<&'a dyn SplinePath>,
    base: Transform,
    previous_level: Option<SectionSize>,
}

impl<'a> LevelBuilder<'a> {
    pub fn new(config: &'a LevelConfig, resolution: Resolution, stats: &'a BuildStats) -> Self {
        Self {
            config,
            resolution,
            stats,
            shape: None,
            solver: None,
            spline: None,
            base: Transform::identity(),
            previous_level: None,
        }
    }

    pub fn with_shape(mut self, shape: Option<Arc<dyn Shape>>) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_solver(mut self, solver: Option<Arc<dyn TransformSolver>>) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_spline(mut self, spline: Option<&'a dyn SplinePath>) -> Self {
        self.spline = spline;
        self
    }

    pub fn with_base(mut self, base: Transform) -> Self {
        self.base = base;
        self
    }

    pub fn with_previous_level(mut self, previous_level: Option<SectionSize>) -> Self {
        self.previous_level = previous_level;
        self
    }

    /// Section counts after the shape had its say.
    pub fn initializer(&self) -> SectionInitializer {
        let mut initializer = SectionInitializer::new(
            self.shape_mode().unwrap_or(SnapMode::Custom),
            self.config.max_in_row,
            self.config.max_count,
        );
        if let Some(shape) = &self.shape {
            shape.update_section_initializer(&mut initializer);
        }
        initializer
    }

    /// Mode the level's sections are shaped as.
    fn shape_mode(&self) -> Option<SnapMode> {
        shaping_mode(self.resolution.snap_mode, self.solver.as_deref())
    }

    pub fn build(&self, level: usize) -> LevelLayout {
        let config = self.config;
        let initializer = self.initializer();
        let solver = self.solver.as_deref();
        let mut sections =
            Vec::with_capacity(usize::try_from(initializer.total_count).unwrap_or_default());

        for index in 0..initializer.layout_count {
            let request =
                PlacementRequest::new(index, config.max_in_row, config.max_count, self.stats)
                    .with_base(self.base)
                    .with_level(config.level_z_multiplier)
                    .with_previous_level(self.previous_level)
                    .with_solver(solver)
                    .with_spline(self.spline);
            let computed = self.resolution.compute(&request);

            let outcome = match &self.shape {
                Some(shape) => {
                    let shape_request = ShapeRequest::new(&request, &self.resolution, computed);
                    shape_section(shape.as_ref(), &shape_request)
                }
                None => ShapeOutcome {
                    transform: computed.transform,
                    skip: computed.skip,
                    mesh_override: None,
                },
            };

            sections.push(PlacedSection {
                index,
                transform: outcome.transform,
                skip: outcome.skip,
                mesh_override: outcome.mesh_override,
                extra: false,
            });
        }

        if let Some(shape) = &self.shape {
            let extras = shape.place_remaining_actors(&RemainingActorsRequest {
                resolution: &self.resolution,
                snap_mode: self.shape_mode(),
                build_stats: self.stats,
                base: self.base,
                level_z_multiplier: config.level_z_multiplier,
                layout_count: initializer.layout_count,
            });
            if extras.len() != usize::try_from(initializer.extra_count()).unwrap_or_default() {
                tracing::warn!(
                    level,
                    shape = shape.name(),
                    expected = initializer.extra_count(),
                    placed = extras.len(),
                    "shape placed a different number of extra sections than it reserved"
                );
            }
            sections.extend(extras.into_iter().map(|(index, transform)| PlacedSection {
                index,
                transform,
                skip: false,
                mesh_override: None,
                extra: true,
            }));
        }

        let layout = LevelLayout {
            level,
            mesh: config.mesh.clone(),
            actor_class: config.actor_class.clone(),
            sections,
        };
        tracing::debug!(
            level,
            snap_mode = %self.resolution.snap_mode,
            sections = layout.sections.len(),
            skipped = layout.sections.iter().filter(|s| s.skip).count(),
            "Level laid out"
        );
        layout
    }
}

/// Lays out every level of a building.
///
/// Invalid shapes fail the build. An unresolvable solver only logs and falls
/// back to the level's built-in snap mode.
pub fn build_building(
    config: &BuildingConfig,
    engine: &EngineConfig,
    registry: &SolverRegistry,
) -> Result<BuildingLayout> {
    let start = std::time::Instant::now();
    let stats = config.build_stats();

    let path = config
        .path
        .as_ref()
        .map(|points| {
            PolylinePath::new(points.iter().map(|&[x, y, z]| Point3::new(x, y, z)).collect())
        })
        .transpose()?;
    let spline = path.as_ref().map(|p| p as &dyn SplinePath);

    let mut levels = Vec::with_capacity(config.levels.len());
    let mut previous_level = None;
    for (i, level) in config.levels.iter().enumerate() {
        let resolution = level.resolution(engine);
        let shape = level.shape.as_ref().map(|s| s.build()).transpose()?;
        let solver = level.solver.as_ref().and_then(|kind| match kind.resolve(registry) {
            Ok(solver) => Some(solver),
            Err(err) => {
                tracing::warn!(
                    building = %config.name,
                    level = i,
                    error = %err,
                    "solver unavailable, using built-in placement"
                );
                None
            }
        });

        let layout = LevelBuilder::new(level, resolution, &stats)
            .with_shape(shape)
            .with_solver(solver)
            .with_spline(spline)
            .with_base(config.origin)
            .with_previous_level(previous_level)
            .build(i);
        levels.push(layout);
        previous_level = Some(resolution.size);
    }

    let layout = BuildingLayout {
        name: config.name.clone(),
        stats,
        levels,
    };
    tracing::info!(
        building = %layout.name,
        levels = layout.levels.len(),
        sections = layout.section_count(),
        skipped = layout.skipped_count(),
        total_time_ms = start.elapsed().as_millis(),
        "Building laid out"
    );
    Ok(layout)
}

/// Lays out many buildings in parallel. Results keep the input order.
pub fn build_buildings(
    configs: &[BuildingConfig],
    engine: &EngineConfig,
    registry: &SolverRegistry,
) -> Vec<Result<BuildingLayout>> {
    tracing::info!(buildings = configs.len(), "Starting parallel build");
    configs
        .par_iter()
        .map(|config| build_building(config, engine, registry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ShapeConfig, SolverKind};
    use approx::assert_relative_eq;
    use stackhouse_core::{Bounds, SnapMode};
    use stackhouse_geometry::BuiltinSolver;

    fn engine() -> EngineConfig {
        EngineConfig {
            default_generation: stackhouse_core::AlgorithmGeneration::Gen3,
            skip_flagged: true,
        }
    }

    fn floor(bounds: Bounds) -> LevelConfig {
        let mut level = LevelConfig::new(
            bounds.x,
            bounds.x * bounds.y,
            SnapMode::Default,
            MeshId::new("floor"),
        );
        level.bounds = Some(bounds);
        level
    }

    #[test]
    fn l_shaped_floor_flags_the_notch() {
        let mut level = floor(Bounds::new(3, 3));
        level.shape = Some(ShapeConfig::LShape { depth: 1, upper: false });
        let config = BuildingConfig::new("l", vec![level]);

        let layout = build_building(&config, &engine(), &SolverRegistry::new()).unwrap();
        assert_eq!(layout.levels[0].sections.len(), 9);
        assert_eq!(layout.levels[0].skipped_indices(), vec![6]);
        assert_eq!(layout.levels[0].visible().count(), 8);
    }

    #[test]
    fn corner_level_gets_notch_corners() {
        let mut walls = LevelConfig::new(5, 12, SnapMode::Wall, MeshId::new("wall"));
        walls.bounds = Some(Bounds::new(3, 3));
        let mut corners = LevelConfig::new(2, 4, SnapMode::Corner, MeshId::new("corner"));
        corners.level_z_multiplier = 1.0;
        corners.shape = Some(ShapeConfig::LShape { depth: 1, upper: false });
        let config = BuildingConfig::new("corners", vec![walls, corners]);

        let layout = build_building(&config, &engine(), &SolverRegistry::new()).unwrap();
        let level = &layout.levels[1];
        assert_eq!(level.sections.len(), 6);
        let extras: Vec<i32> = level
            .sections
            .iter()
            .filter(|s| s.extra)
            .map(|s| s.index)
            .collect();
        assert_eq!(extras, vec![4, 5]);
    }

    #[test]
    fn house_wall_solver_levels_are_carved_like_walls() {
        let shape = Some(ShapeConfig::LShape { depth: 1, upper: false });
        let mut walls = LevelConfig::new(5, 12, SnapMode::Wall, MeshId::new("wall"));
        walls.bounds = Some(Bounds::new(3, 3));
        walls.shape = shape.clone();
        let mut solved = walls.clone();
        solved.snap_mode = SnapMode::Custom;
        solved.solver = Some(SolverKind::Builtin(BuiltinSolver::HouseWall));

        let registry = SolverRegistry::new();
        let walls = build_building(&BuildingConfig::new("w", vec![walls]), &engine(), &registry);
        let solved = build_building(&BuildingConfig::new("w", vec![solved]), &engine(), &registry);
        let (walls, solved) = (walls.unwrap(), solved.unwrap());
        assert_eq!(walls.levels[0].sections, solved.levels[0].sections);
        assert!(solved.levels[0].skipped_indices().is_empty());
    }

    #[test]
    fn corner_solver_levels_get_notch_corners() {
        let mut corners = LevelConfig::new(2, 4, SnapMode::Custom, MeshId::new("corner"));
        corners.bounds = Some(Bounds::new(3, 3));
        corners.solver = Some(SolverKind::Builtin(BuiltinSolver::Corner));
        corners.shape = Some(ShapeConfig::LShape { depth: 1, upper: false });
        let config = BuildingConfig::new("c", vec![corners]);

        let layout = build_building(&config, &engine(), &SolverRegistry::new()).unwrap();
        assert_eq!(layout.levels[0].sections.len(), 6);
    }

    #[test]
    fn undeclared_solver_levels_stay_unshaped() {
        let mut walls = LevelConfig::new(2, 4, SnapMode::Custom, MeshId::new("tunnel"));
        walls.bounds = Some(Bounds::new(2, 2));
        walls.solver = Some(SolverKind::Builtin(BuiltinSolver::TunnelWall));
        let mut shaped = walls.clone();
        shaped.shape = Some(ShapeConfig::LShape { depth: 1, upper: false });

        let registry = SolverRegistry::new();
        let plain = build_building(&BuildingConfig::new("t", vec![walls]), &engine(), &registry);
        let shaped = build_building(&BuildingConfig::new("t", vec![shaped]), &engine(), &registry);
        assert_eq!(plain.unwrap().levels[0].sections, shaped.unwrap().levels[0].sections);
    }

    #[test]
    fn unknown_solver_falls_back_to_builtin() {
        let mut with_unknown = floor(Bounds::new(2, 2));
        with_unknown.solver = Some(SolverKind::Named("spiral".into()));
        let plain = floor(Bounds::new(2, 2));

        let registry = SolverRegistry::new();
        let a = BuildingConfig::new("a", vec![with_unknown]);
        let b = BuildingConfig::new("a", vec![plain]);
        let a = build_building(&a, &engine(), &registry).unwrap();
        let b = build_building(&b, &engine(), &registry).unwrap();
        assert_eq!(a.levels[0].sections, b.levels[0].sections);
    }

    #[test]
    fn rooftop_stacks_on_the_level_below() {
        let mut lower = floor(Bounds::new(2, 2));
        lower.size = SectionSize::new(400.0, 200.0, 400.0);
        let mut roof = LevelConfig::new(2, 4, SnapMode::Rooftop, MeshId::new("roof"));
        roof.level_z_multiplier = 1.0;
        let config = BuildingConfig::new("r", vec![lower, roof]);

        let layout = build_building(&config, &engine(), &SolverRegistry::new()).unwrap();
        let first = &layout.levels[1].sections[0].transform;
        assert_relative_eq!(first.location.x, 200.0);
        assert_relative_eq!(first.location.y, 200.0);
        assert_relative_eq!(first.location.z, 400.0);
    }

    #[test]
    fn tunnel_follows_the_building_path() {
        let mut walls = LevelConfig::new(2, 4, SnapMode::Custom, MeshId::new("tunnel"));
        walls.bounds = Some(Bounds::new(2, 1));
        walls.solver = Some(SolverKind::Builtin(BuiltinSolver::TunnelWall));
        let mut config = BuildingConfig::new("tunnel", vec![walls]);
        config.path = Some(vec![[0.0, 0.0, 0.0], [0.0, 4000.0, 0.0]]);

        let layout = build_building(&config, &engine(), &SolverRegistry::new()).unwrap();
        let second_left = &layout.levels[0].sections[2].transform;
        assert_relative_eq!(second_left.location.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(second_left.location.y, 400.0, epsilon = 1e-9);
        assert_relative_eq!(second_left.rotation.yaw, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn bad_path_fails_the_build() {
        let mut config = BuildingConfig::new("p", vec![floor(Bounds::new(2, 2))]);
        config.path = Some(vec![[0.0, 0.0, 0.0]]);
        assert!(build_building(&config, &engine(), &SolverRegistry::new()).is_err());
    }

    #[test]
    fn parallel_build_keeps_order() {
        let configs: Vec<_> = (1..=6)
            .map(|n| BuildingConfig::new(format!("b{}", n), vec![floor(Bounds::new(n, 2))]))
            .collect();
        let layouts = build_buildings(&configs, &engine(), &SolverRegistry::new());
        for (n, layout) in (1..=6).zip(layouts) {
            let layout = layout.unwrap();
            assert_eq!(layout.name, format!("b{}", n));
            assert_eq!(layout.section_count(), (n * 2) as usize);
        }
    }
}
