// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hands placed sections to the host that actually spawns them.
//!
//! The host implements [`SectionSink`]. The builder decides per section
//! whether to spawn an instance or an actor, whether to leave it out, and
//! whether the mesh has to be swapped afterwards.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use stackhouse_core::Transform;
use stackhouse_geometry::MeshId;

use crate::config::EngineConfig;
use crate::pipeline::{BuildingLayout, LevelLayout, PlacedSection};

/// Host callbacks. Pure pass-through I/O.
pub trait SectionSink {
    fn spawn_instance(&mut self, mesh: &MeshId, transform: &Transform);

    fn spawn_actor(&mut self, class: &str, transform: &Transform);

    /// Swaps the mesh of an already spawned instance.
    fn replace_section(&mut self, mesh: &MeshId, index: i32);

    /// Assigns the mesh slot of an already spawned actor.
    fn set_mesh_at(&mut self, index: i32, mesh: &MeshId);
}

/// What a builder did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub spawned: usize,
    pub replaced: usize,
    pub skipped: usize,
    /// Sections per final mesh.
    pub meshes: FxHashMap<MeshId, usize>,
}

impl BuildReport {
    pub fn count_for(&self, mesh: &MeshId) -> usize {
        self.meshes.get(mesh).copied().unwrap_or(0)
    }
}

/// Fluent front end over a [`SectionSink`].
pub struct SectionBuilder<'s, S: SectionSink + ?Sized> {
    sink: &'s mut S,
    skip_flagged: bool,
    report: BuildReport,
}

impl<'s, S: SectionSink + ?Sized> SectionBuilder<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            skip_flagged: true,
            report: BuildReport::default(),
        }
    }

    pub fn from_engine(sink: &'s mut S, engine: &EngineConfig) -> Self {
        Self::new(sink).skip_flagged(engine.skip_flagged)
    }

    /// Leave out sections flagged as skipped. On by default.
    pub fn skip_flagged(mut self, skip_flagged: bool) -> Self {
        self.skip_flagged = skip_flagged;
        self
    }

    pub fn place(
        &mut self,
        section: &PlacedSection,
        mesh: &MeshId,
        actor_class: Option<&str>,
    ) -> &mut Self {
        if section.skip && self.skip_flagged {
            self.report.skipped += 1;
            return self;
        }

        match actor_class {
            Some(class) => self.sink.spawn_actor(class, &section.transform),
            None => self.sink.spawn_instance(mesh, &section.transform),
        }
        self.report.spawned += 1;

        let final_mesh = match &section.mesh_override {
            Some(replacement) => {
                match actor_class {
                    Some(_) => self.sink.set_mesh_at(section.index, replacement),
                    None => self.sink.replace_section(replacement, section.index),
                }
                self.report.replaced += 1;
                replacement
            }
            None => mesh,
        };
        *self.report.meshes.entry(final_mesh.clone()).or_default() += 1;
        self
    }

    pub fn place_level(&mut self, layout: &LevelLayout) -> &mut Self {
        for section in &layout.sections {
            self.place(section, &layout.mesh, layout.actor_class.as_deref());
        }
        self
    }

    pub fn place_building(&mut self, building: &BuildingLayout) -> &mut Self {
        for level in &building.levels {
            self.place_level(level);
        }
        tracing::debug!(
            building = %building.name,
            spawned = self.report.spawned,
            replaced = self.report.replaced,
            skipped = self.report.skipped,
            "Sections handed to sink"
        );
        self
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn finish(self) -> BuildReport {
        self.report
    }
}
