// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solver lookup by name, for configurations that select a solver as a
//! string.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use stackhouse_core::{AlgorithmGeneration, Error, Result, SnapMode};

use super::{
    CornerSolver, DefaultSolver, HouseWallSolver, RooftopSolver, TransformSolver,
    TunnelRooftopSolver, TunnelWallSolver,
};

static DEFAULT: DefaultSolver = DefaultSolver;
static CORNER: CornerSolver = CornerSolver;
static HOUSE_WALL: HouseWallSolver = HouseWallSolver;
static ROOFTOP: RooftopSolver = RooftopSolver;
static TUNNEL_WALL: TunnelWallSolver = TunnelWallSolver;
static TUNNEL_ROOFTOP: TunnelRooftopSolver = TunnelRooftopSolver;

/// Solvers shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinSolver {
    Default,
    Corner,
    HouseWall,
    Rooftop,
    TunnelWall,
    TunnelRooftop,
}

impl BuiltinSolver {
    pub const ALL: [BuiltinSolver; 6] = [
        BuiltinSolver::Default,
        BuiltinSolver::Corner,
        BuiltinSolver::HouseWall,
        BuiltinSolver::Rooftop,
        BuiltinSolver::TunnelWall,
        BuiltinSolver::TunnelRooftop,
    ];

    pub fn solver(self) -> &'static dyn TransformSolver {
        match self {
            BuiltinSolver::Default => &DEFAULT,
            BuiltinSolver::Corner => &CORNER,
            BuiltinSolver::HouseWall => &HOUSE_WALL,
            BuiltinSolver::Rooftop => &ROOFTOP,
            BuiltinSolver::TunnelWall => &TUNNEL_WALL,
            BuiltinSolver::TunnelRooftop => &TUNNEL_ROOFTOP,
        }
    }

    pub fn name(self) -> &'static str {
        self.solver().name()
    }
}

/// Named solvers, seeded with every [`BuiltinSolver`].
#[derive(Clone)]
pub struct SolverRegistry {
    solvers: FxHashMap<String, Arc<dyn TransformSolver>>,
}

impl SolverRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            solvers: FxHashMap::default(),
        };
        for builtin in BuiltinSolver::ALL {
            registry.register(builtin.name(), Arc::new(builtin));
        }
        registry
    }

    /// Adds or replaces a solver.
    pub fn register(&mut self, name: impl Into<String>, solver: Arc<dyn TransformSolver>) {
        let name = name.into();
        if self.solvers.insert(name.clone(), solver).is_some() {
            tracing::debug!(solver = %name, "replaced registered solver");
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn TransformSolver>> {
        self.solvers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownSolver(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.solvers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.solvers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("solvers", &self.names())
            .finish()
    }
}

// Lets a builtin be stored behind `Arc<dyn TransformSolver>`.
impl TransformSolver for BuiltinSolver {
    fn name(&self) -> &str {
        self.solver().name()
    }

    fn next_transform(&self, ctx: &mut super::SolverContext<'_>) {
        self.solver().next_transform(ctx);
    }

    fn shape_mode(&self) -> Option<SnapMode> {
        self.solver().shape_mode()
    }

    fn wall_generation(&self) -> Option<AlgorithmGeneration> {
        self.solver().wall_generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl TransformSolver for Noop {
        fn name(&self) -> &str {
            "noop"
        }

        fn next_transform(&self, _ctx: &mut super::super::SolverContext<'_>) {}
    }

    #[test]
    fn builtins_are_registered() {
        let registry = SolverRegistry::new();
        for builtin in BuiltinSolver::ALL {
            let solver = registry.get(builtin.name()).unwrap();
            assert_eq!(solver.name(), builtin.name());
        }
        assert_eq!(registry.names().len(), 6);
    }

    #[test]
    fn unknown_solver_is_an_error() {
        let registry = SolverRegistry::new();
        match registry.get("spiral") {
            Err(Error::UnknownSolver(name)) => assert_eq!(name, "spiral"),
            other => panic!("expected UnknownSolver, got {:?}", other.map(|s| s.name().to_string())),
        }
    }

    #[test]
    fn custom_solvers_can_be_added() {
        let mut registry = SolverRegistry::new();
        registry.register("noop", Arc::new(Noop));
        assert!(registry.contains("noop"));
        assert_eq!(registry.get("noop").unwrap().name(), "noop");
    }

    #[test]
    fn builtins_declare_the_mode_they_lay_out() {
        assert_eq!(BuiltinSolver::HouseWall.shape_mode(), Some(SnapMode::Wall));
        assert_eq!(
            BuiltinSolver::HouseWall.wall_generation(),
            Some(AlgorithmGeneration::Gen3)
        );
        assert_eq!(BuiltinSolver::Corner.shape_mode(), Some(SnapMode::Corner));
        assert_eq!(BuiltinSolver::TunnelWall.shape_mode(), None);
        assert_eq!(BuiltinSolver::TunnelRooftop.shape_mode(), None);
    }

    #[test]
    fn builtin_names_match_serde() {
        let json = serde_json::to_string(&BuiltinSolver::TunnelRooftop).unwrap();
        assert_eq!(json, format!("\"{}\"", BuiltinSolver::TunnelRooftop.name()));
    }
}
