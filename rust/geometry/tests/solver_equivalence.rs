// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The resolution engine and the solver that mirrors each built-in mode must
//! agree for every input.

use stackhouse_core::{Bounds, BuildStats, Rotator, SectionSize, SnapMode, Transform};
use stackhouse_geometry::{
    CornerSolver, DefaultSolver, HouseWallSolver, PlacementRequest, Resolution, RooftopSolver,
    TransformSolver, Vector3,
};

fn base() -> Transform {
    Transform {
        location: Vector3::new(150.0, -75.0, 20.0),
        rotation: Rotator::from_yaw(30.0),
        scale: Vector3::new(1.0, 2.0, 1.0),
    }
}

/// Runs every grid request through the engine and through `solver`.
fn assert_equivalent(mode: SnapMode, solver: &dyn TransformSolver, grids: &[(Bounds, i32, i32)]) {
    let size = SectionSize::new(400.0, 300.0, 250.0);
    let resolution = Resolution::new(size, mode);
    let previous = Some(SectionSize::new(400.0, 200.0, 400.0));

    for &(bounds, max_in_row, max_count) in grids {
        let stats = BuildStats::from_level(max_in_row.max(1), max_count, bounds);
        for index in 0..max_count.max(1) {
            for level in [0.0, 1.0, 3.0] {
                let request = PlacementRequest::new(index, max_in_row, max_count, &stats)
                    .with_base(base())
                    .with_level(level)
                    .with_previous_level(previous);
                let engine = resolution.compute(&request);
                let solved = resolution.compute(&request.with_solver(Some(solver)));
                assert_eq!(
                    engine,
                    solved,
                    "{} vs {:?}: bounds {:?}, max_in_row {}, max_count {}, index {}",
                    solver.name(),
                    mode,
                    bounds,
                    max_in_row,
                    max_count,
                    index
                );
            }
        }
    }
}

fn grid_cases() -> Vec<(Bounds, i32, i32)> {
    let mut cases = Vec::new();
    for x in 1..=4 {
        for y in 1..=4 {
            cases.push((Bounds::new(x, y), x, x * y));
        }
    }
    cases.push((Bounds::new(2, 2), 0, 5));
    cases.push((Bounds::new(3, 2), 3, 7));
    cases
}

fn wall_cases() -> Vec<(Bounds, i32, i32)> {
    let mut cases = Vec::new();
    for x in 1..=5 {
        for y in 1..=5 {
            cases.push((Bounds::new(x, y), x + 2, 2 * (x + y)));
        }
    }
    cases.push((Bounds::new(2, 2), 1, 2));
    cases.push((Bounds::new(2, 2), 0, 0));
    cases
}

#[test]
fn default_engine_matches_solver() {
    assert_equivalent(SnapMode::Default, &DefaultSolver, &grid_cases());
}

#[test]
fn rooftop_engine_matches_solver() {
    assert_equivalent(SnapMode::Rooftop, &RooftopSolver, &grid_cases());
}

#[test]
fn corner_engine_matches_solver() {
    let corners: Vec<_> = (1..=5)
        .flat_map(|x| (1..=5).map(move |y| (Bounds::new(x, y), 2, 4)))
        .chain([(Bounds::new(2, 2), 0, 5), (Bounds::new(2, 2), 1, 2)])
        .collect();
    assert_equivalent(SnapMode::Corner, &CornerSolver, &corners);
}

#[test]
fn wall_engine_matches_house_wall_solver() {
    assert_equivalent(SnapMode::Wall, &HouseWallSolver, &wall_cases());
}

#[test]
fn roof_engine_matches_house_wall_solver() {
    assert_equivalent(SnapMode::Roof, &HouseWallSolver, &wall_cases());
}
