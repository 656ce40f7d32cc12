// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use stackhouse_core::{AlgorithmGeneration, Bounds, BuildStats, SectionSize, SnapMode};
use stackhouse_geometry::{
    shape_section, HouseWallSolver, LShape, NonUniformSides, PlacementRequest, Rectangular,
    Resolution, Shape, ShapeOutcome, ShapeRequest, TransformSolver, TunnelWallSolver,
};

use AlgorithmGeneration::{Gen2, Gen3};

fn skipped(
    shape: &dyn Shape,
    stats: &BuildStats,
    mode: SnapMode,
    max_in_row: i32,
    max_count: i32,
) -> Vec<i32> {
    let resolution = Resolution::new(SectionSize::uniform(), mode);
    (0..max_count)
        .filter(|&index| {
            let placement = PlacementRequest::new(index, max_in_row, max_count, stats);
            let request = ShapeRequest::new(&placement, &resolution, resolution.compute(&placement));
            shape_section(shape, &request).skip
        })
        .collect()
}

#[test]
fn l_shape_skip_fixture() {
    let stats = BuildStats::from_level(3, 9, Bounds::new(3, 3));
    let shape = LShape::new(1, false).unwrap();
    let resolution = Resolution::new(SectionSize::uniform(), SnapMode::Default);

    let skip_at = |index| {
        let placement = PlacementRequest::new(index, 3, 9, &stats);
        let request = ShapeRequest::new(&placement, &resolution, resolution.compute(&placement));
        shape.shape_transform(&request).skip
    };
    // row 2, column 0
    assert!(skip_at(6));
    // row 2, column 1
    assert!(!skip_at(7));
}

#[test]
fn l_shape_notch_grows_with_depth() {
    let stats = BuildStats::from_level(4, 16, Bounds::new(4, 4));
    let shape = LShape::new(2, false).unwrap();
    assert_eq!(
        skipped(&shape, &stats, SnapMode::Default, 4, 16),
        vec![8, 9, 12, 13]
    );
    let upper = LShape::new(2, true).unwrap();
    assert_eq!(
        skipped(&upper, &stats, SnapMode::Default, 4, 16),
        vec![10, 11, 14, 15]
    );
}

#[test]
fn l_shape_never_skips_walls() {
    let stats = BuildStats::from_level(6, 16, Bounds::new(4, 4));
    let shape = LShape::new(2, false).unwrap();
    assert!(skipped(&shape, &stats, SnapMode::Wall, 6, 16).is_empty());
}

#[test]
fn rectangular_never_skips() {
    let stats = BuildStats::from_level(4, 16, Bounds::new(4, 4));
    for mode in [SnapMode::Default, SnapMode::Wall, SnapMode::Rooftop, SnapMode::Corner] {
        assert!(skipped(&Rectangular, &stats, mode, 4, 16).is_empty());
    }
}

/// Indices a wall-carving shape moved, with the X and Y offset it applied.
fn wall_shifts(
    shape: &dyn Shape,
    bounds: Bounds,
    generation: AlgorithmGeneration,
) -> Vec<(i32, f64, f64)> {
    let max_in_row = bounds.x + 2;
    let max_count = 2 * (bounds.x + bounds.y);
    let stats = BuildStats::from_level(max_in_row, max_count, bounds);
    let resolution =
        Resolution::new(SectionSize::uniform(), SnapMode::Wall).with_generation(generation);

    (0..max_count)
        .filter_map(|index| {
            let placement = PlacementRequest::new(index, max_in_row, max_count, &stats);
            let computed = resolution.compute(&placement);
            let request = ShapeRequest::new(&placement, &resolution, computed);
            let shaped = shape_section(shape, &request);
            let shift = shaped.transform.location - computed.transform.location;
            (shift.norm() > 0.0).then_some((index, shift.x, shift.y))
        })
        .collect()
}

#[test]
fn l_shape_walls_narrow_footprint() {
    // X % 4 == 2
    let lower = LShape::new(1, false).unwrap();
    assert_eq!(
        wall_shifts(&lower, Bounds::new(2, 3), Gen3),
        vec![(6, 400.0, 0.0), (8, 0.0, -400.0)]
    );
    assert_eq!(
        wall_shifts(&lower, Bounds::new(2, 3), Gen2),
        vec![(6, 400.0, 0.0), (7, 0.0, -400.0)]
    );
}

#[test]
fn l_shape_walls_width_multiple_of_four() {
    let lower = LShape::new(1, false).unwrap();
    assert_eq!(
        wall_shifts(&lower, Bounds::new(4, 3), Gen3),
        vec![(8, 400.0, 0.0), (10, 0.0, -400.0)]
    );
    assert_eq!(
        wall_shifts(&lower, Bounds::new(4, 3), Gen2),
        vec![(8, 400.0, 0.0), (9, 0.0, -400.0)]
    );
    assert_eq!(
        wall_shifts(&lower, Bounds::new(4, 4), Gen3),
        vec![(10, 400.0, 0.0), (12, 0.0, -400.0)]
    );
    assert_eq!(
        wall_shifts(&lower, Bounds::new(4, 4), Gen2),
        vec![(10, 400.0, 0.0), (11, 0.0, -400.0)]
    );
}

#[test]
fn l_shape_upper_notch_moves_back_and_right_walls() {
    let upper = LShape::new(1, true).unwrap();
    assert_eq!(
        wall_shifts(&upper, Bounds::new(4, 4), Gen3),
        vec![(11, -400.0, 0.0), (15, 0.0, -400.0)]
    );
    assert_eq!(
        wall_shifts(&upper, Bounds::new(4, 4), Gen2),
        vec![(14, 0.0, -400.0), (15, -400.0, 0.0)]
    );
}

#[test]
fn l_shape_deep_notch_moves_every_piece_along_it() {
    // depth 2 on 4x4: two right pieces and two front pieces
    let lower = LShape::new(2, false).unwrap();
    assert_eq!(
        wall_shifts(&lower, Bounds::new(4, 4), Gen3),
        vec![
            (8, 800.0, 0.0),
            (10, 800.0, 0.0),
            (12, 0.0, -800.0),
            (13, 0.0, -800.0),
        ]
    );
}

/// Shaped outcomes of a 3x3 wall level, placed by the Wall engine or by the
/// house wall solver on a Custom level.
fn wall_level(shape: &dyn Shape, solved: bool) -> Vec<ShapeOutcome> {
    let stats = BuildStats::from_level(5, 12, Bounds::new(3, 3));
    let mode = if solved { SnapMode::Custom } else { SnapMode::Wall };
    let resolution = Resolution::new(SectionSize::uniform(), mode);
    let solver: Option<&dyn TransformSolver> = if solved { Some(&HouseWallSolver) } else { None };

    (0..12)
        .map(|index| {
            let placement = PlacementRequest::new(index, 5, 12, &stats).with_solver(solver);
            let request = ShapeRequest::new(&placement, &resolution, resolution.compute(&placement));
            shape_section(shape, &request)
        })
        .collect()
}

#[test]
fn house_wall_solver_is_shaped_like_walls() {
    let l_shape = LShape::new(1, false).unwrap();
    assert_eq!(wall_level(&l_shape, false), wall_level(&l_shape, true));
    assert!(wall_level(&l_shape, true).iter().all(|outcome| !outcome.skip));

    let sides = NonUniformSides::new(0.5).unwrap();
    assert_eq!(wall_level(&sides, false), wall_level(&sides, true));
}

#[test]
fn undeclared_solver_sections_are_left_alone() {
    let stats = BuildStats::from_level(4, 8, Bounds::new(2, 2));
    let resolution = Resolution::new(SectionSize::uniform(), SnapMode::Custom);
    let solver = TunnelWallSolver;
    let shape = LShape::new(1, false).unwrap();

    for index in 0..8 {
        let placement = PlacementRequest::new(index, 4, 8, &stats).with_solver(Some(&solver));
        let request = ShapeRequest::new(&placement, &resolution, resolution.compute(&placement));
        assert_eq!(shape_section(&shape, &request), ShapeOutcome::unchanged(&request));
    }
}
