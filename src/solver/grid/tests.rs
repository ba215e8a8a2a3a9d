use std::sync::Arc;

use glam::DVec2;

use super::*;
use crate::array::Size2;
use crate::error::FluidError;
use crate::field::{ConstantScalarField2, ConstantVectorField2, CustomScalarField2};
use crate::geometry::{Sphere2, SurfaceToImplicit2};
use crate::grid::{CollocatedVectorGrid2, FaceCenteredGrid2, Grid2, GridGeometry2, ScalarGrid2};
use crate::solver::fdm::FdmGaussSeidelSolver2;
use crate::solver::hybrid::Collider2;

fn bumpy_scalar() -> ScalarGrid2 {
    let mut grid = ScalarGrid2::cell_centered(Size2::new(6, 5), DVec2::splat(0.5), DVec2::ZERO);
    grid.parallel_fill_with(|x| (3.0 * x.x).sin() + x.y * x.y);
    grid
}

#[test]
fn test_zero_coefficient_leaves_dest_equal_to_source() {
    let mut solver = GridForwardEulerDiffusionSolver2::new();

    let source = Grid2::from(bumpy_scalar());
    let mut dest = Grid2::from(ScalarGrid2::cell_centered(
        Size2::new(6, 5),
        DVec2::splat(0.5),
        DVec2::ZERO,
    ));
    solver.solve_unbounded(&source, 0.0, 0.1, &mut dest).unwrap();
    assert_eq!(dest, source);

    let mut face = FaceCenteredGrid2::new(Size2::new(4, 4), DVec2::ONE, DVec2::ZERO);
    face.parallel_fill_with(|x| DVec2::new(x.y, -x.x));
    let source = Grid2::from(face);
    let mut dest = Grid2::from(FaceCenteredGrid2::new(Size2::new(4, 4), DVec2::ONE, DVec2::ZERO));
    solver.solve_unbounded(&source, 0.0, 0.5, &mut dest).unwrap();
    assert_eq!(dest, source);
}

#[test]
fn test_mismatched_kinds_fail_without_touching_dest() {
    let mut solver = GridForwardEulerDiffusionSolver2::new();
    let source = Grid2::from(bumpy_scalar());

    let mut face = FaceCenteredGrid2::new(Size2::new(6, 5), DVec2::splat(0.5), DVec2::ZERO);
    face.fill(DVec2::new(1.0, 2.0));
    let mut dest = Grid2::from(face);
    let before = dest.clone();

    let err = solver.solve_unbounded(&source, 0.1, 0.01, &mut dest).unwrap_err();
    assert!(matches!(
        err,
        FluidError::GridTypeMismatch {
            source_kind: crate::grid::GridKind::Scalar,
            dest_kind: crate::grid::GridKind::FaceCentered,
        }
    ));
    assert_eq!(dest, before);

    let mut small = Grid2::from(ScalarGrid2::default());
    let before = small.clone();
    assert!(matches!(
        solver.solve_unbounded(&source, 0.1, 0.01, &mut small),
        Err(FluidError::ResolutionMismatch { .. })
    ));
    assert_eq!(small, before);
}

#[test]
fn test_diffusion_spreads_a_spike_and_conserves_total() {
    let mut solver = GridForwardEulerDiffusionSolver2::new();
    let mut source = CollocatedVectorGrid2::new(Size2::new(7, 7), DVec2::ONE, DVec2::ZERO);
    source[(3, 3)] = DVec2::new(1.0, -2.0);
    let mut dest = CollocatedVectorGrid2::new(Size2::new(7, 7), DVec2::ONE, DVec2::ZERO);

    let boundary = DiffusionBoundary::default();
    solver
        .solve_collocated(
            &source,
            0.05,
            1.0,
            &mut dest,
            &boundary.boundary_sdf,
            &boundary.fluid_sdf,
        )
        .unwrap();

    assert!((dest[(3, 3)].x - 0.8).abs() < 1e-12);
    assert!((dest[(2, 3)].x - 0.05).abs() < 1e-12);
    assert!((dest[(3, 4)].y + 0.1).abs() < 1e-12);

    let total: DVec2 = dest.data().iter().copied().sum();
    assert!((total - DVec2::new(1.0, -2.0)).length() < 1e-12);
}

#[test]
fn test_solid_and_air_samples_do_not_diffuse() {
    let mut solver = GridForwardEulerDiffusionSolver2::new();
    let source = bumpy_scalar();
    let mut dest = ScalarGrid2::cell_centered(Size2::new(6, 5), DVec2::splat(0.5), DVec2::ZERO);

    let solid = ConstantScalarField2::new(-1.0);
    let fluid = ConstantScalarField2::new(-1.0);
    solver
        .solve_scalar(&source, 0.1, 0.1, &mut dest, &solid, &fluid)
        .unwrap();
    assert_eq!(dest.data(), source.data());

    let no_solid = ConstantScalarField2::new(1.0);
    let air = ConstantScalarField2::new(1.0);
    solver
        .solve_scalar(&source, 0.1, 0.1, &mut dest, &no_solid, &air)
        .unwrap();
    assert_eq!(dest.data(), source.data());
}

#[test]
fn test_markers_prefer_boundary_over_fluid() {
    let mut markers = crate::array::Array2::default();
    let boundary = CustomScalarField2::new(|x: DVec2| x.x - 1.0);
    let fluid = CustomScalarField2::new(|x: DVec2| x.y - 1.0);
    build_markers(
        Size2::new(2, 2),
        |i, j| DVec2::new(i as f64 + 0.5, j as f64 + 0.5),
        &boundary,
        &fluid,
        &mut markers,
    );

    assert_eq!(markers[(0, 0)], CellMarker::Boundary);
    assert_eq!(markers[(0, 1)], CellMarker::Boundary);
    assert_eq!(markers[(1, 0)], CellMarker::Fluid);
    assert_eq!(markers[(1, 1)], CellMarker::Air);
}

fn divergent_velocity(resolution: Size2) -> FaceCenteredGrid2 {
    let mut velocity = FaceCenteredGrid2::new(resolution, DVec2::ONE, DVec2::ZERO);
    velocity.parallel_fill_with(|x| DVec2::new((0.9 * x.x).sin(), (0.7 * x.y).cos() - x.x * 0.1));
    let mut bc = GridBlockedBoundaryConditionSolver2::new(ClosedDomain::all());
    bc.update_collider(None, velocity.geometry());
    bc.constrain_velocity(&mut velocity);
    velocity
}

#[test]
fn test_pressure_projection_removes_fluid_divergence() {
    let resolution = Size2::new(8, 8);
    let input = divergent_velocity(resolution);
    let mut output = FaceCenteredGrid2::default();

    // Lower half is fluid, upper half air
    let fluid_sdf = CustomScalarField2::new(|x: DVec2| x.y - 4.0);
    let no_solid = ConstantScalarField2::new(f64::MAX);

    let mut solver = GridSinglePhasePressureSolver2::new(Box::new(FdmGaussSeidelSolver2::new(
        5000, 10, 1e-10, 1.0,
    )));
    assert!(solver.solve(&input, &mut output, &no_solid, &fluid_sdf));

    let markers = solver.markers().clone();
    assert_eq!(markers[(0, 0)], CellMarker::Fluid);
    assert_eq!(markers[(0, 7)], CellMarker::Air);

    let before = max_fluid_divergence(&input, &markers);
    let after = max_fluid_divergence(&output, &markers);
    assert!(before > 0.1, "test field should start divergent, got {before}");
    assert!(after < 1e-8, "divergence after projection: {after}");

    // Closed walls stay closed
    for j in 0..resolution.y {
        assert_eq!(output.u()[(0, j)], 0.0);
        assert_eq!(output.u()[(resolution.x, j)], 0.0);
    }

    // Air cells carry zero pressure
    assert_eq!(solver.pressure()[(3, 6)], 0.0);
}

#[test]
fn test_pressure_treats_solid_cells_as_walls() {
    let resolution = Size2::new(6, 6);
    let input = divergent_velocity(resolution);
    let mut output = FaceCenteredGrid2::default();

    let solid = CustomScalarField2::new(|x: DVec2| x.x - 2.0);
    let fluid_sdf = CustomScalarField2::new(|x: DVec2| x.y - 3.0);
    let mut solver = GridSinglePhasePressureSolver2::new(Box::new(FdmGaussSeidelSolver2::new(
        5000, 10, 1e-10, 1.0,
    )));
    solver.solve(&input, &mut output, &solid, &fluid_sdf);

    assert_eq!(solver.markers()[(0, 0)], CellMarker::Boundary);
    // Faces between solid and fluid cells are not projected
    assert_eq!(output.u()[(2, 1)], input.u()[(2, 1)]);
    assert!(max_fluid_divergence(&output, solver.markers()) < 1e-8);
}

#[test]
fn test_boundary_conditions_close_domain_and_pin_collider_faces() {
    let geometry = GridGeometry2::new(Size2::new(10, 10), DVec2::splat(0.1), DVec2::ZERO);
    let mut velocity = FaceCenteredGrid2::with_geometry(geometry, DVec2::new(1.0, 1.0));

    let sphere = Arc::new(SurfaceToImplicit2::new(Arc::new(Sphere2::new(
        DVec2::new(0.5, 0.5),
        0.2,
    ))));
    let collider = Collider2::new(sphere).with_linear_velocity(DVec2::new(0.0, -3.0));

    let mut solver = GridBlockedBoundaryConditionSolver2::new(ClosedDomain {
        left: true,
        right: false,
        bottom: true,
        top: false,
    });
    solver.update_collider(Some(&collider), &geometry);
    assert!(solver.collider_sdf()[(5, 5)] < 0.0);
    assert!(solver.collider_sdf()[(0, 0)] > 0.0);

    solver.constrain_velocity(&mut velocity);

    // Faces around the solid center cell take the collider's velocity
    assert_eq!(velocity.u()[(5, 5)], 0.0);
    assert_eq!(velocity.v()[(5, 5)], -3.0);
    assert_eq!(velocity.v()[(5, 6)], -3.0);
    // Far from the collider the field is untouched
    assert_eq!(velocity.u()[(2, 8)], 1.0);

    assert_eq!(velocity.u()[(0, 3)], 0.0);
    assert_eq!(velocity.v()[(3, 0)], 0.0);
    assert_eq!(velocity.u()[(10, 3)], 1.0);
    assert_eq!(velocity.v()[(3, 10)], 1.0);
}

#[test]
fn test_semi_lagrangian_shifts_along_uniform_flow() {
    let advector = SemiLagrangian2::new();
    let mut input = ScalarGrid2::vertex_centered(Size2::new(20, 4), DVec2::splat(0.5), DVec2::ZERO);
    input.parallel_fill_with(|x| 2.0 * x.x + 1.0);
    let mut output = input.clone();

    let flow = ConstantVectorField2::new(DVec2::new(1.5, 0.0));
    let no_solid = ConstantScalarField2::new(f64::MAX);
    advector
        .advect(
            &Grid2::from(input.clone()),
            &flow,
            1.0,
            &mut Grid2::from(output.clone()),
            &no_solid,
        )
        .unwrap();
    advector
        .advect_scalar(&input, &flow, 1.0, &mut output, &no_solid)
        .unwrap();

    for i in 4..20 {
        let x = output.data_position(i, 2);
        assert!((output[(i, 2)] - (2.0 * (x.x - 1.5) + 1.0)).abs() < 1e-9);
    }
}

#[test]
fn test_back_trace_stops_at_the_boundary() {
    let flow = ConstantVectorField2::new(DVec2::new(1.0, 0.0));
    // Solid for x < 1
    let boundary = CustomScalarField2::new(|x: DVec2| x.x - 1.0);
    let start = DVec2::new(2.1, 0.0);
    let end = back_trace(&flow, 5.0, 0.25, start, &boundary);
    assert!((end.x - 1.0).abs() < 1e-9);
}

#[test]
fn test_advection_rejects_mismatched_kinds() {
    let advector = SemiLagrangian2::new();
    let input = Grid2::from(ScalarGrid2::default());
    let mut output = Grid2::from(CollocatedVectorGrid2::default());
    let result = advector.advect(
        &input,
        &ConstantVectorField2::new(DVec2::ZERO),
        0.1,
        &mut output,
        &ConstantScalarField2::new(f64::MAX),
    );
    assert!(matches!(result, Err(FluidError::GridTypeMismatch { .. })));
}
