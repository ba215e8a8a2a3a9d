use super::*;
use crate::array::{Array2, Size2};

/// Strictly diagonally dominant 5-point system whose exact solution is known
fn dominant_system(size: Size2) -> (FdmLinearSystem2, Array2<f64>) {
    let mut system = FdmLinearSystem2::new(size);
    system.a.parallel_fill_with(|_, _| FdmMatrixRow2 {
        center: 5.0,
        right: -1.0,
        up: -1.0,
    });

    let expected = Array2::from_fn(size, |i, j| (i as f64) - 0.5 * (j as f64) + 1.0);
    let a = system.a.clone();
    system
        .b
        .parallel_fill_with(|i, j| matrix_vector_row(&a, &expected, i, j));
    (system, expected)
}

fn max_error(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .fold(0.0, |acc: f64, (x, y)| acc.max((x - y).abs()))
}

#[test]
fn test_residual_of_exact_solution_is_zero() {
    let (system, expected) = dominant_system(Size2::new(6, 4));
    let mut r = Array2::default();
    residual(&system.a, &expected, &system.b, &mut r);
    assert_eq!(r.size(), Size2::new(6, 4));
    assert!(linf_norm(&r) < 1e-12);
    assert!(l2_norm(&system.b) > 0.0);
}

#[test]
fn test_jacobi_converges() {
    let (mut system, expected) = dominant_system(Size2::new(8, 8));
    let mut solver = FdmJacobiSolver2::new(500, 5, 1e-10);

    assert!(solver.solve(&mut system));
    assert!(solver.last_residual() <= 1e-10);
    assert!(solver.last_number_of_iterations() < 500);
    assert!(max_error(&system.x, &expected) < 1e-8);
}

#[test]
fn test_gauss_seidel_converges_faster_than_jacobi() {
    let (mut jacobi_system, expected) = dominant_system(Size2::new(8, 8));
    let mut gs_system = jacobi_system.clone();

    let mut jacobi = FdmJacobiSolver2::new(500, 1, 1e-10);
    let mut gauss_seidel = FdmGaussSeidelSolver2::new(500, 1, 1e-10, 1.0);
    assert!(jacobi.solve(&mut jacobi_system));
    assert!(gauss_seidel.solve(&mut gs_system));

    assert!(max_error(&gs_system.x, &expected) < 1e-8);
    assert!(gauss_seidel.last_number_of_iterations() < jacobi.last_number_of_iterations());
}

#[test]
fn test_iteration_cap_reports_non_convergence() {
    let (mut system, _) = dominant_system(Size2::new(8, 8));
    let mut solver = FdmGaussSeidelSolver2::new(1, 1, 1e-14, 1.0);
    assert!(!solver.solve(&mut system));
    assert_eq!(solver.last_number_of_iterations(), 1);
}

#[test]
fn test_zero_rows_are_left_alone() {
    let mut system = FdmLinearSystem2::new(Size2::new(3, 3));
    system.x.fill(2.0);
    let mut solver = FdmGaussSeidelSolver2::default();
    solver.solve(&mut system);
    assert!(system.x.iter().all(|&x| x == 2.0));
}

#[test]
fn test_config_builds_requested_solver() {
    let config = LinearSolverConfig {
        kind: LinearSolverKind::GaussSeidel,
        sor_factor: 1.5,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
    assert!(format!("{:?}", config.build()).contains("FdmGaussSeidelSolver2"));

    let bad = LinearSolverConfig {
        sor_factor: 2.5,
        ..Default::default()
    };
    assert!(bad.validate().is_err());
}
