use super::linear_system::{l2_norm, residual, FdmLinearSystem2};
use super::FdmLinearSystemSolver2;
use crate::array::Array2;
use crate::constants::solver::{
    LINEAR_SYSTEM_MAX_ITERATIONS, LINEAR_SYSTEM_RESIDUAL_CHECK_INTERVAL, LINEAR_SYSTEM_TOLERANCE,
    SOR_FACTOR,
};

/// Gauss-Seidel with successive over-relaxation.
///
/// Sweeps update `x` in place in index order, so a sweep is sequential.
#[derive(Debug, Clone)]
pub struct FdmGaussSeidelSolver2 {
    max_iterations: u32,
    residual_check_interval: u32,
    tolerance: f64,
    sor_factor: f64,

    last_number_of_iterations: u32,
    last_residual: f64,

    residual: Array2<f64>,
}

impl Default for FdmGaussSeidelSolver2 {
    fn default() -> Self {
        Self::new(
            LINEAR_SYSTEM_MAX_ITERATIONS,
            LINEAR_SYSTEM_RESIDUAL_CHECK_INTERVAL,
            LINEAR_SYSTEM_TOLERANCE,
            SOR_FACTOR,
        )
    }
}

impl FdmGaussSeidelSolver2 {
    pub fn new(
        max_iterations: u32,
        residual_check_interval: u32,
        tolerance: f64,
        sor_factor: f64,
    ) -> Self {
        Self {
            max_iterations,
            residual_check_interval: residual_check_interval.max(1),
            tolerance,
            sor_factor,
            last_number_of_iterations: 0,
            last_residual: f64::MAX,
            residual: Array2::default(),
        }
    }

    pub fn sor_factor(&self) -> f64 {
        self.sor_factor
    }

    fn relax(system: &mut FdmLinearSystem2, sor_factor: f64) {
        let size = system.size();
        let a = &system.a;
        let b = &system.b;
        let x = &mut system.x;

        for j in 0..size.y {
            for i in 0..size.x {
                let row = a[(i, j)];
                if row.center == 0.0 {
                    continue;
                }

                let mut off_diagonal = 0.0;
                if i > 0 {
                    off_diagonal += a[(i - 1, j)].right * x[(i - 1, j)];
                }
                if i + 1 < size.x {
                    off_diagonal += row.right * x[(i + 1, j)];
                }
                if j > 0 {
                    off_diagonal += a[(i, j - 1)].up * x[(i, j - 1)];
                }
                if j + 1 < size.y {
                    off_diagonal += row.up * x[(i, j + 1)];
                }

                let gauss_seidel = (b[(i, j)] - off_diagonal) / row.center;
                x[(i, j)] = (1.0 - sor_factor) * x[(i, j)] + sor_factor * gauss_seidel;
            }
        }
    }
}

impl FdmLinearSystemSolver2 for FdmGaussSeidelSolver2 {
    fn solve(&mut self, system: &mut FdmLinearSystem2) -> bool {
        let mut iterations = 0;
        while iterations < self.max_iterations {
            Self::relax(system, self.sor_factor);
            iterations += 1;

            if iterations % self.residual_check_interval == 0 {
                residual(&system.a, &system.x, &system.b, &mut self.residual);
                if l2_norm(&self.residual) < self.tolerance {
                    break;
                }
            }
        }

        residual(&system.a, &system.x, &system.b, &mut self.residual);
        self.last_number_of_iterations = iterations;
        self.last_residual = l2_norm(&self.residual);

        log::trace!(
            "[fdm_gauss_seidel] {} iterations, residual {:.3e}",
            iterations,
            self.last_residual
        );
        self.last_residual <= self.tolerance
    }

    fn last_number_of_iterations(&self) -> u32 {
        self.last_number_of_iterations
    }

    fn last_residual(&self) -> f64 {
        self.last_residual
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }
}
