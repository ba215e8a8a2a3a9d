use super::linear_system::{l2_norm, residual, FdmLinearSystem2};
use super::FdmLinearSystemSolver2;
use crate::array::Array2;
use crate::constants::solver::{
    LINEAR_SYSTEM_MAX_ITERATIONS, LINEAR_SYSTEM_RESIDUAL_CHECK_INTERVAL, LINEAR_SYSTEM_TOLERANCE,
};

/// Jacobi iteration; every unknown is relaxed in parallel from the previous
/// iterate
#[derive(Debug, Clone)]
pub struct FdmJacobiSolver2 {
    max_iterations: u32,
    residual_check_interval: u32,
    tolerance: f64,

    last_number_of_iterations: u32,
    last_residual: f64,

    /// Previous iterate
    x_temp: Array2<f64>,
    /// `b - A x` at the last check
    residual: Array2<f64>,
}

impl Default for FdmJacobiSolver2 {
    fn default() -> Self {
        Self::new(
            LINEAR_SYSTEM_MAX_ITERATIONS,
            LINEAR_SYSTEM_RESIDUAL_CHECK_INTERVAL,
            LINEAR_SYSTEM_TOLERANCE,
        )
    }
}

impl FdmJacobiSolver2 {
    pub fn new(max_iterations: u32, residual_check_interval: u32, tolerance: f64) -> Self {
        Self {
            max_iterations,
            residual_check_interval: residual_check_interval.max(1),
            tolerance,
            last_number_of_iterations: 0,
            last_residual: f64::MAX,
            x_temp: Array2::default(),
            residual: Array2::default(),
        }
    }

    /// One Jacobi sweep reading `x_temp`, writing `system.x`
    fn relax(system: &mut FdmLinearSystem2, x_temp: &Array2<f64>) {
        let a = &system.a;
        let b = &system.b;
        let size = a.size();

        system.x.parallel_fill_with(|i, j| {
            let row = a[(i, j)];
            if row.center == 0.0 {
                return 0.0;
            }

            let mut off_diagonal = 0.0;
            if i > 0 {
                off_diagonal += a[(i - 1, j)].right * x_temp[(i - 1, j)];
            }
            if i + 1 < size.x {
                off_diagonal += row.right * x_temp[(i + 1, j)];
            }
            if j > 0 {
                off_diagonal += a[(i, j - 1)].up * x_temp[(i, j - 1)];
            }
            if j + 1 < size.y {
                off_diagonal += row.up * x_temp[(i, j + 1)];
            }

            (b[(i, j)] - off_diagonal) / row.center
        });
    }
}

impl FdmLinearSystemSolver2 for FdmJacobiSolver2 {
    fn solve(&mut self, system: &mut FdmLinearSystem2) -> bool {
        let size = system.size();
        if self.x_temp.size() != size {
            self.x_temp.resize(size, 0.0);
        }

        let mut iterations = 0;
        while iterations < self.max_iterations {
            self.x_temp.set(&system.x);
            Self::relax(system, &self.x_temp);
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
            "[fdm_jacobi] {} iterations, residual {:.3e}",
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
