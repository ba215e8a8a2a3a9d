//! Finite-difference linear systems
//!
//! Grid solvers assemble a 5-point `FdmLinearSystem2` and hand it to a
//! `FdmLinearSystemSolver2`. Two stationary iterations are provided:
//! parallel Jacobi and sequential Gauss-Seidel with over-relaxation.

mod gauss_seidel;
mod jacobi;
mod linear_system;

pub use gauss_seidel::FdmGaussSeidelSolver2;
pub use jacobi::FdmJacobiSolver2;
pub use linear_system::{
    l2_norm, linf_norm, matrix_vector_row, residual, FdmLinearSystem2, FdmMatrix2, FdmMatrixRow2,
};

use serde::{Deserialize, Serialize};

use crate::constants::solver::{
    LINEAR_SYSTEM_MAX_ITERATIONS, LINEAR_SYSTEM_RESIDUAL_CHECK_INTERVAL, LINEAR_SYSTEM_TOLERANCE,
    SOR_FACTOR,
};
use crate::error::{invalid_config, FluidResult};

/// Iterative solver for `FdmLinearSystem2`
pub trait FdmLinearSystemSolver2: Send + Sync + std::fmt::Debug {
    /// Solve in place, starting from the current `system.x`.
    ///
    /// Returns whether the final residual is within tolerance. Not converging
    /// is not an error; the best iterate is left in `system.x`.
    fn solve(&mut self, system: &mut FdmLinearSystem2) -> bool;

    fn last_number_of_iterations(&self) -> u32;

    fn last_residual(&self) -> f64;

    fn tolerance(&self) -> f64;
}

/// Which iteration backs the pressure solve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolverKind {
    #[default]
    Jacobi,
    GaussSeidel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearSolverConfig {
    pub kind: LinearSolverKind,
    pub max_iterations: u32,
    pub residual_check_interval: u32,
    pub tolerance: f64,
    /// Only used by Gauss-Seidel
    pub sor_factor: f64,
}

impl Default for LinearSolverConfig {
    fn default() -> Self {
        Self {
            kind: LinearSolverKind::Jacobi,
            max_iterations: LINEAR_SYSTEM_MAX_ITERATIONS,
            residual_check_interval: LINEAR_SYSTEM_RESIDUAL_CHECK_INTERVAL,
            tolerance: LINEAR_SYSTEM_TOLERANCE,
            sor_factor: SOR_FACTOR,
        }
    }
}

impl LinearSolverConfig {
    pub fn validate(&self) -> FluidResult<()> {
        if self.max_iterations == 0 {
            return Err(invalid_config("linear_solver.max_iterations", "must be at least 1"));
        }
        if !(self.tolerance >= 0.0) {
            return Err(invalid_config(
                "linear_solver.tolerance",
                format!("must be non-negative, got {}", self.tolerance),
            ));
        }
        if !(self.sor_factor > 0.0 && self.sor_factor < 2.0) {
            return Err(invalid_config(
                "linear_solver.sor_factor",
                format!("must lie in (0, 2), got {}", self.sor_factor),
            ));
        }
        Ok(())
    }

    pub fn build(&self) -> Box<dyn FdmLinearSystemSolver2> {
        match self.kind {
            LinearSolverKind::Jacobi => Box::new(FdmJacobiSolver2::new(
                self.max_iterations,
                self.residual_check_interval,
                self.tolerance,
            )),
            LinearSolverKind::GaussSeidel => Box::new(FdmGaussSeidelSolver2::new(
                self.max_iterations,
                self.residual_check_interval,
                self.tolerance,
                self.sor_factor,
            )),
        }
    }
}

#[cfg(test)]
mod tests;
