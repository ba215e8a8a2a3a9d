//! Single-phase pressure projection
//!
//! Cells are classified at their centers. Air cells are Dirichlet (`p = 0`),
//! solid cells and the domain edges are Neumann. The solved pressure has
//! `Δt / ρ` folded in, so the projected velocity is `u + ∇p`.

use super::markers::{build_markers, CellMarker};
use crate::array::Array2;
use crate::field::ScalarField2;
use crate::grid::FaceCenteredGrid2;
use crate::solver::fdm::{
    FdmJacobiSolver2, FdmLinearSystem2, FdmLinearSystemSolver2, FdmMatrixRow2,
};

#[derive(Debug)]
pub struct GridSinglePhasePressureSolver2 {
    system: FdmLinearSystem2,
    linear_solver: Box<dyn FdmLinearSystemSolver2>,
    markers: Array2<CellMarker>,
}

impl Default for GridSinglePhasePressureSolver2 {
    fn default() -> Self {
        Self::new(Box::new(FdmJacobiSolver2::default()))
    }
}

impl GridSinglePhasePressureSolver2 {
    pub fn new(linear_solver: Box<dyn FdmLinearSystemSolver2>) -> Self {
        Self {
            system: FdmLinearSystem2::default(),
            linear_solver,
            markers: Array2::default(),
        }
    }

    pub fn linear_solver(&self) -> &dyn FdmLinearSystemSolver2 {
        self.linear_solver.as_ref()
    }

    pub fn set_linear_solver(&mut self, linear_solver: Box<dyn FdmLinearSystemSolver2>) {
        self.linear_solver = linear_solver;
    }

    /// Pressure from the last solve, one value per cell
    pub fn pressure(&self) -> &Array2<f64> {
        &self.system.x
    }

    pub fn markers(&self) -> &Array2<CellMarker> {
        &self.markers
    }

    /// Project `input` onto a divergence-free field, written to `output`.
    ///
    /// `output` is reset to `input`'s geometry first. Returns whether the
    /// linear solve converged; the projection is applied either way.
    pub fn solve(
        &mut self,
        input: &FaceCenteredGrid2,
        output: &mut FaceCenteredGrid2,
        boundary_sdf: &dyn ScalarField2,
        fluid_sdf: &dyn ScalarField2,
    ) -> bool {
        let resolution = input.resolution();
        build_markers(
            resolution,
            |i, j| input.geometry().cell_center_position(i, j),
            boundary_sdf,
            fluid_sdf,
            &mut self.markers,
        );

        self.build_system(input);
        let converged = self.linear_solver.solve(&mut self.system);
        if !converged {
            log::debug!(
                "[pressure_solver] linear solve stopped after {} iterations, residual {:.3e}",
                self.linear_solver.last_number_of_iterations(),
                self.linear_solver.last_residual()
            );
        }

        output.set(input);
        self.apply_pressure_gradient(output);
        converged
    }

    fn build_system(&mut self, input: &FaceCenteredGrid2) {
        let size = input.resolution();
        if self.system.size() != size {
            self.system.resize(size);
        } else {
            self.system.clear();
        }

        let inv_h2 = 1.0 / (input.grid_spacing() * input.grid_spacing());
        let markers = &self.markers;

        self.system.a.parallel_fill_with(|i, j| {
            let mut row = FdmMatrixRow2::default();
            if markers[(i, j)] != CellMarker::Fluid {
                row.center = 1.0;
                return row;
            }

            if i + 1 < size.x && markers[(i + 1, j)] != CellMarker::Boundary {
                row.center += inv_h2.x;
                if markers[(i + 1, j)] == CellMarker::Fluid {
                    row.right -= inv_h2.x;
                }
            }
            if i > 0 && markers[(i - 1, j)] != CellMarker::Boundary {
                row.center += inv_h2.x;
            }
            if j + 1 < size.y && markers[(i, j + 1)] != CellMarker::Boundary {
                row.center += inv_h2.y;
                if markers[(i, j + 1)] == CellMarker::Fluid {
                    row.up -= inv_h2.y;
                }
            }
            if j > 0 && markers[(i, j - 1)] != CellMarker::Boundary {
                row.center += inv_h2.y;
            }

            // A fluid cell walled in on every side has no pressure coupling
            if row.center == 0.0 {
                row.center = 1.0;
            }
            row
        });

        self.system.b.parallel_fill_with(|i, j| {
            if markers[(i, j)] == CellMarker::Fluid {
                input.divergence_at_cell_center(i, j)
            } else {
                0.0
            }
        });
    }

    /// Add `∇p` on every face between two non-solid cells with fluid on at
    /// least one side
    fn apply_pressure_gradient(&self, output: &mut FaceCenteredGrid2) {
        let size = output.resolution();
        let inv_h = 1.0 / output.grid_spacing();
        let pressure = &self.system.x;
        let markers = &self.markers;

        let face_is_open = |a: CellMarker, b: CellMarker| {
            a != CellMarker::Boundary
                && b != CellMarker::Boundary
                && (a == CellMarker::Fluid || b == CellMarker::Fluid)
        };

        let (u, v) = output.uv_mut();
        u.parallel_for_each_mut(|i, j, value| {
            if i == 0 || i >= size.x {
                return;
            }
            if face_is_open(markers[(i - 1, j)], markers[(i, j)]) {
                *value += inv_h.x * (pressure[(i, j)] - pressure[(i - 1, j)]);
            }
        });
        v.parallel_for_each_mut(|i, j, value| {
            if j == 0 || j >= size.y {
                return;
            }
            if face_is_open(markers[(i, j - 1)], markers[(i, j)]) {
                *value += inv_h.y * (pressure[(i, j)] - pressure[(i, j - 1)]);
            }
        });
    }
}

/// Magnitude of the largest fluid-cell divergence in `velocity`
pub fn max_fluid_divergence(velocity: &FaceCenteredGrid2, markers: &Array2<CellMarker>) -> f64 {
    let size = velocity.resolution();
    let mut max = 0.0f64;
    for j in 0..size.y {
        for i in 0..size.x {
            if markers[(i, j)] == CellMarker::Fluid {
                max = max.max(velocity.divergence_at_cell_center(i, j).abs());
            }
        }
    }
    max
}
