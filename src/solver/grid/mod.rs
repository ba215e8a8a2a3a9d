//! Grid PDE solvers: diffusion, pressure projection, advection and boundary
//! conditions

mod advection;
mod boundary;
mod diffusion;
mod markers;
mod pressure;

pub use advection::{back_trace, SemiLagrangian2};
pub use boundary::{ClosedDomain, GridBlockedBoundaryConditionSolver2};
pub use diffusion::{DiffusionBoundary, GridForwardEulerDiffusionSolver2};
pub use markers::{build_markers, is_inside_sdf, CellMarker};
pub use pressure::{max_fluid_divergence, GridSinglePhasePressureSolver2};

#[cfg(test)]
mod tests;
