//! Numerical solvers
//!
//! - `fdm`: 5-point linear systems and their iterative solvers
//! - `grid`: diffusion, pressure, advection and boundary conditions on grids
//! - `hybrid`: the particle-grid (PIC) time stepper built on both

pub mod fdm;
pub mod grid;
pub mod hybrid;
