//! Grid Storage
//!
//! Regular 2-D grids over `Array2` buffers. Every grid carries a
//! `GridGeometry2` (resolution, spacing, origin); the kinds differ only in
//! where samples sit relative to cells:
//! - `ScalarGrid2`: cell centers or cell corners
//! - `CollocatedVectorGrid2`: cell centers
//! - `FaceCenteredGrid2`: staggered MAC faces
//!
//! Solvers that accept any kind take a `Grid2`.

mod extrapolation;
mod face_centered_grid;
mod grid_geometry;
mod grid_kind;
mod sampler;
mod scalar_grid;
mod vector_grid;

pub use extrapolation::extrapolate_to_region;
pub use face_centered_grid::FaceCenteredGrid2;
pub use grid_geometry::GridGeometry2;
pub use grid_kind::{Grid2, GridKind};
pub use sampler::LinearSampler2;
pub use scalar_grid::{ScalarGrid2, ScalarGridLayout};
pub use vector_grid::CollocatedVectorGrid2;
