use std::fmt;

use glam::DVec2;

use super::{CollocatedVectorGrid2, FaceCenteredGrid2, GridGeometry2, ScalarGrid2};
use crate::array::Size2;
use crate::error::{grid_type_mismatch, resolution_mismatch, FluidResult};

/// Discriminant of a `Grid2`, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    Scalar,
    Collocated,
    FaceCentered,
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridKind::Scalar => "ScalarGrid2",
            GridKind::Collocated => "CollocatedVectorGrid2",
            GridKind::FaceCentered => "FaceCenteredGrid2",
        };
        f.write_str(name)
    }
}

/// Any grid a solver can read from or write into
#[derive(Debug, Clone, PartialEq)]
pub enum Grid2 {
    Scalar(ScalarGrid2),
    Collocated(CollocatedVectorGrid2),
    FaceCentered(FaceCenteredGrid2),
}

impl Grid2 {
    pub fn kind(&self) -> GridKind {
        match self {
            Grid2::Scalar(_) => GridKind::Scalar,
            Grid2::Collocated(_) => GridKind::Collocated,
            Grid2::FaceCentered(_) => GridKind::FaceCentered,
        }
    }

    pub fn geometry(&self) -> &GridGeometry2 {
        match self {
            Grid2::Scalar(grid) => grid.geometry(),
            Grid2::Collocated(grid) => grid.geometry(),
            Grid2::FaceCentered(grid) => grid.geometry(),
        }
    }

    pub fn resolution(&self) -> Size2 {
        self.geometry().resolution
    }

    pub fn grid_spacing(&self) -> DVec2 {
        self.geometry().grid_spacing
    }

    /// Storage extents; face-centered grids report their `u` and `v` sizes
    pub fn data_sizes(&self) -> (Size2, Size2) {
        match self {
            Grid2::Scalar(grid) => (grid.data_size(), grid.data_size()),
            Grid2::Collocated(grid) => (grid.data_size(), grid.data_size()),
            Grid2::FaceCentered(grid) => (grid.u_size(), grid.v_size()),
        }
    }

    /// Deep copy of `other`, replacing this grid whatever its kind
    pub fn set(&mut self, other: &Grid2) {
        match (self, other) {
            (Grid2::Scalar(dest), Grid2::Scalar(source)) => dest.set(source),
            (Grid2::Collocated(dest), Grid2::Collocated(source)) => dest.set(source),
            (Grid2::FaceCentered(dest), Grid2::FaceCentered(source)) => dest.set(source),
            (dest, source) => *dest = source.clone(),
        }
    }

    /// Check that `dest` can receive a kernel's output computed from `source`
    pub fn check_compatible(source: &Grid2, dest: &Grid2) -> FluidResult<()> {
        if source.kind() != dest.kind() {
            return Err(grid_type_mismatch(source.kind(), dest.kind()));
        }
        let (source_size, dest_size) = (source.data_sizes(), dest.data_sizes());
        if source_size != dest_size {
            return Err(resolution_mismatch(
                source_size.0.as_tuple(),
                dest_size.0.as_tuple(),
            ));
        }
        Ok(())
    }
}

impl From<ScalarGrid2> for Grid2 {
    fn from(grid: ScalarGrid2) -> Self {
        Grid2::Scalar(grid)
    }
}

impl From<CollocatedVectorGrid2> for Grid2 {
    fn from(grid: CollocatedVectorGrid2) -> Self {
        Grid2::Collocated(grid)
    }
}

impl From<FaceCenteredGrid2> for Grid2 {
    fn from(grid: FaceCenteredGrid2) -> Self {
        Grid2::FaceCentered(grid)
    }
}
