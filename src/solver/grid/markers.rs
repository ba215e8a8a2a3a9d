use glam::DVec2;

use crate::array::{Array2, Size2};
use crate::field::ScalarField2;

/// Classification of a grid sample against the boundary and fluid SDFs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CellMarker {
    #[default]
    Air,
    Fluid,
    Boundary,
}

pub fn is_inside_sdf(phi: f64) -> bool {
    phi < 0.0
}

/// Mark every sample: Boundary inside the boundary SDF, otherwise Fluid
/// inside the fluid SDF, otherwise Air
pub fn build_markers<P>(
    size: Size2,
    position: P,
    boundary_sdf: &dyn ScalarField2,
    fluid_sdf: &dyn ScalarField2,
    markers: &mut Array2<CellMarker>,
) where
    P: Fn(usize, usize) -> DVec2 + Sync + Send,
{
    if markers.size() != size {
        markers.resize(size, CellMarker::Air);
    }
    markers.parallel_fill_with(|i, j| {
        let x = position(i, j);
        if is_inside_sdf(boundary_sdf.sample(x)) {
            CellMarker::Boundary
        } else if is_inside_sdf(fluid_sdf.sample(x)) {
            CellMarker::Fluid
        } else {
            CellMarker::Air
        }
    });
}
