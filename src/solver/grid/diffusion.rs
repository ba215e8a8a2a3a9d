//! Explicit viscosity/diffusion step
//!
//! One forward-Euler step of `∂f/∂t = c ∇²f` with a second-order central
//! Laplacian. Stable only while `coefficient < spacing / (12 * dt)`; the
//! bound is not checked.

use std::ops::{Add, Mul, Sub};

use glam::DVec2;

use super::markers::{build_markers, CellMarker};
use crate::array::Array2;
use crate::error::{grid_type_mismatch, resolution_mismatch, FluidResult};
use crate::field::{ConstantScalarField2, ScalarField2};
use crate::grid::{CollocatedVectorGrid2, FaceCenteredGrid2, Grid2, ScalarGrid2};

/// Boundary and fluid SDFs used when the caller has no scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionBoundary {
    pub boundary_sdf: ConstantScalarField2,
    pub fluid_sdf: ConstantScalarField2,
}

impl Default for DiffusionBoundary {
    /// No solid anywhere, fluid everywhere
    fn default() -> Self {
        Self {
            boundary_sdf: ConstantScalarField2::new(f64::MAX),
            fluid_sdf: ConstantScalarField2::new(-f64::MAX),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GridForwardEulerDiffusionSolver2 {
    /// Scratch markers, rebuilt on every solve
    markers: Array2<CellMarker>,
}

impl GridForwardEulerDiffusionSolver2 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffuse `source` into `dest`.
    ///
    /// Both grids must be the same kind and size; otherwise an error is
    /// returned and `dest` is not touched.
    pub fn solve(
        &mut self,
        source: &Grid2,
        diffusion_coefficient: f64,
        time_interval: f64,
        dest: &mut Grid2,
        boundary_sdf: &dyn ScalarField2,
        fluid_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        match (source, dest) {
            (Grid2::Scalar(source), Grid2::Scalar(dest)) => self.solve_scalar(
                source,
                diffusion_coefficient,
                time_interval,
                dest,
                boundary_sdf,
                fluid_sdf,
            ),
            (Grid2::Collocated(source), Grid2::Collocated(dest)) => self.solve_collocated(
                source,
                diffusion_coefficient,
                time_interval,
                dest,
                boundary_sdf,
                fluid_sdf,
            ),
            (Grid2::FaceCentered(source), Grid2::FaceCentered(dest)) => self.solve_face_centered(
                source,
                diffusion_coefficient,
                time_interval,
                dest,
                boundary_sdf,
                fluid_sdf,
            ),
            (source, dest) => Err(grid_type_mismatch(source.kind(), dest.kind())),
        }
    }

    /// `solve` with `DiffusionBoundary::default()`
    pub fn solve_unbounded(
        &mut self,
        source: &Grid2,
        diffusion_coefficient: f64,
        time_interval: f64,
        dest: &mut Grid2,
    ) -> FluidResult<()> {
        let boundary = DiffusionBoundary::default();
        self.solve(
            source,
            diffusion_coefficient,
            time_interval,
            dest,
            &boundary.boundary_sdf,
            &boundary.fluid_sdf,
        )
    }

    pub fn solve_scalar(
        &mut self,
        source: &ScalarGrid2,
        diffusion_coefficient: f64,
        time_interval: f64,
        dest: &mut ScalarGrid2,
        boundary_sdf: &dyn ScalarField2,
        fluid_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        if source.data_size() != dest.data_size() {
            return Err(resolution_mismatch(
                source.data_size().as_tuple(),
                dest.data_size().as_tuple(),
            ));
        }

        build_markers(
            source.data_size(),
            |i, j| source.data_position(i, j),
            boundary_sdf,
            fluid_sdf,
            &mut self.markers,
        );
        diffuse(
            source.data(),
            dest.data_mut(),
            &self.markers,
            source.grid_spacing(),
            diffusion_coefficient * time_interval,
        );
        Ok(())
    }

    pub fn solve_collocated(
        &mut self,
        source: &CollocatedVectorGrid2,
        diffusion_coefficient: f64,
        time_interval: f64,
        dest: &mut CollocatedVectorGrid2,
        boundary_sdf: &dyn ScalarField2,
        fluid_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        if source.data_size() != dest.data_size() {
            return Err(resolution_mismatch(
                source.data_size().as_tuple(),
                dest.data_size().as_tuple(),
            ));
        }

        build_markers(
            source.data_size(),
            |i, j| source.data_position(i, j),
            boundary_sdf,
            fluid_sdf,
            &mut self.markers,
        );
        diffuse(
            source.data(),
            dest.data_mut(),
            &self.markers,
            source.grid_spacing(),
            diffusion_coefficient * time_interval,
        );
        Ok(())
    }

    pub fn solve_face_centered(
        &mut self,
        source: &FaceCenteredGrid2,
        diffusion_coefficient: f64,
        time_interval: f64,
        dest: &mut FaceCenteredGrid2,
        boundary_sdf: &dyn ScalarField2,
        fluid_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        if source.u_size() != dest.u_size() || source.v_size() != dest.v_size() {
            return Err(resolution_mismatch(
                source.resolution().as_tuple(),
                dest.resolution().as_tuple(),
            ));
        }

        let spacing = source.grid_spacing();
        let amount = diffusion_coefficient * time_interval;

        build_markers(
            source.u_size(),
            |i, j| source.u_position(i, j),
            boundary_sdf,
            fluid_sdf,
            &mut self.markers,
        );
        diffuse(source.u(), dest.u_mut(), &self.markers, spacing, amount);

        build_markers(
            source.v_size(),
            |i, j| source.v_position(i, j),
            boundary_sdf,
            fluid_sdf,
            &mut self.markers,
        );
        diffuse(source.v(), dest.v_mut(), &self.markers, spacing, amount);
        Ok(())
    }
}

/// `dest = source + amount * ∇²source` at Fluid samples, `source` elsewhere
fn diffuse<T>(
    source: &Array2<T>,
    dest: &mut Array2<T>,
    markers: &Array2<CellMarker>,
    spacing: DVec2,
    amount: f64,
) where
    T: Copy + Default + Send + Sync + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    dest.parallel_fill_with(|i, j| {
        if markers[(i, j)] == CellMarker::Fluid && amount != 0.0 {
            source[(i, j)] + laplacian(source, markers, spacing, i, j) * amount
        } else {
            source[(i, j)]
        }
    });
}

/// Laplacian using only Fluid neighbours
fn laplacian<T>(
    data: &Array2<T>,
    markers: &Array2<CellMarker>,
    spacing: DVec2,
    i: usize,
    j: usize,
) -> T
where
    T: Copy + Default + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    let size = data.size();
    let center = data[(i, j)];
    let is_fluid = |i: usize, j: usize| markers[(i, j)] == CellMarker::Fluid;

    let mut d_left = T::default();
    let mut d_right = T::default();
    let mut d_down = T::default();
    let mut d_up = T::default();

    if i > 0 && is_fluid(i - 1, j) {
        d_left = center - data[(i - 1, j)];
    }
    if i + 1 < size.x && is_fluid(i + 1, j) {
        d_right = data[(i + 1, j)] - center;
    }
    if j > 0 && is_fluid(i, j - 1) {
        d_down = center - data[(i, j - 1)];
    }
    if j + 1 < size.y && is_fluid(i, j + 1) {
        d_up = data[(i, j + 1)] - center;
    }

    let inv_h2 = 1.0 / (spacing * spacing);
    (d_right - d_left) * inv_h2.x + (d_up - d_down) * inv_h2.y
}
