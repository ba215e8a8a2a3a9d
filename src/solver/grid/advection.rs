//! Semi-Lagrangian advection
//!
//! Each output sample is the input sampled at the point that the flow carries
//! onto it, found by tracing backwards with midpoint (RK2) steps. The trace
//! stops where it crosses the boundary SDF.

use glam::DVec2;

use crate::error::{grid_type_mismatch, resolution_mismatch, FluidResult};
use crate::field::{ScalarField2, VectorField2};
use crate::grid::{CollocatedVectorGrid2, FaceCenteredGrid2, Grid2, ScalarGrid2};

#[derive(Debug, Clone, Copy, Default)]
pub struct SemiLagrangian2;

impl SemiLagrangian2 {
    pub fn new() -> Self {
        Self
    }

    /// Advect `input` through `flow` into `output`; kinds and sizes must match
    pub fn advect(
        &self,
        input: &Grid2,
        flow: &dyn VectorField2,
        time_interval: f64,
        output: &mut Grid2,
        boundary_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        match (input, output) {
            (Grid2::Scalar(input), Grid2::Scalar(output)) => {
                self.advect_scalar(input, flow, time_interval, output, boundary_sdf)
            }
            (Grid2::Collocated(input), Grid2::Collocated(output)) => {
                self.advect_collocated(input, flow, time_interval, output, boundary_sdf)
            }
            (Grid2::FaceCentered(input), Grid2::FaceCentered(output)) => {
                self.advect_face_centered(input, flow, time_interval, output, boundary_sdf)
            }
            (input, output) => Err(grid_type_mismatch(input.kind(), output.kind())),
        }
    }

    pub fn advect_scalar(
        &self,
        input: &ScalarGrid2,
        flow: &dyn VectorField2,
        time_interval: f64,
        output: &mut ScalarGrid2,
        boundary_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        if input.data_size() != output.data_size() {
            return Err(resolution_mismatch(
                input.data_size().as_tuple(),
                output.data_size().as_tuple(),
            ));
        }

        let h = output.geometry().min_spacing();
        let origin = output.data_origin();
        let spacing = output.grid_spacing();
        output.data_mut().parallel_fill_with(|i, j| {
            let pt = origin + spacing * DVec2::new(i as f64, j as f64);
            let pt0 = back_trace(flow, time_interval, h, pt, boundary_sdf);
            input.sample(pt0)
        });
        Ok(())
    }

    pub fn advect_collocated(
        &self,
        input: &CollocatedVectorGrid2,
        flow: &dyn VectorField2,
        time_interval: f64,
        output: &mut CollocatedVectorGrid2,
        boundary_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        if input.data_size() != output.data_size() {
            return Err(resolution_mismatch(
                input.data_size().as_tuple(),
                output.data_size().as_tuple(),
            ));
        }

        let h = output.geometry().min_spacing();
        let origin = output.data_origin();
        let spacing = output.grid_spacing();
        output.data_mut().parallel_fill_with(|i, j| {
            let pt = origin + spacing * DVec2::new(i as f64, j as f64);
            let pt0 = back_trace(flow, time_interval, h, pt, boundary_sdf);
            input.sample(pt0)
        });
        Ok(())
    }

    pub fn advect_face_centered(
        &self,
        input: &FaceCenteredGrid2,
        flow: &dyn VectorField2,
        time_interval: f64,
        output: &mut FaceCenteredGrid2,
        boundary_sdf: &dyn ScalarField2,
    ) -> FluidResult<()> {
        if input.u_size() != output.u_size() || input.v_size() != output.v_size() {
            return Err(resolution_mismatch(
                input.resolution().as_tuple(),
                output.resolution().as_tuple(),
            ));
        }

        let h = output.geometry().min_spacing();
        let spacing = output.grid_spacing();
        let u_origin = output.u_origin();
        let v_origin = output.v_origin();
        let u_sampler = input.u_sampler();
        let v_sampler = input.v_sampler();

        let (u, v) = output.uv_mut();
        u.parallel_fill_with(|i, j| {
            let pt = u_origin + spacing * DVec2::new(i as f64, j as f64);
            let pt0 = back_trace(flow, time_interval, h, pt, boundary_sdf);
            u_sampler.sample(input.u(), pt0)
        });
        v.parallel_fill_with(|i, j| {
            let pt = v_origin + spacing * DVec2::new(i as f64, j as f64);
            let pt0 = back_trace(flow, time_interval, h, pt, boundary_sdf);
            v_sampler.sample(input.v(), pt0)
        });
        Ok(())
    }
}

/// Departure point of `start` after `dt`, clipped at the boundary surface
pub fn back_trace(
    flow: &dyn VectorField2,
    dt: f64,
    h: f64,
    start: DVec2,
    boundary_sdf: &dyn ScalarField2,
) -> DVec2 {
    let mut remaining = dt;
    let mut pt0 = start;
    let mut pt1 = start;

    while remaining > f64::EPSILON {
        let vel0 = flow.sample(pt0);
        let sub_steps = (vel0.length() * remaining / h).ceil().max(1.0);
        let step = remaining / sub_steps;

        let mid = pt0 - 0.5 * step * vel0;
        let mid_vel = flow.sample(mid);
        pt1 = pt0 - step * mid_vel;

        let phi0 = boundary_sdf.sample(pt0);
        let phi1 = boundary_sdf.sample(pt1);
        if phi0 * phi1 < 0.0 {
            let w = phi1.abs() / (phi0.abs() + phi1.abs());
            pt1 = w * pt0 + (1.0 - w) * pt1;
            break;
        }

        remaining -= step;
        pt0 = pt1;
    }

    pt1
}
