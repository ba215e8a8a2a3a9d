//! Staggered (MAC) velocity grid
//!
//! `u` lives on vertical cell faces, `(res.x + 1) × res.y` samples; `v` lives
//! on horizontal faces, `res.x × (res.y + 1)` samples. Face `(i, j)` of `u` is
//! the left face of cell `(i, j)`, face `(i, j)` of `v` its bottom face.

use glam::DVec2;

use super::{GridGeometry2, LinearSampler2};
use crate::array::{Array2, Size2};
use crate::field::VectorField2;
use crate::geometry::BoundingBox2;

#[derive(Debug, Clone, PartialEq)]
pub struct FaceCenteredGrid2 {
    geometry: GridGeometry2,
    u: Array2<f64>,
    v: Array2<f64>,
}

impl Default for FaceCenteredGrid2 {
    fn default() -> Self {
        Self::with_geometry(GridGeometry2::default(), DVec2::ZERO)
    }
}

fn u_size_for(resolution: Size2) -> Size2 {
    Size2::new(resolution.x + 1, resolution.y)
}

fn v_size_for(resolution: Size2) -> Size2 {
    Size2::new(resolution.x, resolution.y + 1)
}

impl FaceCenteredGrid2 {
    pub fn new(resolution: Size2, grid_spacing: DVec2, origin: DVec2) -> Self {
        Self::with_geometry(GridGeometry2::new(resolution, grid_spacing, origin), DVec2::ZERO)
    }

    pub fn with_geometry(geometry: GridGeometry2, initial: DVec2) -> Self {
        Self {
            geometry,
            u: Array2::with_value(u_size_for(geometry.resolution), initial.x),
            v: Array2::with_value(v_size_for(geometry.resolution), initial.y),
        }
    }

    /// Reallocate for new parameters; every face is reset to zero
    pub fn resize(&mut self, resolution: Size2, grid_spacing: DVec2, origin: DVec2) {
        self.geometry = GridGeometry2::new(resolution, grid_spacing, origin);
        self.u.resize(u_size_for(resolution), 0.0);
        self.v.resize(v_size_for(resolution), 0.0);
    }

    pub fn geometry(&self) -> &GridGeometry2 {
        &self.geometry
    }

    pub fn resolution(&self) -> Size2 {
        self.geometry.resolution
    }

    pub fn grid_spacing(&self) -> DVec2 {
        self.geometry.grid_spacing
    }

    pub fn origin(&self) -> DVec2 {
        self.geometry.origin
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.geometry.bounding_box()
    }

    pub fn u(&self) -> &Array2<f64> {
        &self.u
    }

    pub fn v(&self) -> &Array2<f64> {
        &self.v
    }

    pub fn u_mut(&mut self) -> &mut Array2<f64> {
        &mut self.u
    }

    pub fn v_mut(&mut self) -> &mut Array2<f64> {
        &mut self.v
    }

    /// Both components at once, for kernels that write `u` and `v` together
    pub fn uv_mut(&mut self) -> (&mut Array2<f64>, &mut Array2<f64>) {
        (&mut self.u, &mut self.v)
    }

    pub fn u_size(&self) -> Size2 {
        self.u.size()
    }

    pub fn v_size(&self) -> Size2 {
        self.v.size()
    }

    pub fn u_origin(&self) -> DVec2 {
        self.geometry.origin + DVec2::new(0.0, 0.5 * self.geometry.grid_spacing.y)
    }

    pub fn v_origin(&self) -> DVec2 {
        self.geometry.origin + DVec2::new(0.5 * self.geometry.grid_spacing.x, 0.0)
    }

    pub fn u_position(&self, i: usize, j: usize) -> DVec2 {
        self.u_origin() + self.geometry.grid_spacing * DVec2::new(i as f64, j as f64)
    }

    pub fn v_position(&self, i: usize, j: usize) -> DVec2 {
        self.v_origin() + self.geometry.grid_spacing * DVec2::new(i as f64, j as f64)
    }

    pub fn u_sampler(&self) -> LinearSampler2 {
        LinearSampler2::new(self.u_size(), self.geometry.grid_spacing, self.u_origin())
    }

    pub fn v_sampler(&self) -> LinearSampler2 {
        LinearSampler2::new(self.v_size(), self.geometry.grid_spacing, self.v_origin())
    }

    pub fn fill(&mut self, value: DVec2) {
        self.u.fill(value.x);
        self.v.fill(value.y);
    }

    /// Overwrite every face with the matching component of `f(face_position)`
    pub fn parallel_fill_with<F>(&mut self, f: F)
    where
        F: Fn(DVec2) -> DVec2 + Sync + Send,
    {
        let spacing = self.geometry.grid_spacing;
        let u_origin = self.u_origin();
        let v_origin = self.v_origin();
        self.u.parallel_fill_with(|i, j| {
            f(u_origin + spacing * DVec2::new(i as f64, j as f64)).x
        });
        self.v.parallel_fill_with(|i, j| {
            f(v_origin + spacing * DVec2::new(i as f64, j as f64)).y
        });
    }

    pub fn set(&mut self, other: &FaceCenteredGrid2) {
        self.geometry = other.geometry;
        self.u.set(&other.u);
        self.v.set(&other.v);
    }

    /// Average of the four faces around cell `(i, j)`
    pub fn value_at_cell_center(&self, i: usize, j: usize) -> DVec2 {
        DVec2::new(
            0.5 * (self.u[(i, j)] + self.u[(i + 1, j)]),
            0.5 * (self.v[(i, j)] + self.v[(i, j + 1)]),
        )
    }

    pub fn divergence_at_cell_center(&self, i: usize, j: usize) -> f64 {
        let spacing = self.geometry.grid_spacing;
        (self.u[(i + 1, j)] - self.u[(i, j)]) / spacing.x
            + (self.v[(i, j + 1)] - self.v[(i, j)]) / spacing.y
    }

    /// Largest face speed, used for CFL estimates
    pub fn max_abs_component(&self) -> f64 {
        self.u
            .iter()
            .chain(self.v.iter())
            .fold(0.0, |acc: f64, value| acc.max(value.abs()))
    }

    pub fn sample(&self, x: DVec2) -> DVec2 {
        DVec2::new(
            self.u_sampler().sample(&self.u, x),
            self.v_sampler().sample(&self.v, x),
        )
    }
}

impl VectorField2 for FaceCenteredGrid2 {
    fn sample(&self, x: DVec2) -> DVec2 {
        FaceCenteredGrid2::sample(self, x)
    }
}
