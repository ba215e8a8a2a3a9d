use glam::DVec2;

use super::{GridGeometry2, LinearSampler2};
use crate::array::{Array2, Size2};
use crate::field::VectorField2;
use crate::geometry::BoundingBox2;

/// Cell-centered vector grid; both components share one sample location
#[derive(Debug, Clone, PartialEq)]
pub struct CollocatedVectorGrid2 {
    geometry: GridGeometry2,
    data: Array2<DVec2>,
}

impl Default for CollocatedVectorGrid2 {
    fn default() -> Self {
        Self::with_geometry(GridGeometry2::default(), DVec2::ZERO)
    }
}

impl CollocatedVectorGrid2 {
    pub fn new(resolution: Size2, grid_spacing: DVec2, origin: DVec2) -> Self {
        Self::with_geometry(GridGeometry2::new(resolution, grid_spacing, origin), DVec2::ZERO)
    }

    pub fn with_geometry(geometry: GridGeometry2, initial: DVec2) -> Self {
        Self {
            geometry,
            data: Array2::with_value(geometry.resolution, initial),
        }
    }

    /// Reallocate for new parameters; every sample is reset to zero
    pub fn resize(&mut self, resolution: Size2, grid_spacing: DVec2, origin: DVec2) {
        self.geometry = GridGeometry2::new(resolution, grid_spacing, origin);
        self.data.resize(resolution, DVec2::ZERO);
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

    pub fn data_size(&self) -> Size2 {
        self.data.size()
    }

    pub fn data_origin(&self) -> DVec2 {
        self.geometry.origin + 0.5 * self.geometry.grid_spacing
    }

    pub fn data_position(&self, i: usize, j: usize) -> DVec2 {
        self.data_origin() + self.geometry.grid_spacing * DVec2::new(i as f64, j as f64)
    }

    pub fn data(&self) -> &Array2<DVec2> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array2<DVec2> {
        &mut self.data
    }

    pub fn fill(&mut self, value: DVec2) {
        self.data.fill(value);
    }

    /// Overwrite every sample with `f(world_position)`
    pub fn parallel_fill_with<F>(&mut self, f: F)
    where
        F: Fn(DVec2) -> DVec2 + Sync + Send,
    {
        let origin = self.data_origin();
        let spacing = self.geometry.grid_spacing;
        self.data.parallel_fill_with(|i, j| {
            f(origin + spacing * DVec2::new(i as f64, j as f64))
        });
    }

    pub fn set(&mut self, other: &CollocatedVectorGrid2) {
        self.geometry = other.geometry;
        self.data.set(&other.data);
    }

    pub fn sample(&self, x: DVec2) -> DVec2 {
        LinearSampler2::new(self.data_size(), self.geometry.grid_spacing, self.data_origin())
            .sample(&self.data, x)
    }

    /// Central-difference divergence at a data point (one-sided at the edges)
    pub fn divergence_at_data_point(&self, i: usize, j: usize) -> f64 {
        let size = self.data_size();
        let spacing = self.geometry.grid_spacing;
        let d = &self.data;

        let left = d[(i.saturating_sub(1), j)].x;
        let right = d[((i + 1).min(size.x - 1), j)].x;
        let down = d[(i, j.saturating_sub(1))].y;
        let up = d[(i, (j + 1).min(size.y - 1))].y;

        0.5 * (right - left) / spacing.x + 0.5 * (up - down) / spacing.y
    }
}

impl std::ops::Index<(usize, usize)> for CollocatedVectorGrid2 {
    type Output = DVec2;

    fn index(&self, index: (usize, usize)) -> &DVec2 {
        &self.data[index]
    }
}

impl std::ops::IndexMut<(usize, usize)> for CollocatedVectorGrid2 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut DVec2 {
        &mut self.data[index]
    }
}

impl VectorField2 for CollocatedVectorGrid2 {
    fn sample(&self, x: DVec2) -> DVec2 {
        CollocatedVectorGrid2::sample(self, x)
    }
}
