use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{GridGeometry2, LinearSampler2};
use crate::array::{Array2, Size2};
use crate::field::ScalarField2;
use crate::geometry::BoundingBox2;

/// Where a scalar grid stores its samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarGridLayout {
    /// One sample per cell, at the cell center
    #[default]
    CellCentered,
    /// One sample per cell corner
    VertexCentered,
}

/// Scalar grid, cell-centered or vertex-centered
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid2 {
    geometry: GridGeometry2,
    layout: ScalarGridLayout,
    data: Array2<f64>,
}

impl Default for ScalarGrid2 {
    fn default() -> Self {
        Self::with_geometry(ScalarGridLayout::CellCentered, GridGeometry2::default(), 0.0)
    }
}

impl ScalarGrid2 {
    pub fn new(
        layout: ScalarGridLayout,
        resolution: Size2,
        grid_spacing: DVec2,
        origin: DVec2,
    ) -> Self {
        Self::with_geometry(layout, GridGeometry2::new(resolution, grid_spacing, origin), 0.0)
    }

    pub fn cell_centered(resolution: Size2, grid_spacing: DVec2, origin: DVec2) -> Self {
        Self::new(ScalarGridLayout::CellCentered, resolution, grid_spacing, origin)
    }

    pub fn vertex_centered(resolution: Size2, grid_spacing: DVec2, origin: DVec2) -> Self {
        Self::new(ScalarGridLayout::VertexCentered, resolution, grid_spacing, origin)
    }

    pub fn with_geometry(layout: ScalarGridLayout, geometry: GridGeometry2, initial: f64) -> Self {
        let size = data_size_for(layout, geometry.resolution);
        Self {
            geometry,
            layout,
            data: Array2::with_value(size, initial),
        }
    }

    /// Reallocate for new parameters; every sample is reset to zero
    pub fn resize(&mut self, resolution: Size2, grid_spacing: DVec2, origin: DVec2) {
        self.geometry = GridGeometry2::new(resolution, grid_spacing, origin);
        self.data
            .resize(data_size_for(self.layout, resolution), 0.0);
    }

    pub fn geometry(&self) -> &GridGeometry2 {
        &self.geometry
    }

    pub fn layout(&self) -> ScalarGridLayout {
        self.layout
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

    /// World position of sample `(0, 0)`
    pub fn data_origin(&self) -> DVec2 {
        match self.layout {
            ScalarGridLayout::CellCentered => {
                self.geometry.origin + 0.5 * self.geometry.grid_spacing
            }
            ScalarGridLayout::VertexCentered => self.geometry.origin,
        }
    }

    pub fn data_position(&self, i: usize, j: usize) -> DVec2 {
        self.data_origin() + self.geometry.grid_spacing * DVec2::new(i as f64, j as f64)
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array2<f64> {
        &mut self.data
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Overwrite every sample with `f(world_position)`
    pub fn parallel_fill_with<F>(&mut self, f: F)
    where
        F: Fn(DVec2) -> f64 + Sync + Send,
    {
        let origin = self.data_origin();
        let spacing = self.geometry.grid_spacing;
        self.data.parallel_fill_with(|i, j| {
            f(origin + spacing * DVec2::new(i as f64, j as f64))
        });
    }

    /// Deep copy of `other`'s parameters and samples
    pub fn set(&mut self, other: &ScalarGrid2) {
        self.geometry = other.geometry;
        self.layout = other.layout;
        self.data.set(&other.data);
    }

    pub fn sampler(&self) -> LinearSampler2 {
        LinearSampler2::new(self.data_size(), self.geometry.grid_spacing, self.data_origin())
    }

    /// Bilinear sample at a world position
    pub fn sample(&self, x: DVec2) -> f64 {
        self.sampler().sample(&self.data, x)
    }

    /// Central-difference gradient at a data point (one-sided at the edges)
    pub fn gradient_at_data_point(&self, i: usize, j: usize) -> DVec2 {
        let size = self.data_size();
        let spacing = self.geometry.grid_spacing;
        let d = &self.data;

        let left = d[(i.saturating_sub(1), j)];
        let right = d[((i + 1).min(size.x - 1), j)];
        let down = d[(i, j.saturating_sub(1))];
        let up = d[(i, (j + 1).min(size.y - 1))];

        DVec2::new(0.5 * (right - left) / spacing.x, 0.5 * (up - down) / spacing.y)
    }
}

impl std::ops::Index<(usize, usize)> for ScalarGrid2 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[index]
    }
}

impl std::ops::IndexMut<(usize, usize)> for ScalarGrid2 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[index]
    }
}

impl ScalarField2 for ScalarGrid2 {
    fn sample(&self, x: DVec2) -> f64 {
        ScalarGrid2::sample(self, x)
    }
}

fn data_size_for(layout: ScalarGridLayout, resolution: Size2) -> Size2 {
    match layout {
        ScalarGridLayout::CellCentered => resolution,
        ScalarGridLayout::VertexCentered => {
            if resolution.x == 0 || resolution.y == 0 {
                Size2::new(0, 0)
            } else {
                Size2::new(resolution.x + 1, resolution.y + 1)
            }
        }
    }
}
