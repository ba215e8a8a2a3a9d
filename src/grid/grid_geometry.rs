use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::array::Size2;
use crate::error::{invalid_config, FluidResult};
use crate::geometry::BoundingBox2;

/// Resolution, spacing and origin shared by every grid kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGeometry2 {
    pub resolution: Size2,
    pub grid_spacing: DVec2,
    pub origin: DVec2,
}

impl Default for GridGeometry2 {
    fn default() -> Self {
        Self {
            resolution: Size2::new(1, 1),
            grid_spacing: DVec2::ONE,
            origin: DVec2::ZERO,
        }
    }
}

impl GridGeometry2 {
    pub fn new(resolution: Size2, grid_spacing: DVec2, origin: DVec2) -> Self {
        Self {
            resolution,
            grid_spacing,
            origin,
        }
    }

    /// World-space box covering all cells
    pub fn bounding_box(&self) -> BoundingBox2 {
        let extent = DVec2::new(self.resolution.x as f64, self.resolution.y as f64)
            * self.grid_spacing;
        BoundingBox2::new(self.origin, self.origin + extent)
    }

    pub fn cell_center_position(&self, i: usize, j: usize) -> DVec2 {
        self.origin + self.grid_spacing * DVec2::new(i as f64 + 0.5, j as f64 + 0.5)
    }

    /// Smallest spacing over both axes
    pub fn min_spacing(&self) -> f64 {
        self.grid_spacing.min_element()
    }

    pub fn validate(&self) -> FluidResult<()> {
        if self.resolution.x == 0 || self.resolution.y == 0 {
            return Err(invalid_config(
                "resolution",
                format!("must be non-zero, got {:?}", self.resolution.as_tuple()),
            ));
        }
        if !(self.grid_spacing.x > 0.0 && self.grid_spacing.y > 0.0) {
            return Err(invalid_config(
                "grid_spacing",
                format!("must be positive, got {}", self.grid_spacing),
            ));
        }
        if !self.origin.is_finite() {
            return Err(invalid_config("origin", "must be finite"));
        }
        Ok(())
    }
}
