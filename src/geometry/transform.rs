//! Rigid 2-D transform (rotation then translation)

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{BoundingBox2, Ray2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform2 {
    pub translation: DVec2,
    /// Rotation in radians, counter-clockwise
    pub orientation: f64,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2 {
    pub fn new(translation: DVec2, orientation: f64) -> Self {
        Self {
            translation,
            orientation,
        }
    }

    pub fn identity() -> Self {
        Self {
            translation: DVec2::ZERO,
            orientation: 0.0,
        }
    }

    pub fn from_translation(translation: DVec2) -> Self {
        Self::new(translation, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        self.translation == DVec2::ZERO && self.orientation == 0.0
    }

    fn rotation(&self) -> DVec2 {
        DVec2::from_angle(self.orientation)
    }

    fn inverse_rotation(&self) -> DVec2 {
        DVec2::from_angle(-self.orientation)
    }

    pub fn to_local(&self, point_in_world: DVec2) -> DVec2 {
        self.inverse_rotation().rotate(point_in_world - self.translation)
    }

    pub fn to_local_direction(&self, dir_in_world: DVec2) -> DVec2 {
        self.inverse_rotation().rotate(dir_in_world)
    }

    pub fn to_local_ray(&self, ray_in_world: &Ray2) -> Ray2 {
        Ray2::new(
            self.to_local(ray_in_world.origin),
            self.to_local_direction(ray_in_world.direction),
        )
    }

    pub fn to_world(&self, point_in_local: DVec2) -> DVec2 {
        self.rotation().rotate(point_in_local) + self.translation
    }

    pub fn to_world_direction(&self, dir_in_local: DVec2) -> DVec2 {
        self.rotation().rotate(dir_in_local)
    }

    /// World-space box enclosing the transformed local box
    pub fn to_world_box(&self, box_in_local: &BoundingBox2) -> BoundingBox2 {
        if box_in_local.is_empty() {
            return *box_in_local;
        }
        let mut result = BoundingBox2::empty();
        for corner in 0..4 {
            result.merge_point(self.to_world(box_in_local.corner(corner)));
        }
        result
    }
}
