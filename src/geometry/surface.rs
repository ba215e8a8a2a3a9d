//! Explicit and implicit surface traits
//!
//! Every surface answers its queries in local space; the provided world-space
//! methods move points in and out through the surface's `Transform2` and apply
//! the normal flip.

use glam::DVec2;

use super::{BoundingBox2, Ray2, Transform2};

/// Result of casting a ray against a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRayIntersection2 {
    pub is_intersecting: bool,
    /// Ray parameter of the hit, `f64::MAX` when there is none
    pub distance: f64,
    pub point: DVec2,
    pub normal: DVec2,
}

impl Default for SurfaceRayIntersection2 {
    fn default() -> Self {
        Self::miss()
    }
}

impl SurfaceRayIntersection2 {
    pub fn miss() -> Self {
        Self {
            is_intersecting: false,
            distance: f64::MAX,
            point: DVec2::ZERO,
            normal: DVec2::ZERO,
        }
    }

    pub fn hit(distance: f64, point: DVec2, normal: DVec2) -> Self {
        Self {
            is_intersecting: true,
            distance,
            point,
            normal,
        }
    }
}

/// Geometric surface with closest-point, normal, ray and bounds queries
pub trait Surface2: Send + Sync + std::fmt::Debug {
    fn transform(&self) -> &Transform2;

    fn is_normal_flipped(&self) -> bool;

    fn closest_point_local(&self, point: DVec2) -> DVec2;

    fn bounding_box_local(&self) -> BoundingBox2;

    fn closest_intersection_local(&self, ray: &Ray2) -> SurfaceRayIntersection2;

    fn closest_normal_local(&self, point: DVec2) -> DVec2;

    fn intersects_local(&self, ray: &Ray2) -> bool {
        self.closest_intersection_local(ray).is_intersecting
    }

    fn closest_distance_local(&self, point: DVec2) -> f64 {
        point.distance(self.closest_point_local(point))
    }

    fn is_inside_local(&self, point: DVec2) -> bool {
        let closest = self.closest_point_local(point);
        let normal = self.closest_normal_local(point);
        (point - closest).dot(normal) < 0.0
    }

    /// Unbounded surfaces (planes) are kept out of spatial indices
    fn is_bounded(&self) -> bool {
        true
    }

    fn is_valid_geometry(&self) -> bool {
        true
    }

    /// Rebuild any internal acceleration structure now
    fn update_query_engine(&self) {}

    fn closest_point(&self, point: DVec2) -> DVec2 {
        let transform = self.transform();
        transform.to_world(self.closest_point_local(transform.to_local(point)))
    }

    fn closest_distance(&self, point: DVec2) -> f64 {
        self.closest_distance_local(self.transform().to_local(point))
    }

    fn closest_normal(&self, point: DVec2) -> DVec2 {
        let transform = self.transform();
        let normal =
            transform.to_world_direction(self.closest_normal_local(transform.to_local(point)));
        if self.is_normal_flipped() {
            -normal
        } else {
            normal
        }
    }

    fn intersects(&self, ray: &Ray2) -> bool {
        self.intersects_local(&self.transform().to_local_ray(ray))
    }

    fn closest_intersection(&self, ray: &Ray2) -> SurfaceRayIntersection2 {
        let transform = self.transform();
        let mut result = self.closest_intersection_local(&transform.to_local_ray(ray));
        if result.is_intersecting {
            result.point = transform.to_world(result.point);
            result.normal = transform.to_world_direction(result.normal);
            if self.is_normal_flipped() {
                result.normal = -result.normal;
            }
        }
        result
    }

    fn bounding_box(&self) -> BoundingBox2 {
        self.transform().to_world_box(&self.bounding_box_local())
    }

    fn is_inside(&self, point: DVec2) -> bool {
        self.is_normal_flipped() == !self.is_inside_local(self.transform().to_local(point))
    }
}

/// Surface that also exposes a signed distance field (negative inside)
pub trait ImplicitSurface2: Surface2 {
    fn signed_distance_local(&self, point: DVec2) -> f64;

    fn signed_distance(&self, point: DVec2) -> f64 {
        let sd = self.signed_distance_local(self.transform().to_local(point));
        if self.is_normal_flipped() {
            -sd
        } else {
            sd
        }
    }
}
