use glam::DVec2;

use super::{BoundingBox2, Ray2, Surface2, SurfaceRayIntersection2, Transform2};
use crate::constants::geometry::EPSILON;

/// Infinite line (2-D plane); the only unbounded primitive
#[derive(Debug, Clone, PartialEq)]
pub struct Plane2 {
    pub normal: DVec2,
    pub point: DVec2,
    pub transform: Transform2,
    pub is_normal_flipped: bool,
}

impl Plane2 {
    pub fn new(normal: DVec2, point: DVec2) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            point,
            transform: Transform2::identity(),
            is_normal_flipped: false,
        }
    }

    pub fn with_transform(mut self, transform: Transform2) -> Self {
        self.transform = transform;
        self
    }
}

impl Surface2 for Plane2 {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn is_normal_flipped(&self) -> bool {
        self.is_normal_flipped
    }

    fn closest_point_local(&self, point: DVec2) -> DVec2 {
        point - self.normal * self.normal.dot(point - self.point)
    }

    fn closest_distance_local(&self, point: DVec2) -> f64 {
        self.normal.dot(point - self.point).abs()
    }

    fn closest_normal_local(&self, _point: DVec2) -> DVec2 {
        self.normal
    }

    fn bounding_box_local(&self) -> BoundingBox2 {
        BoundingBox2 {
            lower: DVec2::splat(-f64::MAX),
            upper: DVec2::splat(f64::MAX),
        }
    }

    fn closest_intersection_local(&self, ray: &Ray2) -> SurfaceRayIntersection2 {
        let d_dot_n = ray.direction.dot(self.normal);
        if d_dot_n.abs() <= EPSILON {
            return SurfaceRayIntersection2::miss();
        }

        let t = self.normal.dot(self.point - ray.origin) / d_dot_n;
        if t < 0.0 {
            return SurfaceRayIntersection2::miss();
        }

        SurfaceRayIntersection2::hit(t, ray.point_at(t), self.normal)
    }

    fn is_inside_local(&self, point: DVec2) -> bool {
        self.normal.dot(point - self.point) < 0.0
    }

    fn is_bounded(&self) -> bool {
        false
    }

    fn is_valid_geometry(&self) -> bool {
        self.normal.length_squared() > 0.0
    }
}
