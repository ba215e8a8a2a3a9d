use glam::DVec2;

use super::{BoundingBox2, Ray2, Surface2, SurfaceRayIntersection2, Transform2};

/// Circle (2-D sphere) surface
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere2 {
    pub center: DVec2,
    pub radius: f64,
    pub transform: Transform2,
    pub is_normal_flipped: bool,
}

impl Sphere2 {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self {
            center,
            radius,
            transform: Transform2::identity(),
            is_normal_flipped: false,
        }
    }

    pub fn with_transform(mut self, transform: Transform2) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_normal_flipped(mut self, flipped: bool) -> Self {
        self.is_normal_flipped = flipped;
        self
    }
}

impl Surface2 for Sphere2 {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn is_normal_flipped(&self) -> bool {
        self.is_normal_flipped
    }

    fn closest_point_local(&self, point: DVec2) -> DVec2 {
        self.center + self.radius * self.closest_normal_local(point)
    }

    fn closest_distance_local(&self, point: DVec2) -> f64 {
        (point.distance(self.center) - self.radius).abs()
    }

    fn closest_normal_local(&self, point: DVec2) -> DVec2 {
        let r = point - self.center;
        if r.length_squared() > 0.0 {
            r.normalize()
        } else {
            DVec2::X
        }
    }

    fn bounding_box_local(&self) -> BoundingBox2 {
        let r = DVec2::splat(self.radius);
        BoundingBox2::new(self.center - r, self.center + r)
    }

    fn closest_intersection_local(&self, ray: &Ray2) -> SurfaceRayIntersection2 {
        let r = ray.origin - self.center;
        let b = ray.direction.dot(r);
        let c = r.length_squared() - self.radius * self.radius;
        let d = b * b - c;

        if d <= 0.0 {
            return SurfaceRayIntersection2::miss();
        }

        let d = d.sqrt();
        let mut t = -b - d;
        if t < 0.0 {
            t = -b + d;
        }
        if t < 0.0 {
            return SurfaceRayIntersection2::miss();
        }

        let point = ray.point_at(t);
        SurfaceRayIntersection2::hit(t, point, (point - self.center).normalize_or_zero())
    }

    fn is_inside_local(&self, point: DVec2) -> bool {
        point.distance_squared(self.center) < self.radius * self.radius
    }

    fn is_valid_geometry(&self) -> bool {
        self.radius >= 0.0
    }
}
