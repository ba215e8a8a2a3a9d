use std::sync::Arc;

use glam::DVec2;

use super::{BoundingBox2, ImplicitSurface2, Ray2, Surface2, SurfaceRayIntersection2, Transform2};

/// Adapter exposing an explicit surface as an implicit one.
///
/// The signed distance is the wrapped surface's closest distance, negated
/// when the point is inside it.
#[derive(Debug, Clone)]
pub struct SurfaceToImplicit2 {
    surface: Arc<dyn Surface2>,
    transform: Transform2,
    is_normal_flipped: bool,
}

impl SurfaceToImplicit2 {
    pub fn new(surface: Arc<dyn Surface2>) -> Self {
        Self {
            surface,
            transform: Transform2::identity(),
            is_normal_flipped: false,
        }
    }

    pub fn with_transform(mut self, transform: Transform2) -> Self {
        self.transform = transform;
        self
    }

    pub fn surface(&self) -> &Arc<dyn Surface2> {
        &self.surface
    }
}

impl Surface2 for SurfaceToImplicit2 {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn is_normal_flipped(&self) -> bool {
        self.is_normal_flipped
    }

    fn closest_point_local(&self, point: DVec2) -> DVec2 {
        self.surface.closest_point(point)
    }

    fn closest_distance_local(&self, point: DVec2) -> f64 {
        self.surface.closest_distance(point)
    }

    fn closest_normal_local(&self, point: DVec2) -> DVec2 {
        self.surface.closest_normal(point)
    }

    fn bounding_box_local(&self) -> BoundingBox2 {
        self.surface.bounding_box()
    }

    fn intersects_local(&self, ray: &Ray2) -> bool {
        self.surface.intersects(ray)
    }

    fn closest_intersection_local(&self, ray: &Ray2) -> SurfaceRayIntersection2 {
        self.surface.closest_intersection(ray)
    }

    fn is_inside_local(&self, point: DVec2) -> bool {
        self.surface.is_inside(point)
    }

    fn is_bounded(&self) -> bool {
        self.surface.is_bounded()
    }

    fn is_valid_geometry(&self) -> bool {
        self.surface.is_valid_geometry()
    }

    fn update_query_engine(&self) {
        self.surface.update_query_engine();
    }
}

impl ImplicitSurface2 for SurfaceToImplicit2 {
    fn signed_distance_local(&self, point: DVec2) -> f64 {
        let distance = self.surface.closest_distance(point);
        if self.surface.is_inside(point) {
            -distance
        } else {
            distance
        }
    }
}
