use glam::DVec2;

use super::{BoundingBox2, Ray2, Surface2, SurfaceRayIntersection2, Transform2};

/// Axis-aligned box surface (axis-aligned in its local frame)
#[derive(Debug, Clone, PartialEq)]
pub struct Box2 {
    pub bound: BoundingBox2,
    pub transform: Transform2,
    pub is_normal_flipped: bool,
}

const FACE_NORMALS: [DVec2; 4] = [
    DVec2::new(1.0, 0.0),
    DVec2::new(-1.0, 0.0),
    DVec2::new(0.0, 1.0),
    DVec2::new(0.0, -1.0),
];

impl Box2 {
    pub fn new(lower: DVec2, upper: DVec2) -> Self {
        Self {
            bound: BoundingBox2::new(lower, upper),
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

    /// Face index and signed offset of the face nearest to an interior point
    fn nearest_face(&self, point: DVec2) -> (usize, f64) {
        let distances = [
            self.bound.upper.x - point.x,
            point.x - self.bound.lower.x,
            self.bound.upper.y - point.y,
            point.y - self.bound.lower.y,
        ];
        let mut best = 0;
        for face in 1..4 {
            if distances[face] < distances[best] {
                best = face;
            }
        }
        (best, distances[best])
    }
}

impl Surface2 for Box2 {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn is_normal_flipped(&self) -> bool {
        self.is_normal_flipped
    }

    fn closest_point_local(&self, point: DVec2) -> DVec2 {
        if self.bound.contains(point) {
            let (face, distance) = self.nearest_face(point);
            point + FACE_NORMALS[face] * distance
        } else {
            self.bound.clamp(point)
        }
    }

    fn closest_normal_local(&self, point: DVec2) -> DVec2 {
        if self.bound.contains(point) {
            let (face, _) = self.nearest_face(point);
            return FACE_NORMALS[face];
        }

        let r = point - self.bound.clamp(point);
        let mut best = FACE_NORMALS[0];
        let mut best_dot = r.dot(best);
        for normal in &FACE_NORMALS[1..] {
            let d = r.dot(*normal);
            if d > best_dot {
                best_dot = d;
                best = *normal;
            }
        }
        best
    }

    fn bounding_box_local(&self) -> BoundingBox2 {
        self.bound
    }

    fn closest_intersection_local(&self, ray: &Ray2) -> SurfaceRayIntersection2 {
        let hit = self.bound.closest_intersection(ray);
        if !hit.is_intersecting {
            return SurfaceRayIntersection2::miss();
        }

        // From inside the box the first boundary crossing is the exit point
        let t = if self.bound.contains(ray.origin) {
            hit.t_far
        } else {
            hit.t_near
        };
        let point = ray.point_at(t);
        SurfaceRayIntersection2::hit(t, point, self.closest_normal_local(point))
    }

    fn is_inside_local(&self, point: DVec2) -> bool {
        self.bound.contains(point)
    }

    fn is_valid_geometry(&self) -> bool {
        !self.bound.is_empty()
    }
}
