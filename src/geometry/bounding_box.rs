//! Axis-aligned bounding box
//!
//! Mirrors the engine's AABB helpers: plain data plus small query functions.
//! An empty box has `lower > upper` so that merging it is a no-op.

use glam::DVec2;

use super::Ray2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2 {
    pub lower: DVec2,
    pub upper: DVec2,
}

/// Ray parameters where a ray enters and leaves a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBoxRayIntersection2 {
    pub is_intersecting: bool,
    pub t_near: f64,
    pub t_far: f64,
}

impl Default for BoundingBox2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox2 {
    /// Box spanning the two corner points in any order
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    pub fn empty() -> Self {
        Self {
            lower: DVec2::splat(f64::MAX),
            upper: DVec2::splat(-f64::MAX),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lower.x > self.upper.x || self.lower.y > self.upper.y
    }

    pub fn width(&self) -> f64 {
        self.upper.x - self.lower.x
    }

    pub fn height(&self) -> f64 {
        self.upper.y - self.lower.y
    }

    pub fn mid_point(&self) -> DVec2 {
        (self.lower + self.upper) * 0.5
    }

    /// Index of the longest axis (0 = x, 1 = y)
    pub fn dominant_axis(&self) -> usize {
        if self.width() >= self.height() {
            0
        } else {
            1
        }
    }

    pub fn corner(&self, index: usize) -> DVec2 {
        DVec2::new(
            if index & 1 == 0 { self.lower.x } else { self.upper.x },
            if index & 2 == 0 { self.lower.y } else { self.upper.y },
        )
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.lower.x
            && point.x <= self.upper.x
            && point.y >= self.lower.y
            && point.y <= self.upper.y
    }

    pub fn overlaps(&self, other: &BoundingBox2) -> bool {
        self.lower.x <= other.upper.x
            && self.upper.x >= other.lower.x
            && self.lower.y <= other.upper.y
            && self.upper.y >= other.lower.y
    }

    pub fn merge_point(&mut self, point: DVec2) {
        self.lower = self.lower.min(point);
        self.upper = self.upper.max(point);
    }

    pub fn merge(&mut self, other: &BoundingBox2) {
        self.lower = self.lower.min(other.lower);
        self.upper = self.upper.max(other.upper);
    }

    pub fn merged(&self, other: &BoundingBox2) -> BoundingBox2 {
        let mut result = *self;
        result.merge(other);
        result
    }

    pub fn expand(&mut self, delta: f64) {
        self.lower -= DVec2::splat(delta);
        self.upper += DVec2::splat(delta);
    }

    pub fn clamp(&self, point: DVec2) -> DVec2 {
        point.clamp(self.lower, self.upper)
    }

    /// Distance from `point` to the box; zero when the point is inside
    pub fn distance_to(&self, point: DVec2) -> f64 {
        if self.is_empty() {
            return f64::MAX;
        }
        let d = (self.lower - point).max(point - self.upper).max(DVec2::ZERO);
        d.length()
    }

    /// Slab test for a ray starting at `t = 0`
    pub fn intersects(&self, ray: &Ray2) -> bool {
        self.closest_intersection(ray).is_intersecting
    }

    pub fn closest_intersection(&self, ray: &Ray2) -> BoundingBoxRayIntersection2 {
        let mut t_min = 0.0f64;
        let mut t_max = f64::MAX;
        let miss = BoundingBoxRayIntersection2 {
            is_intersecting: false,
            t_near: f64::MAX,
            t_far: f64::MAX,
        };

        for axis in 0..2 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let box_min = self.lower[axis];
            let box_max = self.upper[axis];

            if dir.abs() < crate::constants::geometry::EPSILON {
                if origin < box_min || origin > box_max {
                    return miss;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let t1 = (box_min - origin) * inv;
            let t2 = (box_max - origin) * inv;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));

            if t_min > t_max {
                return miss;
            }
        }

        BoundingBoxRayIntersection2 {
            is_intersecting: true,
            t_near: t_min,
            t_far: t_max,
        }
    }
}
