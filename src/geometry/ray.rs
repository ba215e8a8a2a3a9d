use glam::DVec2;

/// Half-line starting at `origin`, `direction` is kept normalized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    pub origin: DVec2,
    pub direction: DVec2,
}

impl Ray2 {
    pub fn new(origin: DVec2, direction: DVec2) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, t: f64) -> DVec2 {
        self.origin + self.direction * t
    }
}
