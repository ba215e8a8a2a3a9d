use std::sync::Arc;

use glam::DVec2;

use crate::geometry::ImplicitSurface2;

/// Closest-surface query result used during collision resolution
#[derive(Debug, Clone, Copy)]
struct ColliderQuery {
    distance: f64,
    point: DVec2,
    normal: DVec2,
    velocity: DVec2,
}

/// Rigid collider wrapping an implicit surface.
///
/// Moves with a linear velocity plus an angular velocity about the surface's
/// translation; particles are pushed out of it with restitution and Coulomb
/// friction.
#[derive(Debug, Clone)]
pub struct Collider2 {
    surface: Arc<dyn ImplicitSurface2>,
    friction_coefficient: f64,
    linear_velocity: DVec2,
    /// Radians per second, counter-clockwise
    angular_velocity: f64,
}

impl Collider2 {
    pub fn new(surface: Arc<dyn ImplicitSurface2>) -> Self {
        Self {
            surface,
            friction_coefficient: 0.0,
            linear_velocity: DVec2::ZERO,
            angular_velocity: 0.0,
        }
    }

    /// Negative coefficients are clamped to zero
    pub fn with_friction(mut self, friction_coefficient: f64) -> Self {
        self.friction_coefficient = friction_coefficient.max(0.0);
        self
    }

    pub fn with_linear_velocity(mut self, linear_velocity: DVec2) -> Self {
        self.linear_velocity = linear_velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn surface(&self) -> &Arc<dyn ImplicitSurface2> {
        &self.surface
    }

    pub fn friction_coefficient(&self) -> f64 {
        self.friction_coefficient
    }

    pub fn linear_velocity(&self) -> DVec2 {
        self.linear_velocity
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Rigid-body velocity of the collider at world point `point`
    pub fn velocity_at(&self, point: DVec2) -> DVec2 {
        let r = point - self.surface.transform().translation;
        self.linear_velocity + self.angular_velocity * r.perp()
    }

    /// True if a particle of `radius` at `position` overlaps the collider
    pub fn is_penetrating(&self, position: DVec2, radius: f64) -> bool {
        self.surface.signed_distance(position) < radius
    }

    fn query(&self, position: DVec2) -> ColliderQuery {
        let point = self.surface.closest_point(position);
        ColliderQuery {
            distance: self.surface.closest_distance(position),
            point,
            normal: self.surface.closest_normal(position),
            velocity: self.velocity_at(point),
        }
    }

    /// Push a penetrating particle back onto the surface (offset by `radius`)
    /// and reflect the inward part of its velocity relative to the collider.
    ///
    /// `restitution` scales the reflected normal component; friction scales
    /// down the tangential component in proportion to the normal impulse.
    pub fn resolve_collision(
        &self,
        radius: f64,
        restitution: f64,
        position: &mut DVec2,
        velocity: &mut DVec2,
    ) {
        if !self.is_penetrating(*position, radius) {
            return;
        }

        let hit = self.query(*position);
        if !hit.distance.is_finite() || hit.distance == f64::MAX {
            return;
        }

        let normal = hit.normal;
        let target_point = hit.point + radius * normal;

        let relative_velocity = *velocity - hit.velocity;
        let normal_dot_relative = normal.dot(relative_velocity);
        let mut relative_normal = normal_dot_relative * normal;
        let mut relative_tangent = relative_velocity - relative_normal;

        if normal_dot_relative < 0.0 {
            let delta_normal = (-restitution - 1.0) * relative_normal;
            relative_normal *= -restitution;

            let tangent_length = relative_tangent.length();
            if tangent_length > 0.0 {
                let friction_scale =
                    (1.0 - self.friction_coefficient * delta_normal.length() / tangent_length)
                        .max(0.0);
                relative_tangent *= friction_scale;
            }

            *velocity = relative_normal + relative_tangent + hit.velocity;
        }

        *position = target_point;
    }
}
