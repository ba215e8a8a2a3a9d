//! Composite implicit surface
//!
//! Bounded members are indexed by a lazily rebuilt BVH; unbounded members
//! (planes) cannot be boxed and are scanned linearly on every query.

use std::sync::Arc;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{
    BoundingBox2, ImplicitSurface2, Ray2, Surface2, SurfaceRayIntersection2, SurfaceToImplicit2,
    Transform2,
};
use crate::spatial_index::{Bvh2, BvhCache2};

type SurfaceHandle = Arc<dyn ImplicitSurface2>;

/// Placement of a surface set in world space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSetConfig {
    pub transform: Transform2,
    pub is_normal_flipped: bool,
}

/// Member closest to a query point, with the point already computed
struct ClosestMember<'a> {
    surface: Option<&'a SurfaceHandle>,
    distance: f64,
    point: DVec2,
}

#[derive(Debug, Clone, Default)]
pub struct ImplicitSurfaceSet2 {
    surfaces: Vec<SurfaceHandle>,
    /// Extra handles to the members that report `!is_bounded()`
    unbounded_surfaces: Vec<SurfaceHandle>,
    bvh: BvhCache2<SurfaceHandle>,
    transform: Transform2,
    is_normal_flipped: bool,
}

impl ImplicitSurfaceSet2 {
    pub fn new(surfaces: Vec<SurfaceHandle>) -> Self {
        let mut set = Self::default();
        for surface in surfaces {
            set.add_surface(surface);
        }
        set
    }

    /// Build a set from explicit surfaces, wrapping each in `SurfaceToImplicit2`
    pub fn from_explicit(surfaces: Vec<Arc<dyn Surface2>>) -> Self {
        let mut set = Self::default();
        for surface in surfaces {
            set.add_explicit_surface(surface);
        }
        set
    }

    pub fn with_config(mut self, config: &SurfaceSetConfig) -> Self {
        self.transform = config.transform;
        self.is_normal_flipped = config.is_normal_flipped;
        self
    }

    pub fn number_of_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn surface_at(&self, index: usize) -> &SurfaceHandle {
        &self.surfaces[index]
    }

    pub fn surfaces(&self) -> &[SurfaceHandle] {
        &self.surfaces
    }

    pub fn add_surface(&mut self, surface: SurfaceHandle) {
        if !surface.is_bounded() {
            self.unbounded_surfaces.push(Arc::clone(&surface));
        }
        self.surfaces.push(surface);
        self.bvh.invalidate();
    }

    pub fn add_explicit_surface(&mut self, surface: Arc<dyn Surface2>) {
        self.add_surface(Arc::new(SurfaceToImplicit2::new(surface)));
    }

    /// Drop the cached BVH and rebuild it immediately
    pub fn rebuild_query_engine(&mut self) {
        self.bvh.invalidate();
        self.bvh_tree();
    }

    fn bvh_tree(&self) -> &Bvh2<SurfaceHandle> {
        self.bvh.ensure_current(|| {
            let bounded: Vec<SurfaceHandle> = self
                .surfaces
                .iter()
                .filter(|surface| surface.is_bounded())
                .cloned()
                .collect();
            let bounds: Vec<BoundingBox2> = bounded.iter().map(|s| s.bounding_box()).collect();

            log::debug!(
                "[implicit_surface_set] rebuilding BVH over {} bounded surfaces ({} unbounded)",
                bounded.len(),
                self.unbounded_surfaces.len()
            );
            Bvh2::build(bounded, bounds)
        })
    }

    fn closest_member(&self, point: DVec2) -> ClosestMember<'_> {
        let nearest = self
            .bvh_tree()
            .nearest(point, |surface, p| surface.closest_distance(p));

        let mut best = ClosestMember {
            surface: nearest.item,
            distance: nearest.distance,
            point: nearest
                .item
                .map_or(DVec2::ZERO, |surface| surface.closest_point(point)),
        };

        for surface in &self.unbounded_surfaces {
            let candidate = surface.closest_point(point);
            let distance = candidate.distance(point);
            if distance < best.distance {
                best = ClosestMember {
                    surface: Some(surface),
                    distance,
                    point: candidate,
                };
            }
        }

        best
    }
}

impl Surface2 for ImplicitSurfaceSet2 {
    fn transform(&self) -> &Transform2 {
        &self.transform
    }

    fn is_normal_flipped(&self) -> bool {
        self.is_normal_flipped
    }

    fn closest_point_local(&self, point: DVec2) -> DVec2 {
        self.closest_member(point).point
    }

    fn closest_distance_local(&self, point: DVec2) -> f64 {
        self.closest_member(point).distance
    }

    fn closest_normal_local(&self, point: DVec2) -> DVec2 {
        self.closest_member(point)
            .surface
            .map_or(DVec2::X, |surface| surface.closest_normal(point))
    }

    fn bounding_box_local(&self) -> BoundingBox2 {
        self.bvh_tree().bounding_box()
    }

    fn intersects_local(&self, ray: &Ray2) -> bool {
        self.bvh_tree()
            .intersects(ray, |surface, r| surface.intersects(r))
            || self
                .unbounded_surfaces
                .iter()
                .any(|surface| surface.intersects(ray))
    }

    fn closest_intersection_local(&self, ray: &Ray2) -> SurfaceRayIntersection2 {
        let hit = self
            .bvh_tree()
            .closest_intersection(ray, |surface, r| surface.closest_intersection(r).distance);

        let mut result = hit
            .item
            .map_or_else(SurfaceRayIntersection2::miss, |surface| {
                surface.closest_intersection(ray)
            });

        for surface in &self.unbounded_surfaces {
            let candidate = surface.closest_intersection(ray);
            if candidate.distance < result.distance {
                result = candidate;
            }
        }

        result
    }

    fn is_inside_local(&self, point: DVec2) -> bool {
        self.surfaces.iter().any(|surface| surface.is_inside(point))
    }

    fn is_bounded(&self) -> bool {
        !self.surfaces.is_empty() && self.unbounded_surfaces.is_empty()
    }

    fn is_valid_geometry(&self) -> bool {
        !self.surfaces.is_empty() && self.surfaces.iter().all(|s| s.is_valid_geometry())
    }

    fn update_query_engine(&self) {
        for surface in &self.surfaces {
            surface.update_query_engine();
        }
        self.bvh_tree();
    }
}

impl ImplicitSurface2 for ImplicitSurfaceSet2 {
    fn signed_distance_local(&self, point: DVec2) -> f64 {
        self.surfaces
            .iter()
            .map(|surface| surface.signed_distance(point))
            .fold(f64::MAX, f64::min)
    }
}
