use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::geometry::{BoundingBox2, Ray2};

fn circle_items(centers: &[DVec2], radius: f64) -> (Vec<DVec2>, Vec<BoundingBox2>) {
    let bounds = centers
        .iter()
        .map(|c| BoundingBox2::new(*c - DVec2::splat(radius), *c + DVec2::splat(radius)))
        .collect();
    (centers.to_vec(), bounds)
}

fn circle_distance(center: &DVec2, point: DVec2) -> f64 {
    (center.distance(point) - 0.5).abs()
}

#[test]
fn test_empty_tree_reports_no_match() {
    let bvh: Bvh2<DVec2> = Bvh2::build(Vec::new(), Vec::new());
    assert!(bvh.is_empty());
    assert!(bvh.bounding_box().is_empty());

    let result = bvh.nearest(DVec2::ZERO, circle_distance);
    assert!(result.item.is_none());
    assert_eq!(result.distance, f64::MAX);

    let ray = Ray2::new(DVec2::ZERO, DVec2::X);
    assert!(!bvh.intersects(&ray, |_, _| true));
    let hit = bvh.closest_intersection(&ray, |_, _| 0.0);
    assert!(hit.item.is_none());
    assert_eq!(hit.distance, f64::MAX);
}

#[test]
fn test_nearest_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    let centers: Vec<DVec2> = (0..64)
        .map(|_| DVec2::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0)))
        .collect();
    let (items, bounds) = circle_items(&centers, 0.5);
    let bvh = Bvh2::build(items, bounds);
    assert_eq!(bvh.len(), 64);

    for _ in 0..200 {
        let query = DVec2::new(rng.gen_range(-40.0..40.0), rng.gen_range(-40.0..40.0));
        let expected = centers
            .iter()
            .map(|c| circle_distance(c, query))
            .fold(f64::MAX, f64::min);

        let result = bvh.nearest(query, circle_distance);
        assert!(result.item.is_some());
        assert!((result.distance - expected).abs() < 1e-12);
    }
}

#[test]
fn test_bounding_box_covers_all_items() {
    let centers = [DVec2::new(-3.0, 1.0), DVec2::new(4.0, -2.0), DVec2::new(0.0, 5.0)];
    let (items, bounds) = circle_items(&centers, 0.5);
    let bvh = Bvh2::build(items, bounds);

    let bound = bvh.bounding_box();
    assert_eq!(bound.lower, DVec2::new(-3.5, -2.5));
    assert_eq!(bound.upper, DVec2::new(4.5, 5.5));
}

#[test]
fn test_ray_queries_report_first_hit() {
    let centers = [DVec2::new(2.0, 0.0), DVec2::new(6.0, 0.0), DVec2::new(0.0, 8.0)];
    let (items, bounds) = circle_items(&centers, 0.5);
    let bvh = Bvh2::build(items, bounds);

    let hit_distance = |center: &DVec2, ray: &Ray2| {
        // Rays in these tests run along +x through circle centers
        if (center.y - ray.origin.y).abs() < 1e-9 && center.x > ray.origin.x {
            center.x - 0.5 - ray.origin.x
        } else {
            f64::MAX
        }
    };

    let ray = Ray2::new(DVec2::ZERO, DVec2::X);
    assert!(bvh.intersects(&ray, |c, r| hit_distance(c, r) < f64::MAX));
    let hit = bvh.closest_intersection(&ray, hit_distance);
    assert_eq!(hit.item, Some(&DVec2::new(2.0, 0.0)));
    assert!((hit.distance - 1.5).abs() < 1e-12);

    let miss = Ray2::new(DVec2::new(0.0, -5.0), DVec2::X);
    assert!(!bvh.intersects(&miss, |c, r| hit_distance(c, r) < f64::MAX));
    assert!(bvh.closest_intersection(&miss, hit_distance).item.is_none());
}

#[test]
fn test_cache_rebuilds_after_invalidation() {
    let mut cache: BvhCache2<DVec2> = BvhCache2::new();
    assert!(cache.is_dirty());

    let (items, bounds) = circle_items(&[DVec2::ZERO], 0.5);
    let tree = cache.ensure_current(|| Bvh2::build(items, bounds));
    assert_eq!(tree.len(), 1);
    assert!(!cache.is_dirty());

    // A second ensure must not call the builder
    let tree = cache.ensure_current(|| panic!("cache should be current"));
    assert_eq!(tree.len(), 1);

    cache.invalidate();
    assert!(cache.is_dirty());
    let (items, bounds) = circle_items(&[DVec2::ZERO, DVec2::ONE], 0.5);
    assert_eq!(cache.ensure_current(|| Bvh2::build(items, bounds)).len(), 2);

    assert!(cache.clone().is_dirty());
}

#[test]
fn test_hash_grid_finds_points_within_radius() {
    let points = [
        DVec2::new(0.0, 0.0),
        DVec2::new(0.3, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(-0.2, -0.2),
    ];
    let mut grid = PointHashGrid2::new(0.5);
    grid.build(&points);
    assert_eq!(grid.len(), 4);

    let mut found = Vec::new();
    grid.for_each_nearby_point(DVec2::ZERO, 0.35, |index, _| found.push(index));
    found.sort_unstable();
    assert_eq!(found, vec![0, 1, 3]);

    assert!(grid.has_nearby_point(DVec2::new(1.1, 1.1), 0.2));
    assert!(!grid.has_nearby_point(DVec2::new(5.0, 5.0), 1.0));

    grid.build(&[]);
    assert!(grid.is_empty());
    assert!(!grid.has_nearby_point(DVec2::ZERO, 10.0));
}
