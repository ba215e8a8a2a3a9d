use std::collections::HashMap;

use glam::DVec2;

/// Cell coordinate in the hash grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
}

/// Uniform hash grid bucketing point indices by cell.
///
/// Rebuilt from scratch whenever the point set changes; queries visit every
/// point within `radius` of a location.
#[derive(Debug, Clone)]
pub struct PointHashGrid2 {
    cell_size: f64,
    points: Vec<DVec2>,
    buckets: HashMap<CellCoord, Vec<usize>>,
}

impl PointHashGrid2 {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(f64::MIN_POSITIVE),
            points: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn world_to_cell(&self, position: DVec2) -> CellCoord {
        CellCoord {
            x: (position.x / self.cell_size).floor() as i64,
            y: (position.y / self.cell_size).floor() as i64,
        }
    }

    /// Replace the indexed points
    pub fn build(&mut self, points: &[DVec2]) {
        self.buckets.clear();
        self.points.clear();
        self.points.extend_from_slice(points);

        for (index, point) in points.iter().enumerate() {
            let cell = self.world_to_cell(*point);
            self.buckets.entry(cell).or_default().push(index);
        }
    }

    /// Call `f(index, position)` for every point within `radius` of `origin`
    pub fn for_each_nearby_point<F>(&self, origin: DVec2, radius: f64, mut f: F)
    where
        F: FnMut(usize, DVec2),
    {
        if self.points.is_empty() {
            return;
        }

        let min_cell = self.world_to_cell(origin - DVec2::splat(radius));
        let max_cell = self.world_to_cell(origin + DVec2::splat(radius));
        let radius_squared = radius * radius;

        for y in min_cell.y..=max_cell.y {
            for x in min_cell.x..=max_cell.x {
                let Some(bucket) = self.buckets.get(&CellCoord { x, y }) else {
                    continue;
                };
                for &index in bucket {
                    let point = self.points[index];
                    if point.distance_squared(origin) <= radius_squared {
                        f(index, point);
                    }
                }
            }
        }
    }

    /// True if any point lies within `radius` of `origin`
    pub fn has_nearby_point(&self, origin: DVec2, radius: f64) -> bool {
        let mut found = false;
        self.for_each_nearby_point(origin, radius, |_, _| found = true);
        found
    }
}
