//! Spatial indexing for geometry and particle queries
//!
//! - `Bvh2`: bounding volume hierarchy for nearest-item and ray queries
//! - `BvhCache2`: lazily rebuilt BVH owned by surface sets
//! - `PointHashGrid2`: bucketed point lookup used for particle neighbourhoods

mod bvh;
mod bvh_cache;
mod point_hash_grid;

pub use bvh::{Bvh2, ClosestIntersectionQueryResult2, NearestNeighborQueryResult2};
pub use bvh_cache::BvhCache2;
pub use point_hash_grid::PointHashGrid2;

#[cfg(test)]
mod tests;
