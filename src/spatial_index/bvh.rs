//! Bounding volume hierarchy over bounded items
//!
//! Nodes are stored depth-first: an internal node's left child immediately
//! follows it, the right child index is stored explicitly. Built top-down by
//! median split along the longest axis of the node's centroid bounds.

use glam::DVec2;

use crate::geometry::{BoundingBox2, Ray2};

/// Best item found by `Bvh2::nearest`
#[derive(Debug, Clone, Copy)]
pub struct NearestNeighborQueryResult2<'a, T> {
    pub item: Option<&'a T>,
    pub distance: f64,
}

/// Best item found by `Bvh2::closest_intersection`
#[derive(Debug, Clone, Copy)]
pub struct ClosestIntersectionQueryResult2<'a, T> {
    pub item: Option<&'a T>,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
enum BvhNode {
    Leaf {
        bound: BoundingBox2,
        item: usize,
    },
    Internal {
        bound: BoundingBox2,
        right_child: usize,
    },
}

impl BvhNode {
    fn bound(&self) -> &BoundingBox2 {
        match self {
            BvhNode::Leaf { bound, .. } | BvhNode::Internal { bound, .. } => bound,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bvh2<T> {
    items: Vec<T>,
    item_bounds: Vec<BoundingBox2>,
    nodes: Vec<BvhNode>,
    bound: BoundingBox2,
}

impl<T> Default for Bvh2<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            item_bounds: Vec::new(),
            nodes: Vec::new(),
            bound: BoundingBox2::empty(),
        }
    }
}

impl<T> Bvh2<T> {
    /// Build a tree over `items` with matching `bounds`.
    ///
    /// Panics if the two vectors differ in length.
    pub fn build(items: Vec<T>, bounds: Vec<BoundingBox2>) -> Self {
        assert_eq!(items.len(), bounds.len(), "every BVH item needs a bounding box");

        let mut bvh = Self {
            items,
            item_bounds: bounds,
            nodes: Vec::new(),
            bound: BoundingBox2::empty(),
        };
        if bvh.items.is_empty() {
            return bvh;
        }

        for b in &bvh.item_bounds {
            bvh.bound.merge(b);
        }

        let centers: Vec<DVec2> = bvh.item_bounds.iter().map(|b| b.mid_point()).collect();
        let mut indices: Vec<usize> = (0..bvh.items.len()).collect();
        bvh.nodes.reserve(2 * bvh.items.len());
        build_node(&mut bvh.nodes, &mut indices, &bvh.item_bounds, &centers);

        log::trace!(
            "[bvh] built {} nodes over {} items",
            bvh.nodes.len(),
            bvh.items.len()
        );
        bvh
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item_bound(&self, index: usize) -> &BoundingBox2 {
        &self.item_bounds[index]
    }

    /// Union of every item's box; empty for an empty tree
    pub fn bounding_box(&self) -> BoundingBox2 {
        self.bound
    }

    /// Item minimizing `distance_fn`, pruning nodes whose box is already farther
    pub fn nearest<F>(&self, point: DVec2, distance_fn: F) -> NearestNeighborQueryResult2<'_, T>
    where
        F: Fn(&T, DVec2) -> f64,
    {
        let mut best = NearestNeighborQueryResult2 {
            item: None,
            distance: f64::MAX,
        };
        if self.nodes.is_empty() {
            return best;
        }

        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if node.bound().distance_to(point) > best.distance {
                continue;
            }

            match *node {
                BvhNode::Leaf { item, .. } => {
                    let distance = distance_fn(&self.items[item], point);
                    if distance < best.distance {
                        best.distance = distance;
                        best.item = Some(&self.items[item]);
                    }
                }
                BvhNode::Internal { right_child, .. } => {
                    let left_child = index + 1;
                    let left_distance = self.nodes[left_child].bound().distance_to(point);
                    let right_distance = self.nodes[right_child].bound().distance_to(point);

                    // Visit the nearer child first
                    if left_distance <= right_distance {
                        stack.push(right_child);
                        stack.push(left_child);
                    } else {
                        stack.push(left_child);
                        stack.push(right_child);
                    }
                }
            }
        }

        best
    }

    /// True if `test_fn` reports a hit for any item whose box the ray crosses
    pub fn intersects<F>(&self, ray: &Ray2, test_fn: F) -> bool
    where
        F: Fn(&T, &Ray2) -> bool,
    {
        if self.nodes.is_empty() {
            return false;
        }

        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !node.bound().intersects(ray) {
                continue;
            }

            match *node {
                BvhNode::Leaf { item, .. } => {
                    if test_fn(&self.items[item], ray) {
                        return true;
                    }
                }
                BvhNode::Internal { right_child, .. } => {
                    stack.push(right_child);
                    stack.push(index + 1);
                }
            }
        }

        false
    }

    /// Item with the smallest ray parameter reported by `distance_fn`.
    ///
    /// `distance_fn` returns `f64::MAX` for a miss.
    pub fn closest_intersection<F>(
        &self,
        ray: &Ray2,
        distance_fn: F,
    ) -> ClosestIntersectionQueryResult2<'_, T>
    where
        F: Fn(&T, &Ray2) -> f64,
    {
        let mut best = ClosestIntersectionQueryResult2 {
            item: None,
            distance: f64::MAX,
        };
        if self.nodes.is_empty() {
            return best;
        }

        let mut stack = vec![0usize];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            let hit = node.bound().closest_intersection(ray);
            if !hit.is_intersecting || hit.t_near > best.distance {
                continue;
            }

            match *node {
                BvhNode::Leaf { item, .. } => {
                    let distance = distance_fn(&self.items[item], ray);
                    if distance < best.distance {
                        best.distance = distance;
                        best.item = Some(&self.items[item]);
                    }
                }
                BvhNode::Internal { right_child, .. } => {
                    stack.push(right_child);
                    stack.push(index + 1);
                }
            }
        }

        best
    }
}

fn build_node(
    nodes: &mut Vec<BvhNode>,
    indices: &mut [usize],
    bounds: &[BoundingBox2],
    centers: &[DVec2],
) -> usize {
    let node_index = nodes.len();

    let mut bound = BoundingBox2::empty();
    for &i in indices.iter() {
        bound.merge(&bounds[i]);
    }

    if indices.len() == 1 {
        nodes.push(BvhNode::Leaf {
            bound,
            item: indices[0],
        });
        return node_index;
    }

    let mut center_bound = BoundingBox2::empty();
    for &i in indices.iter() {
        center_bound.merge_point(centers[i]);
    }
    let axis = center_bound.dominant_axis();

    let mid = indices.len() / 2;
    indices.select_nth_unstable_by(mid, |&a, &b| centers[a][axis].total_cmp(&centers[b][axis]));

    nodes.push(BvhNode::Internal {
        bound,
        right_child: 0,
    });

    let (left, right) = indices.split_at_mut(mid);
    build_node(nodes, left, bounds, centers);
    let right_index = build_node(nodes, right, bounds, centers);

    if let BvhNode::Internal { right_child, .. } = &mut nodes[node_index] {
        *right_child = right_index;
    }

    node_index
}
