//! Lazily rebuilt BVH holder
//!
//! An empty slot means the cached tree is stale. Owners call `invalidate()`
//! on every structural mutation (which needs `&mut self`) and
//! `ensure_current()` at the top of every query (which only needs `&self`).
//! Because invalidation takes a unique borrow, the compiler rules out a
//! mutation racing a query; the slot itself is filled at most once per
//! invalidation.

use std::fmt;
use std::sync::OnceLock;

use super::Bvh2;

pub struct BvhCache2<T> {
    tree: OnceLock<Bvh2<T>>,
}

impl<T> BvhCache2<T> {
    pub fn new() -> Self {
        Self {
            tree: OnceLock::new(),
        }
    }

    /// Drop the cached tree; the next query rebuilds it
    pub fn invalidate(&mut self) {
        self.tree.take();
    }

    pub fn is_dirty(&self) -> bool {
        self.tree.get().is_none()
    }

    /// Return the cached tree, building it with `build` first when stale
    pub fn ensure_current<F>(&self, build: F) -> &Bvh2<T>
    where
        F: FnOnce() -> Bvh2<T>,
    {
        self.tree.get_or_init(build)
    }
}

impl<T> Default for BvhCache2<T> {
    fn default() -> Self {
        Self::new()
    }
}

// A copy starts stale and rebuilds from its own item list on first query
impl<T> Clone for BvhCache2<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BvhCache2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BvhCache2")
            .field("dirty", &self.is_dirty())
            .field("items", &self.tree.get().map(|tree| tree.len()))
            .finish()
    }
}
