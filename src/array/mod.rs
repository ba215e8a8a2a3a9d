//! Dense Array Storage
//!
//! Contiguous typed buffers that every grid and numerical kernel builds on:
//! - `Array1` / `Array2` own their storage (row-major, x fastest)
//! - `ArrayView1` / `ArrayView2` and their const variants borrow it, zero-copy
//! - `for_each_index` / `parallel_for_each_index` drive index-space kernels

mod array1;
mod array2;
mod array_view;
mod iteration;

pub use array1::Array1;
pub use array2::Array2;
pub use array_view::{ArrayView1, ArrayView2, ConstArrayView1, ConstArrayView2};
pub use iteration::{
    for_each_index, for_each_index_2d, parallel_for_each_index, parallel_for_each_index_2d,
    should_parallelize,
};

use serde::{Deserialize, Serialize};

/// Integer extents of a 2-D array or grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size2 {
    pub x: usize,
    pub y: usize,
}

impl Size2 {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Total number of elements covered by these extents
    pub fn area(&self) -> usize {
        self.x * self.y
    }

    pub fn as_tuple(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

impl From<(usize, usize)> for Size2 {
    fn from(value: (usize, usize)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests;
