use std::ops::{Index, IndexMut};

use rayon::prelude::*;

use super::array_view::{ArrayView2, ConstArrayView2};
use super::iteration::should_parallelize;
use super::Size2;

/// Owned 2-D buffer stored row-major with `i` (x) as the fastest axis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array2<T> {
    size: Size2,
    data: Vec<T>,
}

impl<T> Array2<T> {
    pub fn size(&self) -> Size2 {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear offset of `(i, j)`
    #[inline]
    pub fn offset(&self, i: usize, j: usize) -> usize {
        i + self.size.x * j
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.size.x && j < self.size.y {
            self.data.get(self.offset(i, j))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        if i < self.size.x && j < self.size.y {
            let offset = self.offset(i, j);
            self.data.get_mut(offset)
        } else {
            None
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn view(&mut self) -> ArrayView2<'_, T> {
        ArrayView2::new(&mut self.data, self.size)
    }

    pub fn const_view(&self) -> ConstArrayView2<'_, T> {
        ConstArrayView2::new(&self.data, self.size)
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Visit every `(i, j)` in storage order
    pub fn for_each_index<F: FnMut(usize, usize)>(&self, f: F) {
        super::for_each_index_2d(self.size, f);
    }
}

impl<T: Clone> Array2<T> {
    pub fn with_value(size: Size2, value: T) -> Self {
        Self {
            size,
            data: vec![value; size.area()],
        }
    }

    /// Reallocate to `size`; every element is reset to `value`
    pub fn resize(&mut self, size: Size2, value: T) {
        self.size = size;
        self.data.clear();
        self.data.resize(size.area(), value);
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Deep copy of `other`'s extents and contents
    pub fn set(&mut self, other: &Self) {
        self.size = other.size;
        self.data.clone_from(&other.data);
    }
}

impl<T: Clone + Default> Array2<T> {
    pub fn new(size: Size2) -> Self {
        Self::with_value(size, T::default())
    }
}

impl<T> Array2<T> {
    pub fn from_fn<F: FnMut(usize, usize) -> T>(size: Size2, mut f: F) -> Self {
        let mut data = Vec::with_capacity(size.area());
        for j in 0..size.y {
            for i in 0..size.x {
                data.push(f(i, j));
            }
        }
        Self { size, data }
    }
}

impl<T: Send + Sync> Array2<T> {
    /// Overwrite every element with `f(i, j)`; rows are processed in parallel
    pub fn parallel_fill_with<F>(&mut self, f: F)
    where
        F: Fn(usize, usize) -> T + Sync + Send,
    {
        self.parallel_for_each_mut(|i, j, value| *value = f(i, j));
    }

    /// Hand each element to `f` with its index; no ordering guarantee across rows
    pub fn parallel_for_each_mut<F>(&mut self, f: F)
    where
        F: Fn(usize, usize, &mut T) + Sync + Send,
    {
        let width = self.size.x;
        if width == 0 {
            return;
        }
        let row = |(j, row): (usize, &mut [T])| {
            for (i, value) in row.iter_mut().enumerate() {
                f(i, j, value);
            }
        };
        if should_parallelize(self.data.len()) {
            self.data.par_chunks_mut(width).enumerate().for_each(row);
        } else {
            self.data.chunks_mut(width).enumerate().for_each(row);
        }
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(
            i < self.size.x && j < self.size.y,
            "index ({}, {}) out of {:?}",
            i,
            j,
            self.size
        );
        &self.data[i + self.size.x * j]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(
            i < self.size.x && j < self.size.y,
            "index ({}, {}) out of {:?}",
            i,
            j,
            self.size
        );
        let width = self.size.x;
        &mut self.data[i + width * j]
    }
}

impl<'a, T> IntoIterator for &'a Array2<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
