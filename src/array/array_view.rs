use std::ops::{Index, IndexMut};

use super::Size2;

/// Mutable, non-owning view over a 1-D buffer
#[derive(Debug)]
pub struct ArrayView1<'a, T> {
    data: &'a mut [T],
}

impl<'a, T> ArrayView1<'a, T> {
    /// Wrap an existing buffer; nothing is copied
    pub fn new(data: &'a mut [T]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Same pointer as the viewed buffer
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data
    }
}

impl<'a, T> Index<usize> for ArrayView1<'a, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<'a, T> IndexMut<usize> for ArrayView1<'a, T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<'a, 'b, T> IntoIterator for &'b ArrayView1<'a, T> {
    type Item = &'b T;
    type IntoIter = std::slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, 'b, T> IntoIterator for &'b mut ArrayView1<'a, T> {
    type Item = &'b mut T;
    type IntoIter = std::slice::IterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}

/// Read-only, non-owning view over a 1-D buffer
#[derive(Debug, Clone, Copy)]
pub struct ConstArrayView1<'a, T> {
    data: &'a [T],
}

impl<'a, T> ConstArrayView1<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }
}

impl<'a, T> From<ArrayView1<'a, T>> for ConstArrayView1<'a, T> {
    fn from(view: ArrayView1<'a, T>) -> Self {
        Self { data: view.data }
    }
}

impl<'a, T> Index<usize> for ConstArrayView1<'a, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<'a, T> IntoIterator for ConstArrayView1<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Mutable, non-owning view over a row-major 2-D buffer
#[derive(Debug)]
pub struct ArrayView2<'a, T> {
    size: Size2,
    data: &'a mut [T],
}

impl<'a, T> ArrayView2<'a, T> {
    /// Wrap `data` as a `size.x` by `size.y` block.
    ///
    /// Panics when the buffer length disagrees with `size`.
    pub fn new(data: &'a mut [T], size: Size2) -> Self {
        assert_eq!(data.len(), size.area(), "view size does not match buffer length");
        Self { size, data }
    }

    pub fn size(&self) -> Size2 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<'a, T> Index<(usize, usize)> for ArrayView2<'a, T> {
    type Output = T;

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

impl<'a, T> IndexMut<(usize, usize)> for ArrayView2<'a, T> {
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

/// Read-only, non-owning view over a row-major 2-D buffer
#[derive(Debug, Clone, Copy)]
pub struct ConstArrayView2<'a, T> {
    size: Size2,
    data: &'a [T],
}

impl<'a, T> ConstArrayView2<'a, T> {
    pub fn new(data: &'a [T], size: Size2) -> Self {
        assert_eq!(data.len(), size.area(), "view size does not match buffer length");
        Self { size, data }
    }

    pub fn size(&self) -> Size2 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.data.iter()
    }
}

impl<'a, T> From<ArrayView2<'a, T>> for ConstArrayView2<'a, T> {
    fn from(view: ArrayView2<'a, T>) -> Self {
        Self {
            size: view.size,
            data: view.data,
        }
    }
}

impl<'a, T> Index<(usize, usize)> for ConstArrayView2<'a, T> {
    type Output = T;

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
