use std::ops::{Index, IndexMut};

use rayon::prelude::*;

use super::array_view::{ArrayView1, ConstArrayView1};
use super::iteration::should_parallelize;

/// Owned 1-D contiguous buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array1<T> {
    data: Vec<T>,
}

impl<T> Array1<T> {
    /// Create an empty array
    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pointer to the first element of the backing storage
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.data.get_mut(i)
    }

    pub fn append(&mut self, value: T) {
        self.data.push(value);
    }

    pub fn extend_from(&mut self, values: impl IntoIterator<Item = T>) {
        self.data.extend(values);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Mutable zero-copy view over the whole buffer
    pub fn view(&mut self) -> ArrayView1<'_, T> {
        ArrayView1::new(&mut self.data)
    }

    /// Read-only zero-copy view over the whole buffer
    pub fn const_view(&self) -> ConstArrayView1<'_, T> {
        ConstArrayView1::new(&self.data)
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Clone> Array1<T> {
    pub fn with_value(len: usize, value: T) -> Self {
        Self {
            data: vec![value; len],
        }
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Resize to `len`, filling new slots with `value`
    pub fn resize(&mut self, len: usize, value: T) {
        self.data.resize(len, value);
    }
}

impl<T: Clone + Default> Array1<T> {
    pub fn new(len: usize) -> Self {
        Self::with_value(len, T::default())
    }
}

impl<T: Send + Sync> Array1<T> {
    /// Overwrite every element with `f(i)`, fanning out over rayon for large buffers
    pub fn parallel_fill_with<F>(&mut self, f: F)
    where
        F: Fn(usize) -> T + Sync + Send,
    {
        if should_parallelize(self.data.len()) {
            self.data
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, value)| *value = f(i));
        } else {
            self.data
                .iter_mut()
                .enumerate()
                .for_each(|(i, value)| *value = f(i));
        }
    }

    /// Hand each element to `f` together with its index; no ordering guarantee
    pub fn parallel_for_each_mut<F>(&mut self, f: F)
    where
        F: Fn(usize, &mut T) + Sync + Send,
    {
        if should_parallelize(self.data.len()) {
            self.data
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, value)| f(i, value));
        } else {
            self.data
                .iter_mut()
                .enumerate()
                .for_each(|(i, value)| f(i, value));
        }
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Array1<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<T> From<Vec<T>> for Array1<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Array1<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Array1<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}
