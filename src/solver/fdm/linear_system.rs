use rayon::prelude::*;

use crate::array::{should_parallelize, Array2, Size2};

/// One row of a symmetric 5-point matrix.
///
/// `right` couples `(i, j)` with `(i + 1, j)`; `up` couples it with
/// `(i, j + 1)`. The left and down coefficients are read from the
/// neighbouring rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FdmMatrixRow2 {
    pub center: f64,
    pub right: f64,
    pub up: f64,
}

pub type FdmMatrix2 = Array2<FdmMatrixRow2>;

/// `A x = b` on a 2-D grid of unknowns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FdmLinearSystem2 {
    pub a: FdmMatrix2,
    pub x: Array2<f64>,
    pub b: Array2<f64>,
}

impl FdmLinearSystem2 {
    pub fn new(size: Size2) -> Self {
        let mut system = Self::default();
        system.resize(size);
        system
    }

    /// Reallocate every buffer to `size`, zeroed
    pub fn resize(&mut self, size: Size2) {
        self.a.resize(size, FdmMatrixRow2::default());
        self.x.resize(size, 0.0);
        self.b.resize(size, 0.0);
    }

    pub fn clear(&mut self) {
        self.a.fill(FdmMatrixRow2::default());
        self.x.fill(0.0);
        self.b.fill(0.0);
    }

    pub fn size(&self) -> Size2 {
        self.a.size()
    }
}

/// `(A x)(i, j)`
pub fn matrix_vector_row(a: &FdmMatrix2, x: &Array2<f64>, i: usize, j: usize) -> f64 {
    let size = a.size();
    let row = a[(i, j)];
    let mut sum = row.center * x[(i, j)];
    if i > 0 {
        sum += a[(i - 1, j)].right * x[(i - 1, j)];
    }
    if i + 1 < size.x {
        sum += row.right * x[(i + 1, j)];
    }
    if j > 0 {
        sum += a[(i, j - 1)].up * x[(i, j - 1)];
    }
    if j + 1 < size.y {
        sum += row.up * x[(i, j + 1)];
    }
    sum
}

/// `result = b - A x`
pub fn residual(a: &FdmMatrix2, x: &Array2<f64>, b: &Array2<f64>, result: &mut Array2<f64>) {
    if result.size() != a.size() {
        result.resize(a.size(), 0.0);
    }
    result.parallel_fill_with(|i, j| b[(i, j)] - matrix_vector_row(a, x, i, j));
}

pub fn l2_norm(v: &Array2<f64>) -> f64 {
    let sum: f64 = if should_parallelize(v.len()) {
        v.as_slice().par_iter().map(|x| x * x).sum()
    } else {
        v.iter().map(|x| x * x).sum()
    };
    sum.sqrt()
}

pub fn linf_norm(v: &Array2<f64>) -> f64 {
    v.iter().fold(0.0, |acc: f64, x| acc.max(x.abs()))
}
