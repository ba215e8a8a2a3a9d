//! Bilinear sampling over regularly spaced data points

use std::ops::{Add, Mul};

use glam::DVec2;

use crate::array::{Array2, Size2};

/// Lower index and fractional offset of `x` along an axis of `size` points.
///
/// Positions outside the data are clamped to the nearest edge.
fn barycentric(x: f64, size: usize) -> (usize, f64) {
    if size <= 1 {
        return (0, 0.0);
    }
    let x = x.clamp(0.0, (size - 1) as f64);
    let i = (x.floor() as usize).min(size - 2);
    (i, x - i as f64)
}

/// Maps world positions onto data points laid out from `origin` at `spacing`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSampler2 {
    size: Size2,
    spacing: DVec2,
    origin: DVec2,
}

impl LinearSampler2 {
    pub fn new(size: Size2, spacing: DVec2, origin: DVec2) -> Self {
        Self {
            size,
            spacing,
            origin,
        }
    }

    /// The four data points around `x` and their bilinear weights
    pub fn coordinates_and_weights(&self, x: DVec2) -> [((usize, usize), f64); 4] {
        let normalized = (x - self.origin) / self.spacing;
        let (i, fx) = barycentric(normalized.x, self.size.x);
        let (j, fy) = barycentric(normalized.y, self.size.y);
        let ip1 = (i + 1).min(self.size.x.saturating_sub(1));
        let jp1 = (j + 1).min(self.size.y.saturating_sub(1));

        [
            ((i, j), (1.0 - fx) * (1.0 - fy)),
            ((ip1, j), fx * (1.0 - fy)),
            ((i, jp1), (1.0 - fx) * fy),
            ((ip1, jp1), fx * fy),
        ]
    }

    pub fn sample<T>(&self, data: &Array2<T>, x: DVec2) -> T
    where
        T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
    {
        if data.is_empty() {
            return T::default();
        }
        self.coordinates_and_weights(x)
            .iter()
            .fold(T::default(), |acc, &((i, j), w)| acc + data[(i, j)] * w)
    }
}
