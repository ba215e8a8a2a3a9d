//! Extrapolation of grid values from a valid region into its surroundings

use std::ops::{Add, Mul};

use crate::array::Array2;

/// Grow `valid` by `depth` layers, filling each newly valid sample with the
/// average of its already valid 4-neighbours.
///
/// `input` and `output` must share extents with `valid`. Samples valid from the
/// start are copied through unchanged.
pub fn extrapolate_to_region<T>(
    input: &Array2<T>,
    valid: &Array2<bool>,
    depth: usize,
    output: &mut Array2<T>,
)
where
    T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
{
    debug_assert_eq!(input.size(), valid.size());

    output.set(input);
    let size = input.size();
    if size.area() == 0 {
        return;
    }

    let mut valid_now = valid.clone();
    let mut valid_next = valid.clone();

    for _ in 0..depth {
        let mut grew = false;

        for j in 0..size.y {
            for i in 0..size.x {
                if valid_now[(i, j)] {
                    continue;
                }

                let mut sum = T::default();
                let mut count = 0usize;
                let mut visit = |ni: usize, nj: usize| {
                    if valid_now[(ni, nj)] {
                        sum = sum + output[(ni, nj)];
                        count += 1;
                    }
                };
                if i > 0 {
                    visit(i - 1, j);
                }
                if i + 1 < size.x {
                    visit(i + 1, j);
                }
                if j > 0 {
                    visit(i, j - 1);
                }
                if j + 1 < size.y {
                    visit(i, j + 1);
                }

                if count > 0 {
                    output[(i, j)] = sum * (1.0 / count as f64);
                    valid_next[(i, j)] = true;
                    grew = true;
                }
            }
        }

        if !grew {
            break;
        }
        valid_now.set(&valid_next);
    }
}
