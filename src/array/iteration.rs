//! Index-space iteration primitives
//!
//! `for_each_index` is sequential and ascending. `parallel_for_each_index`
//! fans out over rayon with no ordering between indices; callers must keep
//! each index's writes disjoint (use `Array1::parallel_for_each_mut` or
//! `Array2::parallel_for_each_mut` when writing into a buffer).

use rayon::prelude::*;

use super::Size2;
use crate::constants::parallel::PARALLEL_THRESHOLD;

/// Whether a kernel over `len` items is worth splitting across threads
pub fn should_parallelize(len: usize) -> bool {
    len >= PARALLEL_THRESHOLD && rayon::current_num_threads() > 1
}

/// Call `f` for every index in `[0, n)` in ascending order
pub fn for_each_index<F: FnMut(usize)>(n: usize, mut f: F) {
    for i in 0..n {
        f(i);
    }
}

/// Call `f` exactly once for every index in `[0, n)`, in unspecified order
pub fn parallel_for_each_index<F>(n: usize, f: F)
where
    F: Fn(usize) + Sync + Send,
{
    if should_parallelize(n) {
        (0..n).into_par_iter().for_each(f);
    } else {
        (0..n).for_each(f);
    }
}

/// Call `f` for every `(i, j)` with `i` varying fastest
pub fn for_each_index_2d<F: FnMut(usize, usize)>(size: Size2, mut f: F) {
    for j in 0..size.y {
        for i in 0..size.x {
            f(i, j);
        }
    }
}

/// Call `f` exactly once for every `(i, j)`; rows run in parallel
pub fn parallel_for_each_index_2d<F>(size: Size2, f: F)
where
    F: Fn(usize, usize) + Sync + Send,
{
    let row = |j: usize| {
        for i in 0..size.x {
            f(i, j);
        }
    };
    if should_parallelize(size.area()) {
        (0..size.y).into_par_iter().for_each(row);
    } else {
        (0..size.y).for_each(row);
    }
}
