//! Size-threshold parallel dispatch.
//!
//! Every data-parallel loop in the crate goes through the helpers here. A loop runs on the
//! rayon pool only when its element count exceeds the threshold for its complexity class
//! (see [`ParallelOptions`](crate::config::ParallelOptions)); otherwise the same closure
//! runs sequentially. Without the `rayon` feature everything is sequential.
//!
//! Parallel units always write disjoint chunks of the output; sums go through an
//! associative `reduce`.

use crate::config::parallel_options;
use crate::core::Scalar;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "rayon")]
pub mod rayon_pool;
#[cfg(feature = "rayon")]
pub use rayon_pool::{current_num_threads, init_thread_pool};

/// Without rayon there is no pool to build.
#[cfg(not(feature = "rayon"))]
pub fn init_thread_pool(_num_threads: Option<usize>) -> Result<(), crate::error::LinalgError> {
    Ok(())
}

#[cfg(not(feature = "rayon"))]
pub fn current_num_threads() -> usize {
    1
}

/// Complexity class of a loop, selecting which threshold applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    Linear,
    Quadratic,
    Cubic,
}

/// Whether a loop touching `work` elements of class `load` should run in parallel.
pub fn should_parallelize(work: usize, load: Workload) -> bool {
    let opts = parallel_options();
    let threshold = match load {
        Workload::Linear => opts.linear_threshold,
        Workload::Quadratic => opts.quadratic_threshold,
        Workload::Cubic => opts.cubic_threshold,
    };
    exceeds(work, threshold)
}

/// `work > threshold`, and always `false` without rayon.
#[inline]
pub fn exceeds(work: usize, threshold: usize) -> bool {
    cfg!(feature = "rayon") && work > threshold
}

/// Build a vector of `n` elements from `f(i)`.
pub(crate) fn collect_indexed<R, F>(n: usize, parallel: bool, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        if parallel {
            return (0..n).into_par_iter().map(f).collect();
        }
    }
    let _ = parallel;
    (0..n).map(f).collect()
}

/// Sum of `f(i)` for `i` in `0..n`.
pub(crate) fn sum_indexed<R, F>(n: usize, parallel: bool, f: F) -> R
where
    R: Scalar,
    F: Fn(usize) -> R + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        if parallel {
            return (0..n).into_par_iter().map(f).reduce(|| R::zero(), |a, b| a + b);
        }
    }
    let _ = parallel;
    (0..n).map(f).fold(R::zero(), |a, b| a + b)
}

/// `out[i] = f(a[i], b[i])` in the promoted type `R`, parallel above the linear threshold.
pub(crate) fn zip_map<T, U, R, F>(a: &[T], b: &[U], f: F) -> Vec<R>
where
    T: Scalar,
    U: Scalar,
    R: Scalar,
    F: Fn(R, R) -> R + Sync + Send,
{
    debug_assert_eq!(a.len(), b.len());
    let par = should_parallelize(a.len(), Workload::Linear);
    collect_indexed(a.len(), par, |i| f(R::from_scalar(a[i]), R::from_scalar(b[i])))
}

/// `out[i] = f(a[i])` in the target type `R`, parallel above the linear threshold.
pub(crate) fn map<T, R, F>(a: &[T], f: F) -> Vec<R>
where
    T: Scalar,
    R: Scalar,
    F: Fn(T) -> R + Sync + Send,
{
    let par = should_parallelize(a.len(), Workload::Linear);
    collect_indexed(a.len(), par, |i| f(a[i]))
}

/// `data[i] = f(data[i])`, parallel above the linear threshold.
pub(crate) fn map_in_place<T, F>(data: &mut [T], f: F)
where
    T: Scalar,
    F: Fn(T) -> T + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        if should_parallelize(data.len(), Workload::Linear) {
            data.par_iter_mut().for_each(|x| *x = f(*x));
            return;
        }
    }
    data.iter_mut().for_each(|x| *x = f(*x));
}

/// Run `f(k, chunk)` over consecutive `chunk`-sized pieces of `data`.
pub(crate) fn for_each_chunk_mut<T, F>(data: &mut [T], chunk: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        if parallel {
            data.par_chunks_mut(chunk).enumerate().for_each(|(k, c)| f(k, c));
            return;
        }
    }
    let _ = parallel;
    data.chunks_mut(chunk).enumerate().for_each(|(k, c)| f(k, c));
}

/// Like [`for_each_chunk_mut`], walking two buffers in lockstep.
pub(crate) fn for_each_chunk_pair_mut<A, B, F>(
    a: &mut [A],
    chunk_a: usize,
    b: &mut [B],
    chunk_b: usize,
    parallel: bool,
    f: F,
) where
    A: Send,
    B: Send,
    F: Fn(usize, &mut [A], &mut [B]) + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        if parallel {
            a.par_chunks_mut(chunk_a)
                .zip(b.par_chunks_mut(chunk_b))
                .enumerate()
                .for_each(|(k, (ca, cb))| f(k, ca, cb));
            return;
        }
    }
    let _ = parallel;
    a.chunks_mut(chunk_a)
        .zip(b.chunks_mut(chunk_b))
        .enumerate()
        .for_each(|(k, (ca, cb))| f(k, ca, cb));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_work_stays_sequential() {
        assert!(!should_parallelize(10, Workload::Linear));
        assert!(!should_parallelize(10, Workload::Cubic));
    }

    #[test]
    fn both_paths_agree() {
        let seq: Vec<usize> = collect_indexed(1000, false, |i| i * 2);
        let par: Vec<usize> = collect_indexed(1000, true, |i| i * 2);
        assert_eq!(seq, par);
        let s1: f64 = sum_indexed(1000, false, |i| i as f64);
        let s2: f64 = sum_indexed(1000, true, |i| i as f64);
        assert_eq!(s1, 499_500.0);
        assert_eq!(s1, s2);
    }

    #[test]
    fn chunks_are_disjoint_rows() {
        let mut data = vec![0_i32; 12];
        for_each_chunk_mut(&mut data, 4, true, |k, row| row.iter_mut().for_each(|x| *x = k as i32));
        assert_eq!(data, vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]);
    }
}
