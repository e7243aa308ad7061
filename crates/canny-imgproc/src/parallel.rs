use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Number of pixels from which [`ExecutionStrategy::Auto`] runs in parallel.
pub const AUTO_PARALLEL_MIN_PIXELS: usize = 100_000;

/// Controls how the per-pixel stages are executed.
///
/// Every strategy produces bit-identical results; only the scheduling of the
/// output rows changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Process rows in parallel for images of at least
    /// [`AUTO_PARALLEL_MIN_PIXELS`] pixels, serially otherwise.
    #[default]
    Auto,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Use the global Rayon thread pool to process rows in parallel.
    ParallelRows,
}

impl ExecutionStrategy {
    /// Whether an image with `num_pixels` pixels is processed in parallel.
    pub fn is_parallel(&self, num_pixels: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => num_pixels >= AUTO_PARALLEL_MIN_PIXELS,
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::ParallelRows => true,
        }
    }
}

/// Apply a function to every row of a row-major buffer.
///
/// The function receives the row index and the mutable row slice.
///
/// PRECONDITION: `cols > 0` and `dst.len()` is a multiple of `cols`.
pub fn for_each_row<T>(
    dst: &mut [T],
    cols: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Send,
{
    if strategy.is_parallel(dst.len()) {
        dst.par_chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    } else {
        dst.chunks_exact_mut(cols)
            .enumerate()
            .for_each(|(r, row)| f(r, row));
    }
}

/// Apply a function to every pair of rows of two row-major buffers of the same shape.
///
/// PRECONDITION: `cols > 0`, `dst1.len() == dst2.len()` and the length is a multiple of `cols`.
pub fn for_each_row_pair<T, U>(
    dst1: &mut [T],
    dst2: &mut [U],
    cols: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, &mut [T], &mut [U]) + Send + Sync,
) where
    T: Send,
    U: Send,
{
    if strategy.is_parallel(dst1.len()) {
        dst1.par_chunks_exact_mut(cols)
            .zip(dst2.par_chunks_exact_mut(cols))
            .enumerate()
            .for_each(|(r, (row1, row2))| f(r, row1, row2));
    } else {
        dst1.chunks_exact_mut(cols)
            .zip(dst2.chunks_exact_mut(cols))
            .enumerate()
            .for_each(|(r, (row1, row2))| f(r, row1, row2));
    }
}
