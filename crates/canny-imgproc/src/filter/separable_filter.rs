use canny_image::{Image, ImageError};

use crate::border::replicate_index;
use crate::parallel::{self, ExecutionStrategy};

/// Trait to store a filtered `f32` accumulator into a pixel type.
pub trait FromF32 {
    /// Convert the accumulator into the pixel type, rounding and saturating for integers.
    fn from_f32(val: f32) -> Self;
}

impl FromF32 for f32 {
    fn from_f32(val: f32) -> Self {
        val
    }
}

impl FromF32 for u8 {
    fn from_f32(val: f32) -> Self {
        val.round().clamp(0.0, 255.0) as u8
    }
}

impl FromF32 for i16 {
    fn from_f32(val: f32) -> Self {
        val.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
    }
}

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// Taps falling outside the image replicate the nearest border pixel.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
}

impl<'a> SeparableFilter<'a> {
    fn new(kernel_x: &'a [f32], kernel_y: &'a [f32]) -> Self {
        let half_x = (kernel_x.len() / 2) as isize;
        let half_y = (kernel_y.len() / 2) as isize;

        Self {
            kernel_x,
            kernel_y,
            offsets_x: (0..kernel_x.len() as isize).map(|i| i - half_x).collect(),
            offsets_y: (0..kernel_y.len() as isize).map(|i| i - half_y).collect(),
        }
    }

    /// Horizontal pass into the `f32` buffer, then vertical pass into `dst`.
    fn apply<T, U>(
        &self,
        src: &Image<T>,
        dst: &mut Image<U>,
        strategy: ExecutionStrategy,
    ) -> Result<(), ImageError>
    where
        T: Copy + Into<f32> + Sync,
        U: FromF32 + Send,
    {
        let rows = src.rows();
        let cols = src.cols();
        let src_data = src.as_slice();
        let mut temp = vec![0.0f32; src_data.len()];

        // Horizontal
        parallel::for_each_row(&mut temp, cols, strategy, |r, row_temp| {
            let src_row = &src_data[r * cols..(r + 1) * cols];
            for (c, out) in row_temp.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                    let x = replicate_index(c as isize + off, cols);
                    acc += src_row[x].into() * k;
                }
                *out = acc;
            }
        });

        // Vertical
        let temp = temp.as_slice();
        parallel::for_each_row(dst.as_slice_mut(), cols, strategy, |r, row_dst| {
            for (c, out) in row_dst.iter_mut().enumerate() {
                let mut acc = 0.0f32;
                for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                    let y = replicate_index(r as isize + off, rows);
                    acc += temp[y * cols + c] * k;
                }
                *out = U::from_f32(acc);
            }
        });

        Ok(())
    }
}

/// Apply a separable filter with replicated borders.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
/// * `strategy` - Execution strategy: `Serial`, `ParallelRows`, or `Auto`.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn separable_filter<T, U>(
    src: &Image<T>,
    dst: &mut Image<U>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    strategy: ExecutionStrategy,
) -> Result<(), ImageError>
where
    T: Copy + Into<f32> + Sync,
    U: FromF32 + Send,
{
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(
            kernel_x.len(),
            kernel_y.len(),
        ));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    SeparableFilter::new(kernel_x, kernel_y).apply(src, dst, strategy)
}
