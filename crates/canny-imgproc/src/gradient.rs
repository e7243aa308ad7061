use canny_image::{Image, ImageError};

use crate::border::{offset_index, replicate_index};
use crate::filter::kernels;
use crate::parallel::{self, ExecutionStrategy};

/// Horizontal and vertical image derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    /// Derivative along the columns (x).
    pub gx: Image<i16>,
    /// Derivative along the rows (y).
    pub gy: Image<i16>,
}

#[inline]
fn saturate_i16(val: i32) -> i16 {
    val.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Compute the first order image derivative in both x and y using a 3x3 Sobel operator.
///
/// Uses `ExecutionStrategy::Auto`. For explicit control, use
/// [`spatial_gradient_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W), typically the smoothed image.
///
/// # Returns
///
/// The `gx` and `gy` images with the same shape as `src`.
///
/// # Examples
///
/// ```
/// use canny_image::Image;
/// use canny_imgproc::gradient::spatial_gradient;
///
/// let image = Image::<i16>::new([3, 3].into(), vec![1, 2, 1, 2, 3, 2, 3, 4, 3]).unwrap();
/// let gradient = spatial_gradient(&image).unwrap();
///
/// assert_eq!(gradient.gx.as_slice(), &[3, 0, -3, 4, 0, -4, 3, 0, -3]);
/// assert_eq!(gradient.gy.as_slice(), &[3, 4, 3, 6, 8, 6, 3, 4, 3]);
/// ```
pub fn spatial_gradient<T>(src: &Image<T>) -> Result<GradientField, ImageError>
where
    T: Copy + Into<i32> + Sync,
{
    spatial_gradient_with_strategy(src, ExecutionStrategy::Auto)
}

/// Compute the Sobel derivatives using the given execution strategy.
///
/// Taps along the derivative axis replicate the border pixel, taps along the
/// smoothing axis that fall outside the image are dropped. Sums are exact and
/// saturated into `i16`.
pub fn spatial_gradient_with_strategy<T>(
    src: &Image<T>,
    strategy: ExecutionStrategy,
) -> Result<GradientField, ImageError>
where
    T: Copy + Into<i32> + Sync,
{
    let (derivative, smooth) = kernels::sobel_kernel_1d();

    let rows = src.rows();
    let cols = src.cols();
    let src_data = src.as_slice();
    let at = |r: usize, c: usize| -> i32 { src_data[r * cols + c].into() };

    let mut gx = Image::from_size_val(src.size(), 0i16)?;
    let mut gy = Image::from_size_val(src.size(), 0i16)?;

    parallel::for_each_row_pair(
        gx.as_slice_mut(),
        gy.as_slice_mut(),
        cols,
        strategy,
        |r, gx_row, gy_row| {
            for c in 0..cols {
                let mut sum_x = 0i32;
                let mut sum_y = 0i32;
                for i in 0..3 {
                    let off = i as isize - 1;

                    if let Some(rr) = offset_index(r, off, rows) {
                        let diff = (0..3)
                            .map(|j| {
                                derivative[j] * at(rr, replicate_index(c as isize + j as isize - 1, cols))
                            })
                            .sum::<i32>();
                        sum_x += smooth[i] * diff;
                    }

                    if let Some(cc) = offset_index(c, off, cols) {
                        let diff = (0..3)
                            .map(|j| {
                                derivative[j] * at(replicate_index(r as isize + j as isize - 1, rows), cc)
                            })
                            .sum::<i32>();
                        sum_y += smooth[i] * diff;
                    }
                }
                gx_row[c] = saturate_i16(sum_x);
                gy_row[c] = saturate_i16(sum_y);
            }
        },
    );

    Ok(GradientField { gx, gy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use canny_image::ImageSize;

    #[test]
    fn test_spatial_gradient_reference_patch() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let img = Image::<i16>::new([3, 3].into(), vec![
            1, 2, 1,
            2, 3, 2,
            3, 4, 3,
        ])?;

        let gradient = spatial_gradient(&img)?;

        #[rustfmt::skip]
        assert_eq!(gradient.gx.as_slice(), &[
            3, 0, -3,
            4, 0, -4,
            3, 0, -3,
        ]);

        #[rustfmt::skip]
        assert_eq!(gradient.gy.as_slice(), &[
            3, 4, 3,
            6, 8, 6,
            3, 4, 3,
        ]);
        Ok(())
    }

    #[test]
    fn test_spatial_gradient_constant() -> Result<(), ImageError> {
        let img = Image::from_size_val([3, 3].into(), 1u8)?;
        let gradient = spatial_gradient(&img)?;
        assert!(gradient.gx.as_slice().iter().all(|&v| v == 0));
        assert!(gradient.gy.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_spatial_gradient_dimensions() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 4,
        };
        let img = Image::from_size_val(size, 9u8)?;
        let gradient = spatial_gradient(&img)?;
        assert_eq!(gradient.gx.size(), size);
        assert_eq!(gradient.gy.size(), size);
        assert_eq!(gradient.gx.as_slice().len(), 28);
        Ok(())
    }

    #[test]
    fn test_spatial_gradient_interior_ramp() -> Result<(), ImageError> {
        // horizontal ramp, gx = (1 + 2 + 1) * 2 inside the image
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let img = Image::<u8>::new(size, (0..25).map(|i| (i % 5) as u8).collect())?;
        let gradient = spatial_gradient(&img)?;

        for r in 1..4 {
            for c in 1..4 {
                assert_eq!(gradient.gx.get(r, c), Some(&8));
                assert_eq!(gradient.gy.get(r, c), Some(&0));
            }
        }
        Ok(())
    }

    #[test]
    fn test_spatial_gradient_single_row_and_column() -> Result<(), ImageError> {
        let row = Image::<u8>::new([4, 1].into(), vec![0, 10, 20, 30])?;
        let gradient = spatial_gradient(&row)?;
        assert_eq!(gradient.gx.as_slice(), &[20, 40, 40, 20]);
        assert_eq!(gradient.gy.as_slice(), &[0, 0, 0, 0]);

        let col = Image::<u8>::new([1, 4].into(), vec![0, 10, 20, 30])?;
        let gradient = spatial_gradient(&col)?;
        assert_eq!(gradient.gx.as_slice(), &[0, 0, 0, 0]);
        assert_eq!(gradient.gy.as_slice(), &[20, 40, 40, 20]);

        let pixel = Image::<u8>::new([1, 1].into(), vec![200])?;
        let gradient = spatial_gradient(&pixel)?;
        assert_eq!(gradient.gx.as_slice(), &[0]);
        assert_eq!(gradient.gy.as_slice(), &[0]);
        Ok(())
    }

    #[test]
    fn test_spatial_gradient_saturates() -> Result<(), ImageError> {
        let img = Image::<i16>::new([3, 1].into(), vec![i16::MIN, 0, i16::MAX])?;
        let gradient = spatial_gradient(&img)?;
        assert_eq!(gradient.gx.as_slice()[1], i16::MAX);
        Ok(())
    }

    #[test]
    fn test_spatial_gradient_strategies_match() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 19,
            height: 11,
        };
        let data = (0..size.width * size.height)
            .map(|i| ((i * 97) % 256) as u8)
            .collect();
        let img = Image::new(size, data)?;

        let serial = spatial_gradient_with_strategy(&img, ExecutionStrategy::Serial)?;
        let parallel = spatial_gradient_with_strategy(&img, ExecutionStrategy::ParallelRows)?;
        assert_eq!(serial, parallel);
        Ok(())
    }
}
