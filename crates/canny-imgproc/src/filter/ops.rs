use canny_image::{Image, ImageError};

use super::{kernels, separable_filter};
use crate::parallel::ExecutionStrategy;

/// Smooth an 8-bit image with a gaussian kernel synthesized from `sigma`.
///
/// Uses `ExecutionStrategy::Auto`. For explicit control, use
/// [`gaussian_smooth_with_strategy`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A new image of the same size, each sample rounded and clamped to `[0, 255]`.
///
/// # Examples
///
/// ```
/// use canny_image::Image;
/// use canny_imgproc::filter::gaussian_smooth;
///
/// let image = Image::<u8>::from_size_val([8, 6].into(), 90).unwrap();
/// let smoothed = gaussian_smooth(&image, 1.5).unwrap();
///
/// assert_eq!(smoothed.size(), image.size());
/// assert!(smoothed.as_slice().iter().all(|&v| v == 90));
/// ```
pub fn gaussian_smooth(src: &Image<u8>, sigma: f32) -> Result<Image<u8>, ImageError> {
    gaussian_smooth_with_strategy(src, sigma, ExecutionStrategy::Auto)
}

/// Smooth an 8-bit image with a gaussian kernel using the given execution strategy.
///
/// Borders are handled by replicating the nearest valid row or column.
pub fn gaussian_smooth_with_strategy(
    src: &Image<u8>,
    sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<Image<u8>, ImageError> {
    let kernel = kernels::gaussian_kernel(sigma)?;
    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    separable_filter(src, &mut dst, kernel.as_slice(), kernel.as_slice(), strategy)?;
    Ok(dst)
}
