use canny_image::ImageError;

/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. A size of 0 gives an empty kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    if kernel_size == 0 {
        return Vec::new();
    }

    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;

    // compute the kernel, x is scaled by sigma before squaring
    for i in 0..kernel_size {
        let x = (i as f32 - mean) / sigma;
        kernel.push((-0.5 * x * x).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Largest radius whose window of `f32` weights can still be allocated.
const MAX_GAUSSIAN_RADIUS: usize = (isize::MAX as usize / std::mem::size_of::<f32>() - 1) / 2;

/// Number of taps of the gaussian kernel for a given sigma.
///
/// The radius is `ceil(3 * sigma)` and the window is `2 * radius + 1`.
///
/// # Returns
///
/// `None` when sigma is not a finite positive number or the window is too large to allocate.
pub fn gaussian_window_size(sigma: f32) -> Option<usize> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return None;
    }

    let radius = (3.0 * sigma as f64).ceil();
    if radius > MAX_GAUSSIAN_RADIUS as f64 {
        return None;
    }

    (radius as usize).checked_mul(2)?.checked_add(1)
}

pub(crate) fn check_sigma(sigma: f32) -> Result<usize, ImageError> {
    gaussian_window_size(sigma).ok_or(ImageError::InvalidSigma(sigma))
}

/// A normalized, symmetric 1D gaussian kernel sized from its sigma.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    sigma: f32,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// The sigma the kernel was built from.
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// The number of taps of the kernel.
    pub fn window(&self) -> usize {
        self.weights.len()
    }

    /// The number of taps on each side of the center.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// The kernel weights.
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }
}

/// Synthesize the gaussian kernel for the given sigma.
///
/// # Arguments
///
/// * `sigma` - The spread of the gaussian, must be finite and strictly positive.
///
/// # Returns
///
/// The kernel of [`gaussian_window_size`] taps.
///
/// # Examples
///
/// ```
/// use canny_imgproc::filter::kernels::gaussian_kernel;
///
/// let kernel = gaussian_kernel(2.0).unwrap();
/// assert_eq!(kernel.window(), 13);
/// assert_eq!(kernel.radius(), 6);
/// ```
pub fn gaussian_kernel(sigma: f32) -> Result<GaussianKernel, ImageError> {
    let window = check_sigma(sigma)?;
    let weights = gaussian_kernel_1d(window, sigma);
    Ok(GaussianKernel { sigma, weights })
}

/// Create the 3 taps sobel kernels.
///
/// # Returns
///
/// The derivative kernel `[-1, 0, 1]` and the smoothing kernel `[1, 2, 1]`.
/// The horizontal 3x3 sobel kernel is the outer product `smooth^T * derivative`.
pub fn sobel_kernel_1d() -> ([i32; 3], [i32; 3]) {
    ([-1, 0, 1], [1, 2, 1])
}
