use canny_image::{Image, ImageError};

use crate::edges::{self, EDGE};
use crate::filter::{self, kernels};
use crate::gradient;
use crate::parallel::ExecutionStrategy;

/// Parameters of the canny edge detector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CannyConfig {
    /// Sigma of the gaussian smoothing kernel.
    pub sigma: f32,
    /// Magnitude from which a pixel may extend an edge.
    pub low_threshold: i16,
    /// Magnitude from which a pixel starts an edge.
    pub high_threshold: i16,
    /// Execution strategy of the per-pixel stages.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strategy: ExecutionStrategy,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            sigma: 1.0,
            low_threshold: 20,
            high_threshold: 40,
            strategy: ExecutionStrategy::Auto,
        }
    }
}

impl CannyConfig {
    /// Create a new configuration with the default execution strategy.
    pub fn new(sigma: f32, low_threshold: i16, high_threshold: i16) -> Self {
        Self {
            sigma,
            low_threshold,
            high_threshold,
            ..Default::default()
        }
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the parameters without running any stage.
    pub fn validate(&self) -> Result<(), ImageError> {
        kernels::check_sigma(self.sigma)?;
        edges::check_thresholds(self.low_threshold, self.high_threshold)
    }
}

/// Detect the edges of a grayscale image.
///
/// Runs gaussian smoothing, Sobel gradients, edge strength, non-maximal
/// suppression and hysteresis in sequence.
///
/// # Arguments
///
/// * `src` - The grayscale image with shape (H, W).
/// * `config` - The detector parameters.
///
/// # Returns
///
/// The edge map with the same shape as `src`. Every pixel is either
/// [`EDGE`] or 0.
///
/// # Examples
///
/// ```
/// use canny_image::Image;
/// use canny_imgproc::canny::{canny, count_edges, CannyConfig};
///
/// let image = Image::<u8>::new([4, 4].into(), vec![
///     0, 0, 255, 255,
///     0, 0, 255, 255,
///     0, 0, 255, 255,
///     0, 0, 255, 255,
/// ]).unwrap();
///
/// let edges = canny(&image, &CannyConfig::new(0.5, 20, 40)).unwrap();
/// assert_eq!(count_edges(&edges), 8);
/// ```
pub fn canny(src: &Image<u8>, config: &CannyConfig) -> Result<Image<i16>, ImageError> {
    config.validate()?;

    let strategy = config.strategy;
    let total = std::time::Instant::now();
    log::debug!("canny on {} image with {:?}", src.size(), config);

    let now = std::time::Instant::now();
    let smoothed = filter::gaussian_smooth_with_strategy(src, config.sigma, strategy)?;
    log::debug!("gaussian smoothing: {:?}", now.elapsed());

    let now = std::time::Instant::now();
    let gradient = gradient::spatial_gradient_with_strategy(&smoothed, strategy)?;
    log::debug!("spatial gradient: {:?}", now.elapsed());

    let now = std::time::Instant::now();
    let strength = edges::edge_strength_with_strategy(&gradient, strategy)?;
    log::debug!("edge strength: {:?}", now.elapsed());

    let now = std::time::Instant::now();
    let mut map =
        edges::non_maximal_suppression_with_strategy(&strength.magnitude, &strength.direction, strategy)?;
    log::debug!("non maximal suppression: {:?}", now.elapsed());

    let now = std::time::Instant::now();
    edges::track_edges(&mut map, config.low_threshold, config.high_threshold)?;
    log::debug!("hysteresis: {:?}", now.elapsed());

    log::debug!(
        "canny found {} edge pixels in {:?}",
        count_edges(&map),
        total.elapsed()
    );

    Ok(map)
}

/// Convert an edge map into a displayable mask, 255 on edges and 0 elsewhere.
pub fn edge_mask(map: &Image<i16>) -> Image<u8> {
    map.map(|&v| if v == EDGE { 255 } else { 0 })
}

/// Number of edge pixels in an edge map.
pub fn count_edges(map: &Image<i16>) -> usize {
    map.as_slice().iter().filter(|&&v| v == EDGE).count()
}
