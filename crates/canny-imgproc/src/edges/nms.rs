//! Non-maximum suppression of the gradient magnitude along the quantized direction.
//!
//! Each pixel is compared against the two neighbours its direction points to.
//! Neighbours falling outside the image are ignored, so border pixels only
//! compete with the neighbour they have. Ties are kept.

use canny_image::{Image, ImageError};

use super::strength::Direction;
use crate::border::offset_index;
use crate::parallel::{self, ExecutionStrategy};

impl Direction {
    /// The `(row, col)` offsets of the two neighbours compared against during suppression.
    pub fn neighbor_offsets(self) -> [(isize, isize); 2] {
        match self {
            Direction::Deg0 => [(0, -1), (0, 1)],
            Direction::Deg45 => [(-1, 1), (1, -1)],
            Direction::Deg90 => [(-1, 0), (1, 0)],
            Direction::Deg135 => [(-1, -1), (1, 1)],
        }
    }
}

/// Zero out the magnitudes that are not local maxima along their direction.
///
/// Uses `ExecutionStrategy::Auto`. For explicit control, use
/// [`non_maximal_suppression_with_strategy`].
///
/// # Arguments
///
/// * `magnitude` - The gradient magnitude with shape (H, W).
/// * `direction` - The quantized gradient direction with shape (H, W).
///
/// # Returns
///
/// A copy of `magnitude` where every pixel smaller than one of its two
/// neighbours is set to zero.
///
/// # Examples
///
/// ```
/// use canny_image::Image;
/// use canny_imgproc::edges::{non_maximal_suppression, Direction};
///
/// let magnitude = Image::<i16>::new([3, 3].into(), vec![0, 0, 0, 0, 10, 0, 50, 20, 50]).unwrap();
/// let direction = Image::from_size_val([3, 3].into(), Direction::Deg0).unwrap();
///
/// let suppressed = non_maximal_suppression(&magnitude, &direction).unwrap();
/// assert_eq!(suppressed.as_slice(), &[0, 0, 0, 0, 10, 0, 50, 0, 50]);
/// ```
pub fn non_maximal_suppression(
    magnitude: &Image<i16>,
    direction: &Image<Direction>,
) -> Result<Image<i16>, ImageError> {
    non_maximal_suppression_with_strategy(magnitude, direction, ExecutionStrategy::Auto)
}

/// Non-maximal suppression using the given execution strategy.
pub fn non_maximal_suppression_with_strategy(
    magnitude: &Image<i16>,
    direction: &Image<Direction>,
    strategy: ExecutionStrategy,
) -> Result<Image<i16>, ImageError> {
    if magnitude.size() != direction.size() {
        return Err(ImageError::InvalidImageSize(
            magnitude.cols(),
            magnitude.rows(),
            direction.cols(),
            direction.rows(),
        ));
    }

    let rows = magnitude.rows();
    let cols = magnitude.cols();
    let mag = magnitude.as_slice();
    let dir = direction.as_slice();

    let mut suppressed = Image::from_size_val(magnitude.size(), 0i16)?;

    parallel::for_each_row(suppressed.as_slice_mut(), cols, strategy, |r, row| {
        for (c, out) in row.iter_mut().enumerate() {
            let idx = r * cols + c;
            let m = mag[idx];

            let is_maximum = dir[idx].neighbor_offsets().iter().all(|&(dr, dc)| {
                match (offset_index(r, dr, rows), offset_index(c, dc, cols)) {
                    (Some(nr), Some(nc)) => m >= mag[nr * cols + nc],
                    _ => true,
                }
            });

            *out = if is_maximum { m } else { 0 };
        }
    });

    Ok(suppressed)
}
