use canny_image::{Image, ImageError};

use crate::gradient::{spatial_gradient_with_strategy, GradientField};
use crate::parallel::{self, ExecutionStrategy};

/// Gradient orientation quantized to four bins, modulo 180 degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Horizontal gradient, [0, 22.5) and [157.5, 180) degrees.
    #[default]
    Deg0,
    /// [22.5, 67.5) degrees.
    Deg45,
    /// Vertical gradient, [67.5, 112.5) degrees.
    Deg90,
    /// [112.5, 157.5) degrees.
    Deg135,
}

impl Direction {
    /// The angle of the bin in degrees.
    pub fn degrees(self) -> i16 {
        match self {
            Direction::Deg0 => 0,
            Direction::Deg45 => 45,
            Direction::Deg90 => 90,
            Direction::Deg135 => 135,
        }
    }

    /// Quantize the orientation of the gradient `(gx, gy)`.
    ///
    /// The angle `atan2(gy, gx)` is folded into `[0, 180)` and snapped to the
    /// nearest bin. A zero gradient maps to [`Direction::Deg0`].
    ///
    /// # Examples
    ///
    /// ```
    /// use canny_imgproc::edges::Direction;
    ///
    /// assert_eq!(Direction::from_gradient(1, -1), Direction::Deg135);
    /// assert_eq!(Direction::from_gradient(1, 3), Direction::Deg90);
    /// assert_eq!(Direction::from_gradient(0, 0), Direction::Deg0);
    /// ```
    pub fn from_gradient(gx: i32, gy: i32) -> Self {
        if gx == 0 && gy == 0 {
            return Direction::Deg0;
        }

        let mut angle = (gy as f64).atan2(gx as f64).to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if angle >= 180.0 {
            angle -= 180.0;
        }

        if angle < 22.5 {
            Direction::Deg0
        } else if angle < 67.5 {
            Direction::Deg45
        } else if angle < 112.5 {
            Direction::Deg90
        } else if angle < 157.5 {
            Direction::Deg135
        } else {
            Direction::Deg0
        }
    }
}

impl TryFrom<i16> for Direction {
    type Error = ImageError;

    fn try_from(degrees: i16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Direction::Deg0),
            45 => Ok(Direction::Deg45),
            90 => Ok(Direction::Deg90),
            135 => Ok(Direction::Deg135),
            _ => Err(ImageError::InvalidDirection(degrees)),
        }
    }
}

/// Gradient magnitude and quantized direction of an image.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStrength {
    /// Rounded gradient magnitude, saturated at `i16::MAX`.
    pub magnitude: Image<i16>,
    /// Quantized gradient direction.
    pub direction: Image<Direction>,
}

/// Rounded euclidean norm of the gradient, saturated at `i16::MAX`.
#[inline]
pub fn gradient_magnitude(gx: i32, gy: i32) -> i16 {
    let (gx, gy) = (gx as f64, gy as f64);
    (gx * gx + gy * gy).sqrt().round().min(i16::MAX as f64) as i16
}

/// Compute the edge strength from precomputed gradients.
///
/// Uses `ExecutionStrategy::Auto`. For explicit control, use
/// [`edge_strength_with_strategy`].
///
/// # Arguments
///
/// * `gradient` - The `gx` and `gy` derivatives, same shape.
///
/// # Returns
///
/// The magnitude and direction images.
pub fn edge_strength(gradient: &GradientField) -> Result<EdgeStrength, ImageError> {
    edge_strength_with_strategy(gradient, ExecutionStrategy::Auto)
}

/// Compute the edge strength from precomputed gradients using the given execution strategy.
pub fn edge_strength_with_strategy(
    gradient: &GradientField,
    strategy: ExecutionStrategy,
) -> Result<EdgeStrength, ImageError> {
    let GradientField { gx, gy } = gradient;
    if gx.size() != gy.size() {
        return Err(ImageError::InvalidImageSize(
            gx.cols(),
            gx.rows(),
            gy.cols(),
            gy.rows(),
        ));
    }

    let cols = gx.cols();
    let gx_data = gx.as_slice();
    let gy_data = gy.as_slice();

    let mut magnitude = Image::from_size_val(gx.size(), 0i16)?;
    let mut direction = Image::from_size_val(gx.size(), Direction::Deg0)?;

    parallel::for_each_row_pair(
        magnitude.as_slice_mut(),
        direction.as_slice_mut(),
        cols,
        strategy,
        |r, mag_row, dir_row| {
            let offset = r * cols;
            for (c, (mag, dir)) in mag_row.iter_mut().zip(dir_row.iter_mut()).enumerate() {
                let x = gx_data[offset + c] as i32;
                let y = gy_data[offset + c] as i32;
                *mag = gradient_magnitude(x, y);
                *dir = Direction::from_gradient(x, y);
            }
        },
    );

    Ok(EdgeStrength {
        magnitude,
        direction,
    })
}

/// Compute the edge strength directly from an image.
///
/// Equivalent to [`spatial_gradient`](crate::gradient::spatial_gradient)
/// followed by [`edge_strength`].
pub fn edge_strength_from_image<T>(src: &Image<T>) -> Result<EdgeStrength, ImageError>
where
    T: Copy + Into<i32> + Sync,
{
    edge_strength_from_image_with_strategy(src, ExecutionStrategy::Auto)
}

/// Compute the edge strength directly from an image using the given execution strategy.
pub fn edge_strength_from_image_with_strategy<T>(
    src: &Image<T>,
    strategy: ExecutionStrategy,
) -> Result<EdgeStrength, ImageError>
where
    T: Copy + Into<i32> + Sync,
{
    let gradient = spatial_gradient_with_strategy(src, strategy)?;
    edge_strength_with_strategy(&gradient, strategy)
}
