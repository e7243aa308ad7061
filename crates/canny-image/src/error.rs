/// An error type for the image and image processing crates.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when one of the image dimensions is zero.
    #[error("Invalid image dimensions: width {0}, height {1}")]
    InvalidImageDimensions(usize, usize),

    /// Error when two images that must match in size do not.
    #[error("Image size mismatch: ({0}x{1}) vs ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel index is out of bounds.
    #[error("Pixel index out of bounds: ({0}, {1}) for image of size ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when a pixel value cannot be cast to the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),

    /// Error when a filter kernel is empty.
    #[error("Invalid kernel length: kernel_x {0}, kernel_y {1}")]
    InvalidKernelLength(usize, usize),

    /// Error when the gaussian sigma is not a strictly positive finite number.
    #[error("Invalid sigma ({0}), must be finite and > 0")]
    InvalidSigma(f32),

    /// Error when an angle is not one of the quantized gradient directions.
    #[error("Invalid direction ({0}), must be one of 0, 45, 90 or 135 degrees")]
    InvalidDirection(i16),

    /// Error when the hysteresis thresholds are negative or out of order.
    #[error("Invalid thresholds: low ({0}) and high ({1}) must satisfy 0 <= low <= high")]
    InvalidThresholds(i16, i16),
}
