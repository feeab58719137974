/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes of two images do not match.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a filter kernel is empty.
    #[error("Invalid kernel length: kernel_x={0}, kernel_y={1}")]
    InvalidKernelLength(usize, usize),

    /// Error when a gaussian sigma is not a positive finite number.
    #[error("Invalid gaussian sigma: {0}")]
    InvalidSigma(f64),

    /// Error when the pixel types of two buffers are incompatible.
    #[error("Incompatible pixel types: {0}")]
    IncompatiblePixelTypes(String),
}
