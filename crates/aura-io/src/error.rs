/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to encode the JPEG image.
    #[error("Error with Jpeg encoding. {0}")]
    JpegEncodingError(#[from] jpeg_encoder::EncodingError),

    /// Error when the image is larger than a JPEG can hold.
    #[error("Image of {0}x{1} exceeds the JPEG limit of 65535 pixels per side")]
    ImageTooLarge(usize, usize),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] aura_image::ImageError),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),
}
