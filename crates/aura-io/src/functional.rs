use std::path::Path;

use aura_image::{Image, ImageSize};

use crate::error::IoError;

/// File extensions, lowercase, of the raster formats that can be decoded.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Check whether a path has one of the [`SUPPORTED_EXTENSIONS`], ignoring case.
///
/// # Example
///
/// ```
/// use aura_io::functional::is_supported_image;
///
/// assert!(is_supported_image("photos/cat.JPG"));
/// assert!(!is_supported_image("notes.txt"));
/// assert!(!is_supported_image("no_extension"));
/// ```
pub fn is_supported_image(file_path: impl AsRef<Path>) -> bool {
    file_path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Reads an image from the given file path and converts it to 8-bit RGB.
///
/// The format is detected from the file contents. Grayscale images are
/// expanded to three channels, alpha is dropped and animated images yield
/// their first frame.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image containing the decoded pixels.
///
/// # Errors
///
/// [`IoError::FileDoesNotExist`] if the path does not exist,
/// [`IoError::ImageDecodeError`] if the contents cannot be decoded.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    from_dynamic_image(img)
}

/// Decodes an image held in memory and converts it to 8-bit RGB.
///
/// # Arguments
///
/// * `bytes` - The encoded image, in any of the supported formats.
pub fn decode_image_any_rgb8(bytes: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let img = image::load_from_memory(bytes)?;
    from_dynamic_image(img)
}

fn from_dynamic_image(img: image::DynamicImage) -> Result<Image<u8, 3>, IoError> {
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32, data: Vec<u8>) -> Result<(), IoError> {
        let buffer = image::RgbImage::from_raw(width, height, data).ok_or_else(|| {
            IoError::FileError(std::io::Error::other("buffer does not match the size"))
        })?;
        buffer.save(path)?;
        Ok(())
    }

    #[test]
    fn supported_extensions() {
        for name in ["a.png", "a.PNG", "b.jpeg", "c.Jpg", "d.bmp", "e.gif", "f.webp"] {
            assert!(is_supported_image(name), "{name}");
        }
        for name in ["a.tiff", "b.txt", "c", ".png.bak"] {
            assert!(!is_supported_image(name), "{name}");
        }
    }

    #[test]
    fn read_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let data = (0..4 * 3 * 3).map(|v| v as u8 * 7).collect::<Vec<_>>();
        write_png(&file_path, 4, 3, data.clone())?;

        let image = read_image_any_rgb8(&file_path)?;
        assert_eq!(image.cols(), 4);
        assert_eq!(image.rows(), 3);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.as_slice(), data.as_slice());

        Ok(())
    }

    #[test]
    fn read_gray_png_expands_channels() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        image::GrayImage::from_pixel(2, 2, image::Luma([77])).save(&file_path)?;

        let image = read_image_any_rgb8(&file_path)?;
        assert_eq!(image.as_slice(), &[77u8; 12]);

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_any_rgb8("does/not/exist.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_corrupt_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("broken.png");
        std::fs::write(&file_path, b"definitely not a png")?;

        let res = read_image_any_rgb8(&file_path);
        assert!(matches!(res, Err(IoError::ImageDecodeError(_))));

        Ok(())
    }

    #[test]
    fn decode_from_memory() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("pixel.png");
        write_png(&file_path, 1, 1, vec![10, 20, 30])?;

        let bytes = std::fs::read(&file_path)?;
        let image = decode_image_any_rgb8(&bytes)?;
        assert_eq!(image.as_slice(), &[10, 20, 30]);

        Ok(())
    }
}
