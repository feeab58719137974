use std::path::Path;

use aura_image::Image;
use jpeg_encoder::{ColorType, Encoder, JfifWrite};

use crate::error::IoError;

/// Writes the given JPEG _(rgb8)_ data to the given file path.
///
/// The Huffman tables are optimized for the image, which yields smaller files
/// at the same quality. Nothing is written when the image does not fit in a
/// JPEG frame.
///
/// # Arguments
///
/// - `file_path` - The path to the JPEG image.
/// - `image` - The image containing the JPEG image data.
/// - `quality` - The quality of the JPEG encoding, range from 1 (lowest) to 100 (highest).
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
    quality: u8,
) -> Result<(), IoError> {
    let dimensions = jpeg_dimensions(image)?;
    let encoder = Encoder::new_file(file_path, quality)?;
    encode_jpeg_impl(encoder, image, dimensions, ColorType::Rgb)
}

/// Encodes an _(rgb8)_ image to JPEG bytes in memory.
///
/// # Arguments
///
/// - `image` - The image to encode.
/// - `quality` - The quality of the JPEG encoding, range from 1 (lowest) to 100 (highest).
///
/// # Returns
///
/// The encoded JPEG file contents.
pub fn encode_image_jpeg_rgb8(image: &Image<u8, 3>, quality: u8) -> Result<Vec<u8>, IoError> {
    let mut buffer = Vec::new();
    let dimensions = jpeg_dimensions(image)?;
    let encoder = Encoder::new(&mut buffer, quality);
    encode_jpeg_impl(encoder, image, dimensions, ColorType::Rgb)?;
    Ok(buffer)
}

/// JPEG frames store their width and height on 16 bits.
fn jpeg_dimensions<const C: usize>(image: &Image<u8, C>) -> Result<(u16, u16), IoError> {
    let image_size = image.size();
    match (
        u16::try_from(image_size.width),
        u16::try_from(image_size.height),
    ) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(IoError::ImageTooLarge(image_size.width, image_size.height)),
    }
}

fn encode_jpeg_impl<W: JfifWrite, const C: usize>(
    mut encoder: Encoder<W>,
    image: &Image<u8, C>,
    (width, height): (u16, u16),
    color_type: ColorType,
) -> Result<(), IoError> {
    encoder.set_optimized_huffman_tables(true);
    encoder.encode(image.as_slice(), width, height, color_type)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::{decode_image_any_rgb8, read_image_any_rgb8};
    use aura_image::ImageSize;

    fn gray_ramp(size: ImageSize) -> Result<Image<u8, 3>, IoError> {
        let data = (0..size.area())
            .flat_map(|i| {
                let v = (i % 256) as u8;
                [v, v, v]
            })
            .collect();
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn write_read_jpeg() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("ramp_processed.jpg");

        let image = gray_ramp([64, 32].into())?;
        write_image_jpeg_rgb8(&file_path, &image, 95)?;
        assert!(file_path.exists(), "File does not exist: {:?}", file_path);

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.cols(), 64);
        assert_eq!(image_back.rows(), 32);
        assert_eq!(image_back.num_channels(), 3);

        Ok(())
    }

    #[test]
    fn encode_in_memory() -> Result<(), IoError> {
        let image = Image::<u8, 3>::from_size_val([16, 16].into(), 128)?;

        let bytes = encode_image_jpeg_rgb8(&image, 95)?;
        // SOI marker
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = decode_image_any_rgb8(&bytes)?;
        assert_eq!(decoded.size(), image.size());
        assert!(decoded.as_slice().iter().all(|&v| v.abs_diff(128) <= 2));

        Ok(())
    }

    #[test]
    fn lower_quality_is_smaller() -> Result<(), IoError> {
        let image = gray_ramp([128, 128].into())?;

        let high = encode_image_jpeg_rgb8(&image, 95)?;
        let low = encode_image_jpeg_rgb8(&image, 20)?;
        assert!(low.len() < high.len());

        Ok(())
    }

    #[test]
    fn too_large_for_jpeg() -> Result<(), IoError> {
        let image = Image::<u8, 3>::from_size_val([70_000, 1].into(), 0)?;

        let res = encode_image_jpeg_rgb8(&image, 95);
        assert!(matches!(res, Err(IoError::ImageTooLarge(70_000, 1))));

        Ok(())
    }

    #[test]
    fn too_large_leaves_no_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("wide_processed.jpg");

        let image = Image::<u8, 3>::from_size_val([1, 70_000].into(), 0)?;

        let res = write_image_jpeg_rgb8(&file_path, &image, 95);
        assert!(matches!(res, Err(IoError::ImageTooLarge(1, 70_000))));
        assert!(!file_path.exists());

        Ok(())
    }
}
