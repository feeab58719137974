use aura_image::{Image, ImageError, ImageSize};
use fast_image_resize as fr;

/// Compute the size of an image shrunk so that its longer side is at most `max_side`.
///
/// The aspect ratio is preserved and the shorter side is rounded to the nearest
/// pixel, never below one. Sizes that already fit are returned unchanged.
///
/// # Example
///
/// ```
/// use aura_image::ImageSize;
/// use aura_imgproc::resize::fit_within;
///
/// let size = fit_within(ImageSize { width: 4000, height: 3000 }, 2000);
/// assert_eq!(size, ImageSize { width: 2000, height: 1500 });
/// ```
pub fn fit_within(size: ImageSize, max_side: usize) -> ImageSize {
    let long = size.width.max(size.height);
    if long <= max_side || max_side == 0 {
        return size;
    }

    let scale = max_side as f64 / long as f64;
    let shrink = |side: usize| ((side as f64 * scale).round() as usize).clamp(1, max_side);

    if size.width >= size.height {
        ImageSize {
            width: max_side,
            height: shrink(size.height),
        }
    } else {
        ImageSize {
            width: shrink(size.width),
            height: max_side,
        }
    }
}

/// Resize an image to a new size using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// It supports only 3-channel images and u8 data type, and resamples with a
/// Lanczos3 filter. The destination size is taken from `dst`.
///
/// # Arguments
///
/// * `src` - The input image container with 3 channels.
/// * `dst` - The output image container, already allocated with the target size.
///
/// # Example
///
/// ```
/// use aura_image::{Image, ImageSize};
/// use aura_imgproc::resize::resize_fast;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0).unwrap();
///
/// resize_fast(&image, &mut image_resized).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
///
/// # Errors
///
/// The function returns an error if the image cannot be resized.
pub fn resize_fast(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size().is_empty() || dst.size().is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    let (dst_width, dst_height) = (dst.width() as u32, dst.height() as u32);

    // prepare the input image for the fast_image_resize crate
    let src_image = fr::images::ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| ImageError::IncompatiblePixelTypes(e.to_string()))?;

    // prepare the output image for the fast_image_resize crate
    let mut dst_image = fr::images::Image::from_slice_u8(
        dst_width,
        dst_height,
        dst.as_slice_mut(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| ImageError::IncompatiblePixelTypes(e.to_string()))?;

    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3));

    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ImageError::IncompatiblePixelTypes(e.to_string()))?;

    Ok(())
}
