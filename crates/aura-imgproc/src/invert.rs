use aura_image::{Image, ImageError};

use crate::parallel;

/// Invert the colors of an 8-bit image.
///
/// Every channel value `v` becomes `255 - v`.
///
/// # Arguments
///
/// * `src` - The input image with an arbitrary number of channels.
/// * `dst` - The output image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use aura_image::{Image, ImageSize};
/// use aura_imgproc::invert::invert_u8;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![0, 100, 255],
/// )
/// .unwrap();
///
/// let mut inverted = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
/// invert_u8(&image, &mut inverted).unwrap();
///
/// assert_eq!(inverted.as_slice(), &[255, 155, 0]);
/// ```
pub fn invert_u8<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |src_val, dst_val| {
        *dst_val = u8::MAX - *src_val;
    });

    Ok(())
}
