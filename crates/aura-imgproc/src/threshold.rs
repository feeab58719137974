use rayon::prelude::*;

use aura_image::{Image, ImageError};

/// Build a floating point mask of the pixels strictly above a threshold.
///
/// Writes `1.0` where `src > threshold` and `0.0` elsewhere. The threshold is
/// not restricted to the `u8` range: below zero every pixel is set, at 255 or
/// above none is.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output mask.
/// * `threshold` - The threshold value.
///
/// # Returns
///
/// The number of pixels set in the mask.
///
/// # Examples
///
/// ```
/// use aura_image::{Image, ImageSize};
/// use aura_imgproc::threshold::threshold_mask_u8;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![10, 200, 201]).unwrap();
/// let mut mask = Image::<f64, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// let count = threshold_mask_u8(&image, &mut mask, 200).unwrap();
/// assert_eq!(count, 1);
/// assert_eq!(mask.as_slice(), &[0.0, 0.0, 1.0]);
/// ```
pub fn threshold_mask_u8(
    src: &Image<u8, 1>,
    dst: &mut Image<f64, 1>,
    threshold: i32,
) -> Result<usize, ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let count = src
        .as_slice()
        .par_iter()
        .zip(dst.as_slice_mut().par_iter_mut())
        .map(|(&s, d)| {
            if s as i32 > threshold {
                *d = 1.0;
                1usize
            } else {
                *d = 0.0;
                0
            }
        })
        .sum::<usize>();

    Ok(count)
}

#[cfg(test)]
mod tests {
    use aura_image::{Image, ImageError, ImageSize};

    #[test]
    fn threshold_mask_is_strict() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![199, 200, 201, 255],
        )?;
        let mut mask = Image::<f64, 1>::from_size_val(image.size(), 0.5)?;

        let count = super::threshold_mask_u8(&image, &mut mask, 200)?;

        assert_eq!(count, 2);
        assert_eq!(mask.as_slice(), &[0.0, 0.0, 1.0, 1.0]);

        Ok(())
    }

    #[test]
    fn threshold_mask_out_of_range() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![0, 128, 255],
        )?;
        let mut mask = Image::<f64, 1>::from_size_val(image.size(), 0.0)?;

        assert_eq!(super::threshold_mask_u8(&image, &mut mask, -1)?, 3);
        assert_eq!(super::threshold_mask_u8(&image, &mut mask, 255)?, 0);
        assert_eq!(super::threshold_mask_u8(&image, &mut mask, 1000)?, 0);

        Ok(())
    }
}
