//! Inverted greyscale with a glow around the bright regions.
//!
//! The pipeline inverts the colors, converts to luminance, marks the pixels
//! above a threshold and blurs that mask into a halo which is composited over
//! the luminance with a per-pixel maximum. The output is greyscale stored as
//! RGB with three identical channels.
//!
//! Applying the filter twice is not idempotent once `aura_size > 0`: the second
//! pass inverts the glow of the first.

use aura_image::{Image, ImageError, ImageSize};

use crate::{color, filter, invert, parallel, resize, threshold};

/// Longest side, in pixels, processed at full resolution. Larger inputs are downscaled.
pub const MAX_IMAGE_SIDE: usize = 2000;

/// Side of the square reference resolution at which `aura_size` is calibrated.
pub const REFERENCE_SIDE: usize = 220;

/// Gaussian sigma per unit of aura size at the reference resolution.
const SIGMA_PER_AURA: f64 = 0.2;

/// Smallest sigma used for the glow.
const MIN_SIGMA: f64 = 0.5;

/// An error type for the aura filter.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AuraError {
    /// The input image has no pixels.
    #[error("Invalid input: image has zero width or height ({0})")]
    EmptyImage(ImageSize),

    /// Error from one of the underlying image operations.
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Parameters of the aura filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuraParams {
    /// Radius of the glow, typically between 0 and 50. Zero disables the glow.
    pub aura_size: f64,
    /// Luminance above which an inverted pixel counts as bright, typically between 100 and 250.
    pub white_threshold: i32,
}

impl Default for AuraParams {
    fn default() -> Self {
        Self {
            aura_size: 15.0,
            white_threshold: 200,
        }
    }
}

impl AuraParams {
    /// Create a new set of parameters.
    pub fn new(aura_size: f64, white_threshold: i32) -> Self {
        Self {
            aura_size,
            white_threshold,
        }
    }

    /// Set the aura size.
    pub fn with_aura_size(mut self, aura_size: f64) -> Self {
        self.aura_size = aura_size;
        self
    }

    /// Set the white threshold.
    pub fn with_white_threshold(mut self, white_threshold: i32) -> Self {
        self.white_threshold = white_threshold;
        self
    }

    /// The aura size clamped to be non-negative. NaN and infinities count as zero.
    pub fn effective_aura_size(&self) -> f64 {
        if self.aura_size.is_finite() && self.aura_size > 0.0 {
            self.aura_size
        } else {
            0.0
        }
    }
}

/// Result of [`apply_aura`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuraOutput {
    /// Greyscale result with R = G = B.
    pub image: Image<u8, 3>,
    /// Number of pixels whose inverted luminance is above the threshold.
    pub bright_pixel_count: usize,
}

/// Gaussian sigma of the glow for an image of the given size.
///
/// The blur is scaled by `sqrt(area / 220²)` so the halo covers the same share
/// of the picture whatever its resolution, and never drops below 0.5.
///
/// # Example
///
/// ```
/// use aura_image::ImageSize;
/// use aura_imgproc::aura::aura_sigma;
///
/// let sigma = aura_sigma(ImageSize { width: 220, height: 220 }, 15.0);
/// assert!((sigma - 3.0).abs() < 1e-12);
/// ```
pub fn aura_sigma(size: ImageSize, aura_size: f64) -> f64 {
    let reference_area = (REFERENCE_SIDE * REFERENCE_SIDE) as f64;
    let scale = (size.area() as f64 / reference_area).sqrt();
    (aura_size * scale * SIGMA_PER_AURA).max(MIN_SIGMA)
}

/// Downscale an image so that its longer side is at most [`MAX_IMAGE_SIDE`].
///
/// Returns `None` when the image already fits.
pub fn downscale_guard(src: &Image<u8, 3>) -> Result<Option<Image<u8, 3>>, ImageError> {
    let target = resize::fit_within(src.size(), MAX_IMAGE_SIDE);
    if target == src.size() {
        return Ok(None);
    }

    let mut dst = Image::<u8, 3>::from_size_val(target, 0)?;
    resize::resize_fast(src, &mut dst)?;

    Ok(Some(dst))
}

/// Invert an RGB image and convert it to 8-bit luminance.
///
/// # Arguments
///
/// * `src` - The input RGB image.
///
/// # Returns
///
/// The luminance of the inverted image, truncated to `u8`.
pub fn inverted_luminance(src: &Image<u8, 3>) -> Result<Image<u8, 1>, ImageError> {
    let mut inverted = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    invert::invert_u8(src, &mut inverted)?;

    let mut gray = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    color::gray_from_rgb_u8(&inverted, &mut gray)?;

    Ok(gray)
}

/// Apply the luminance aura filter.
///
/// # Arguments
///
/// * `src` - The input RGB image. It is never modified.
/// * `params` - The aura size and white threshold.
///
/// # Returns
///
/// The filtered image, downscaled to at most [`MAX_IMAGE_SIDE`] on its longer
/// side, and the number of bright pixels counted before the blur.
///
/// # Errors
///
/// [`AuraError::EmptyImage`] if the image has zero width or height.
///
/// # Example
///
/// ```
/// use aura_image::{Image, ImageSize};
/// use aura_imgproc::aura::{apply_aura, AuraParams};
///
/// // black pixels become white after the inversion
/// let mut image = Image::<u8, 3>::from_size_val(ImageSize { width: 9, height: 9 }, 255).unwrap();
/// image.as_slice_mut()[(4 * 9 + 4) * 3..(4 * 9 + 5) * 3].fill(0);
///
/// let out = apply_aura(&image, &AuraParams::new(15.0, 200)).unwrap();
/// assert_eq!(out.bright_pixel_count, 1);
/// assert_eq!(out.image.size(), image.size());
/// ```
pub fn apply_aura(src: &Image<u8, 3>, params: &AuraParams) -> Result<AuraOutput, AuraError> {
    if src.size().is_empty() {
        return Err(AuraError::EmptyImage(src.size()));
    }

    let resized = downscale_guard(src)?;
    let image = resized.as_ref().unwrap_or(src);
    let size = image.size();

    let gray = inverted_luminance(image)?;

    let mut mask = Image::<f64, 1>::from_size_val(size, 0.0)?;
    let bright_pixel_count = threshold::threshold_mask_u8(&gray, &mut mask, params.white_threshold)?;

    let aura_size = params.effective_aura_size();

    let luminance = if aura_size > 0.0 && bright_pixel_count > 0 {
        let sigma = aura_sigma(size, aura_size);

        let mut glow = Image::<f64, 1>::from_size_val(size, 0.0)?;
        filter::gaussian_blur_sigma(&mask, &mut glow, sigma)?;

        // the glow is truncated to u8 before taking the maximum
        let mut enhanced = Image::<u8, 1>::from_size_val(size, 0)?;
        parallel::par_iter_rows_val_two(&gray, &glow, &mut enhanced, |&l, &g, dst| {
            *dst = l.max((g * 255.0).clamp(0.0, 255.0) as u8);
        });
        enhanced
    } else {
        gray
    };

    let mut output = Image::<u8, 3>::from_size_val(size, 0)?;
    color::rgb_from_gray(&luminance, &mut output)?;

    Ok(AuraOutput {
        image: output,
        bright_pixel_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_with_black_dot(size: ImageSize, x: usize, y: usize) -> Result<Image<u8, 3>, ImageError> {
        let mut image = Image::<u8, 3>::from_size_val(size, 255)?;
        let idx = (y * size.width + x) * 3;
        image.as_slice_mut()[idx..idx + 3].fill(0);
        Ok(image)
    }

    #[test]
    fn params_default() {
        let params = AuraParams::default();
        assert_eq!(params.aura_size, 15.0);
        assert_eq!(params.white_threshold, 200);

        let params = params.with_aura_size(25.0).with_white_threshold(180);
        assert_eq!(params, AuraParams::new(25.0, 180));
    }

    #[test]
    fn effective_aura_size_clamps() {
        assert_eq!(AuraParams::new(-3.0, 200).effective_aura_size(), 0.0);
        assert_eq!(AuraParams::new(f64::NAN, 200).effective_aura_size(), 0.0);
        assert_eq!(AuraParams::new(f64::INFINITY, 200).effective_aura_size(), 0.0);
        assert_eq!(AuraParams::new(7.5, 200).effective_aura_size(), 7.5);
    }

    #[test]
    fn sigma_scales_with_resolution() {
        let small = aura_sigma([220, 220].into(), 15.0);
        let large = aura_sigma([440, 440].into(), 15.0);
        approx::assert_abs_diff_eq!(small, 3.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(large, 6.0, epsilon = 1e-12);

        // floor at 0.5
        assert_eq!(aura_sigma([10, 10].into(), 1.0), 0.5);
    }

    #[test]
    fn empty_image_is_rejected() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 0,
            height: 10,
        };
        let image = Image::<u8, 3>::new(size, vec![])?;

        assert_eq!(
            apply_aura(&image, &AuraParams::default()),
            Err(AuraError::EmptyImage(size))
        );
        Ok(())
    }

    #[test]
    fn input_is_not_modified() -> Result<(), AuraError> {
        let image = white_with_black_dot([16, 16].into(), 8, 8)?;
        let copy = image.clone();

        apply_aura(&image, &AuraParams::default())?;

        assert_eq!(image, copy);
        Ok(())
    }

    #[test]
    fn no_aura_is_plain_inverted_gray() -> Result<(), AuraError> {
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                0, 0, 0,
                255, 255, 255,
                255, 0, 0,
                10, 20, 30,
            ],
        )?;

        let out = apply_aura(&image, &AuraParams::new(0.0, 200))?;
        let gray = inverted_luminance(&image)?;

        for (pixel, &l) in out.image.as_slice().chunks_exact(3).zip(gray.as_slice()) {
            assert_eq!(pixel, &[l, l, l]);
        }
        // inverted red is cyan: 0.587 * 255 + 0.114 * 255 = 178.755
        assert_eq!(gray.as_slice()[2], 178);
        assert_eq!(gray.as_slice()[1], 0);
        Ok(())
    }

    #[test]
    fn glow_brightens_neighbours() -> Result<(), AuraError> {
        let image = white_with_black_dot([21, 21].into(), 10, 10)?;

        let plain = apply_aura(&image, &AuraParams::new(0.0, 200))?;
        let glowing = apply_aura(&image, &AuraParams::new(15.0, 200))?;

        assert_eq!(plain.bright_pixel_count, 1);
        assert_eq!(glowing.bright_pixel_count, 1);

        let at = |img: &Image<u8, 3>, x: usize, y: usize| img.as_slice()[(y * 21 + x) * 3];
        assert_eq!(at(&plain.image, 11, 10), 0);
        assert!(at(&glowing.image, 11, 10) > 0);
        assert!(at(&glowing.image, 10, 10) >= 254);
        Ok(())
    }
}
