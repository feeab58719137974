use aura_image::{Image, ImageError};

use super::{kernels, separable_filter};

/// Blur an image using a gaussian blur filter with mirrored borders.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y).
/// * `sigma` - The sigma of the gaussian kernel, xy-ordered.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur<const C: usize>(
    src: &Image<f64, C>,
    dst: &mut Image<f64, C>,
    kernel_size: (usize, usize),
    sigma: (f64, f64),
) -> Result<(), ImageError> {
    for s in [sigma.0, sigma.1] {
        if !(s.is_finite() && s > 0.0) {
            return Err(ImageError::InvalidSigma(s));
        }
    }

    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0);
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1);
    separable_filter(src, dst, &kernel_x, &kernel_y)
}

/// Blur an image with an isotropic gaussian whose kernel size follows from sigma.
///
/// The kernel covers four standard deviations on each side, see
/// [`kernels::gaussian_kernel_size`]. Borders are mirrored
/// (`...d c b a | a b c d...`).
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `sigma` - The standard deviation of the gaussian in pixels.
///
/// # Example
///
/// ```
/// use aura_image::{Image, ImageSize};
/// use aura_imgproc::filter::gaussian_blur_sigma;
///
/// let image = Image::<f64, 1>::from_size_val(ImageSize { width: 8, height: 6 }, 0.5).unwrap();
/// let mut blurred = Image::<f64, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gaussian_blur_sigma(&image, &mut blurred, 2.0).unwrap();
///
/// // a flat image stays flat with a mirrored border
/// assert!(blurred.as_slice().iter().all(|v| (v - 0.5).abs() < 1e-12));
/// ```
pub fn gaussian_blur_sigma<const C: usize>(
    src: &Image<f64, C>,
    dst: &mut Image<f64, C>,
    sigma: f64,
) -> Result<(), ImageError> {
    let kernel_size = kernels::gaussian_kernel_size(sigma);
    gaussian_blur(src, dst, (kernel_size, kernel_size), (sigma, sigma))
}
