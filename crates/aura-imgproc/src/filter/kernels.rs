/// Number of standard deviations covered on each side of a gaussian kernel.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Create a gaussian blur kernel.
///
/// The weights are `exp(-x² / 2σ²)` for `x` centered on the middle tap,
/// normalized to sum one.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel. Empty if `kernel_size` is zero.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f64> {
    if kernel_size == 0 {
        return Vec::new();
    }

    let mean = (kernel_size - 1) as f64 / 2.0;
    let factor = -0.5 / (sigma * sigma);

    // compute the kernel
    let mut kernel = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - mean;
            (factor * (x * x)).exp()
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Kernel size needed to cover [`GAUSSIAN_TRUNCATE`] standard deviations on each side.
///
/// The radius is `floor(4 * sigma + 0.5)` and the size is always odd.
pub fn gaussian_kernel_size(sigma: f64) -> usize {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5).floor().max(0.0) as usize;
    2 * radius + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        let expected = [
            0.000_263_865_082_737_354,
            0.106_450_771_973_591_5,
            0.786_570_725_887_342_2,
            0.106_450_771_973_591_5,
            0.000_263_865_082_737_354,
        ];

        for (&k, &e) in kernel.iter().zip(expected.iter()) {
            approx::assert_relative_eq!(k, e, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_gaussian_kernel_1d_normalized() {
        for sigma in [0.5, 1.0, 3.3, 12.0] {
            let kernel = gaussian_kernel_1d(gaussian_kernel_size(sigma), sigma);
            approx::assert_abs_diff_eq!(kernel.iter().sum::<f64>(), 1.0, epsilon = 1e-12);

            // symmetric around the center
            let n = kernel.len();
            for i in 0..n / 2 {
                assert_eq!(kernel[i], kernel[n - 1 - i]);
            }
        }
    }

    #[test]
    fn test_gaussian_kernel_size() {
        assert_eq!(gaussian_kernel_size(0.5), 5);
        assert_eq!(gaussian_kernel_size(1.0), 9);
        assert_eq!(gaussian_kernel_size(3.0), 25);
        assert_eq!(gaussian_kernel_size(0.0), 1);
    }

    #[test]
    fn test_gaussian_kernel_empty() {
        assert!(gaussian_kernel_1d(0, 1.0).is_empty());
    }
}
