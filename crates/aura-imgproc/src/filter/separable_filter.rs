use aura_image::{Image, ImageError};
use rayon::prelude::*;

use crate::padding::reflect_index;
use crate::parallel::PARALLEL_MIN_PIXELS;

/// A separable 2D filter with mirrored borders.
///
/// The columns are convolved first and the rows second. Each output value is
/// accumulated tap by tap, from the first kernel weight to the last.
struct SeparableFilter<'a> {
    kernel_x: &'a [f64],
    kernel_y: &'a [f64],
}

impl SeparableFilter<'_> {
    /// Convolve the source vertically to produce row `r` of the intermediate buffer.
    fn vertical_row(&self, src: &[f64], dst_row: &mut [f64], r: usize, rows: usize) {
        let stride = dst_row.len();
        let half = self.kernel_y.len() / 2;

        dst_row.fill(0.0);
        for (i, &k) in self.kernel_y.iter().enumerate() {
            let y = reflect_index(r as isize + i as isize - half as isize, rows);
            let src_row = &src[y * stride..(y + 1) * stride];
            dst_row
                .iter_mut()
                .zip(src_row.iter())
                .for_each(|(d, &s)| *d += k * s);
        }
    }

    /// Convolve one intermediate row horizontally into the output row.
    fn horizontal_row<const C: usize>(&self, src_row: &[f64], dst_row: &mut [f64], cols: usize) {
        let half = self.kernel_x.len() / 2;
        let padded_len = cols + self.kernel_x.len() - 1;

        // mirrored copy of the row
        let mut padded = vec![0.0f64; padded_len * C];
        for (p, padded_pixel) in padded.chunks_exact_mut(C).enumerate() {
            let x = reflect_index(p as isize - half as isize, cols);
            padded_pixel.copy_from_slice(&src_row[x * C..(x + 1) * C]);
        }

        for (c, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let mut acc = [0.0f64; C];
            for (i, &k) in self.kernel_x.iter().enumerate() {
                let idx = (c + i) * C;
                for (ch, acc_val) in acc.iter_mut().enumerate() {
                    *acc_val += k * padded[idx + ch];
                }
            }
            dst_pixel.copy_from_slice(&acc);
        }
    }

    fn apply<const C: usize>(&self, src: &Image<f64, C>, dst: &mut Image<f64, C>, parallel: bool) {
        let rows = src.rows();
        let cols = src.cols();
        if rows == 0 || cols == 0 {
            return;
        }

        let stride = cols * C;
        let src_data = src.as_slice();
        let mut temp = vec![0.0f64; src_data.len()];

        if parallel {
            temp.par_chunks_mut(stride)
                .enumerate()
                .for_each(|(r, temp_row)| self.vertical_row(src_data, temp_row, r, rows));

            dst.as_slice_mut()
                .par_chunks_mut(stride)
                .zip(temp.par_chunks(stride))
                .for_each(|(dst_row, temp_row)| {
                    self.horizontal_row::<C>(temp_row, dst_row, cols)
                });
        } else {
            temp.chunks_mut(stride)
                .enumerate()
                .for_each(|(r, temp_row)| self.vertical_row(src_data, temp_row, r, rows));

            dst.as_slice_mut()
                .chunks_mut(stride)
                .zip(temp.chunks(stride))
                .for_each(|(dst_row, temp_row)| {
                    self.horizontal_row::<C>(temp_row, dst_row, cols)
                });
        }
    }
}

/// Apply a separable filter to an image with mirrored borders.
///
/// Rows are processed in parallel for images of at least
/// [`PARALLEL_MIN_PIXELS`] pixels. The result does not depend on it.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter<const C: usize>(
    src: &Image<f64, C>,
    dst: &mut Image<f64, C>,
    kernel_x: &[f64],
    kernel_y: &[f64],
) -> Result<(), ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(
            kernel_x.len(),
            kernel_y.len(),
        ));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let filter = SeparableFilter { kernel_x, kernel_y };
    filter.apply(src, dst, src.size().area() >= PARALLEL_MIN_PIXELS);

    Ok(())
}
