//! Separable blur with a squared-sine approximation of a Gaussian kernel
//!
//! The kernel is built once per call, then applied as a horizontal pass
//! followed by a vertical pass. Samples that fall outside the buffer reuse the
//! destination pixel's own value instead of wrapping, so blurring never
//! bleeds one edge of a level into the other.

use crate::io::configuration::GAUSS_SD;
use crate::spatial::buffer::{PixelBuffer, pack_rgb, unpack_rgb};
use ndarray::Array2;
use std::f32::consts::FRAC_PI_2;

/// Build the normalized `2 * radius + 1` tap kernel
///
/// Returns an empty kernel for radius 0. The weights are symmetric around the
/// center tap and sum to one.
pub fn gaussian_kernel(radius: usize) -> Vec<f32> {
    if radius == 0 {
        return Vec::new();
    }

    let width = radius * 2 + 1;
    let width_f = width as f32;
    let mean = width_f / GAUSS_SD;

    let mut kernel = vec![0.0_f32; width];
    for i in 0..=radius {
        let phase = ((i as f32 + 1.0).mul_add(FRAC_PI_2, -mean)) / width_f;
        let weight = phase.sin().powi(2) * GAUSS_SD;
        if let Some(tap) = kernel.get_mut(i) {
            *tap = weight;
        }
        if let Some(tap) = kernel.get_mut(width - 1 - i) {
            *tap = weight;
        }
    }

    let sum: f32 = kernel.iter().sum();
    if sum > 0.0 {
        for tap in &mut kernel {
            *tap /= sum;
        }
    }
    kernel
}

/// Blur `buffer` in place with a kernel of the given radius
///
/// A radius of 0 leaves the buffer untouched.
pub fn gaussian_blur(buffer: &mut PixelBuffer, radius: usize) {
    let kernel = gaussian_kernel(radius);
    if kernel.is_empty() {
        return;
    }
    log::trace!(
        "Blurring {}x{} buffer with radius {radius}",
        buffer.width(),
        buffer.height()
    );

    let source = buffer.pixels().mapv(|pixel| unpack_rgb(pixel).map(f32::from));
    let horizontal = convolve(&source, &kernel, Axis::Columns);
    let vertical = convolve(&horizontal, &kernel, Axis::Rows);

    for (pixel, channels) in buffer.pixels_mut().iter_mut().zip(vertical.iter()) {
        let [red, green, blue] = channels.map(to_channel);
        *pixel = pack_rgb(red, green, blue);
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}

fn convolve(source: &Array2<[f32; 3]>, kernel: &[f32], axis: Axis) -> Array2<[f32; 3]> {
    let (rows, cols) = source.dim();
    let radius = (kernel.len() / 2) as isize;

    Array2::from_shape_fn((rows, cols), |(row, col)| {
        let own = source.get((row, col)).copied().unwrap_or([0.0; 3]);
        let mut total = [0.0_f32; 3];

        for (k, &weight) in kernel.iter().enumerate() {
            let shift = k as isize - radius;
            let (sample_row, sample_col) = match axis {
                Axis::Columns => (row as isize, col as isize + shift),
                Axis::Rows => (row as isize + shift, col as isize),
            };

            // Edge clamp: out-of-bounds taps fall back to the destination pixel
            let sample = if sample_row < 0 || sample_col < 0 {
                own
            } else {
                source
                    .get((sample_row as usize, sample_col as usize))
                    .copied()
                    .unwrap_or(own)
            };

            for (acc, value) in total.iter_mut().zip(sample) {
                *acc = value.mul_add(weight, *acc);
            }
        }
        total
    })
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
