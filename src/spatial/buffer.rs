//! Toroidal RGBA pixel grid shared by every pyramid level
//!
//! Pixels are packed as `0xAARRGGBB`. Reads and writes wrap around both axes,
//! so a neighborhood window centered near an edge samples the opposite edge
//! instead of failing.

use crate::io::error::{Result, invalid_parameter};
use image::{Rgba, RgbaImage};
use ndarray::Array2;
use rand::Rng;

/// Alpha bits of a fully opaque packed pixel
pub const OPAQUE: u32 = 0xFF00_0000;

/// Pack three channels into an opaque `0xAARRGGBB` pixel
pub const fn pack_rgb(red: u8, green: u8, blue: u8) -> u32 {
    OPAQUE | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32
}

/// Split a packed pixel into its red, green and blue channels
pub const fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Dense row-major grid of packed RGBA pixels with wrap-around addressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixels indexed by `[row, col]`
    pixels: Array2<u32>,
}

impl PixelBuffer {
    /// Create an opaque black buffer
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, pack_rgb(0, 0, 0))
    }

    /// Create a buffer where every pixel holds `color` (alpha forced opaque)
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn filled(width: usize, height: usize, color: u32) -> Result<Self> {
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be at least 1"));
        }
        if height == 0 {
            return Err(invalid_parameter("height", &height, &"must be at least 1"));
        }
        Ok(Self {
            pixels: Array2::from_elem((height, width), color | OPAQUE),
        })
    }

    /// Create a buffer of independent uniform random RGB values
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn noise<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let mut buffer = Self::new(width, height)?;
        for pixel in &mut buffer.pixels {
            *pixel = pack_rgb(rng.random(), rng.random(), rng.random());
        }
        Ok(buffer)
    }

    /// Copy an 8-bit RGBA image, discarding its alpha channel
    ///
    /// # Errors
    ///
    /// Returns an error if the image has no pixels
    pub fn from_rgba_image(image: &RgbaImage) -> Result<Self> {
        let mut buffer = Self::new(image.width() as usize, image.height() as usize)?;
        for (x, y, pixel) in image.enumerate_pixels() {
            let [red, green, blue, _] = pixel.0;
            if let Some(target) = buffer.pixels.get_mut([y as usize, x as usize]) {
                *target = pack_rgb(red, green, blue);
            }
        }
        Ok(buffer)
    }

    /// Convert to an 8-bit RGBA image for encoding or resampling
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width() as u32, self.height() as u32);
        for ((row, col), &pixel) in self.pixels.indexed_iter() {
            let [red, green, blue] = unpack_rgb(pixel);
            let alpha = (pixel >> 24) as u8;
            image.put_pixel(col as u32, row as u32, Rgba([red, green, blue, alpha]));
        }
        image
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Dimensions as `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Read a pixel, wrapping out-of-range coordinates onto the torus
    pub fn get(&self, x: i32, y: i32) -> u32 {
        let index = self.wrap(x, y);
        self.pixels.get(index).copied().unwrap_or(OPAQUE)
    }

    /// Write a pixel with alpha forced opaque, wrapping out-of-range coordinates
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        let index = self.wrap(x, y);
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color | OPAQUE;
        }
    }

    /// Raw pixel grid indexed by `[row, col]`
    pub const fn pixels(&self) -> &Array2<u32> {
        &self.pixels
    }

    /// Mutable raw pixel grid indexed by `[row, col]`
    pub const fn pixels_mut(&mut self) -> &mut Array2<u32> {
        &mut self.pixels
    }

    fn wrap(&self, x: i32, y: i32) -> [usize; 2] {
        let width = self.width() as i64;
        let height = self.height() as i64;
        [
            i64::from(y).rem_euclid(height) as usize,
            i64::from(x).rem_euclid(width) as usize,
        ]
    }
}
