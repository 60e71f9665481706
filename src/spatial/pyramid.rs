//! Multi-resolution pyramid of progressively halved pixel buffers
//!
//! Level 0 is the buffer handed to the constructor, kept as-is. Every further
//! level is a smooth 2x downsample of its predecessor, optionally blurred.
//! No detail bands are stored, so reconstructing the pyramid is just taking
//! level 0 back out.

use crate::io::configuration::DEFAULT_BLUR_RADIUS;
use crate::io::error::Result;
use crate::math::blur::gaussian_blur;
use crate::spatial::buffer::PixelBuffer;
use image::imageops::{FilterType, resize};

/// Ordered levels from full resolution (index 0) to coarsest
#[derive(Debug, Clone)]
pub struct Pyramid {
    base: PixelBuffer,
    reduced: Vec<PixelBuffer>,
}

impl Pyramid {
    /// Build a pyramid on top of `source`
    ///
    /// `levels` of `None` picks [`Pyramid::automatic_level_count`]; an explicit
    /// count is clamped to at least one. When `blur` is set every generated
    /// level (never level 0) is blurred after downsampling.
    ///
    /// # Errors
    ///
    /// Returns an error if a downsampled level cannot be converted back into a
    /// pixel buffer
    pub fn new(source: PixelBuffer, levels: Option<usize>, blur: bool) -> Result<Self> {
        let (width, height) = source.dimensions();
        let count = levels
            .unwrap_or_else(|| Self::automatic_level_count(width, height))
            .max(1);
        log::debug!("Creating a {width} x {height} x {count} pyramid (blur: {blur})");

        let mut reduced: Vec<PixelBuffer> = Vec::with_capacity(count - 1);
        for index in 1..count {
            let previous = reduced.last().unwrap_or(&source);
            let mut level = downsample(previous)?;
            if blur {
                gaussian_blur(&mut level, DEFAULT_BLUR_RADIUS);
            }
            log::trace!(
                "Level {index} is {} x {}",
                level.width(),
                level.height()
            );
            reduced.push(level);
        }

        Ok(Self {
            base: source,
            reduced,
        })
    }

    /// Number of halvings until the smaller dimension reaches one pixel
    ///
    /// Always at least one, so a 1x1 source still forms a single-level pyramid.
    pub const fn automatic_level_count(width: usize, height: usize) -> usize {
        let mut count = 0;
        let mut side = if width < height { width } else { height };
        while side > 1 {
            count += 1;
            side /= 2;
        }
        if count == 0 { 1 } else { count }
    }

    /// Buffer at level `index`, clamped to the coarsest level when out of range
    pub fn level(&self, index: usize) -> &PixelBuffer {
        let index = self.clamp_level(index);
        if index == 0 {
            return &self.base;
        }
        self.reduced.get(index - 1).unwrap_or(&self.base)
    }

    /// Mutable buffer at level `index`, clamped like [`Pyramid::level`]
    pub fn level_mut(&mut self, index: usize) -> &mut PixelBuffer {
        let index = self.clamp_level(index);
        if index == 0 {
            return &mut self.base;
        }
        match self.reduced.get_mut(index - 1) {
            Some(level) => level,
            None => &mut self.base,
        }
    }

    /// Total number of levels including level 0
    pub fn level_count(&self) -> usize {
        self.reduced.len() + 1
    }

    /// Full resolution level; the reconstruction of this pyramid
    pub const fn finest(&self) -> &PixelBuffer {
        &self.base
    }

    /// Consume the pyramid, keeping only the full resolution level
    pub fn into_finest(self) -> PixelBuffer {
        self.base
    }

    /// Iterate levels from finest to coarsest
    pub fn iter(&self) -> impl Iterator<Item = &PixelBuffer> {
        std::iter::once(&self.base).chain(self.reduced.iter())
    }

    fn clamp_level(&self, index: usize) -> usize {
        let last = self.level_count() - 1;
        if index > last {
            log::warn!("Pyramid level request out of bounds: level {index} (max is {last})");
            last
        } else {
            index
        }
    }
}

fn downsample(level: &PixelBuffer) -> Result<PixelBuffer> {
    let width = (level.width() / 2).max(1) as u32;
    let height = (level.height() / 2).max(1) as u32;
    let shrunk = resize(&level.to_rgba_image(), width, height, FilterType::Triangle);
    PixelBuffer::from_rgba_image(&shrunk)
}
