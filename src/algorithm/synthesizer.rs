//! Coarse-to-fine texture synthesis driver
//!
//! The output starts as seeded noise and is turned into a pyramid with the
//! same number of levels as the exemplar pyramid. Levels are then processed
//! from coarsest to finest; within a level every pixel is visited once in
//! raster order, its causal neighborhood is matched against the exemplar
//! field, and the winning exemplar color is written in place.

use crate::algorithm::observer::{Frame, SynthesisObserver};
use crate::algorithm::search::{BestMatch, SearchParams, find_best_match};
use crate::analysis::field::NeighborhoodField;
use crate::analysis::neighborhood::{Neighborhood, Sampling, WindowConfig};
use crate::io::configuration::{
    DEFAULT_BLUR_RADIUS, DEFAULT_DIAMETER, DEFAULT_OUTPUT_SIZE, DEFAULT_SEED, DEFAULT_WORKERS,
    MAX_OUTPUT_DIMENSION, ROW_TIMING_INTERVAL,
};
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::math::blur::gaussian_blur;
use crate::math::similarity::ChannelWeights;
use crate::spatial::buffer::PixelBuffer;
use crate::spatial::pyramid::Pyramid;
use rand::{SeedableRng, rngs::StdRng};
use std::time::{Duration, Instant};

/// Parameters for one synthesis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisConfig {
    /// Neighborhood window diameter at the level being synthesized
    pub diameter: usize,
    /// Output width in pixels
    pub output_width: usize,
    /// Output height in pixels
    pub output_height: usize,
    /// Search workers per pixel; 0 searches on the driver thread
    pub workers: usize,
    /// Channel weights, or `None` to weigh every channel equally
    pub weights: Option<ChannelWeights>,
    /// Synthesize every pyramid level coarse-to-fine instead of only level 0
    pub multiresolution: bool,
    /// Explicit pyramid level count; `None` derives it from the output size
    pub levels: Option<usize>,
    /// Blur every downsampled pyramid level
    pub pyramid_blur: bool,
    /// Blur radius applied to a finished level before the next finer one; 0 disables
    pub level_blur_radius: usize,
    /// Seed for the initial output noise
    pub seed: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            diameter: DEFAULT_DIAMETER,
            output_width: DEFAULT_OUTPUT_SIZE,
            output_height: DEFAULT_OUTPUT_SIZE,
            workers: DEFAULT_WORKERS,
            weights: Some(ChannelWeights::default()),
            multiresolution: true,
            levels: None,
            pyramid_blur: false,
            level_blur_radius: DEFAULT_BLUR_RADIUS,
            seed: DEFAULT_SEED,
        }
    }
}

impl SynthesisConfig {
    /// Reject configurations that cannot produce an output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The diameter is zero
    /// - Either output dimension is zero or above the maximum
    /// - An explicit level count is zero
    /// - A channel weight is negative or not finite
    pub fn validate(&self) -> Result<()> {
        if self.diameter == 0 {
            return Err(invalid_parameter(
                "diameter",
                &self.diameter,
                &"must be at least 1",
            ));
        }

        for (parameter, value) in [
            ("output_width", self.output_width),
            ("output_height", self.output_height),
        ] {
            if value == 0 || value > MAX_OUTPUT_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_OUTPUT_DIMENSION}"),
                ));
            }
        }

        if self.levels == Some(0) {
            return Err(invalid_parameter("levels", &0, &"must be at least 1"));
        }

        if let Some(weights) = self.weights {
            for (parameter, value) in [
                ("red_weight", weights.red),
                ("green_weight", weights.green),
                ("blue_weight", weights.blue),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(invalid_parameter(
                        parameter,
                        &value,
                        &"must be a finite non-negative number",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Window geometry derived from this configuration
    pub const fn window(&self) -> WindowConfig {
        WindowConfig {
            diameter: self.diameter,
            multiresolution: self.multiresolution,
        }
    }

    /// Search parameters derived from this configuration
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            workers: self.workers,
            weights: self.weights.unwrap_or_else(ChannelWeights::uniform),
        }
    }
}

/// Owns the exemplar and output pyramids plus the exemplar search index
pub struct Synthesizer {
    config: SynthesisConfig,
    window: WindowConfig,
    search: SearchParams,
    exemplar: Pyramid,
    output: Pyramid,
    field: NeighborhoodField,
}

impl Synthesizer {
    /// Prepare a run: noise output pyramid, exemplar pyramid and its field
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a pyramid level
    /// cannot be allocated
    pub fn new(exemplar: PixelBuffer, config: SynthesisConfig) -> Result<Self> {
        config.validate()?;
        log::debug!("Synthesis configuration: {config:?}");

        log::info!(
            "Generating {} x {} noise output",
            config.output_width,
            config.output_height
        );
        let mut rng = StdRng::seed_from_u64(config.seed);
        let noise = PixelBuffer::noise(config.output_width, config.output_height, &mut rng)?;
        let output = Pyramid::new(noise, config.levels, false)?;

        log::info!(
            "Building {} level exemplar pyramid from {} x {} exemplar",
            output.level_count(),
            exemplar.width(),
            exemplar.height()
        );
        let exemplar = Pyramid::new(exemplar, Some(output.level_count()), config.pyramid_blur)?;

        let window = config.window();
        let field = NeighborhoodField::build(&exemplar, window);

        Ok(Self {
            config,
            window,
            search: config.search_params(),
            exemplar,
            output,
            field,
        })
    }

    /// Configuration the run was created with
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Exemplar pyramid
    pub const fn exemplar_pyramid(&self) -> &Pyramid {
        &self.exemplar
    }

    /// Output pyramid in its current, possibly partial, state
    pub const fn output_pyramid(&self) -> &Pyramid {
        &self.output
    }

    /// Exemplar neighborhood field
    pub const fn field(&self) -> &NeighborhoodField {
        &self.field
    }

    /// Output levels in processing order, coarsest first
    pub fn level_order(&self) -> Vec<usize> {
        if self.config.multiresolution {
            (0..self.output.level_count()).rev().collect()
        } else {
            vec![0]
        }
    }

    /// Match and assign a single output pixel
    pub fn synthesize_pixel(&mut self, level: usize, x: usize, y: usize) -> BestMatch {
        let query = Neighborhood::build(&self.output, level, x, y, &self.window, Sampling::Causal);
        let found = find_best_match(
            &self.field,
            self.exemplar.level(level),
            level,
            &query,
            &self.search,
        );
        self.output
            .level_mut(level)
            .put(x as i32, y as i32, found.color);
        found
    }

    /// Assign every pixel of `level` in raster order
    ///
    /// # Errors
    ///
    /// Returns [`SynthesisError::Interrupted`] if the observer requests
    /// cancellation before a pixel is assigned
    pub fn synthesize_level(
        &mut self,
        level: usize,
        observer: &mut dyn SynthesisObserver,
    ) -> Result<()> {
        let (width, height) = self.output.level(level).dimensions();
        log::info!("Synthesizing {width} x {height} level {level}");
        observer.level_started(level, width, height);

        let mut row_time = Duration::ZERO;
        for y in 0..height {
            let started = Instant::now();
            for x in 0..width {
                if observer.cancel_requested() {
                    log::info!("Cancellation requested at level {level} ({x}, {y})");
                    return Err(SynthesisError::Interrupted { level, x, y });
                }

                let found = self.synthesize_pixel(level, x, y);
                observer.present(Frame {
                    level,
                    x,
                    y,
                    score: found.score,
                    buffer: self.output.level(level),
                });
            }

            row_time += started.elapsed();
            if y % ROW_TIMING_INTERVAL == 0 {
                log::debug!(
                    "Level {level} row {y}: average time per row {:?}",
                    row_time / (y as u32 + 1)
                );
            }
        }

        // Soften block artifacts before the finer level samples this one
        if self.config.multiresolution && level > 0 && self.config.level_blur_radius > 0 {
            gaussian_blur(self.output.level_mut(level), self.config.level_blur_radius);
        }

        observer.level_finished(level, self.output.level(level));
        Ok(())
    }

    /// Process all levels and return the finished full resolution output
    ///
    /// # Errors
    ///
    /// Returns an error if the observer cancels the run
    pub fn run(mut self, observer: &mut dyn SynthesisObserver) -> Result<PixelBuffer> {
        let started = Instant::now();
        for level in self.level_order() {
            self.synthesize_level(level, observer)?;
        }
        log::info!("Synthesis finished in {:?}", started.elapsed());
        Ok(self.output.into_finest())
    }
}

/// Synthesize a texture from `exemplar` in one call
///
/// # Errors
///
/// Returns an error if the configuration is invalid, allocation fails, or the
/// observer cancels the run
pub fn synthesize(
    exemplar: PixelBuffer,
    config: SynthesisConfig,
    observer: &mut dyn SynthesisObserver,
) -> Result<PixelBuffer> {
    Synthesizer::new(exemplar, config)?.run(observer)
}
