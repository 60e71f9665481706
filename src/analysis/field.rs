//! Precomputed neighborhoods for every pixel of every exemplar level
//!
//! The exemplar never changes during a run, so its neighborhoods are sampled
//! once with full windows and then shared read-only by every search worker.

use crate::analysis::neighborhood::{Neighborhood, Sampling, WindowConfig};
use crate::spatial::pyramid::Pyramid;
use ndarray::Array2;

/// Search index mapping `(level, x, y)` to the exemplar neighborhood there
#[derive(Debug, Clone)]
pub struct NeighborhoodField {
    /// One grid per level, indexed by `[row, col]`
    levels: Vec<Array2<Neighborhood>>,
    config: WindowConfig,
}

impl NeighborhoodField {
    /// Sample the full-window neighborhood of every pixel in `pyramid`
    pub fn build(pyramid: &Pyramid, config: WindowConfig) -> Self {
        log::info!(
            "Building neighborhoods for {} exemplar levels (diameter {}, multiresolution: {})",
            pyramid.level_count(),
            config.diameter,
            config.multiresolution
        );

        let levels = pyramid
            .iter()
            .enumerate()
            .map(|(level, buffer)| {
                log::debug!(
                    "Sampling {} x {} neighborhoods at level {level}",
                    buffer.width(),
                    buffer.height()
                );
                Array2::from_shape_fn((buffer.height(), buffer.width()), |(y, x)| {
                    Neighborhood::build(pyramid, level, x, y, &config, Sampling::Full)
                })
            })
            .collect();

        Self { levels, config }
    }

    /// Neighborhood of exemplar pixel `(x, y)` at `level`
    ///
    /// An out-of-range level is clamped to the coarsest one; out-of-range
    /// coordinates yield `None`. Both cases are logged.
    pub fn get(&self, level: usize, x: usize, y: usize) -> Option<&Neighborhood> {
        let grid = self.level(level)?;
        let hood = grid.get((y, x));
        if hood.is_none() {
            log::warn!("Neighborhood request out of bounds: level {level} at ({x}, {y})");
        }
        hood
    }

    /// Dimensions `(width, height)` of `level`, clamped like [`NeighborhoodField::get`]
    pub fn dimensions(&self, level: usize) -> (usize, usize) {
        self.level(level)
            .map_or((0, 0), |grid| (grid.ncols(), grid.nrows()))
    }

    /// Number of indexed levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Window geometry the field was sampled with
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }

    fn level(&self, level: usize) -> Option<&Array2<Neighborhood>> {
        let last = self.levels.len().checked_sub(1)?;
        if level > last {
            log::warn!("Neighborhood field level out of bounds: level {level} (max is {last})");
        }
        self.levels.get(level.min(last))
    }
}
