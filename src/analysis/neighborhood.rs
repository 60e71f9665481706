//! Per-pixel neighborhood signatures sampled across pyramid levels
//!
//! A neighborhood for pixel `(x, y)` at level `L` is the concatenation of one
//! window per sampled level, coarsest first. Coarser levels always contribute
//! a full square; level `L` itself contributes either the full square or only
//! its causal part (the raster-order prefix that ends just before the center
//! pixel), depending on [`Sampling`].
//!
//! Diameter 1 gets its own layout at level `L`: the causal window is the
//! single predecessor pixel `(x - 1, y)` and the full window is that
//! predecessor followed by the center. A causal window is therefore always a
//! prefix of the matching full window.

use crate::spatial::pyramid::Pyramid;

/// Which part of the window at the target level is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Only pixels already visited in raster order
    Causal,
    /// The whole square window
    Full,
}

/// Window geometry shared by query and exemplar neighborhoods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window diameter at the target level
    pub diameter: usize,
    /// Whether coarser pyramid levels contribute windows
    pub multiresolution: bool,
}

impl WindowConfig {
    /// Window diameter for a level `depth` steps coarser than the target
    ///
    /// The base diameter is scaled by `0.5^depth`, rounded up, then bumped to
    /// the next odd value so every window has a center pixel.
    pub fn level_diameter(&self, depth: usize) -> usize {
        let scale = 0.5_f64.powi(depth.min(i32::MAX as usize) as i32);
        let scaled = (self.diameter as f64 * scale).ceil().max(1.0) as usize;
        if scaled % 2 == 0 { scaled + 1 } else { scaled }
    }

    /// Number of samples one level contributes
    pub fn segment_len(&self, depth: usize, sampling: Sampling) -> usize {
        let target_sampling = if depth == 0 { sampling } else { Sampling::Full };
        window_offsets(self.level_diameter(depth), target_sampling, depth == 0).len()
    }
}

/// Offsets `[dx, dy]` sampled by one window, in raster order
///
/// `target` selects the layout used at the level being matched; other levels
/// always sample the full square regardless of `sampling`.
pub fn window_offsets(diameter: usize, sampling: Sampling, target: bool) -> Vec<[i32; 2]> {
    let half = (diameter / 2) as i32;

    if target && half == 0 {
        return match sampling {
            Sampling::Causal => vec![[-1, 0]],
            Sampling::Full => vec![[-1, 0], [0, 0]],
        };
    }

    let square = (-half..=half).flat_map(|dy| (-half..=half).map(move |dx| [dx, dy]));
    match sampling {
        Sampling::Causal if target => {
            let side = (half * 2 + 1) as usize;
            square.take((side * side - 1) / 2).collect()
        }
        _ => square.collect(),
    }
}

/// `coordinate` halved `depth` times; zero once every bit has been shifted out
fn coarse_coordinate(coordinate: usize, depth: usize) -> i32 {
    u32::try_from(depth)
        .ok()
        .and_then(|shift| coordinate.checked_shr(shift))
        .unwrap_or(0) as i32
}

/// Ordered color samples describing the surroundings of one pixel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighborhood {
    samples: Vec<u32>,
}

impl Neighborhood {
    /// Wrap an existing sample sequence
    pub const fn from_samples(samples: Vec<u32>) -> Self {
        Self { samples }
    }

    /// Sample the neighborhood of `(x, y)` at `level` of `pyramid`
    ///
    /// Coordinates are in the resolution of `level`. Each coarser level is
    /// sampled around `(x >> depth, y >> depth)` with wrap-around. A `level`
    /// past the coarsest one is clamped with a warning.
    pub fn build(
        pyramid: &Pyramid,
        level: usize,
        x: usize,
        y: usize,
        config: &WindowConfig,
        sampling: Sampling,
    ) -> Self {
        let coarsest = pyramid.level_count() - 1;
        let level = if level > coarsest {
            log::warn!("Neighborhood level out of bounds: level {level} (max is {coarsest})");
            coarsest
        } else {
            level
        };
        let top = if config.multiresolution {
            coarsest
        } else {
            level
        };

        let mut samples = Vec::new();
        for sampled in (level..=top).rev() {
            let depth = sampled - level;
            let buffer = pyramid.level(sampled);
            let center_x = coarse_coordinate(x, depth);
            let center_y = coarse_coordinate(y, depth);
            let window_sampling = if depth == 0 {
                sampling
            } else {
                Sampling::Full
            };

            let offsets = window_offsets(config.level_diameter(depth), window_sampling, depth == 0);
            samples.extend(
                offsets
                    .iter()
                    .map(|[dx, dy]| buffer.get(center_x + dx, center_y + dy)),
            );
        }

        Self { samples }
    }

    /// Sampled colors, coarsest level first
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples were taken
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
