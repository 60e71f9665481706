//! Weighted sum-of-squared-differences between two neighborhoods

use crate::analysis::neighborhood::Neighborhood;
use crate::io::configuration::{DEFAULT_BLUE_WEIGHT, DEFAULT_GREEN_WEIGHT, DEFAULT_RED_WEIGHT};
use crate::spatial::buffer::unpack_rgb;

/// Per-channel multipliers applied to squared channel differences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    /// Red channel weight
    pub red: f32,
    /// Green channel weight
    pub green: f32,
    /// Blue channel weight
    pub blue: f32,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED_WEIGHT,
            green: DEFAULT_GREEN_WEIGHT,
            blue: DEFAULT_BLUE_WEIGHT,
        }
    }
}

impl ChannelWeights {
    /// Weights that treat every channel equally
    pub const fn uniform() -> Self {
        Self {
            red: 1.0,
            green: 1.0,
            blue: 1.0,
        }
    }

    /// Weights as an array in red, green, blue order
    pub const fn as_array(&self) -> [f32; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Score how similar two neighborhoods are; lower is more similar
///
/// Only the common prefix is compared when lengths differ. A causal query is
/// a raster prefix of the full window stored for the exemplar, so the prefix
/// pairs samples taken at the same offsets.
pub fn similarity(first: &Neighborhood, second: &Neighborhood, weights: &ChannelWeights) -> f64 {
    if first.len() != second.len() {
        log::trace!(
            "Comparing neighborhoods of different lengths ({} vs {}), using common prefix",
            first.len(),
            second.len()
        );
    }

    let weights = weights.as_array().map(f64::from);
    first
        .samples()
        .iter()
        .zip(second.samples())
        .map(|(&a, &b)| squared_distance(a, b, &weights))
        .sum()
}

fn squared_distance(a: u32, b: u32, weights: &[f64; 3]) -> f64 {
    let a = unpack_rgb(a);
    let b = unpack_rgb(b);
    a.iter()
        .zip(b.iter())
        .zip(weights.iter())
        .map(|((&x, &y), &weight)| {
            let diff = f64::from(x) - f64::from(y);
            diff * diff * weight
        })
        .sum()
}
