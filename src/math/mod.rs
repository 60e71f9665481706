//! Mathematical utilities for the synthesis

/// Separable squared-sine blur
pub mod blur;
/// Weighted color distance between neighborhoods
pub mod similarity;
