//! Spatial data structures
//!
//! This module contains:
//! - Packed pixel buffers with wrapping coordinates
//! - Image pyramids built by repeated halving

/// Packed pixel buffer with toroidal addressing
pub mod buffer;
/// Multi-resolution image pyramid
pub mod pyramid;

pub use buffer::PixelBuffer;
pub use pyramid::Pyramid;
