//! Multi-resolution texture synthesis by neighborhood matching
//!
//! An output texture of arbitrary size is grown from a small exemplar image.
//! Every output pixel is assigned the color of the exemplar pixel whose
//! surrounding neighborhood best matches the already synthesized
//! neighborhood of that output pixel, working from coarse pyramid levels to
//! the finest one.

#![forbid(unsafe_code)]

/// Synthesis driver, best match search and progress observation
pub mod algorithm;
/// Neighborhood sampling and precomputed exemplar neighborhood fields
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Blur kernels and neighborhood similarity metrics
pub mod math;
/// Toroidal pixel buffers and image pyramids
pub mod spatial;

pub use io::error::{Result, SynthesisError};
