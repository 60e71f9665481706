//! Command-line handling, file formats, diagnostics and error types

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Debug dumps of pyramids and neighborhoods
pub mod dump;
/// Error type shared by the crate
pub mod error;
/// Exemplar loading and result export
pub mod image;
/// Terminal progress bars
pub mod progress;
/// Animated GIF capture of a run
pub mod visualization;
