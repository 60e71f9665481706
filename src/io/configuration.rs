//! Synthesis constants and runtime configuration defaults

// Neighborhood matching
/// Default neighborhood window diameter (always odd)
pub const DEFAULT_DIAMETER: usize = 9;

/// Default relative weight of the red channel in similarity scores
pub const DEFAULT_RED_WEIGHT: f32 = 0.85;
/// Default relative weight of the green channel in similarity scores
pub const DEFAULT_GREEN_WEIGHT: f32 = 1.0;
/// Default relative weight of the blue channel in similarity scores
pub const DEFAULT_BLUE_WEIGHT: f32 = 0.6;

// Spawning more workers than exemplar rows is wasted; the search caps it anyway
/// Default number of search workers spawned per pixel
pub const DEFAULT_WORKERS: usize = 22;

// Blur
/// Standard deviation term of the squared-sine kernel approximation
pub const GAUSS_SD: f32 = 255.0;

/// Radius used when blurring a finished level before refining the next one
pub const DEFAULT_BLUR_RADIUS: usize = 4;

// Output
/// Default side length of the square output texture
pub const DEFAULT_OUTPUT_SIZE: usize = 64;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_OUTPUT_DIMENSION: usize = 4096;

/// Fixed seed for reproducible noise initialization
pub const DEFAULT_SEED: u64 = 42;

/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

/// Image extensions accepted as exemplars when scanning a directory
pub const EXEMPLAR_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Rows between two average-row-time diagnostics
pub const ROW_TIMING_INTERVAL: usize = 20;

// Visualization
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on rows captured as GIF frames for one file
pub const MAX_CAPTURED_FRAMES: usize = 240;

// Debug dump
/// Maximum number of neighborhood strips written by a debug dump
pub const DUMP_NEIGHBORHOOD_LIMIT: usize = 400;
