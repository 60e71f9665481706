//! Command-line interface for batch texture synthesis from exemplar images

use crate::algorithm::observer::{NullObserver, SynthesisObserver, Tee};
use crate::algorithm::synthesizer::{SynthesisConfig, Synthesizer};
use crate::io::configuration::{
    DEFAULT_BLUE_WEIGHT, DEFAULT_BLUR_RADIUS, DEFAULT_DIAMETER, DEFAULT_GREEN_WEIGHT,
    DEFAULT_OUTPUT_SIZE, DEFAULT_RED_WEIGHT, DEFAULT_SEED, DEFAULT_WORKERS, EXEMPLAR_EXTENSIONS,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
};
use crate::io::dump::dump_all;
use crate::io::error::{Result, invalid_target};
use crate::io::image::{load_exemplar, save_buffer};
use crate::io::progress::{ProgressManager, ProgressObserver};
use crate::io::visualization::VisualizationCapture;
use crate::math::similarity::ChannelWeights;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "texsynth")]
#[command(
    author,
    version,
    about = "Synthesize seamless textures of any size from a small exemplar"
)]
/// Command-line arguments for the texture synthesis tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Exemplar image or directory of exemplars to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Neighborhood window diameter (even values are rounded up to odd)
    #[arg(short, long, default_value_t = DEFAULT_DIAMETER)]
    pub diameter: usize,

    /// Side length of the square output texture
    #[arg(short, long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub size: usize,

    /// Output width in pixels (overrides size)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in pixels (overrides size)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Search workers per pixel (0 searches on the main thread)
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// Weight of the red channel when comparing neighborhoods
    #[arg(long, default_value_t = DEFAULT_RED_WEIGHT)]
    pub red_weight: f32,

    /// Weight of the green channel when comparing neighborhoods
    #[arg(long, default_value_t = DEFAULT_GREEN_WEIGHT)]
    pub green_weight: f32,

    /// Weight of the blue channel when comparing neighborhoods
    #[arg(long, default_value_t = DEFAULT_BLUE_WEIGHT)]
    pub blue_weight: f32,

    /// Compare channels without weighting
    #[arg(long)]
    pub unweighted: bool,

    /// Synthesize only the full resolution level
    #[arg(long)]
    pub single_resolution: bool,

    /// Number of pyramid levels (derived from the output size if omitted)
    #[arg(long)]
    pub levels: Option<usize>,

    /// Blur every downsampled exemplar pyramid level
    #[arg(long)]
    pub pyramid_blur: bool,

    /// Blur radius applied to each finished coarse level (0 disables)
    #[arg(long, default_value_t = DEFAULT_BLUR_RADIUS)]
    pub level_blur: usize,

    /// Random seed for the initial noise
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Directory for results (defaults to the exemplar's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Record the synthesis as an animated GIF
    #[arg(short = 'g', long)]
    pub visualize: bool,

    /// Dump exemplar pyramid levels and neighborhoods for inspection
    #[arg(short = 'D', long)]
    pub dump: bool,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Window diameter forced to an odd value
    ///
    /// Zero is passed through so configuration validation rejects it.
    pub const fn diameter(&self) -> usize {
        if self.diameter != 0 && self.diameter % 2 == 0 {
            self.diameter + 1
        } else {
            self.diameter
        }
    }

    /// Output dimensions as `(width, height)`
    pub const fn output_dimensions(&self) -> (usize, usize) {
        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, w),
            (None, Some(h)) => (h, h),
            (None, None) => (self.size, self.size),
        }
    }

    /// Default log filter for the requested verbosity
    pub const fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Build the synthesis configuration described by these arguments
    pub const fn synthesis_config(&self) -> SynthesisConfig {
        let (output_width, output_height) = self.output_dimensions();
        let weights = if self.unweighted {
            None
        } else {
            Some(ChannelWeights {
                red: self.red_weight,
                green: self.green_weight,
                blue: self.blue_weight,
            })
        };

        SynthesisConfig {
            diameter: self.diameter(),
            output_width,
            output_height,
            workers: self.threads,
            weights,
            multiresolution: !self.single_resolution,
            levels: self.levels,
            pyramid_blur: self.pyramid_blur,
            level_blur_radius: self.level_blur,
            seed: self.seed,
        }
    }
}

/// Orchestrates batch synthesis of exemplar files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, configuration validation or
    /// file processing fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.synthesis_config();
        config.validate()?;
        log::info!(
            "Synthesizing {} x {} textures with diameter {} ({} workers, {})",
            config.output_width,
            config.output_height,
            config.diameter,
            config.workers,
            if config.multiresolution {
                "multi-resolution"
            } else {
                "single-resolution"
            }
        );

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, config)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Exemplar files selected by the target argument
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !is_exemplar(target) {
                return Err(invalid_target(target, "must be a PNG, JPEG or BMP image"));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_exemplar(&path) && !is_result(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(target, "must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        config: SynthesisConfig,
    ) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);
        let visualization_path = self.sibling_path(input_path, "_visualization.gif");
        let debug_dir = self.sibling_path(input_path, "_debug");

        let exemplar = load_exemplar(input_path)?;
        let synthesizer = Synthesizer::new(exemplar, config)?;

        if self.cli.dump {
            dump_all(synthesizer.exemplar_pyramid(), synthesizer.field(), &debug_dir)?;
        }

        let (total_pixels, total_rows) = synthesizer
            .level_order()
            .into_iter()
            .map(|level| synthesizer.output_pyramid().level(level).dimensions())
            .fold((0, 0), |(pixels, rows), (w, h)| (pixels + w * h, rows + h));

        let mut capture = self.cli.visualize.then(|| {
            VisualizationCapture::new(config.output_width, config.output_height, total_rows)
        });

        let mut progress_observer = self.progress_manager.as_mut().map(|pm| {
            pm.start_file(index, input_path, total_pixels);
            ProgressObserver::new(pm, index)
        });

        let mut no_progress = NullObserver;
        let mut no_capture = NullObserver;
        let progress: &mut dyn SynthesisObserver = match progress_observer.as_mut() {
            Some(observer) => observer,
            None => &mut no_progress,
        };
        let frames: &mut dyn SynthesisObserver = match capture.as_mut() {
            Some(observer) => observer,
            None => &mut no_capture,
        };
        let result = synthesizer.run(&mut Tee::new(progress, frames))?;

        save_buffer(&result, &output_path)?;

        if let Some(capture) = capture {
            capture.export_gif(&visualization_path, GIF_FRAME_DELAY_MS)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index);
        }
        log::info!(
            "Wrote '{}' in {:?}",
            output_path.display(),
            start_time.elapsed()
        );

        Ok(())
    }

    /// Where the result for `input_path` is written
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        self.sibling_path(input_path, &format!("{OUTPUT_SUFFIX}.png"))
    }

    fn sibling_path(&self, input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}", stem.to_string_lossy());

        match (&self.cli.output_dir, input_path.parent()) {
            (Some(dir), _) => dir.join(name),
            (None, Some(parent)) => parent.join(name),
            (None, None) => PathBuf::from(name),
        }
    }
}

fn is_exemplar(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            EXEMPLAR_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

fn is_result(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
