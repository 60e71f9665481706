//! Multi-file progress tracking with automatic batching for large sets

use crate::algorithm::observer::{Frame, SynthesisObserver};
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use crate::spatial::buffer::PixelBuffer;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Instant;

/// Coordinates progress display for batch synthesis
///
/// Automatically switches between individual progress bars (for small batches)
/// and an additional batch progress bar (for large batches) based on file count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    /// Stores (`filename`, `pixels_done`, `pixels_total`) for rolling window display
    file_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress bar for a new file that will assign `pixels` pixels
    pub fn start_file(&mut self, index: usize, path: &Path, pixels: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = (display_name, 0, pixels);
        }
        self.update_bars();
    }

    /// Report the number of pixels assigned so far
    pub fn update_pixels(&mut self, file_index: usize, done: usize) {
        if let Some(state) = self.file_states.get_mut(file_index) {
            state.1 = done.min(state.2);
        }
        self.update_bars();
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = state.2;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Pixels reported for `index` as `(done, total)`
    pub fn file_progress(&self, index: usize) -> Option<(usize, usize)> {
        self.file_states
            .get(index)
            .map(|&(_, done, total)| (done, total))
    }

    /// Update all progress bars to show the last N active files
    fn update_bars(&self) {
        let active_files: Vec<_> = self
            .file_states
            .iter()
            .filter(|(name, _, _)| !name.is_empty())
            .collect();

        let start_idx = active_files
            .len()
            .saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible_files = active_files.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (name, done, total)) in visible_files.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(*total as u64);
                bar.set_position(*done as u64);
                let max_width = total.to_string().len();
                bar.set_message(format!("{done:>max_width$}/{total}"));
                bar.set_prefix(name.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible_files.len()..self.file_bars.len() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}

/// Feeds one file's synthesis events into a [`ProgressManager`]
///
/// Bars are refreshed once per completed row.
pub struct ProgressObserver<'a> {
    manager: &'a mut ProgressManager,
    file_index: usize,
    pixels_done: usize,
    started: Instant,
}

impl<'a> ProgressObserver<'a> {
    /// Track file `file_index` of `manager`
    pub fn new(manager: &'a mut ProgressManager, file_index: usize) -> Self {
        Self {
            manager,
            file_index,
            pixels_done: 0,
            started: Instant::now(),
        }
    }

    /// Pixels assigned since the observer was created
    pub const fn pixels_done(&self) -> usize {
        self.pixels_done
    }
}

impl SynthesisObserver for ProgressObserver<'_> {
    fn present(&mut self, frame: Frame<'_>) {
        self.pixels_done += 1;
        if frame.x + 1 == frame.buffer.width() {
            self.manager.update_pixels(self.file_index, self.pixels_done);
        }
    }

    fn level_finished(&mut self, level: usize, _buffer: &PixelBuffer) {
        log::debug!("Level {level} done after {:?}", self.started.elapsed());
    }
}
