//! Frame capture and GIF generation for synthesis visualization

use crate::algorithm::observer::{Frame as SynthesisFrame, SynthesisObserver};
use crate::io::configuration::{MAX_CAPTURED_FRAMES, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{Result, SynthesisError};
use crate::io::image::ensure_parent_dir;
use crate::spatial::buffer::PixelBuffer;
use image::imageops::{FilterType, resize};
use image::{Delay, Frame, RgbaImage};
use std::path::Path;

/// Captures in-progress output levels for visualization
///
/// One frame is recorded every `row_stride` completed rows and once more
/// when a level finishes. Every level is scaled up to the output size with
/// nearest-neighbor sampling so all frames share dimensions.
pub struct VisualizationCapture {
    frames: Vec<RgbaImage>,
    output_dims: (u32, u32),
    row_stride: usize,
    rows_seen: usize,
}

impl VisualizationCapture {
    /// Prepare a capture for an output of the given size
    ///
    /// `total_rows` is the number of rows the run will synthesize across all
    /// levels; it sets the row stride so at most `MAX_CAPTURED_FRAMES`
    /// row frames are kept.
    pub fn new(output_width: usize, output_height: usize, total_rows: usize) -> Self {
        Self {
            frames: Vec::new(),
            output_dims: (output_width.max(1) as u32, output_height.max(1) as u32),
            row_stride: total_rows.div_ceil(MAX_CAPTURED_FRAMES).max(1),
            rows_seen: 0,
        }
    }

    /// Record `buffer` as the next frame
    pub fn record(&mut self, buffer: &PixelBuffer) {
        let (width, height) = self.output_dims;
        let image = buffer.to_rgba_image();
        let frame = if image.dimensions() == self.output_dims {
            image
        } else {
            resize(&image, width, height, FilterType::Nearest)
        };
        self.frames.push(frame);
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// When `frame_delay_ms` is shorter than viewers reliably support, frames
    /// are skipped to keep the apparent animation speed. The last frame is
    /// always kept and held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(SynthesisError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms.max(1)) as usize
        } else {
            1
        };

        let last_index = self.frames.len() - 1;
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .enumerate()
            .filter(|(index, _)| index % skip_factor == 0 || *index == last_index)
            .map(|(_, image)| to_gif_frame(image.clone(), effective_delay_ms))
            .collect();

        // Final frame displays longer for better visibility
        if let Some(last) = self.frames.last() {
            frames.push(to_gif_frame(last.clone(), effective_delay_ms * 25));
        }

        ensure_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| SynthesisError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SynthesisError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }
}

impl SynthesisObserver for VisualizationCapture {
    fn present(&mut self, frame: SynthesisFrame<'_>) {
        if frame.x + 1 != frame.buffer.width() {
            return;
        }
        self.rows_seen += 1;
        if self.rows_seen % self.row_stride == 0 {
            self.record(frame.buffer);
        }
    }

    fn level_finished(&mut self, _level: usize, buffer: &PixelBuffer) {
        self.record(buffer);
    }
}

fn to_gif_frame(image: RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
}
