//! Hooks for presenting synthesis progress and requesting cancellation

use crate::spatial::buffer::PixelBuffer;

/// Snapshot handed to observers right after a pixel is assigned
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Output pyramid level being synthesized
    pub level: usize,
    /// Column of the pixel just assigned
    pub x: usize,
    /// Row of the pixel just assigned
    pub y: usize,
    /// Similarity score of the chosen exemplar pixel
    pub score: f64,
    /// The level buffer including the new pixel
    pub buffer: &'a PixelBuffer,
}

/// Receives progress from a synthesis run
///
/// Every method has a no-op default so implementors only override what they
/// display.
pub trait SynthesisObserver {
    /// Called before the first pixel of `level` is assigned
    fn level_started(&mut self, _level: usize, _width: usize, _height: usize) {}

    /// Called after every pixel assignment
    fn present(&mut self, _frame: Frame<'_>) {}

    /// Called once `level` is complete, after any inter-level blur
    fn level_finished(&mut self, _level: usize, _buffer: &PixelBuffer) {}

    /// Polled once per pixel, never during a search
    fn cancel_requested(&self) -> bool {
        false
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SynthesisObserver for NullObserver {}

/// Forwards every event to two observers in order
pub struct Tee<'a> {
    first: &'a mut dyn SynthesisObserver,
    second: &'a mut dyn SynthesisObserver,
}

impl<'a> Tee<'a> {
    /// Combine two observers
    pub fn new(first: &'a mut dyn SynthesisObserver, second: &'a mut dyn SynthesisObserver) -> Self {
        Self { first, second }
    }
}

impl SynthesisObserver for Tee<'_> {
    fn level_started(&mut self, level: usize, width: usize, height: usize) {
        self.first.level_started(level, width, height);
        self.second.level_started(level, width, height);
    }

    fn present(&mut self, frame: Frame<'_>) {
        self.first.present(frame);
        self.second.present(frame);
    }

    fn level_finished(&mut self, level: usize, buffer: &PixelBuffer) {
        self.first.level_finished(level, buffer);
        self.second.level_finished(level, buffer);
    }

    fn cancel_requested(&self) -> bool {
        self.first.cancel_requested() || self.second.cancel_requested()
    }
}
