//! Best-match search over the exemplar neighborhood field
//!
//! A search splits the exemplar rows of one level into contiguous ranges, one
//! per worker. Each worker keeps a local best and publishes it once, under a
//! single lock, only if it still improves on the shared best after the lock
//! is held. Equal scores are broken by raster position so the parallel and
//! sequential searches agree on the winner.

use crate::analysis::field::NeighborhoodField;
use crate::analysis::neighborhood::Neighborhood;
use crate::math::similarity::{ChannelWeights, similarity};
use crate::spatial::buffer::PixelBuffer;
use std::cmp::Ordering as ScoreOrdering;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Outcome of a search: the winning exemplar pixel and its color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Similarity score, lower is better
    pub score: f64,
    /// Exemplar column
    pub x: usize,
    /// Exemplar row
    pub y: usize,
    /// Exemplar color at `(x, y)` on the searched level
    pub color: u32,
}

impl BestMatch {
    /// Placeholder result used when no candidate has been scored
    pub const fn unmatched(color: u32) -> Self {
        Self {
            score: f64::INFINITY,
            x: 0,
            y: 0,
            color,
        }
    }

    /// Whether `self` should replace `other` as the best match
    ///
    /// Lower scores win; equal scores go to the earlier raster position.
    pub fn improves_on(&self, other: &Self) -> bool {
        match self.score.partial_cmp(&other.score) {
            Some(ScoreOrdering::Less) => true,
            Some(ScoreOrdering::Equal) => (self.y, self.x) < (other.y, other.x),
            _ => false,
        }
    }
}

/// Best match published by search workers
///
/// The mutex is the only gate for updates. The atomic holds the last
/// published score and only lets workers skip the lock when they are
/// already worse.
#[derive(Debug)]
pub struct SharedBest {
    best: Mutex<BestMatch>,
    published_score: AtomicU64,
}

impl SharedBest {
    /// Start from `initial`
    pub fn new(initial: BestMatch) -> Self {
        Self {
            best: Mutex::new(initial),
            published_score: AtomicU64::new(initial.score.to_bits()),
        }
    }

    /// Publish `candidate` if it beats the current best; returns whether it did
    pub fn offer(&self, candidate: BestMatch) -> bool {
        let published = f64::from_bits(self.published_score.load(Ordering::Acquire));
        if candidate.score > published {
            return false;
        }

        let mut best = self.best.lock().unwrap_or_else(PoisonError::into_inner);
        // Another worker may have published a better match since the hint was read
        if !candidate.improves_on(&best) {
            return false;
        }
        *best = candidate;
        self.published_score
            .store(candidate.score.to_bits(), Ordering::Release);
        true
    }

    /// Current best match
    pub fn snapshot(&self) -> BestMatch {
        *self.best.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Final best match once all workers are done
    pub fn into_inner(self) -> BestMatch {
        self.best
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Search tuning for one synthesis run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Parallel workers per search; 0 searches on the calling thread
    pub workers: usize,
    /// Channel weights used when scoring neighborhoods
    pub weights: ChannelWeights,
}

/// Split `height` rows into one contiguous range per worker
///
/// The worker count is capped at `height`. Every range holds
/// `height / workers` rows and the last one also takes the remainder.
pub fn row_ranges(height: usize, workers: usize) -> Vec<Range<usize>> {
    if height == 0 {
        return Vec::new();
    }
    let count = workers.clamp(1, height);
    let rows_each = height / count;

    (0..count)
        .map(|index| {
            let start = index * rows_each;
            let end = if index + 1 == count {
                height
            } else {
                start + rows_each
            };
            start..end
        })
        .collect()
}

/// Scan every exemplar column of `rows` at `level` and return the local best
pub fn scan_rows(
    field: &NeighborhoodField,
    exemplar: &PixelBuffer,
    level: usize,
    query: &Neighborhood,
    rows: Range<usize>,
    weights: &ChannelWeights,
) -> Option<BestMatch> {
    let (width, _) = field.dimensions(level);
    let mut best: Option<BestMatch> = None;

    for y in rows {
        for x in 0..width {
            let Some(hood) = field.get(level, x, y) else {
                continue;
            };
            let candidate = BestMatch {
                score: similarity(hood, query, weights),
                x,
                y,
                color: exemplar.get(x as i32, y as i32),
            };
            if best.is_none_or(|current| candidate.improves_on(&current)) {
                best = Some(candidate);
            }
        }
    }

    best
}

/// Find the exemplar pixel at `level` whose neighborhood best matches `query`
///
/// With no candidates at all the result falls back to the exemplar's top-left
/// color with an infinite score. All workers are joined before returning.
pub fn find_best_match(
    field: &NeighborhoodField,
    exemplar: &PixelBuffer,
    level: usize,
    query: &Neighborhood,
    params: &SearchParams,
) -> BestMatch {
    let (_, height) = field.dimensions(level);
    let fallback = BestMatch::unmatched(exemplar.get(0, 0));

    let best = if params.workers == 0 {
        scan_rows(field, exemplar, level, query, 0..height, &params.weights).unwrap_or(fallback)
    } else {
        let shared = SharedBest::new(fallback);
        let ranges = row_ranges(height, params.workers);
        thread::scope(|scope| {
            for rows in ranges {
                let shared = &shared;
                scope.spawn(move || {
                    log::trace!("Worker checking rows [{}, {})", rows.start, rows.end);
                    if let Some(local) =
                        scan_rows(field, exemplar, level, query, rows, &params.weights)
                    {
                        shared.offer(local);
                    }
                });
            }
        });
        shared.into_inner()
    };

    log::trace!(
        "Best match was {:#010x} at ({}, {}) with score {}",
        best.color,
        best.x,
        best.y,
        best.score
    );
    best
}
