//! Debug dumps of pyramid levels and sampled neighborhoods

use crate::analysis::field::NeighborhoodField;
use crate::analysis::neighborhood::Neighborhood;
use crate::io::configuration::DUMP_NEIGHBORHOOD_LIMIT;
use crate::io::error::Result;
use crate::io::image::save_buffer;
use crate::spatial::buffer::PixelBuffer;
use crate::spatial::pyramid::Pyramid;
use std::path::{Path, PathBuf};

/// Write every level of `pyramid` as `pyr-<level>.png` inside `dir`
///
/// # Errors
///
/// Returns an error if a level cannot be written
pub fn dump_pyramid(pyramid: &Pyramid, dir: &Path) -> Result<Vec<PathBuf>> {
    log::debug!("Dumping {} pyramid levels to '{}'", pyramid.level_count(), dir.display());
    let mut written = Vec::with_capacity(pyramid.level_count());
    for (level, buffer) in pyramid.iter().enumerate() {
        let path = dir.join(format!("pyr-{level}.png"));
        save_buffer(buffer, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Render a neighborhood as a one pixel high strip, one sample per column
///
/// Returns `None` for an empty neighborhood.
pub fn neighborhood_strip(hood: &Neighborhood) -> Option<PixelBuffer> {
    let mut strip = PixelBuffer::new(hood.len(), 1).ok()?;
    for (x, &sample) in hood.samples().iter().enumerate() {
        strip.put(x as i32, 0, sample);
    }
    Some(strip)
}

/// Write up to `limit` field neighborhoods as `hood-<level>-<x>,<y>.png`
///
/// Levels are visited finest first, pixels in raster order.
///
/// # Errors
///
/// Returns an error if a strip cannot be written
pub fn dump_field(field: &NeighborhoodField, dir: &Path, limit: usize) -> Result<usize> {
    let mut written = 0;
    for level in 0..field.level_count() {
        let (width, height) = field.dimensions(level);
        for y in 0..height {
            for x in 0..width {
                if written >= limit {
                    return Ok(written);
                }
                let Some(strip) = field.get(level, x, y).and_then(neighborhood_strip) else {
                    continue;
                };
                save_buffer(&strip, dir.join(format!("hood-{level}-{x},{y}.png")))?;
                written += 1;
            }
        }
    }
    Ok(written)
}

/// Dump the exemplar pyramid and the default number of field neighborhoods
///
/// # Errors
///
/// Returns an error if any image cannot be written
pub fn dump_all(pyramid: &Pyramid, field: &NeighborhoodField, dir: &Path) -> Result<()> {
    dump_pyramid(pyramid, dir)?;
    let written = dump_field(field, dir, DUMP_NEIGHBORHOOD_LIMIT)?;
    log::debug!("Dumped {written} neighborhoods to '{}'", dir.display());
    Ok(())
}
