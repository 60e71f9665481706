//! Exemplar decoding and result encoding

use crate::io::error::{Result, SynthesisError};
use crate::spatial::buffer::PixelBuffer;
use std::path::Path;

/// Load an exemplar image into an opaque pixel buffer
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has no pixels
pub fn load_exemplar<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|e| SynthesisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let rgba = image.to_rgba8();
    log::debug!(
        "Loaded exemplar '{}' ({} x {})",
        path.display(),
        rgba.width(),
        rgba.height()
    );

    PixelBuffer::from_rgba_image(&rgba).map_err(|e| SynthesisError::InvalidSourceData {
        reason: format!("exemplar '{}' is unusable: {e}", path.display()),
    })
}

/// Save a pixel buffer, choosing the encoding from the file extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_buffer<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    buffer
        .to_rgba_image()
        .save(path)
        .map_err(|e| SynthesisError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })?;
    log::debug!("Saved {} x {} image to '{}'", buffer.width(), buffer.height(), path.display());
    Ok(())
}

/// Create the parent directory of `path` if it has one
///
/// # Errors
///
/// Returns an error if the directory cannot be created
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}
