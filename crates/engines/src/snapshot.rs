//! CPU-side PNG rendering of a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so that embedders can depend on
//! the registry without pulling in the `image` crate. The pixel conversion
//! itself lives in [`crate::pixel`] (always available).

use glyphswarm_core::error::EngineError;
use glyphswarm_core::Raster;
use std::path::Path;
use tracing::info;

use crate::pixel::to_rgba;

/// Writes a raster as a grayscale PNG image.
///
/// Returns `EngineError::InvalidDimensions` if the raster dimensions
/// overflow `u32`, or `EngineError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), EngineError> {
    let rgba = to_rgba(raster);
    let w = u32::try_from(raster.width()).map_err(|_| EngineError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| EngineError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path)
        .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
    info!("wrote {w}x{h} snapshot to {}", path.display());
    Ok(())
}
