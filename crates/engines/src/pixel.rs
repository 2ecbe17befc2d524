//! Trail rendering of particle positions and RGBA conversion.
//!
//! This module is always available (no feature gate); the `png` snapshot
//! path builds on it.

use glyphswarm_core::error::EngineError;
use glyphswarm_core::{DVec2, Raster};

/// Per-frame fade toward black, as a blend alpha.
pub const TRAIL_FADE: f64 = 40.0 / 255.0;

/// A luminance buffer that accumulates fading particle trails.
#[derive(Debug, Clone)]
pub struct TrailCanvas {
    raster: Raster,
    fade: f64,
}

impl TrailCanvas {
    /// Creates a black canvas with the default fade.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Ok(Self {
            raster: Raster::new(width, height)?,
            fade: TRAIL_FADE,
        })
    }

    /// Overrides the per-frame fade alpha (clamped to [0, 1]).
    pub fn with_fade(mut self, fade: f64) -> Self {
        self.fade = fade.clamp(0.0, 1.0);
        self
    }

    /// Fades the previous frames, then plots each position at full white.
    ///
    /// Positions outside the canvas (including the wrap margin) and
    /// non-finite positions are skipped.
    pub fn draw_frame(&mut self, positions: &[DVec2]) {
        self.raster.fade(self.fade);
        for pos in positions.iter().filter(|p| p.is_finite()) {
            self.raster
                .set(pos.x.floor() as isize, pos.y.floor() as isize, 1.0);
        }
    }

    /// Accumulated luminance, one value per pixel in `[0, 1]`.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }
}

/// Converts luminance in [0, 1] to an opaque grayscale RGBA8 buffer.
///
/// The buffer length is `width * height * 4`.
pub fn to_rgba(raster: &Raster) -> Vec<u8> {
    raster
        .data()
        .iter()
        .flat_map(|&v| {
            let l = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
            [l, l, l, 255u8]
        })
        .collect()
}
