//! Turns text into a bounded, shuffled set of attraction targets.
//!
//! The text is drawn offscreen, the raster is scanned on a coarse grid, lit
//! cells become candidate targets, and a uniform shuffle followed by a
//! truncation keeps at most one target per particle. Scanning on a stride
//! rather than every pixel keeps the candidate pool small for large glyphs.

use glyphswarm_core::prng::{shuffle, RandomSource};
use glyphswarm_core::{DVec2, Raster};
use tracing::warn;

use crate::glyph::{GlyphRasterizer, TextStyle};

/// A cell is part of the shape if its intensity exceeds 10 out of 255.
pub const BRIGHTNESS_THRESHOLD: f64 = 10.0 / 255.0;

/// Lit grid cells of `raster`, scanned row by row with the given stride.
pub fn scan(raster: &Raster, sample_step: usize) -> Vec<DVec2> {
    raster
        .grid(sample_step)
        .filter(|&(_, _, v)| v > BRIGHTNESS_THRESHOLD)
        .map(|(x, y, _)| DVec2::new(x as f64, y as f64))
        .collect()
}

/// Shuffles `candidates` and keeps at most `cap` of them.
pub fn select(mut candidates: Vec<DVec2>, cap: usize, rng: &mut dyn RandomSource) -> Vec<DVec2> {
    shuffle(&mut candidates, rng);
    candidates.truncate(cap);
    candidates
}

/// Rasterizes text with a pluggable [`GlyphRasterizer`] and samples targets from it.
pub struct ShapeSampler {
    rasterizer: Box<dyn GlyphRasterizer>,
}

impl ShapeSampler {
    /// Creates a sampler drawing with `rasterizer`.
    pub fn new(rasterizer: Box<dyn GlyphRasterizer>) -> Self {
        Self { rasterizer }
    }

    /// Draws `text` on a fresh `width × height` raster and returns up to
    /// `cap` shuffled targets.
    ///
    /// Degenerate inputs (empty text, zero cap, a zero-sized canvas, a font
    /// that draws nothing) yield an empty list.
    pub fn targets(
        &self,
        text: &str,
        style: &TextStyle,
        size: (usize, usize),
        sample_step: usize,
        cap: usize,
        rng: &mut dyn RandomSource,
    ) -> Vec<DVec2> {
        let mut raster = match Raster::new(size.0, size.1) {
            Ok(raster) => raster,
            Err(e) => {
                warn!("cannot rasterize text on a {}x{} canvas: {e}", size.0, size.1);
                return Vec::new();
            }
        };
        self.rasterizer.rasterize(text, style, &mut raster);
        select(scan(&raster, sample_step), cap, rng)
    }
}
