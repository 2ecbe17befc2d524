//! Text rasterization into an offscreen [`Raster`].
//!
//! The sampler only needs "which pixels does this text cover", so the
//! rasterizer is a trait: the built-in [`BitmapFont`] needs no font files and
//! renders identically everywhere, while [`OutlineFont`] renders any
//! TrueType/OpenType font with anti-aliased coverage.
//!
//! Text is aligned center/center on [`TextStyle::anchor`]. Bold weight is
//! synthesized by dilating the coverage.

use std::path::Path;

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use glyphswarm_core::{DVec2, EngineError, Raster};

/// How text is placed and weighted on the raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    /// Synthesize a bold weight.
    pub bold: bool,
    /// Pixel position the text block is centered on.
    pub anchor: DVec2,
}

impl TextStyle {
    /// Dilation radius used for synthetic bold: one pixel per 40 px of
    /// font size, at least one.
    pub fn bold_radius(&self) -> usize {
        if self.bold {
            ((self.size / 40.0).round() as usize).max(1)
        } else {
            0
        }
    }
}

/// Draws text coverage into a black raster.
pub trait GlyphRasterizer: Send + Sync {
    /// Draws `text` onto `raster`. Pixels outside the raster are clipped.
    fn rasterize(&self, text: &str, style: &TextStyle, raster: &mut Raster);
}

/// Side length of a `font8x8` glyph cell.
const CELL: usize = 8;

/// The public-domain 8×8 bitmap font, scaled so one cell is `size` pixels tall.
///
/// Covers ASCII and Latin-1. Unknown characters advance as blanks.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    fn rows(c: char) -> Option<[u8; 8]> {
        BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c))
    }
}

impl GlyphRasterizer for BitmapFont {
    fn rasterize(&self, text: &str, style: &TextStyle, raster: &mut Raster) {
        let px = style.size / CELL as f64;
        if !(px > 0.0 && px.is_finite()) {
            return;
        }
        let count = text.chars().count();
        let left = style.anchor.x - (count * CELL) as f64 * px / 2.0;
        let top = style.anchor.y - CELL as f64 * px / 2.0;

        for (i, c) in text.chars().enumerate() {
            let Some(rows) = Self::rows(c) else {
                continue;
            };
            let cell_left = left + (i * CELL) as f64 * px;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..CELL {
                    // Bit 0 is the leftmost pixel.
                    if bits & (1 << col) != 0 {
                        let x0 = cell_left + col as f64 * px;
                        let y0 = top + row as f64 * px;
                        fill_rect(raster, x0, y0, x0 + px, y0 + px);
                    }
                }
            }
        }
        raster.dilate(style.bold_radius());
    }
}

/// Fills every pixel whose center lies in `[x0, x1) × [y0, y1)`, clipped
/// to the raster.
fn fill_rect(raster: &mut Raster, x0: f64, y0: f64, x1: f64, y1: f64) {
    let first = |v: f64| (v - 0.5).ceil() as isize;
    let w = raster.width() as isize;
    let h = raster.height() as isize;
    for y in first(y0).max(0)..first(y1).min(h) {
        for x in first(x0).max(0)..first(x1).min(w) {
            raster.set(x, y, 1.0);
        }
    }
}

/// A scalable outline font loaded with `ab_glyph`.
pub struct OutlineFont {
    font: FontVec,
}

impl OutlineFont {
    /// Parses a TrueType/OpenType font from memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, EngineError> {
        FontVec::try_from_vec(data)
            .map(|font| Self { font })
            .map_err(|e| EngineError::InvalidFont(e.to_string()))
    }

    /// Reads and parses a font file.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let data = std::fs::read(path)
            .map_err(|e| EngineError::InvalidFont(format!("{}: {e}", path.display())))?;
        Self::from_bytes(data)
    }
}

impl GlyphRasterizer for OutlineFont {
    fn rasterize(&self, text: &str, style: &TextStyle, raster: &mut Raster) {
        let size = style.size as f32;
        if !(size > 0.0 && size.is_finite()) {
            return;
        }
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);

        let mut caret = 0.0_f32;
        let mut prev: Option<GlyphId> = None;
        let mut placed = Vec::with_capacity(text.len());
        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(p) = prev {
                caret += scaled.kern(p, id);
            }
            placed.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }

        let left = style.anchor.x as f32 - caret / 2.0;
        let line_height = scaled.ascent() - scaled.descent();
        let baseline = style.anchor.y as f32 - line_height / 2.0 + scaled.ascent();

        for (id, x) in placed {
            let glyph = id.with_scale_and_position(scale, point(left + x, baseline));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                if bounds.max.x < 0.0
                    || bounds.max.y < 0.0
                    || bounds.min.x > raster.width() as f32
                    || bounds.min.y > raster.height() as f32
                {
                    continue;
                }
                let (ox, oy) = (bounds.min.x as isize, bounds.min.y as isize);
                outlined.draw(|gx, gy, coverage| {
                    raster.cover(ox + gx as isize, oy + gy as isize, f64::from(coverage));
                });
            }
        }
        raster.dilate(style.bold_radius());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(size: f64, bold: bool, anchor: DVec2) -> TextStyle {
        TextStyle { size, bold, anchor }
    }

    fn lit(raster: &Raster) -> Vec<(usize, usize)> {
        raster
            .grid(1)
            .filter(|&(_, _, v)| v > 0.0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn bold_radius_scales_with_size() {
        let anchor = DVec2::ZERO;
        assert_eq!(style(120.0, true, anchor).bold_radius(), 3);
        assert_eq!(style(8.0, true, anchor).bold_radius(), 1);
        assert_eq!(style(120.0, false, anchor).bold_radius(), 0);
    }

    #[test]
    fn bitmap_font_draws_inside_text_block() {
        let mut raster = Raster::new(200, 100).unwrap();
        BitmapFont.rasterize("HI", &style(16.0, false, DVec2::new(100.0, 50.0)), &mut raster);
        let pixels = lit(&raster);
        assert!(!pixels.is_empty());
        // Two 16 px cells centered on (100, 50): x in [84, 116), y in [42, 58).
        assert!(pixels
            .iter()
            .all(|&(x, y)| (84..116).contains(&x) && (42..58).contains(&y)));
    }

    #[test]
    fn bitmap_font_one_pixel_per_bit_at_size_eight() {
        let mut raster = Raster::new(8, 8).unwrap();
        BitmapFont.rasterize("A", &style(8.0, false, DVec2::new(4.0, 4.0)), &mut raster);
        let rows = BASIC_FONTS.get('A').unwrap();
        let expected: usize = rows.iter().map(|r| r.count_ones() as usize).sum();
        assert_eq!(lit(&raster).len(), expected);
    }

    #[test]
    fn bitmap_font_space_and_empty_text_draw_nothing() {
        let mut raster = Raster::new(64, 32).unwrap();
        let s = style(16.0, true, DVec2::new(32.0, 16.0));
        BitmapFont.rasterize("", &s, &mut raster);
        BitmapFont.rasterize("   ", &s, &mut raster);
        assert!(lit(&raster).is_empty());
    }

    #[test]
    fn bold_covers_more_pixels() {
        let s = style(32.0, false, DVec2::new(64.0, 32.0));
        let mut regular = Raster::new(128, 64).unwrap();
        BitmapFont.rasterize("X", &s, &mut regular);
        let mut bold = Raster::new(128, 64).unwrap();
        BitmapFont.rasterize("X", &TextStyle { bold: true, ..s }, &mut bold);
        assert!(lit(&bold).len() > lit(&regular).len());
    }

    #[test]
    fn text_off_canvas_is_clipped() {
        let mut raster = Raster::new(32, 32).unwrap();
        BitmapFont.rasterize("W", &style(64.0, false, DVec2::new(0.0, 0.0)), &mut raster);
        // Only the lower-right quarter of the glyph lands on the canvas.
        assert!(!lit(&raster).is_empty());
        assert_eq!(raster.data().len(), 32 * 32);
    }

    #[test]
    fn zero_size_draws_nothing() {
        let mut raster = Raster::new(16, 16).unwrap();
        BitmapFont.rasterize("A", &style(0.0, true, DVec2::new(8.0, 8.0)), &mut raster);
        assert!(lit(&raster).is_empty());
    }

    #[test]
    fn non_finite_size_draws_nothing() {
        let mut raster = Raster::new(16, 16).unwrap();
        let anchor = DVec2::new(8.0, 8.0);
        BitmapFont.rasterize("A", &style(f64::INFINITY, true, anchor), &mut raster);
        BitmapFont.rasterize("A", &style(f64::NAN, true, anchor), &mut raster);
        assert!(lit(&raster).is_empty());
    }

    #[test]
    fn huge_bitmap_glyph_is_clipped_to_the_raster() {
        // One font cell is far larger than the raster; the glyph's crossbar
        // covers the middle and bold dilation spreads it everywhere.
        let mut raster = Raster::new(16, 16).unwrap();
        BitmapFont.rasterize("H", &style(1e12, true, DVec2::new(8.0, 8.0)), &mut raster);
        assert_eq!(lit(&raster).len(), 16 * 16);
    }

    fn fixture_font() -> OutlineFont {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf");
        OutlineFont::from_file(&path).unwrap()
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of pixels above the sampling threshold.
    fn bright_bounds(raster: &Raster) -> (usize, usize, usize, usize) {
        raster
            .grid(1)
            .filter(|&(_, _, v)| v > 10.0 / 255.0)
            .fold((usize::MAX, usize::MAX, 0, 0), |(x0, y0, x1, y1), (x, y, _)| {
                (x0.min(x), y0.min(y), x1.max(x), y1.max(y))
            })
    }

    #[test]
    fn outline_font_centers_text_on_anchor() {
        let font = fixture_font();
        let mut raster = Raster::new(800, 300).unwrap();
        font.rasterize("HH", &style(120.0, false, DVec2::new(400.0, 150.0)), &mut raster);

        let (x0, y0, x1, y1) = bright_bounds(&raster);
        assert!(x0 < x1 && y0 < y1, "nothing drawn");
        let cx = (x0 + x1) as f64 / 2.0;
        let cy = (y0 + y1) as f64 / 2.0;
        assert!((cx - 400.0).abs() < 4.0, "horizontal center {cx}");
        assert!((cy - 150.0).abs() < 6.0, "vertical center {cy}");
        // Two monospace cells of roughly 0.6 em each.
        assert!((100..200).contains(&(x1 - x0)), "width {}", x1 - x0);
    }

    #[test]
    fn outline_font_writes_antialiased_coverage() {
        let font = fixture_font();
        let mut raster = Raster::new(200, 100).unwrap();
        font.rasterize("O", &style(60.0, false, DVec2::new(100.0, 50.0)), &mut raster);
        assert!(raster.data().iter().any(|&v| v > 0.0 && v < 1.0));
        assert!(raster.data().iter().any(|&v| v > 0.99));
    }

    #[test]
    fn outline_bold_covers_more_pixels() {
        let font = fixture_font();
        let s = style(80.0, false, DVec2::new(200.0, 60.0));
        let mut regular = Raster::new(400, 120).unwrap();
        font.rasterize("Wi", &s, &mut regular);
        let mut bold = Raster::new(400, 120).unwrap();
        font.rasterize("Wi", &TextStyle { bold: true, ..s }, &mut bold);
        assert!(lit(&bold).len() > lit(&regular).len());
    }

    #[test]
    fn outline_font_empty_text_and_bad_sizes_draw_nothing() {
        let font = fixture_font();
        let mut raster = Raster::new(64, 64).unwrap();
        let anchor = DVec2::new(32.0, 32.0);
        font.rasterize("", &style(40.0, true, anchor), &mut raster);
        font.rasterize("A", &style(0.0, false, anchor), &mut raster);
        font.rasterize("A", &style(f64::INFINITY, false, anchor), &mut raster);
        assert!(lit(&raster).is_empty());
    }

    #[test]
    fn outline_text_off_canvas_is_clipped() {
        let font = fixture_font();
        let mut raster = Raster::new(64, 64).unwrap();
        font.rasterize("MMMM", &style(48.0, false, DVec2::new(0.0, 0.0)), &mut raster);
        assert!(!lit(&raster).is_empty());
        font.rasterize("M", &style(48.0, false, DVec2::new(-500.0, 900.0)), &mut raster);
        assert_eq!(raster.data().len(), 64 * 64);
    }

    #[test]
    fn outline_font_rejects_garbage_bytes() {
        let result = OutlineFont::from_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(result, Err(EngineError::InvalidFont(_))));
    }

    #[test]
    fn outline_font_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.ttf");
        match OutlineFont::from_file(&path) {
            Err(EngineError::InvalidFont(msg)) => assert!(msg.contains("missing.ttf")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("missing font file should not load"),
        }
    }

    #[test]
    fn rasterizers_are_object_safe() {
        let r: Box<dyn GlyphRasterizer> = Box::new(BitmapFont);
        let mut raster = Raster::new(16, 16).unwrap();
        r.rasterize("o", &style(8.0, false, DVec2::new(8.0, 8.0)), &mut raster);
        assert!(!lit(&raster).is_empty());
    }
}
