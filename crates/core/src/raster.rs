//! Two-dimensional intensity buffer with clipped coordinate access.
//!
//! A `Raster` stores `width * height` f64 intensities in [0, 1] using
//! row-major layout. It backs both the offscreen text mask that targets are
//! sampled from and the trail canvas that particles are plotted onto.
//! Unlike a toroidal field, writes outside the bounds are dropped and reads
//! outside the bounds return 0 (black), the way a canvas clips drawing.

use crate::error::EngineError;

/// A 2D intensity buffer with values clamped to [0, 1] and clipped access.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Raster {
    /// Creates a black (zero-filled) raster of the given dimensions.
    ///
    /// Returns `EngineError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the underlying row-major data.
    ///
    /// Values written here bypass the [0, 1] clamping.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let xi = usize::try_from(x).ok().filter(|&xi| xi < self.width)?;
        let yi = usize::try_from(y).ok().filter(|&yi| yi < self.height)?;
        Some(yi * self.width + xi)
    }

    /// Intensity at `(x, y)`, or 0 outside the raster.
    pub fn get(&self, x: isize, y: isize) -> f64 {
        self.index(x, y).map_or(0.0, |idx| self.data[idx])
    }

    /// Sets the intensity at `(x, y)`, clamped to [0, 1]. Out-of-bounds
    /// writes are ignored.
    pub fn set(&mut self, x: isize, y: isize, value: f64) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx] = value.clamp(0.0, 1.0);
        }
    }

    /// Raises the intensity at `(x, y)` to `value` if it is brighter than
    /// what is already there. Used to accumulate glyph coverage, where
    /// overlapping glyph edges must not darken each other.
    pub fn cover(&mut self, x: isize, y: isize, value: f64) {
        if let Some(idx) = self.index(x, y) {
            let v = value.clamp(0.0, 1.0);
            if v > self.data[idx] {
                self.data[idx] = v;
            }
        }
    }

    /// Blends every pixel toward black by `alpha` in [0, 1].
    ///
    /// `alpha = 0` leaves the raster untouched, `alpha = 1` clears it.
    pub fn fade(&mut self, alpha: f64) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        self.data.iter_mut().for_each(|v| *v *= keep);
    }

    /// Grows bright regions by `radius` pixels with a square max filter.
    ///
    /// Applied as two separable passes (rows then columns). Radii beyond
    /// the larger dimension behave like that dimension.
    pub fn dilate(&mut self, radius: usize) {
        if radius == 0 {
            return;
        }
        let (w, h) = (self.width, self.height);
        let radius = radius.min(w.max(h));
        let mut rows = vec![0.0_f64; self.data.len()];
        for y in 0..h {
            let row = &self.data[y * w..(y + 1) * w];
            for x in 0..w {
                let lo = x.saturating_sub(radius);
                let hi = (x + radius).min(w - 1);
                rows[y * w + x] = row[lo..=hi].iter().copied().fold(0.0, f64::max);
            }
        }
        for x in 0..w {
            for y in 0..h {
                let lo = y.saturating_sub(radius);
                let hi = (y + radius).min(h - 1);
                self.data[y * w + x] = (lo..=hi).map(|yy| rows[yy * w + x]).fold(0.0, f64::max);
            }
        }
    }

    /// Iterates over a regular grid with the given stride, yielding
    /// `(x, y, value)` row by row starting at the origin.
    ///
    /// A stride of 0 is treated as 1.
    pub fn grid(&self, stride: usize) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let stride = stride.max(1);
        (0..self.height).step_by(stride).flat_map(move |y| {
            (0..self.width)
                .step_by(stride)
                .map(move |x| (x, y, self.data[y * self.width + x]))
        })
    }
}
