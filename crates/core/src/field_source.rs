//! Scalar noise sources and the curl flow field derived from them.
//!
//! A [`NoiseSource`] is a smooth scalar potential over (x, y, time). The
//! [`CurlField`] estimates the potential's gradient with central finite
//! differences and rotates it by 90°, which yields a swirling, approximately
//! divergence-free flow instead of a pull toward noise peaks.
//!
//! All implementations are deterministic: same inputs produce the same output.

use glam::DVec2;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// A seeded scalar noise potential.
///
/// Implementations must be pure functions of `(x, y, time)` once built.
pub trait NoiseSource: Send + Sync {
    /// Sample the potential at the already-scaled coordinates `(x, y)` and `time`.
    fn sample(&self, x: f64, y: f64, time: f64) -> f64;
}

/// Number of octaves summed by [`FbmNoise`].
const FBM_OCTAVES: usize = 4;
/// Amplitude falloff per octave.
const FBM_PERSISTENCE: f64 = 0.5;
/// Frequency multiplier per octave.
const FBM_LACUNARITY: f64 = 2.0;

/// Fractal Perlin noise remapped to [0, 1].
///
/// Four octaves with amplitude falloff 0.5, the classic creative-coding
/// noise shape.
pub struct FbmNoise {
    fbm: Fbm<Perlin>,
}

impl FbmNoise {
    /// Creates a fractal Perlin source from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(FBM_OCTAVES)
            .set_persistence(FBM_PERSISTENCE)
            .set_lacunarity(FBM_LACUNARITY);
        Self { fbm }
    }
}

impl NoiseSource for FbmNoise {
    fn sample(&self, x: f64, y: f64, time: f64) -> f64 {
        ((self.fbm.get([x, y, time]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Below this finite-difference step the curl is reported as zero.
const SINGULARITY_EPS: f64 = 1e-10;

/// Curl noise: the rotated gradient of a [`NoiseSource`].
pub struct CurlField {
    noise: Box<dyn NoiseSource>,
}

impl CurlField {
    /// Wraps a noise source.
    pub fn new(noise: Box<dyn NoiseSource>) -> Self {
        Self { noise }
    }

    /// Flow vector at world position `(x, y)` and time `time`.
    ///
    /// `scale` maps world coordinates to noise space and `eps` is the
    /// finite-difference step in world units. The gradient `(a, b)` is
    /// returned rotated as `(-b, a)`.
    pub fn curl(&self, x: f64, y: f64, time: f64, scale: f64, eps: f64) -> DVec2 {
        if eps.abs() < SINGULARITY_EPS {
            return DVec2::ZERO;
        }
        let n = |px: f64, py: f64| self.noise.sample(px * scale, py * scale, time);
        let a = (n(x + eps, y) - n(x - eps, y)) / (2.0 * eps);
        let b = (n(x, y + eps) - n(x, y - eps)) / (2.0 * eps);
        DVec2::new(-b, a)
    }
}
