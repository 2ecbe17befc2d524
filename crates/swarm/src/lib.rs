#![deny(unsafe_code)]
//! Glyph swarm engine.
//!
//! A population of point particles is pulled toward targets sampled from
//! rasterized text, stirred by a curl-noise flow field, and pushed away from
//! the pointer. Each step composes those forces per particle, damps and
//! clamps the velocity, integrates position with explicit Euler, and wraps
//! particles toroidally around the canvas with a small margin.
//!
//! Randomness, noise and glyph rendering are injected through [`Sources`],
//! so a run is reproducible from its seed and every stage can be stubbed.

pub mod glyph;
pub mod params;
pub mod particle;
pub mod sampler;

use glyphswarm_core::error::EngineError;
use glyphswarm_core::vector::{limit, wrap};
use glyphswarm_core::{
    CurlField, DVec2, Engine, FbmNoise, Frame, NoiseSource, RandomSource, Xorshift64,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::glyph::{BitmapFont, GlyphRasterizer};
use crate::params::SwarmParams;
use crate::particle::{attraction, repulsion, spawn_all, Particle};
use crate::sampler::ShapeSampler;

/// Registry name of this engine.
pub const ENGINE_NAME: &str = "glyph-swarm";

/// The injected collaborators of a [`GlyphSwarm`].
pub struct Sources {
    pub rasterizer: Box<dyn GlyphRasterizer>,
    pub noise: Box<dyn NoiseSource>,
    pub rng: Box<dyn RandomSource>,
}

impl Sources {
    /// Built-in bitmap font, fractal Perlin noise and xorshift, all derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rasterizer: Box::new(BitmapFont),
            noise: Box::new(FbmNoise::new(noise_seed(seed))),
            rng: Box::new(Xorshift64::new(seed)),
        }
    }

    /// Replaces the glyph rasterizer.
    pub fn with_rasterizer(self, rasterizer: Box<dyn GlyphRasterizer>) -> Self {
        Self { rasterizer, ..self }
    }
}

/// Folds a 64-bit seed into the 32-bit seed the noise generator takes.
fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Text-forming particle swarm.
///
/// Owns the target list and the particle population. Both are replaced
/// together on [`Engine::rebuild`] and never patched individually, so every
/// particle's `target` always indexes the current target list.
pub struct GlyphSwarm {
    width: usize,
    height: usize,
    params: SwarmParams,
    sampler: ShapeSampler,
    curl: CurlField,
    rng: Box<dyn RandomSource>,
    targets: Vec<DVec2>,
    particles: Vec<Particle>,
}

impl GlyphSwarm {
    /// Creates a swarm with the default sources and builds `params.text`.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: SwarmParams,
    ) -> Result<Self, EngineError> {
        Self::with_sources(width, height, params, Sources::seeded(seed))
    }

    /// Creates a swarm from a JSON params object, falling back to defaults.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(width, height, seed, SwarmParams::from_json(json_params))
    }

    /// Creates a swarm with explicit sources and builds `params.text`.
    ///
    /// `params` is [`sanitized`](SwarmParams::sanitized) first. Returns
    /// `EngineError::InvalidDimensions` if width or height is zero or their
    /// product overflows.
    pub fn with_sources(
        width: usize,
        height: usize,
        params: SwarmParams,
        sources: Sources,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        let params = params.sanitized();
        let text = params.text.clone();
        let mut swarm = Self {
            width,
            height,
            params,
            sampler: ShapeSampler::new(sources.rasterizer),
            curl: CurlField::new(sources.noise),
            rng: sources.rng,
            targets: Vec::new(),
            particles: Vec::new(),
        };
        swarm.rebuild(&text);
        Ok(swarm)
    }

    /// Rebuilds the current text, respawning every particle.
    pub fn reset(&mut self) {
        let text = self.params.text.clone();
        self.rebuild(&text);
    }

    /// Targets sampled on the last rebuild.
    pub fn targets(&self) -> &[DVec2] {
        &self.targets
    }

    /// The particle population.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current typed parameters.
    pub fn swarm_params(&self) -> &SwarmParams {
        &self.params
    }

    fn canvas(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    /// Advances every particle one step in place.
    ///
    /// All particles read the same targets, time and pointer; no particle
    /// reads another, so updating in place is equivalent to a simultaneous update.
    fn advance(&mut self, frame: &Frame) {
        let size = self.canvas();
        let p = &self.params;
        let time = frame.elapsed * p.time_scale;

        for particle in &mut self.particles {
            let pos = particle.position;

            let pull = limit(
                attraction(pos, self.targets[particle.target], p.attract),
                p.max_force,
            );
            let flow = limit(
                self.curl.curl(pos.x, pos.y, time, p.noise_scale, p.curl_eps) * p.noise_amp,
                p.max_force,
            );
            let push = frame.pointer.map_or(DVec2::ZERO, |pointer| {
                repulsion(pos, pointer, p.mouse_radius, p.mouse_force)
            });
            let jitter = DVec2::new(
                self.rng.next_range(-p.jitter, p.jitter),
                self.rng.next_range(-p.jitter, p.jitter),
            );

            let velocity = (particle.velocity + pull + flow + push + jitter) * p.damping;
            particle.velocity = limit(velocity, p.max_speed);
            particle.position = wrap(pos + particle.velocity, size, p.wrap_margin);
        }
    }
}

impl Engine for GlyphSwarm {
    fn rebuild(&mut self, text: &str) {
        let style = self.params.text_style(self.width, self.height);
        let size = self.canvas();
        let targets = self.sampler.targets(
            text,
            &style,
            (self.width, self.height),
            self.params.sample_step,
            self.params.particle_count,
            self.rng.as_mut(),
        );
        let particles = spawn_all(
            self.params.particle_count,
            targets.len(),
            size,
            self.rng.as_mut(),
        );

        if targets.is_empty() {
            warn!("text {text:?} produced no targets; the swarm is empty");
        } else {
            debug!(
                "rebuilt {text:?}: {} targets, {} particles",
                targets.len(),
                particles.len()
            );
        }

        self.params.text = text.to_owned();
        self.targets = targets;
        self.particles = particles;
    }

    fn step(&mut self, frame: &Frame) -> Vec<DVec2> {
        self.advance(frame);
        self.positions()
    }

    fn positions(&self) -> Vec<DVec2> {
        self.particles.iter().map(|p| p.position).collect()
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn set_params(&mut self, overrides: &Value) {
        self.params = self.params.merged(overrides);
    }

    fn param_schema(&self) -> Value {
        SwarmParams::schema()
    }
}
