#![deny(unsafe_code)]
//! Engine registry: maps engine names to implementations and provides the
//! CPU-side rendering of particle positions.
//!
//! This crate sits between `glyphswarm-core` (which defines the `Engine`
//! trait) and the engine crates (`glyphswarm-swarm`). Drivers depend on this
//! crate so that name-based construction and rendering live in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use std::path::Path;

use glyphswarm_core::error::EngineError;
use glyphswarm_core::params::expect_object;
use glyphswarm_core::{DVec2, Engine, Frame};
use glyphswarm_swarm::glyph::OutlineFont;
use glyphswarm_swarm::params::SwarmParams;
use glyphswarm_swarm::{GlyphSwarm, Sources, ENGINE_NAME as GLYPH_SWARM};
use serde_json::Value;
use tracing::debug;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &[GLYPH_SWARM];

/// Enumeration of all available engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction.
pub enum EngineKind {
    /// Text-forming particle swarm.
    GlyphSwarm(GlyphSwarm),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// `font` selects an outline font file instead of the built-in bitmap
    /// font. Returns `EngineError::UnknownEngine` if the name is not
    /// recognized, `EngineError::ParamTypeMismatch` if `params` is not an
    /// object, and `EngineError::InvalidFont` if the font cannot be loaded.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
        font: Option<&Path>,
    ) -> Result<Self, EngineError> {
        match name {
            GLYPH_SWARM => {
                expect_object(params, "params")?;
                let mut sources = Sources::seeded(seed);
                if let Some(path) = font {
                    debug!("loading outline font {}", path.display());
                    sources = sources.with_rasterizer(Box::new(OutlineFont::from_file(path)?));
                }
                let swarm = GlyphSwarm::with_sources(
                    width,
                    height,
                    SwarmParams::from_json(params),
                    sources,
                )?;
                Ok(EngineKind::GlyphSwarm(swarm))
            }
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }

    /// Parameter schema of an engine, without constructing it.
    pub fn param_schema_for(name: &str) -> Result<Value, EngineError> {
        match name {
            GLYPH_SWARM => Ok(SwarmParams::schema()),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Current attraction targets.
    pub fn targets(&self) -> &[DVec2] {
        match self {
            EngineKind::GlyphSwarm(e) => e.targets(),
        }
    }
}

impl Engine for EngineKind {
    fn rebuild(&mut self, text: &str) {
        match self {
            EngineKind::GlyphSwarm(e) => e.rebuild(text),
        }
    }

    fn step(&mut self, frame: &Frame) -> Vec<DVec2> {
        match self {
            EngineKind::GlyphSwarm(e) => e.step(frame),
        }
    }

    fn positions(&self) -> Vec<DVec2> {
        match self {
            EngineKind::GlyphSwarm(e) => e.positions(),
        }
    }

    fn size(&self) -> (usize, usize) {
        match self {
            EngineKind::GlyphSwarm(e) => e.size(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::GlyphSwarm(e) => e.params(),
        }
    }

    fn set_params(&mut self, overrides: &Value) {
        match self {
            EngineKind::GlyphSwarm(e) => e.set_params(overrides),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::GlyphSwarm(e) => e.param_schema(),
        }
    }
}
