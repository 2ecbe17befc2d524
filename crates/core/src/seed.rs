//! Reproducible description of a rendered run.
//!
//! A [`Seed`] captures everything needed to replay a headless run: engine
//! name, canvas size, parameter overrides (including the text), PRNG seed,
//! frame count, frame rate and a fixed pointer position.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

fn default_fps() -> f64 {
    60.0
}

/// Everything needed to replay a rendered run.
///
/// Two identical `Seed` values fed to the same binary produce bit-identical
/// particle positions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub steps: usize,
    #[serde(default = "default_fps")]
    pub fps: f64,
    #[serde(default)]
    pub pointer: Option<[f64; 2]>,
}

impl Seed {
    /// Creates a Seed with empty params, zero steps, 60 fps and no pointer.
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            steps: 0,
            fps: default_fps(),
            pointer: None,
        }
    }

    /// Seconds elapsed at the start of frame `frame`.
    pub fn elapsed_at(&self, frame: usize) -> f64 {
        frame as f64 / self.fps
    }

    /// Validates dimensions (non-zero, no `width * height` overflow) and
    /// that the frame rate is a positive finite number.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(EngineError::ParamTypeMismatch {
                name: "fps".into(),
                expected: "positive number".into(),
                got: self.fps.to_string(),
            });
        }
        Ok(())
    }
}
