//! Tunable constants of the glyph swarm.

use glyphswarm_core::params::{param_bool, param_f64, param_string, param_usize};
use glyphswarm_core::DVec2;
use serde_json::{json, Value};

use crate::glyph::TextStyle;

const DEFAULT_TEXT: &str = "PLURIBUS";
const DEFAULT_FONT_SIZE: f64 = 120.0;
const DEFAULT_SAMPLE_STEP: usize = 4;
const DEFAULT_PARTICLE_COUNT: usize = 1200;
const DEFAULT_ATTRACT: f64 = 0.055;
const DEFAULT_MAX_FORCE: f64 = 1.2;
const DEFAULT_MAX_SPEED: f64 = 2.5;
const DEFAULT_NOISE_SCALE: f64 = 0.006;
const DEFAULT_NOISE_AMP: f64 = 1.1;
const DEFAULT_CURL_EPS: f64 = 0.8;
const DEFAULT_DAMPING: f64 = 0.92;
const DEFAULT_JITTER: f64 = 0.05;
const DEFAULT_MOUSE_RADIUS: f64 = 140.0;
const DEFAULT_MOUSE_FORCE: f64 = 2.4;
const DEFAULT_BOLD: bool = true;
/// The text is anchored at a fixed fraction of the canvas, not centered on
/// its own bounding box.
const DEFAULT_ANCHOR_X: f64 = 0.3;
const DEFAULT_ANCHOR_Y: f64 = 0.36;
/// Elapsed seconds to noise time (0.0002 per millisecond).
const DEFAULT_TIME_SCALE: f64 = 0.2;
const DEFAULT_WRAP_MARGIN: f64 = 10.0;

const MIN_FONT_SIZE: f64 = 8.0;
const MAX_FONT_SIZE: f64 = 600.0;
const MAX_SAMPLE_STEP: usize = 32;
const MAX_PARTICLE_COUNT: usize = 20_000;

/// `value` if finite, else `fallback`.
fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Simulation parameters for the glyph swarm.
///
/// Sampling options (`text`, `font_size`, `bold`, `anchor_*`, `sample_step`,
/// `particle_count`) are read on rebuild; everything else on every step.
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmParams {
    pub text: String,
    pub font_size: f64,
    pub bold: bool,
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub sample_step: usize,
    pub particle_count: usize,
    pub attract: f64,
    pub max_force: f64,
    pub max_speed: f64,
    pub noise_scale: f64,
    pub noise_amp: f64,
    pub curl_eps: f64,
    pub damping: f64,
    pub jitter: f64,
    pub mouse_radius: f64,
    pub mouse_force: f64,
    pub time_scale: f64,
    pub wrap_margin: f64,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            bold: DEFAULT_BOLD,
            anchor_x: DEFAULT_ANCHOR_X,
            anchor_y: DEFAULT_ANCHOR_Y,
            sample_step: DEFAULT_SAMPLE_STEP,
            particle_count: DEFAULT_PARTICLE_COUNT,
            attract: DEFAULT_ATTRACT,
            max_force: DEFAULT_MAX_FORCE,
            max_speed: DEFAULT_MAX_SPEED,
            noise_scale: DEFAULT_NOISE_SCALE,
            noise_amp: DEFAULT_NOISE_AMP,
            curl_eps: DEFAULT_CURL_EPS,
            damping: DEFAULT_DAMPING,
            jitter: DEFAULT_JITTER,
            mouse_radius: DEFAULT_MOUSE_RADIUS,
            mouse_force: DEFAULT_MOUSE_FORCE,
            time_scale: DEFAULT_TIME_SCALE,
            wrap_margin: DEFAULT_WRAP_MARGIN,
        }
    }
}

impl SwarmParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self::default().merged(params)
    }

    /// Returns a copy with any keys present in `overrides` replaced.
    ///
    /// Missing or mistyped keys keep their current value. The result is
    /// [`sanitized`](Self::sanitized).
    pub fn merged(&self, overrides: &Value) -> Self {
        let o = overrides;
        Self {
            text: param_string(o, "text", &self.text),
            font_size: param_f64(o, "font_size", self.font_size),
            bold: param_bool(o, "bold", self.bold),
            anchor_x: param_f64(o, "anchor_x", self.anchor_x),
            anchor_y: param_f64(o, "anchor_y", self.anchor_y),
            sample_step: param_usize(o, "sample_step", self.sample_step),
            particle_count: param_usize(o, "particle_count", self.particle_count),
            attract: param_f64(o, "attract", self.attract),
            max_force: param_f64(o, "max_force", self.max_force),
            max_speed: param_f64(o, "max_speed", self.max_speed),
            noise_scale: param_f64(o, "noise_scale", self.noise_scale),
            noise_amp: param_f64(o, "noise_amp", self.noise_amp),
            curl_eps: param_f64(o, "curl_eps", self.curl_eps),
            damping: param_f64(o, "damping", self.damping),
            jitter: param_f64(o, "jitter", self.jitter),
            mouse_radius: param_f64(o, "mouse_radius", self.mouse_radius),
            mouse_force: param_f64(o, "mouse_force", self.mouse_force),
            time_scale: param_f64(o, "time_scale", self.time_scale),
            wrap_margin: param_f64(o, "wrap_margin", self.wrap_margin),
        }
        .sanitized()
    }

    /// Forces the sampling options into their schema ranges.
    ///
    /// Font size, anchor, stride and population bound the cost of a
    /// rebuild, so out-of-range values are clamped and non-finite ones fall
    /// back to their defaults. `jitter` is used as a magnitude.
    pub fn sanitized(self) -> Self {
        Self {
            font_size: finite_or(self.font_size, DEFAULT_FONT_SIZE)
                .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            anchor_x: finite_or(self.anchor_x, DEFAULT_ANCHOR_X).clamp(0.0, 1.0),
            anchor_y: finite_or(self.anchor_y, DEFAULT_ANCHOR_Y).clamp(0.0, 1.0),
            sample_step: self.sample_step.clamp(1, MAX_SAMPLE_STEP),
            particle_count: self.particle_count.min(MAX_PARTICLE_COUNT),
            jitter: finite_or(self.jitter, 0.0).abs(),
            ..self
        }
    }

    /// Text placement for a canvas of `width × height` pixels.
    pub fn text_style(&self, width: usize, height: usize) -> TextStyle {
        TextStyle {
            size: self.font_size,
            bold: self.bold,
            anchor: DVec2::new(width as f64 * self.anchor_x, height as f64 * self.anchor_y),
        }
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "text": self.text,
            "font_size": self.font_size,
            "bold": self.bold,
            "anchor_x": self.anchor_x,
            "anchor_y": self.anchor_y,
            "sample_step": self.sample_step,
            "particle_count": self.particle_count,
            "attract": self.attract,
            "max_force": self.max_force,
            "max_speed": self.max_speed,
            "noise_scale": self.noise_scale,
            "noise_amp": self.noise_amp,
            "curl_eps": self.curl_eps,
            "damping": self.damping,
            "jitter": self.jitter,
            "mouse_radius": self.mouse_radius,
            "mouse_force": self.mouse_force,
            "time_scale": self.time_scale,
            "wrap_margin": self.wrap_margin,
        })
    }

    /// Schema of every parameter: type, default, range, and description.
    pub fn schema() -> Value {
        json!({
            "text": {
                "type": "string",
                "default": DEFAULT_TEXT,
                "description": "Text the swarm assembles into (applied on rebuild)"
            },
            "font_size": {
                "type": "number",
                "default": DEFAULT_FONT_SIZE,
                "min": MIN_FONT_SIZE,
                "max": MAX_FONT_SIZE,
                "description": "Glyph size in pixels for target sampling (applied on rebuild)"
            },
            "bold": {
                "type": "boolean",
                "default": DEFAULT_BOLD,
                "description": "Synthesize a bold weight (applied on rebuild)"
            },
            "anchor_x": {
                "type": "number",
                "default": DEFAULT_ANCHOR_X,
                "min": 0.0,
                "max": 1.0,
                "description": "Text center as a fraction of canvas width (applied on rebuild)"
            },
            "anchor_y": {
                "type": "number",
                "default": DEFAULT_ANCHOR_Y,
                "min": 0.0,
                "max": 1.0,
                "description": "Text center as a fraction of canvas height (applied on rebuild)"
            },
            "sample_step": {
                "type": "integer",
                "default": DEFAULT_SAMPLE_STEP,
                "min": 1,
                "max": MAX_SAMPLE_STEP,
                "description": "Grid stride when scanning the text raster (applied on rebuild)"
            },
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 0,
                "max": MAX_PARTICLE_COUNT,
                "description": "Target cap and particle population (applied on rebuild)"
            },
            "attract": {
                "type": "number",
                "default": DEFAULT_ATTRACT,
                "min": 0.0,
                "max": 0.5,
                "description": "Spring strength toward the assigned target"
            },
            "max_force": {
                "type": "number",
                "default": DEFAULT_MAX_FORCE,
                "min": 0.0,
                "max": 10.0,
                "description": "Magnitude clamp on attraction and flow forces"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "max": 20.0,
                "description": "Magnitude clamp on particle velocity"
            },
            "noise_scale": {
                "type": "number",
                "default": DEFAULT_NOISE_SCALE,
                "min": 0.0,
                "max": 0.1,
                "description": "Spatial frequency of the flow field"
            },
            "noise_amp": {
                "type": "number",
                "default": DEFAULT_NOISE_AMP,
                "min": 0.0,
                "max": 10.0,
                "description": "Flow force amplitude"
            },
            "curl_eps": {
                "type": "number",
                "default": DEFAULT_CURL_EPS,
                "min": 0.01,
                "max": 10.0,
                "description": "Finite-difference step for the flow gradient, in pixels"
            },
            "damping": {
                "type": "number",
                "default": DEFAULT_DAMPING,
                "min": 0.0,
                "max": 1.0,
                "description": "Per-step velocity multiplier"
            },
            "jitter": {
                "type": "number",
                "default": DEFAULT_JITTER,
                "min": 0.0,
                "max": 1.0,
                "description": "Bound of the per-step random velocity nudge"
            },
            "mouse_radius": {
                "type": "number",
                "default": DEFAULT_MOUSE_RADIUS,
                "min": 0.0,
                "max": 1000.0,
                "description": "Pointer influence radius in pixels"
            },
            "mouse_force": {
                "type": "number",
                "default": DEFAULT_MOUSE_FORCE,
                "min": 0.0,
                "max": 20.0,
                "description": "Peak pointer repulsion"
            },
            "time_scale": {
                "type": "number",
                "default": DEFAULT_TIME_SCALE,
                "min": 0.0,
                "max": 5.0,
                "description": "Flow field time units per elapsed second"
            },
            "wrap_margin": {
                "type": "number",
                "default": DEFAULT_WRAP_MARGIN,
                "min": 0.0,
                "max": 100.0,
                "description": "Distance past the canvas edge before a particle wraps"
            }
        })
    }
}
