//! The core `Engine` trait driven once per rendered frame.
//!
//! The trait is object-safe so drivers can hold a `Box<dyn Engine>` and stay
//! agnostic of which particle engine they are plotting.

use glam::DVec2;
use serde_json::Value;

/// Per-frame input supplied by the driver.
///
/// Every particle in a step observes the same `Frame`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    /// Seconds since the driver started.
    pub elapsed: f64,
    /// Pointer position in canvas pixels, if a pointer is present.
    pub pointer: Option<DVec2>,
}

impl Frame {
    /// A frame at `elapsed` seconds with no pointer.
    pub fn at(elapsed: f64) -> Self {
        Self {
            elapsed,
            pointer: None,
        }
    }

    /// The same frame with the pointer at `pointer`.
    pub fn with_pointer(self, pointer: DVec2) -> Self {
        Self {
            pointer: Some(pointer),
            ..self
        }
    }
}

/// Core trait for particle engines that assemble into a text shape.
///
/// Neither `rebuild` nor `step` can fail: degenerate configurations leave
/// the engine with no particles, and stepping an empty engine is a no-op.
pub trait Engine {
    /// Replaces the target shape with `text` and respawns every particle.
    fn rebuild(&mut self, text: &str);

    /// Advances every particle one step and returns their positions in order.
    fn step(&mut self, frame: &Frame) -> Vec<DVec2>;

    /// Current particle positions in order, without stepping.
    fn positions(&self) -> Vec<DVec2>;

    /// Canvas size in pixels as `(width, height)`.
    fn size(&self) -> (usize, usize);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Merges parameter overrides. Force and flow options apply from the
    /// next step; sampling options apply from the next `rebuild`.
    fn set_params(&mut self, overrides: &Value);

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
