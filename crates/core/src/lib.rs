#![deny(unsafe_code)]
//! Core types and traits for glyphswarm, a particle swarm that assembles
//! into text.
//!
//! Provides the `Engine` trait and per-frame `Frame` input, the `Raster`
//! intensity buffer, curl noise over a pluggable `NoiseSource`, the
//! pluggable `RandomSource` with its `Xorshift64` default, vector helpers,
//! JSON parameter helpers and the reproducible `Seed`.

pub mod engine;
pub mod error;
pub mod field_source;
pub mod params;
pub mod prng;
pub mod raster;
pub mod seed;
pub mod vector;

pub use engine::{Engine, Frame};
pub use error::EngineError;
pub use field_source::{CurlField, FbmNoise, NoiseSource};
pub use glam::DVec2;
pub use prng::{RandomSource, Xorshift64};
pub use raster::Raster;
pub use seed::Seed;
