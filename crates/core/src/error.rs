//! Error types for the glyphswarm core.
//!
//! Only construction and I/O edges are fallible. Stepping and rebuilding an
//! engine never fail; degenerate configurations produce an empty swarm.

use thiserror::Error;

/// Errors produced by engine construction, font loading, and snapshot I/O.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero when creating a raster or an engine.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A font file could not be read or parsed.
    #[error("invalid font: {0}")]
    InvalidFont(String),

    /// No engine is registered under the requested name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// Writing or reading a file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = EngineError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn param_type_mismatch_includes_all_fields() {
        let err = EngineError::ParamTypeMismatch {
            name: "text".into(),
            expected: "string".into(),
            got: "number".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("text"), "missing param name in: {msg}");
        assert!(msg.contains("string"), "missing expected type in: {msg}");
        assert!(msg.contains("number"), "missing got type in: {msg}");
    }

    #[test]
    fn invalid_font_includes_reason() {
        let err = EngineError::InvalidFont("no such file".into());
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn unknown_engine_includes_name() {
        let err = EngineError::UnknownEngine("vortex".into());
        assert!(err.to_string().contains("vortex"));
    }

    #[test]
    fn io_includes_message() {
        let err = EngineError::Io("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}
