//! Tolerant extraction of typed parameters from a JSON object.
//!
//! Engine options travel as a `serde_json::Value` so that the CLI, seed files
//! and live overrides share one format. The `param_*` helpers never fail: a
//! missing or mistyped key yields the supplied default, which keeps a
//! simulation steppable whatever the user typed. Only the outer shape (it must
//! be an object) is checked, by [`expect_object`].

use crate::error::EngineError;
use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing,
/// negative, fractional or not a number.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map_or_else(|| default.to_owned(), String::from)
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks that a params value is a JSON object.
///
/// `null` is accepted as "no overrides". Anything else is reported as
/// `EngineError::ParamTypeMismatch` under `name`.
pub fn expect_object(params: &Value, name: &str) -> Result<(), EngineError> {
    match params {
        Value::Object(_) | Value::Null => Ok(()),
        other => Err(EngineError::ParamTypeMismatch {
            name: name.to_owned(),
            expected: "object".to_owned(),
            got: json_type_name(other).to_owned(),
        }),
    }
}
