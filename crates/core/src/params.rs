//! Helpers for reading typed source parameters out of a `serde_json::Value`.
//!
//! Missing keys and wrong types fall back to the caller's default, so a
//! source constructed from `{}` always gets its documented defaults.

use serde_json::Value;

/// Borrows `params[name]` as a string, if present and a string.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    param_str(params, name).unwrap_or(default).to_owned()
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing,
/// not a non-negative integer, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}
