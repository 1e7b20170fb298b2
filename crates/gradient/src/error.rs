//! Error types for gradient construction.

use thiserror::Error;

/// Errors produced while building a gradient or its pixel source.
#[derive(Debug, Error, PartialEq)]
pub enum GradientError {
    /// A hex color substring could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The hash was too short or not hexadecimal.
    #[error("invalid hash {hash:?}: need at least {needed} hex digits")]
    InvalidHash { hash: String, needed: usize },

    /// A blend factor was NaN or outside [0, 1].
    #[error("blend factor {0} is outside [0, 1]")]
    InvalidBlend(f64),

    /// A direction or interpolation name was not recognized.
    #[error("unknown {kind} '{name}'")]
    UnknownOption { kind: &'static str, name: String },

    /// Width or height was zero.
    #[error("invalid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_hash_mentions_required_length() {
        let err = GradientError::InvalidHash {
            hash: "abc".into(),
            needed: 12,
        };
        let msg = err.to_string();
        assert!(msg.contains("abc") && msg.contains("12"), "got: {msg}");
    }

    #[test]
    fn invalid_blend_includes_value() {
        assert!(GradientError::InvalidBlend(1.5).to_string().contains("1.5"));
    }

    #[test]
    fn unknown_option_names_kind_and_value() {
        let err = GradientError::UnknownOption {
            kind: "direction",
            name: "sideways".into(),
        };
        assert_eq!(err.to_string(), "unknown direction 'sideways'");
    }

    #[test]
    fn gradient_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GradientError>();
    }
}
