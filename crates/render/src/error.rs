//! Error types for rendering and writing images.

use gradient_png_core::EncodeError;
use gradient_png_gradient::error::GradientError;
use thiserror::Error;

/// Errors produced while building a source, encoding, or writing a file.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The PNG encoder rejected the image.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A gradient could not be built from its hash or params.
    #[error(transparent)]
    Gradient(#[from] GradientError),

    /// No source is registered under this name.
    #[error("unknown source: {0}")]
    UnknownSource(String),

    /// A source parameter had an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Width or height was zero in a seed.
    #[error("invalid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Writing the output file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl RenderError {
    pub(crate) fn io(context: impl std::fmt::Display, err: impl std::fmt::Display) -> Self {
        RenderError::Io(format!("{context}: {err}"))
    }
}
