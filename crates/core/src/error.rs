//! Error types for the PNG encoder core.

use thiserror::Error;

/// Errors produced while encoding an image.
///
/// Every variant is fatal for the image being encoded: the encoder never
/// hands back a partial byte stream.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height was zero, above the PNG limit of 2^31 - 1, or the
    /// scanline buffer for these dimensions would not fit in memory.
    #[error("invalid dimensions {width}x{height}: width and height must be in 1..=2147483647")]
    InvalidDimensions { width: u32, height: u32 },

    /// The zlib compressor failed or could not fit its output in the reserved bound.
    #[error("compression failed: {0}")]
    CompressionFailure(String),

    /// A chunk payload was too long for the 32-bit length field.
    #[error("chunk payload of {0} bytes exceeds the 32-bit length field")]
    PayloadTooLarge(usize),

    /// The pixel source could not produce a value for a coordinate.
    #[error("pixel source failed at ({x}, {y}): {reason}")]
    PixelSourceFailure { x: u32, y: u32, reason: String },

    /// A chunk type tag was not four ASCII letters with an uppercase third letter.
    #[error("invalid chunk type {0:?}: expected four ASCII letters, the third uppercase")]
    InvalidChunkType([u8; 4]),

    /// A compression level outside 0..=9 was requested.
    #[error("invalid compression level {0}: expected 0..=9")]
    InvalidCompressionLevel(u32),
}
