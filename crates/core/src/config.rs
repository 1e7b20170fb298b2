//! Encoder configuration.

use crate::error::EncodeError;
use serde::{Deserialize, Serialize};

/// zlib compression level, 0 (stored) through 9 (best).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    pub const NONE: CompressionLevel = CompressionLevel(0);
    pub const FAST: CompressionLevel = CompressionLevel(1);
    pub const BEST: CompressionLevel = CompressionLevel(9);

    /// Returns `EncodeError::InvalidCompressionLevel` for values above 9.
    pub fn new(level: u32) -> Result<Self, EncodeError> {
        if level > 9 {
            return Err(EncodeError::InvalidCompressionLevel(level));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// zlib's own default.
impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel(6)
    }
}

impl TryFrom<u32> for CompressionLevel {
    type Error = EncodeError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<CompressionLevel> for u32 {
    fn from(level: CompressionLevel) -> u32 {
        level.0
    }
}

impl From<CompressionLevel> for flate2::Compression {
    fn from(level: CompressionLevel) -> Self {
        flate2::Compression::new(level.0)
    }
}

/// Settings that shape the encoded stream without changing the pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub compression: CompressionLevel,
}
