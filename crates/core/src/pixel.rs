//! Pixel values and the [`PixelSource`] seam the encoder samples from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Bytes in scanline order.
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb { r, g, b }
    }
}

/// Failure reported by a pixel source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SourceError(pub String);

impl SourceError {
    pub fn new(msg: impl Into<String>) -> Self {
        SourceError(msg.into())
    }
}

/// Supplies one color per pixel coordinate.
///
/// Implemented for plain closures `Fn(u32, u32) -> Result<Rgb, SourceError>`
/// so ad-hoc sources need no wrapper type.
pub trait PixelSource {
    fn pixel(&self, x: u32, y: u32) -> Result<Rgb, SourceError>;
}

impl<F> PixelSource for F
where
    F: Fn(u32, u32) -> Result<Rgb, SourceError>,
{
    fn pixel(&self, x: u32, y: u32) -> Result<Rgb, SourceError> {
        self(x, y)
    }
}

/// The same color everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solid(pub Rgb);

impl PixelSource for Solid {
    fn pixel(&self, _x: u32, _y: u32) -> Result<Rgb, SourceError> {
        Ok(self.0)
    }
}
