#![deny(unsafe_code)]
//! Hash-derived two-color gradient pixel source.
//!
//! A hash string (typically a hex digest) picks the gradient's endpoints:
//! hex digits `[0..6)` are the start color and `[6..12)` the end color. The
//! color at any point is a typed function of the gradient and a [`Blend`]
//! factor in [0, 1]; [`GradientSource`] maps pixel coordinates to that
//! factor along a [`Direction`] so the encoder can sample it.

pub mod color;
pub mod error;
pub mod prng;

use color::{mix_oklab, mix_srgb, Srgb};
use error::GradientError;
use gradient_png_core::params::{param_str, param_string};
use gradient_png_core::{PixelSource, Rgb, SourceError};
use prng::Xorshift64;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Hex digits of the hash consumed by the two endpoint colors.
pub const HASH_COLOR_DIGITS: usize = 12;

/// Length of hashes derived from numeric seeds (same as an MD5 hex digest).
pub const SEED_HASH_DIGITS: usize = 32;

/// Position along a gradient, always within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Blend(f64);

impl Blend {
    pub const START: Blend = Blend(0.0);
    pub const END: Blend = Blend(1.0);

    /// Returns `GradientError::InvalidBlend` for NaN or values outside [0, 1].
    pub fn new(t: f64) -> Result<Self, GradientError> {
        if (0.0..=1.0).contains(&t) {
            Ok(Blend(t))
        } else {
            Err(GradientError::InvalidBlend(t))
        }
    }

    /// Clamps into [0, 1]; NaN becomes 0.
    pub fn clamped(t: f64) -> Self {
        if t.is_nan() {
            Blend(0.0)
        } else {
            Blend(t.clamp(0.0, 1.0))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Axis along which the blend factor grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    #[default]
    Diagonal,
}

impl Direction {
    pub const ALL: [Direction; 3] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
            Direction::Diagonal => "diagonal",
        }
    }

    /// Blend factor of pixel `(x, y)` on a `width`×`height` canvas. The first
    /// pixel along the axis is at 0 and the last at 1.
    pub fn blend(self, x: u32, y: u32, width: u32, height: u32) -> Blend {
        let ratio = |pos: u64, span: u64| {
            if span == 0 {
                0.0
            } else {
                pos as f64 / span as f64
            }
        };
        let (w, h) = (u64::from(width.max(1)) - 1, u64::from(height.max(1)) - 1);
        let t = match self {
            Direction::Horizontal => ratio(x.into(), w),
            Direction::Vertical => ratio(y.into(), h),
            Direction::Diagonal => ratio(u64::from(x) + u64::from(y), w + h),
        };
        Blend::clamped(t)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| GradientError::UnknownOption {
                kind: "direction",
                name: s.to_string(),
            })
    }
}

/// Color space the blend is computed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Straight per-channel mix of the 8-bit values.
    #[default]
    Srgb,
    /// Perceptually uniform mix in OKLab.
    Oklab,
}

impl Interpolation {
    pub const ALL: [Interpolation; 2] = [Interpolation::Srgb, Interpolation::Oklab];

    pub fn name(self) -> &'static str {
        match self {
            Interpolation::Srgb => "srgb",
            Interpolation::Oklab => "oklab",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interpolation::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| GradientError::UnknownOption {
                kind: "interpolation",
                name: s.to_string(),
            })
    }
}

/// Two-color gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    start: Srgb,
    end: Srgb,
    interpolation: Interpolation,
}

impl Gradient {
    pub fn new(start: Srgb, end: Srgb) -> Self {
        Self {
            start,
            end,
            interpolation: Interpolation::default(),
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Builds a gradient from the first twelve hex digits of `hash`.
    ///
    /// Returns `GradientError::InvalidHash` if the hash is shorter than
    /// [`HASH_COLOR_DIGITS`] or those digits are not hexadecimal. Characters
    /// past the twelfth are ignored.
    pub fn from_hash(hash: &str) -> Result<Self, GradientError> {
        let invalid = || GradientError::InvalidHash {
            hash: hash.to_string(),
            needed: HASH_COLOR_DIGITS,
        };
        let digits = hash.get(..HASH_COLOR_DIGITS).ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let start = Srgb::from_hex(&digits[0..6])?;
        let end = Srgb::from_hex(&digits[6..12])?;
        Ok(Self::new(start, end))
    }

    /// Gradient for a numeric seed, via [`hash_for_seed`].
    pub fn from_seed(seed: u64) -> Self {
        let hash = hash_for_seed(seed);
        // Seed hashes are always valid hex of sufficient length.
        Self::from_hash(&hash).unwrap_or(Self::new(
            Srgb::from_rgb8(Rgb::BLACK),
            Srgb::from_rgb8(Rgb::WHITE),
        ))
    }

    pub fn start(&self) -> Srgb {
        self.start
    }

    pub fn end(&self) -> Srgb {
        self.end
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Color at blend factor `t`: the start color at 0, the end color at 1.
    pub fn color_at(&self, t: Blend) -> Rgb {
        let mixed = match self.interpolation {
            Interpolation::Srgb => mix_srgb(self.start, self.end, t.get()),
            Interpolation::Oklab => mix_oklab(self.start, self.end, t.get()),
        };
        mixed.to_rgb8()
    }
}

/// Deterministic 32-digit hex hash for `seed`.
pub fn hash_for_seed(seed: u64) -> String {
    Xorshift64::new(seed).hex_digest(SEED_HASH_DIGITS)
}

/// Gradient settings read from a JSON params object.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientParams {
    /// Explicit hash; derived from the seed when absent.
    pub hash: Option<String>,
    pub direction: Direction,
    pub interpolation: Interpolation,
}

impl GradientParams {
    /// Reads `hash`, `direction` and `interpolation`, defaulting missing keys.
    ///
    /// Unlike numeric params, an unrecognized direction or interpolation name
    /// is an error rather than a silent fallback.
    pub fn from_json(params: &Value) -> Result<Self, GradientError> {
        Ok(Self {
            hash: param_str(params, "hash").map(String::from),
            direction: param_string(params, "direction", Direction::default().name()).parse()?,
            interpolation: param_string(params, "interpolation", Interpolation::default().name())
                .parse()?,
        })
    }
}

/// A [`Gradient`] laid over a fixed-size canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientSource {
    gradient: Gradient,
    direction: Direction,
    width: u32,
    height: u32,
}

impl GradientSource {
    /// Returns `GradientError::InvalidDimensions` if width or height is zero.
    pub fn new(
        gradient: Gradient,
        direction: Direction,
        width: u32,
        height: u32,
    ) -> Result<Self, GradientError> {
        if width == 0 || height == 0 {
            return Err(GradientError::InvalidDimensions { width, height });
        }
        Ok(Self {
            gradient,
            direction,
            width,
            height,
        })
    }

    /// Builds a source from JSON params, deriving the hash from `seed` when
    /// `params.hash` is absent.
    pub fn from_json(
        width: u32,
        height: u32,
        seed: u64,
        params: &Value,
    ) -> Result<Self, GradientError> {
        let p = GradientParams::from_json(params)?;
        let gradient = match &p.hash {
            Some(hash) => Gradient::from_hash(hash)?,
            None => Gradient::from_seed(seed),
        };
        Self::new(
            gradient.with_interpolation(p.interpolation),
            p.direction,
            width,
            height,
        )
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current settings as JSON, in the shape `from_json` accepts.
    ///
    /// `hash` carries both colors, so feeding the result back in reproduces
    /// this source for any seed. `start` and `end` repeat them for reading.
    pub fn params(&self) -> Value {
        let start = self.gradient.start.to_hex();
        let end = self.gradient.end.to_hex();
        json!({
            "hash": format!("{}{}", &start[1..], &end[1..]),
            "start": start,
            "end": end,
            "direction": self.direction.name(),
            "interpolation": self.gradient.interpolation.name(),
        })
    }
}

impl PixelSource for GradientSource {
    fn pixel(&self, x: u32, y: u32) -> Result<Rgb, SourceError> {
        if x >= self.width || y >= self.height {
            return Err(SourceError::new(format!(
                "({x}, {y}) is outside the {}x{} gradient",
                self.width, self.height
            )));
        }
        let t = self.direction.blend(x, y, self.width, self.height);
        Ok(self.gradient.color_at(t))
    }
}
