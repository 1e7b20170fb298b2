#![deny(unsafe_code)]
//! Source registry: maps source names to pixel sources, plus reproducible
//! seeds, atomic file output and parallel batch rendering.
//!
//! This crate sits between `gradient-png-core` (the encoder and the
//! `PixelSource` trait) and the source implementations. The CLI depends on it
//! to avoid duplicating dispatch logic.

pub mod batch;
pub mod error;
pub mod seed;
pub mod snapshot;

use error::RenderError;
use gradient_png_core::params::{param_string, param_u32};
use gradient_png_core::{PixelSource, Rgb, Solid, SourceError};
use gradient_png_gradient::color::Srgb;
use gradient_png_gradient::GradientSource;
use serde_json::{json, Value};

pub use batch::{render_batch, BatchJob, BatchOutcome};
pub use seed::ImageSeed;
pub use snapshot::write_png;

/// All available source names.
const SOURCE_NAMES: &[&str] = &["gradient", "solid", "checker"];

const DEFAULT_CELL: u32 = 8;

/// Two-color checkerboard with square cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checker {
    pub cell: u32,
    pub a: Rgb,
    pub b: Rgb,
}

impl PixelSource for Checker {
    fn pixel(&self, x: u32, y: u32) -> Result<Rgb, SourceError> {
        if self.cell == 0 {
            return Err(SourceError::new("checker cell size is zero"));
        }
        let parity = (x / self.cell + y / self.cell) % 2;
        Ok(if parity == 0 { self.a } else { self.b })
    }
}

/// Enumeration of all registered pixel sources.
///
/// Use [`SourceKind::from_name`] for string-based construction (CLI, seed files).
#[derive(Debug, Clone)]
pub enum SourceKind {
    /// Hash-derived two-color gradient.
    Gradient(GradientSource),
    /// One flat color.
    Solid(Solid),
    /// Checkerboard.
    Checker(Checker),
}

impl SourceKind {
    /// Constructs a source by name.
    ///
    /// Returns `RenderError::UnknownSource` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: u32,
        height: u32,
        seed: u64,
        params: &Value,
    ) -> Result<Self, RenderError> {
        match name {
            "gradient" => Ok(SourceKind::Gradient(GradientSource::from_json(
                width, height, seed, params,
            )?)),
            "solid" => Ok(SourceKind::Solid(Solid(color_param(
                params, "color", "#000000",
            )?))),
            "checker" => {
                let cell = param_u32(params, "cell", DEFAULT_CELL);
                if cell == 0 {
                    return Err(RenderError::InvalidParam {
                        name: "cell".into(),
                        reason: "must be non-zero".into(),
                    });
                }
                Ok(SourceKind::Checker(Checker {
                    cell,
                    a: color_param(params, "a", "#000000")?,
                    b: color_param(params, "b", "#ffffff")?,
                }))
            }
            _ => Err(RenderError::UnknownSource(name.to_string())),
        }
    }

    /// Returns a slice of all recognized source names.
    pub fn list_sources() -> &'static [&'static str] {
        SOURCE_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Gradient(_) => "gradient",
            SourceKind::Solid(_) => "solid",
            SourceKind::Checker(_) => "checker",
        }
    }

    /// Resolved parameters as JSON.
    pub fn params(&self) -> Value {
        let hex = |c: Rgb| Srgb::from_rgb8(c).to_hex();
        match self {
            SourceKind::Gradient(g) => g.params(),
            SourceKind::Solid(s) => json!({ "color": hex(s.0) }),
            SourceKind::Checker(c) => json!({ "cell": c.cell, "a": hex(c.a), "b": hex(c.b) }),
        }
    }
}

impl PixelSource for SourceKind {
    fn pixel(&self, x: u32, y: u32) -> Result<Rgb, SourceError> {
        match self {
            SourceKind::Gradient(s) => s.pixel(x, y),
            SourceKind::Solid(s) => s.pixel(x, y),
            SourceKind::Checker(s) => s.pixel(x, y),
        }
    }
}

fn color_param(params: &Value, name: &str, default: &str) -> Result<Rgb, RenderError> {
    let raw = param_string(params, name, default);
    Srgb::from_hex(&raw)
        .map(Srgb::to_rgb8)
        .map_err(|e| RenderError::InvalidParam {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_gradient_succeeds() {
        let source = SourceKind::from_name("gradient", 32, 32, 42, &json!({}));
        assert!(matches!(source, Ok(SourceKind::Gradient(_))));
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = SourceKind::from_name("nonexistent", 32, 32, 42, &json!({}));
        assert!(matches!(result, Err(RenderError::UnknownSource(_))));
    }

    #[test]
    fn list_sources_matches_from_name() {
        for name in SourceKind::list_sources() {
            let src = SourceKind::from_name(name, 4, 4, 1, &json!({})).unwrap();
            assert_eq!(src.name(), *name);
        }
    }

    #[test]
    fn solid_reads_color_param() {
        let src = SourceKind::from_name("solid", 4, 4, 0, &json!({"color": "#ff8000"})).unwrap();
        assert_eq!(src.pixel(3, 3).unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(src.params(), json!({"color": "#ff8000"}));
    }

    #[test]
    fn bad_color_param_is_invalid_param() {
        let result = SourceKind::from_name("solid", 4, 4, 0, &json!({"color": "red"}));
        assert!(matches!(
            result,
            Err(RenderError::InvalidParam { ref name, .. }) if name == "color"
        ));
    }

    #[test]
    fn checker_alternates_by_cell() {
        let src = SourceKind::from_name("checker", 8, 8, 0, &json!({"cell": 2})).unwrap();
        assert_eq!(src.pixel(0, 0).unwrap(), Rgb::BLACK);
        assert_eq!(src.pixel(1, 1).unwrap(), Rgb::BLACK);
        assert_eq!(src.pixel(2, 0).unwrap(), Rgb::WHITE);
        assert_eq!(src.pixel(2, 2).unwrap(), Rgb::BLACK);
    }

    #[test]
    fn checker_rejects_zero_cell() {
        let result = SourceKind::from_name("checker", 8, 8, 0, &json!({"cell": 0}));
        assert!(matches!(result, Err(RenderError::InvalidParam { .. })));
    }

    #[test]
    fn checker_with_zero_cell_fails_per_pixel() {
        let c = Checker {
            cell: 0,
            a: Rgb::BLACK,
            b: Rgb::WHITE,
        };
        assert!(c.pixel(0, 0).is_err());
    }

    #[test]
    fn gradient_errors_propagate() {
        let result = SourceKind::from_name("gradient", 8, 8, 0, &json!({"hash": "nothex"}));
        assert!(matches!(result, Err(RenderError::Gradient(_))));
    }

    #[test]
    fn same_seed_same_pixels() {
        let a = SourceKind::from_name("gradient", 16, 16, 99, &json!({})).unwrap();
        let b = SourceKind::from_name("gradient", 16, 16, 99, &json!({})).unwrap();
        for (x, y) in [(0, 0), (7, 3), (15, 15)] {
            assert_eq!(a.pixel(x, y).unwrap(), b.pixel(x, y).unwrap());
        }
    }

    #[test]
    fn object_safety() {
        let src = SourceKind::from_name("solid", 2, 2, 0, &json!({})).unwrap();
        let boxed: Box<dyn PixelSource> = Box::new(src);
        assert_eq!(boxed.pixel(0, 0).unwrap(), Rgb::BLACK);
    }

    mod proptests {
        use super::*;
        use gradient_png_core::Encoder;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(24))]

            #[test]
            fn every_source_decodes_to_its_own_pixels(
                idx in 0..SOURCE_NAMES.len(),
                w in 1u32..24,
                h in 1u32..24,
                seed in any::<u64>(),
            ) {
                let name = SOURCE_NAMES[idx];
                let src = SourceKind::from_name(name, w, h, seed, &json!({})).unwrap();
                let png = Encoder::default().encode(w, h, &src).unwrap();

                let img = image::load_from_memory(&png).unwrap().to_rgb8();
                prop_assert_eq!(img.dimensions(), (w, h));
                for (x, y, p) in img.enumerate_pixels() {
                    prop_assert_eq!(p.0, src.pixel(x, y).unwrap().to_bytes());
                }
            }
        }
    }
}
