//! Reproducible description of one generated image.
//!
//! An [`ImageSeed`] captures everything needed to recreate an image
//! byte-for-byte: source name, canvas size, numeric seed, source params and
//! encoder settings.

use crate::error::RenderError;
use crate::SourceKind;
use gradient_png_core::{Encoder, EncoderConfig};
use serde::{Deserialize, Serialize};

/// Reproducible description of one PNG.
///
/// Two identical `ImageSeed` values encode to identical bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSeed {
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub encoder: EncoderConfig,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl ImageSeed {
    /// Creates a seed with empty params and the default encoder settings.
    pub fn new(source: &str, width: u32, height: u32, seed: u64) -> Self {
        Self {
            source: source.to_string(),
            width,
            height,
            seed,
            params: empty_params(),
            encoder: EncoderConfig::default(),
        }
    }

    /// Same settings with a different numeric seed.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Validates that the seed has non-zero dimensions.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn build_source(&self) -> Result<SourceKind, RenderError> {
        self.validate()?;
        SourceKind::from_name(
            &self.source,
            self.width,
            self.height,
            self.seed,
            &self.params,
        )
    }

    /// Encodes the image fully in memory.
    pub fn render(&self) -> Result<Vec<u8>, RenderError> {
        let source = self.build_source()?;
        let png = Encoder::new(self.encoder).encode(self.width, self.height, &source)?;
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradient_png_core::{CompressionLevel, SIGNATURE};

    #[test]
    fn new_creates_seed_with_defaults() {
        let s = ImageSeed::new("gradient", 64, 32, 42);
        assert_eq!(s.source, "gradient");
        assert_eq!((s.width, s.height, s.seed), (64, 32, 42));
        assert_eq!(s.params, serde_json::json!({}));
        assert_eq!(s.encoder, EncoderConfig::default());
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = ImageSeed::new("gradient", 256, 256, 99);
        s.params = serde_json::json!({"hash": "00ff00ff00ff", "direction": "vertical"});
        s.encoder.compression = CompressionLevel::BEST;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: ImageSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let s: ImageSeed =
            serde_json::from_str(r#"{"source":"solid","width":2,"height":3,"seed":7}"#).unwrap();
        assert_eq!(s, ImageSeed::new("solid", 2, 3, 7));
    }

    #[test]
    fn validate_fails_for_zero_dimensions() {
        assert!(ImageSeed::new("gradient", 0, 5, 1).validate().is_err());
        assert!(ImageSeed::new("gradient", 5, 0, 1).validate().is_err());
        assert!(ImageSeed::new("gradient", 5, 5, 1).validate().is_ok());
    }

    #[test]
    fn render_is_deterministic() {
        let s = ImageSeed::new("gradient", 24, 16, 1234);
        let a = s.render().unwrap();
        let b = s.clone().render().unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..8], &SIGNATURE);
    }

    #[test]
    fn different_seeds_render_differently() {
        let s = ImageSeed::new("gradient", 8, 8, 1);
        assert_ne!(s.render().unwrap(), s.with_seed(2).render().unwrap());
    }

    #[test]
    fn render_with_zero_width_is_invalid_dimensions() {
        let result = ImageSeed::new("gradient", 0, 8, 1).render();
        assert!(matches!(
            result,
            Err(RenderError::InvalidDimensions {
                width: 0,
                height: 8
            })
        ));
    }
}
