//! Color types and conversions used by gradient interpolation.
//!
//! `Srgb` is the working type (components in [0, 1]); `OkLab` is the
//! perceptual space for smooth blends. All conversions are pure functions and
//! use `f64` throughout.

use crate::error::GradientError;
use gradient_png_core::Rgb;

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `GradientError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, GradientError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GradientError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| GradientError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb::from_rgb8(Rgb::new(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        )))
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let Rgb { r, g, b } = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn from_rgb8(c: Rgb) -> Srgb {
        Srgb {
            r: c.r as f64 / 255.0,
            g: c.g as f64 / 255.0,
            b: c.b as f64 / 255.0,
        }
    }

    /// Quantizes to 8 bits per channel with rounding, clamping to [0, 1] first.
    pub fn to_rgb8(self) -> Rgb {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb::new(q(self.r), q(self.g), q(self.b))
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab to linear RGB via the inverse OKLab matrix transform.
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

pub fn srgb_to_oklab(c: Srgb) -> OkLab {
    linear_to_oklab(srgb_to_linear(c))
}

/// OKLab back to sRGB, clamped to [0, 1].
pub fn oklab_to_srgb(c: OkLab) -> Srgb {
    let srgb = linear_to_srgb(oklab_to_linear(c));
    Srgb {
        r: srgb.r.clamp(0.0, 1.0),
        g: srgb.g.clamp(0.0, 1.0),
        b: srgb.b.clamp(0.0, 1.0),
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Component-wise interpolation in gamma-encoded sRGB.
pub fn mix_srgb(a: Srgb, b: Srgb, t: f64) -> Srgb {
    Srgb {
        r: lerp(a.r, b.r, t),
        g: lerp(a.g, b.g, t),
        b: lerp(a.b, b.b, t),
    }
}

/// Interpolation in OKLab, returned as clamped sRGB.
pub fn mix_oklab(a: Srgb, b: Srgb, t: f64) -> Srgb {
    let (la, lb) = (srgb_to_oklab(a), srgb_to_oklab(b));
    oklab_to_srgb(OkLab {
        l: lerp(la.l, lb.l, t),
        a: lerp(la.a, lb.a, t),
        b: lerp(la.b, lb.b, t),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn srgb_linear_round_trip_mid_gray() {
        let gray = Srgb {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        };
        let round_tripped = linear_to_srgb(srgb_to_linear(gray));
        assert!(approx_eq(round_tripped.r, 0.5));
        assert!(approx_eq(round_tripped.g, 0.5));
        assert!(approx_eq(round_tripped.b, 0.5));
    }

    #[test]
    fn srgb_gamma_boundary_at_0_04045() {
        let boundary = Srgb {
            r: 0.04045,
            g: 0.0,
            b: 0.0,
        };
        assert!(approx_eq(srgb_to_linear(boundary).r, 0.04045 / 12.92));
    }

    #[test]
    fn white_in_oklab_has_l_near_one_and_zero_chroma() {
        let lab = srgb_to_oklab(Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        });
        assert!(approx_eq(lab.l, 1.0), "expected L~1.0, got {}", lab.l);
        assert!(approx_eq(lab.a, 0.0), "expected a~0.0, got {}", lab.a);
        assert!(approx_eq(lab.b, 0.0), "expected b~0.0, got {}", lab.b);
    }

    #[test]
    fn oklab_round_trip_known_colors() {
        for hex in ["#ff0000", "#00ff00", "#0000ff", "#ffffff", "#000000", "#804dcc"] {
            let color = Srgb::from_hex(hex).unwrap();
            let back = oklab_to_srgb(srgb_to_oklab(color));
            assert!(approx_eq(back.r, color.r), "{hex}: r={} vs {}", back.r, color.r);
            assert!(approx_eq(back.g, color.g), "{hex}: g={} vs {}", back.g, color.g);
            assert!(approx_eq(back.b, color.b), "{hex}: b={} vs {}", back.b, color.b);
        }
    }

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        assert_eq!(Srgb::from_hex("#ff0000").unwrap().to_rgb8(), Rgb::new(255, 0, 0));
        assert_eq!(Srgb::from_hex("00ff00").unwrap().to_rgb8(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        assert_eq!(
            Srgb::from_hex("#FF00AA").unwrap(),
            Srgb::from_hex("#ff00aa").unwrap()
        );
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        for bad in ["", "#fff", "ff00zz", "#ff00aa00", "ééé", "+fffff"] {
            assert!(
                matches!(Srgb::from_hex(bad), Err(GradientError::InvalidColor(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn hex_round_trip_is_exact_for_8_bit_colors() {
        for hex in ["#000000", "#ffffff", "#1a2b3c", "#c0ffee"] {
            assert_eq!(Srgb::from_hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn to_rgb8_clamps_out_of_range() {
        let c = Srgb {
            r: -0.2,
            g: 1.7,
            b: 0.5,
        };
        assert_eq!(c.to_rgb8(), Rgb::new(0, 255, 128));
    }

    #[test]
    fn mix_endpoints_return_inputs() {
        let a = Srgb::from_hex("#102030").unwrap();
        let b = Srgb::from_hex("#f0e0d0").unwrap();
        assert_eq!(mix_srgb(a, b, 0.0).to_rgb8(), a.to_rgb8());
        assert_eq!(mix_srgb(a, b, 1.0).to_rgb8(), b.to_rgb8());
        assert_eq!(mix_oklab(a, b, 0.0).to_rgb8(), a.to_rgb8());
        assert_eq!(mix_oklab(a, b, 1.0).to_rgb8(), b.to_rgb8());
    }

    #[test]
    fn oklab_midpoint_of_black_and_white_differs_from_srgb_midpoint() {
        let black = Srgb::from_hex("#000000").unwrap();
        let white = Srgb::from_hex("#ffffff").unwrap();
        let perceptual = mix_oklab(black, white, 0.5).to_rgb8();
        let naive = mix_srgb(black, white, 0.5).to_rgb8();
        assert_eq!(naive, Rgb::new(128, 128, 128));
        // OKLab L = 0.5 is a darker gray than sRGB 0.5.
        assert!(perceptual.r < naive.r, "{perceptual:?} vs {naive:?}");
        assert_eq!(perceptual.r, perceptual.g);
    }
}
