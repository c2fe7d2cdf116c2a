//! Color type used for bar fills, outlines, and backgrounds.
//!
//! Colors are stored as 8-bit RGBA and can be parsed from or written to the
//! CSS notations chart styles are usually given in (`#RRGGBB`, `#RRGGBBAA`,
//! `rgb(r, g, b)`, `rgba(r, g, b, a)`).

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Light grey used for axis lines.
    pub const AXIS_GREY: Self = Self::new(200, 200, 200, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an RGB color with a fractional (0.0-1.0) alpha, as CSS `rgba()` does.
    #[must_use]
    pub fn rgba_f(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self::new(r, g, b, alpha_to_u8(alpha))
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Alpha as a fraction in 0.0-1.0.
    #[must_use]
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Whether the color is fully opaque.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Format as a CSS color string, suitable for canvas `fillStyle`/`strokeStyle`.
    ///
    /// Opaque colors become `#rrggbb`, translucent ones `rgba(r,g,b,a)` with
    /// the shortest alpha that parses back to the same 8-bit value.
    #[must_use]
    pub fn to_css(self) -> String {
        if self.is_opaque() {
            return format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b);
        }
        format!("rgba({},{},{},{})", self.r, self.g, self.b, css_alpha(self.a))
    }

    /// Parse a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything other than hex, `rgb()` or `rgba()` notation.
    pub fn parse_css(input: &str) -> Result<Self> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::InvalidColor(input.to_string()));
        }

        let lower = s.to_ascii_lowercase();
        let (body, with_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(Error::InvalidColor(input.to_string()));
        };

        let body = body
            .strip_suffix(')')
            .ok_or_else(|| Error::InvalidColor(input.to_string()))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(Error::InvalidColor(input.to_string()));
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|_| Error::InvalidColor(input.to_string()));
        let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);

        if with_alpha {
            let alpha: f32 = parts[3]
                .parse()
                .map_err(|_| Error::InvalidColor(input.to_string()))?;
            if !(0.0..=1.0).contains(&alpha) {
                return Err(Error::InvalidColor(input.to_string()));
            }
            Ok(Self::rgba_f(r, g, b, alpha))
        } else {
            Ok(Self::rgb(r, g, b))
        }
    }

    /// Composite this color over `dst` using the "over" operator.
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        let src_a = self.alpha_f32();
        let dst_a = dst.alpha_f32();
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }

        let mix = |src: u8, dst: u8| -> u8 {
            let out = (f32::from(src) * src_a + f32::from(dst) * dst_a * (1.0 - src_a)) / out_a;
            out.round().clamp(0.0, 255.0) as u8
        };

        Self::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            alpha_to_u8(out_a),
        )
    }
}

fn alpha_to_u8(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Three decimals always suffice: steps of 1/255 are wider than 0.001.
fn css_alpha(a: u8) -> String {
    let exact = f32::from(a) / 255.0;
    let trimmed = |precision: usize| {
        let text = format!("{exact:.precision$}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    (1..3)
        .map(trimmed)
        .find(|text| text.parse::<f32>().is_ok_and(|v| alpha_to_u8(v) == a))
        .unwrap_or_else(|| trimmed(3))
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_css(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse_css(&s)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_css()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba_css() {
        let c = Rgba::parse_css("rgba(151,187,205,0.5)").unwrap();
        assert_eq!(c, Rgba::new(151, 187, 205, 128));
    }

    #[test]
    fn test_parse_rgb_with_spaces() {
        let c = Rgba::parse_css("rgb( 10, 20 ,30 )").unwrap();
        assert_eq!(c, Rgba::rgb(10, 20, 30));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgba::parse_css("#FF0000").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(
            Rgba::parse_css("#00ff0080").unwrap(),
            Rgba::new(0, 255, 0, 128)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgba::parse_css("blue").is_err());
        assert!(Rgba::parse_css("#12345").is_err());
        assert!(Rgba::parse_css("rgba(1,2,3)").is_err());
        assert!(Rgba::parse_css("rgba(1,2,3,1.5)").is_err());
        assert!(Rgba::parse_css("rgb(256,0,0)").is_err());
    }

    #[test]
    fn test_to_css() {
        assert_eq!(Rgba::rgb(255, 0, 16).to_css(), "#ff0010");
        assert_eq!(Rgba::rgba_f(151, 187, 205, 0.5).to_css(), "rgba(151,187,205,0.5)");
        assert_eq!(Rgba::rgba_f(151, 187, 205, 0.8).to_css(), "rgba(151,187,205,0.8)");
        assert_eq!(Rgba::rgba_f(151, 187, 205, 0.75).to_css(), "rgba(151,187,205,0.75)");
    }

    #[test]
    fn test_css_reparses_to_same_color() {
        let c = Rgba::rgba_f(151, 187, 205, 0.75);
        assert_eq!(Rgba::parse_css(&c.to_css()).unwrap(), c);
    }

    #[test]
    fn test_css_round_trip_every_alpha() {
        let lossy: Vec<u8> = (0..=255u8)
            .filter(|&a| {
                let c = Rgba::new(151, 187, 205, a);
                Rgba::parse_css(&c.to_css()).unwrap() != c
            })
            .collect();
        assert!(lossy.is_empty(), "alphas not preserved: {lossy:?}");
    }

    #[test]
    fn test_css_alpha_precision() {
        assert_eq!(Rgba::new(151, 187, 205, 129).to_css(), "rgba(151,187,205,0.506)");
        assert_eq!(Rgba::TRANSPARENT.to_css(), "rgba(0,0,0,0)");
    }

    #[test]
    fn test_over_opaque_replaces() {
        assert_eq!(Rgba::BLACK.over(Rgba::WHITE), Rgba::BLACK);
    }

    #[test]
    fn test_over_half_alpha_mixes() {
        let out = Rgba::new(255, 0, 0, 128).over(Rgba::WHITE);
        assert_eq!(out.r, 255);
        assert!(out.g > 100 && out.g < 160);
        assert_eq!(out.a, 255);
    }

    #[test]
    fn test_over_transparent_onto_transparent() {
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::TRANSPARENT), Rgba::TRANSPARENT);
    }
}
