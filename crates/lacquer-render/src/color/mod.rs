//! Color values for theme options.
//!
//! Every color that reaches a ramp or a template goes through [`ColorToken`],
//! the canonical RGBA form (0-255 per channel). Accepted inputs:
//!
//! - Hex: `"#fff"`, `"#ffff"`, `"#1890ff"`, `"#1890ffcc"` (case-insensitive)
//! - Functional: `"rgb(24, 144, 255)"`, `"rgba(24, 144, 255, 204)"`
//! - Tuples: `(24, 144, 255)` / `(24, 144, 255, 204)`
//! - YAML values: strings as above, or `[24, 144, 255]` sequences
//!
//! # Example
//!
//! ```rust
//! use lacquer_render::ColorToken;
//!
//! let accent = ColorToken::parse("#1890FF").unwrap();
//! assert_eq!(accent, ColorToken::rgb(24, 144, 255));
//! assert_eq!(accent.to_rgba_string(), "rgba(24,144,255,255)");
//! assert_eq!(accent.to_hex(), "#1890FF");
//! ```

mod ramp;

pub use ramp::{fade, generate, ramp, RAMP_STEPS};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorError;

/// Weighted luminance below which a color counts as dark.
pub const DARK_LUMINANCE_THRESHOLD: f64 = 0.6;

/// A color in canonical RGBA form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorToken {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ColorToken {
    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a color from a string.
    ///
    /// Supports hex codes and `rgb()`/`rgba()` functional notation. Anything
    /// else fails with [`ColorError::InvalidColorFormat`].
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(|| ColorError::InvalidColorFormat(s.into()));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(inner) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_components(inner, s);
        }

        Err(ColorError::InvalidColorFormat(s.to_string()))
    }

    /// Parses a color from a YAML value.
    ///
    /// Strings follow [`parse`](Self::parse); sequences are read as
    /// `[r, g, b]` or `[r, g, b, a]` tuples.
    pub fn parse_value(value: &serde_yaml::Value) -> Result<Self, ColorError> {
        match value {
            serde_yaml::Value::String(s) => Self::parse(s),
            serde_yaml::Value::Sequence(seq) => {
                let mut channels = Vec::with_capacity(seq.len());
                for item in seq {
                    let n = item
                        .as_i64()
                        .ok_or_else(|| ColorError::InvalidColorFormat(format!("{:?}", value)))?;
                    channels.push(n);
                }
                Self::from_channels(&channels)
            }
            _ => Err(ColorError::InvalidColorFormat(format!("{:?}", value))),
        }
    }

    /// Builds a color from 3 or 4 numeric channels.
    pub fn from_channels(channels: &[i64]) -> Result<Self, ColorError> {
        if channels.len() != 3 && channels.len() != 4 {
            return Err(ColorError::InvalidColorFormat(format!(
                "expected 3 or 4 channels, got {}",
                channels.len()
            )));
        }

        let mut out = [255u8; 4];
        for (index, &value) in channels.iter().enumerate() {
            out[index] =
                u8::try_from(value).map_err(|_| ColorError::ChannelOutOfRange { index, value })?;
        }
        Ok(Self::rgba(out[0], out[1], out[2], out[3]))
    }

    /// Parses the digits of a hex code (without the `#`).
    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn parse_components(inner: &str, original: &str) -> Result<Self, ColorError> {
        let mut channels = Vec::with_capacity(4);
        for part in inner.split(',') {
            let n = part
                .trim()
                .parse::<i64>()
                .map_err(|_| ColorError::InvalidColorFormat(original.to_string()))?;
            channels.push(n);
        }
        Self::from_channels(&channels)
    }

    /// Formats as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Formats as `rgba(r,g,b,a)` with the alpha channel in 0-255.
    pub fn to_rgba_string(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }

    /// Returns the same color with a different alpha channel.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn red_f(&self) -> f64 {
        self.r as f64 / 255.0
    }

    pub fn green_f(&self) -> f64 {
        self.g as f64 / 255.0
    }

    pub fn blue_f(&self) -> f64 {
        self.b as f64 / 255.0
    }

    /// Weighted luminance in `0.0..=1.0` (`0.299 R + 0.587 G + 0.114 B`).
    pub fn luminance(&self) -> f64 {
        self.red_f() * 0.299 + self.green_f() * 0.587 + self.blue_f() * 0.114
    }

    /// True when the weighted luminance is strictly below 0.6.
    pub fn is_dark(&self) -> bool {
        self.luminance() < DARK_LUMINANCE_THRESHOLD
    }
}

/// Returns true if `s` has the shape of a hex color: `#` followed by 3, 4, 6 or 8
/// characters.
///
/// Shape says nothing about validity: `"#GGHHII"` is hex-shaped but fails to
/// parse. Option resolution uses the distinction to decide whether a parse
/// failure is worth reporting.
pub fn is_hex_shaped(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(rest) => matches!(rest.chars().count(), 3 | 4 | 6 | 8),
        None => false,
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ColorToken {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<(u8, u8, u8)> for ColorToken {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for ColorToken {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ColorToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_yaml::Value::deserialize(deserializer)?;
        ColorToken::parse_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!(
            ColorToken::parse("#112233").unwrap(),
            ColorToken::rgb(17, 34, 51)
        );
        assert_eq!(
            ColorToken::parse("#1890ff").unwrap(),
            ColorToken::rgb(24, 144, 255)
        );
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(ColorToken::parse("#fff").unwrap(), ColorToken::rgb(255, 255, 255));
        assert_eq!(ColorToken::parse("#000").unwrap(), ColorToken::rgb(0, 0, 0));
        assert_eq!(
            ColorToken::parse("#f008").unwrap(),
            ColorToken::rgba(255, 0, 0, 136)
        );
    }

    #[test]
    fn test_parse_eight_digit_hex_carries_alpha() {
        assert_eq!(
            ColorToken::parse("#11223380").unwrap(),
            ColorToken::rgba(17, 34, 51, 128)
        );
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!(
            ColorToken::parse("rgb(1, 2, 3)").unwrap(),
            ColorToken::rgb(1, 2, 3)
        );
        assert_eq!(
            ColorToken::parse("RGBA(1,2,3,4)").unwrap(),
            ColorToken::rgba(1, 2, 3, 4)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ColorToken::parse("#GGHHII"),
            Err(ColorError::InvalidColorFormat(_))
        ));
        assert!(ColorToken::parse("#12345").is_err());
        assert!(ColorToken::parse("blue").is_err());
        assert!(ColorToken::parse("rgb(300, 0, 0)").is_err());
    }

    #[test]
    fn test_parse_yaml_sequence() {
        let value: serde_yaml::Value = serde_yaml::from_str("[0, 175, 255]").unwrap();
        assert_eq!(
            ColorToken::parse_value(&value).unwrap(),
            ColorToken::rgb(0, 175, 255)
        );

        let bad: serde_yaml::Value = serde_yaml::from_str("[0, 175]").unwrap();
        assert!(ColorToken::parse_value(&bad).is_err());
    }

    #[test]
    fn test_channel_out_of_range() {
        let err = ColorToken::from_channels(&[0, 256, 0]).unwrap_err();
        assert_eq!(
            err,
            ColorError::ChannelOutOfRange {
                index: 1,
                value: 256
            }
        );
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(ColorToken::rgb(24, 144, 255).to_hex(), "#1890FF");
        assert_eq!(ColorToken::rgba(24, 144, 255, 0).to_hex(), "#1890FF00");
    }

    #[test]
    fn test_rgba_formatting() {
        assert_eq!(
            ColorToken::rgb(17, 34, 51).to_rgba_string(),
            "rgba(17,34,51,255)"
        );
    }

    #[test]
    fn test_hex_shape() {
        assert!(is_hex_shaped("#fff"));
        assert!(is_hex_shaped("#GGHHII"));
        assert!(is_hex_shaped("#11223344"));
        assert!(!is_hex_shaped("#12345"));
        assert!(!is_hex_shaped("fff"));
        assert!(!is_hex_shaped("#include"));
    }

    #[test]
    fn test_is_dark_boundaries() {
        assert!(ColorToken::rgb(0, 0, 0).is_dark());
        assert!(!ColorToken::rgb(255, 255, 255).is_dark());
        assert!(ColorToken::parse("#212121").unwrap().is_dark());
        assert!(!ColorToken::parse("#F8F8F9").unwrap().is_dark());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let color: ColorToken = serde_yaml::from_str("'#1890FF'").unwrap();
        assert_eq!(color, ColorToken::rgb(24, 144, 255));

        let tuple: ColorToken = serde_yaml::from_str("[0, 175, 255, 128]").unwrap();
        assert_eq!(tuple, ColorToken::rgba(0, 175, 255, 128));
    }

    #[test]
    fn test_serialize_as_hex_json() {
        let json = serde_json::to_string(&ColorToken::rgb(24, 144, 255)).unwrap();
        assert_eq!(json, "\"#1890FF\"");
    }
}
