//! Theme variants and OS variant detection.
//!
//! A theme has one active [`Variant`] at a time. Each variant may declare its
//! own overrides in the definition file; the active one supplies unqualified
//! keys while all three are exposed as shadow keys (`key[dark]`).
//!
//! Use [`detect_variant`] to follow the OS light/dark preference, and
//! [`set_variant_detector`] to pin it in tests:
//!
//! ```rust
//! use lacquer::{detect_variant, set_variant_detector, Variant};
//!
//! set_variant_detector(|| Variant::Light);
//! assert_eq!(detect_variant(), Variant::Light);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use dark_light::Mode as OsMode;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// Theme mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// The default look. Shares the dark surface palette.
    #[default]
    Normal,
    Dark,
    Light,
}

impl Variant {
    /// Every variant, in shadow-key emission order.
    pub const ALL: [Variant; 3] = [Variant::Normal, Variant::Dark, Variant::Light];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Normal => "normal",
            Variant::Dark => "dark",
            Variant::Light => "light",
        }
    }

    /// Returns the shadow key for `key` under this variant, e.g. `border_color[dark]`.
    pub fn qualify(&self, key: &str) -> String {
        format!("{}[{}]", key, self.as_str())
    }

    /// Returns true if this variant uses the light surface palette.
    pub fn is_light(&self) -> bool {
        matches!(self, Variant::Light)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Variant::Normal),
            "dark" => Ok(Variant::Dark),
            "light" => Ok(Variant::Light),
            _ => Err(ThemeError::UnknownVariant(s.to_string())),
        }
    }
}

/// Function returning the preferred variant.
pub type VariantDetector = fn() -> Variant;

static VARIANT_DETECTOR: Lazy<Mutex<VariantDetector>> = Lazy::new(|| Mutex::new(os_variant_detector));

/// Overrides the detector used by [`detect_variant`].
pub fn set_variant_detector(detector: VariantDetector) {
    let mut guard = VARIANT_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores OS-based detection.
pub fn reset_variant_detector() {
    set_variant_detector(os_variant_detector);
}

/// Detects the preferred variant.
///
/// Queries the OS through `dark-light` unless a detector was installed with
/// [`set_variant_detector`]. An unspecified or undetectable preference maps to
/// [`Variant::Normal`].
pub fn detect_variant() -> Variant {
    let detector = *VARIANT_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    detector()
}

fn os_variant_detector() -> Variant {
    match dark_light::detect() {
        Ok(OsMode::Dark) => Variant::Dark,
        Ok(OsMode::Light) => Variant::Light,
        Ok(OsMode::Unspecified) => Variant::Normal,
        Err(err) => {
            tracing::debug!(error = %err, "OS theme detection failed");
            Variant::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_names() {
        assert_eq!("dark".parse::<Variant>().unwrap(), Variant::Dark);
        assert_eq!(" Light ".parse::<Variant>().unwrap(), Variant::Light);
        assert_eq!("normal".parse::<Variant>().unwrap(), Variant::Normal);
        assert!(matches!(
            "sepia".parse::<Variant>(),
            Err(ThemeError::UnknownVariant(name)) if name == "sepia"
        ));
    }

    #[test]
    fn test_qualify() {
        assert_eq!(Variant::Light.qualify("border_color"), "border_color[light]");
    }

    #[test]
    fn test_serde_lowercase() {
        let v: Variant = serde_yaml::from_str("dark").unwrap();
        assert_eq!(v, Variant::Dark);
        assert_eq!(serde_json::to_string(&Variant::Normal).unwrap(), "\"normal\"");
    }

    #[test]
    #[serial]
    fn test_detector_override() {
        set_variant_detector(|| Variant::Dark);
        assert_eq!(detect_variant(), Variant::Dark);
        set_variant_detector(|| Variant::Light);
        assert_eq!(detect_variant(), Variant::Light);
        reset_variant_detector();
    }
}
