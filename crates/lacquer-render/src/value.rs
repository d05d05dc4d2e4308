//! Option values and the flattened option map fed to templates.
//!
//! Option values arrive from two places: typed theme attributes (numbers,
//! colors, strings) and human-authored definition files (YAML scalars). Both
//! end up as an [`OptionValue`], which keeps the distinction between integers,
//! floats and strings so that `14` renders as `14` and `2.5` as `2.5`.
//!
//! How a value is interpreted at substitution time is decided by
//! [`OptionKind::classify`], looking at the key and the stringified value.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{is_hex_shaped, ColorToken};

/// Marker prefix for a value that is DPI-scaled at substitution time.
pub const SCALE_MARKER: &str = "^";

/// Alternative scale marker, as written in templates referencing a scaled key.
pub const SCALE_MARKER_REF: &str = "@^";

/// Substring in a key that marks its value as an icon file name.
pub const ICON_KEY_MARKER: &str = "icon";

/// A raw option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    /// Builds a value from a YAML scalar.
    ///
    /// Booleans and nulls become strings (`"true"`, `""`); sequences and
    /// mappings are rejected.
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(OptionValue::Int(i))
                } else {
                    n.as_f64().map(OptionValue::Float)
                }
            }
            serde_yaml::Value::String(s) => Some(OptionValue::Str(s.clone())),
            serde_yaml::Value::Bool(b) => Some(OptionValue::Str(b.to_string())),
            serde_yaml::Value::Null => Some(OptionValue::Str(String::new())),
            _ => None,
        }
    }

    /// Builds a value from a float, collapsing integral values to `Int`.
    pub fn from_number(n: f64) -> Self {
        if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
            OptionValue::Int(n as i64)
        } else {
            OptionValue::Float(n)
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            OptionValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            OptionValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Int(i) => Some(*i as f64),
            OptionValue::Float(f) => Some(*f),
            OptionValue::Str(s) => s.trim().parse().ok(),
        }
    }

    /// Parses the value as a color, if it is one.
    pub fn as_color(&self) -> Option<ColorToken> {
        self.as_str().and_then(|s| ColorToken::parse(s).ok())
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(i) => write!(f, "{}", i),
            OptionValue::Float(v) => write!(f, "{}", v),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Int(i)
    }
}

impl From<i32> for OptionValue {
    fn from(i: i32) -> Self {
        OptionValue::Int(i as i64)
    }
}

impl From<u32> for OptionValue {
    fn from(i: u32) -> Self {
        OptionValue::Int(i as i64)
    }
}

impl From<f64> for OptionValue {
    fn from(f: f64) -> Self {
        OptionValue::Float(f)
    }
}

impl From<ColorToken> for OptionValue {
    fn from(c: ColorToken) -> Self {
        OptionValue::Str(c.to_hex())
    }
}

/// How an option is interpreted during substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `^N` or `@^N`: an integer multiplied by the DPI factor.
    ScaleToken,
    /// Key contains `"icon"`: a file name resolved against resource roots.
    PathToken,
    /// `#RRGGBB`-shaped: converted to `rgba(...)`.
    ColorToken,
    /// Anything else: substituted verbatim.
    Literal,
}

impl OptionKind {
    /// Classifies a key/value pair, in resolution precedence order.
    pub fn classify(key: &str, raw: &str) -> Self {
        if raw.starts_with(SCALE_MARKER_REF) || raw.starts_with(SCALE_MARKER) {
            OptionKind::ScaleToken
        } else if key.contains(ICON_KEY_MARKER) {
            OptionKind::PathToken
        } else if is_hex_shaped(raw) {
            OptionKind::ColorToken
        } else {
            OptionKind::Literal
        }
    }
}

/// Flattened key/value map consumed by the template engine.
///
/// Keys are unique; inserting an existing key replaces its value, which is how
/// later override layers win over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options {
    entries: HashMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the previous one for the key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Copies every entry of `other` over this map; `other` wins on conflicts.
    pub fn extend(&mut self, other: Options) {
        self.entries.extend(other.entries);
    }

    /// Serializes the map as pretty JSON with sorted keys, for debugging.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let sorted: std::collections::BTreeMap<&String, &OptionValue> =
            self.entries.iter().collect();
        serde_json::to_string_pretty(&sorted)
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

impl IntoIterator for Options {
    type Item = (String, OptionValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, OptionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
