//! Declarative theme definition files.
//!
//! A definition is a YAML document naming the theme, its stylesheet, its
//! accent color and any option overrides, globally and per variant:
//!
//! ```yaml
//! name: Midnight
//! style: default
//! accent_color: "#722ED1"
//! variant: dark
//! resources: [arrow, close.svg]
//! overrides:
//!   border_radius_base: 6
//! dark:
//!   border_color: "#000"
//! light:
//!   border_color: "#FFF"
//! ```
//!
//! Every field is optional and unknown keys are ignored. Override values must
//! be scalars; sequences and mappings are skipped with a warning.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use lacquer_render::{ColorToken, OptionValue, Options};

use super::variant::Variant;
use crate::error::ThemeError;

/// Extension of theme definition files.
pub const DEFINITION_EXTENSION: &str = "yml";

/// Extension given to `resources` entries that have none.
pub const DEFAULT_RESOURCE_EXTENSION: &str = "png";

/// Suffix of the option generated for each `resources` entry.
pub const RESOURCE_OPTION_SUFFIX: &str = "_icon";

/// Parsed theme definition file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeDefinition {
    pub name: Option<String>,
    pub style: Option<String>,
    pub accent_color: Option<ColorToken>,
    pub variant: Option<Variant>,
    pub resources: Vec<String>,
    pub overrides: BTreeMap<String, serde_yaml::Value>,
    pub normal: BTreeMap<String, serde_yaml::Value>,
    pub dark: BTreeMap<String, serde_yaml::Value>,
    pub light: BTreeMap<String, serde_yaml::Value>,
}

fn scalar_options(section: &str, values: &BTreeMap<String, serde_yaml::Value>) -> Options {
    let mut options = Options::new();
    for (key, value) in values {
        match OptionValue::from_yaml(value) {
            Some(v) => {
                options.insert(key.clone(), v);
            }
            None => {
                tracing::warn!(section, key = %key, "non-scalar override skipped");
            }
        }
    }
    options
}

impl ThemeDefinition {
    /// Parses a definition from YAML text.
    ///
    /// An empty document yields the default (empty) definition.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Reads and parses a definition file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|e| ThemeError::parse(path, e))
    }

    /// Options generated from `resources`: `<stem>_icon = <file>`.
    ///
    /// Entries without an extension get `.png`.
    pub fn resource_options(&self) -> Options {
        let mut options = Options::new();
        for entry in &self.resources {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let path = Path::new(entry);
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let file = if path.extension().is_some() {
                PathBuf::from(entry)
            } else {
                path.with_extension(DEFAULT_RESOURCE_EXTENSION)
            };
            options.insert(
                format!("{}{}", stem, RESOURCE_OPTION_SUFFIX),
                file.to_string_lossy().into_owned(),
            );
        }
        options
    }

    /// Global overrides, including the generated resource options.
    ///
    /// Explicit `overrides` win over generated resource options with the same key.
    pub fn global_overrides(&self) -> Options {
        let mut options = self.resource_options();
        options.extend(scalar_options("overrides", &self.overrides));
        options
    }

    /// Overrides declared for `variant`.
    pub fn variant_overrides(&self, variant: Variant) -> Options {
        let section = match variant {
            Variant::Normal => &self.normal,
            Variant::Dark => &self.dark,
            Variant::Light => &self.light,
        };
        scalar_options(variant.as_str(), section)
    }
}
