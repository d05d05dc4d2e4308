//! Ordered override layers.
//!
//! Option values for a theme come from several sources stacked on top of each
//! other: computed defaults, file-wide overrides, then the active variant's
//! overrides. [`OverrideLayers`] keeps them as an explicit ordered list; the
//! last layer declaring a key wins.
//!
//! ```rust
//! use lacquer::OverrideLayers;
//! use lacquer_render::Options;
//!
//! let layers = OverrideLayers::new()
//!     .with_layer("defaults", Options::new().with("border_color", "#1E1E1E").with("unit", "px"))
//!     .with_layer("variant:dark", Options::new().with("border_color", "#000"));
//!
//! assert_eq!(layers.resolve("border_color"), Some(&"#000".into()));
//! assert_eq!(layers.resolve("unit"), Some(&"px".into()));
//! assert_eq!(layers.flatten().len(), 2);
//! ```

use lacquer_render::{OptionValue, Options};

use super::variant::Variant;

/// Layer holding computed defaults.
pub const DEFAULTS_LAYER: &str = "defaults";

/// Layer holding file-wide overrides.
pub const OVERRIDES_LAYER: &str = "overrides";

/// Name of the layer holding `variant`'s overrides.
pub fn variant_layer(variant: Variant) -> String {
    format!("variant:{}", variant)
}

#[derive(Debug, Clone, PartialEq)]
struct Layer {
    name: String,
    values: Options,
}

/// Ordered list of named option layers. Later layers win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideLayers {
    layers: Vec<Layer>,
}

impl OverrideLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets layer `name`.
    ///
    /// An existing layer keeps its position and has its values replaced;
    /// a new layer goes on top.
    pub fn set_layer(&mut self, name: impl Into<String>, values: Options) {
        let name = name.into();
        match self.layers.iter_mut().find(|l| l.name == name) {
            Some(layer) => layer.values = values,
            None => self.layers.push(Layer { name, values }),
        }
    }

    /// Builder-style [`set_layer`](Self::set_layer).
    pub fn with_layer(mut self, name: impl Into<String>, values: Options) -> Self {
        self.set_layer(name, values);
        self
    }

    pub fn layer(&self, name: &str) -> Option<&Options> {
        self.layers
            .iter()
            .find(|l| l.name == name)
            .map(|l| &l.values)
    }

    pub fn remove_layer(&mut self, name: &str) -> Option<Options> {
        let index = self.layers.iter().position(|l| l.name == name)?;
        Some(self.layers.remove(index).values)
    }

    /// Layer names, bottom first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the value of `key` from the topmost layer declaring it.
    pub fn resolve(&self, key: &str) -> Option<&OptionValue> {
        self.layers.iter().rev().find_map(|l| l.values.get(key))
    }

    /// Merges all layers bottom to top.
    pub fn flatten(&self) -> Options {
        let mut merged = Options::new();
        for layer in &self.layers {
            merged.extend(layer.values.clone());
        }
        merged
    }
}
