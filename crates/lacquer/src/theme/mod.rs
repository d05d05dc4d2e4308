//! Theme model, definitions and variants.
//!
//! - [`ThemeAttributes`]: built-in sizes, fonts, palettes and color ramps
//! - [`ThemeDefinition`]: a parsed YAML theme file
//! - [`OverrideLayers`]: the ordered option layers a theme resolves through
//! - [`ThemeModel`]: all of the above plus the active [`Variant`], producing
//!   options and stylesheets
//! - [`ThemeAware`]: widget-side access with fallbacks for a missing theme

mod aware;
mod definition;
mod layers;
mod model;
mod palette;
mod variant;

pub use aware::ThemeAware;
pub use definition::{
    ThemeDefinition, DEFAULT_RESOURCE_EXTENSION, DEFINITION_EXTENSION, RESOURCE_OPTION_SUFFIX,
};
pub use layers::{variant_layer, OverrideLayers, DEFAULTS_LAYER, OVERRIDES_LAYER};
pub use model::{
    SharedTheme, SubscriptionId, ThemeChange, ThemeModel, ThemeValue, DEFAULT_STYLE,
    DEFAULT_STYLE_EXTENSION, DEFAULT_THEME_NAME, RESOURCES_DIR,
};
pub use palette::{
    Fonts, Palette, SemanticColors, Sizes, Swatch, ThemeAttributes, DEFAULT_FONT_FAMILY,
    DEFAULT_ICONS,
};
pub use variant::{
    detect_variant, reset_variant_detector, set_variant_detector, Variant, VariantDetector,
};
