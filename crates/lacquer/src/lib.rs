//! # Lacquer - Themes for Desktop Widget Layers
//!
//! `lacquer` turns a declarative theme file into a DPI-aware stylesheet: it
//! merges built-in defaults, file overrides and the active variant's
//! overrides into one option map, derives color ramps from the accent color,
//! and renders the theme's stylesheet template with
//! [`lacquer_render::TemplateEngine`].
//!
//! ## Core Concepts
//!
//! - [`ThemeModel`]: a theme's state, options and stylesheet
//! - [`ThemeDefinition`]: a parsed YAML theme file
//! - [`Variant`]: `normal`, `dark` or `light`, optionally following the OS
//! - [`OverrideLayers`]: the ordered layers options resolve through
//! - [`ResourceCache`]: build-once sharing of themes, icons and pixmaps
//! - [`ResourceRegistry`]: where the host keeps stylesheets, themes and icons
//! - [`ThemeSetup`] / [`ThemeResources`]: configuration and resource ownership
//! - [`Painter`]: the toolkit's drawing primitives, used by [`Icon`] and [`Pixmap`]
//!
//! ## Quick Start
//!
//! ```rust
//! use lacquer::{ThemeDefinition, ThemeModel, Variant};
//!
//! let definition = ThemeDefinition::from_yaml(
//!     "name: Midnight\naccent_color: \"#722ED1\"\ndark:\n  border_color: \"#000\"\nlight:\n  border_color: \"#FFF\"\n",
//! ).unwrap();
//! let theme = ThemeModel::from_definition(definition).with_variant(Variant::Dark);
//!
//! let options = theme.options(true);
//! assert_eq!(options.get("border_color").and_then(|v| v.as_str()), Some("#000"));
//! assert_eq!(options.get("border_color[light]").and_then(|v| v.as_str()), Some("#FFF"));
//! assert_eq!(options.get("accent_color").and_then(|v| v.as_str()), Some("#722ED1"));
//! assert!(theme.is_dark());
//! ```
//!
//! ## Logging
//!
//! Degraded paths (unreadable theme files, skipped includes, missing
//! stylesheets) are reported through `tracing`. Hosts without their own
//! subscriber can call [`logging::init`].

mod cache;
mod error;
pub mod logging;
pub mod paint;
pub mod prelude;
mod registry;
mod setup;
pub mod theme;

pub use cache::{Factory, ResourceCache};
pub use error::ThemeError;
pub use paint::{
    Icon, IconFactory, IconMode, IconState, LayeredIcon, Painter, Pixmap, PixmapFactory,
    StateIconOptions,
};
pub use registry::{
    DirectoryRegistry, RegistryLookup, ResourceRegistry, ICONS_CATEGORY, STYLES_CATEGORY,
    THEMES_CATEGORY,
};
pub use setup::{HostInfo, ThemeResources, ThemeSetup};
pub use theme::{
    detect_variant, reset_variant_detector, set_variant_detector, variant_layer, OverrideLayers,
    SharedTheme, Sizes, SubscriptionId, Swatch, ThemeAttributes, ThemeAware, ThemeChange,
    ThemeDefinition, ThemeModel, ThemeValue, Variant,
};

pub use lacquer_render::{ColorToken, OptionValue, Options, RenderError};
