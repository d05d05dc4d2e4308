//! # Lacquer Render - Stylesheet Templates and Color Ramps
//!
//! `lacquer-render` is the theme-independent half of `lacquer`: it turns a
//! stylesheet template plus a flat map of options into final stylesheet text,
//! and derives tonal color ramps from a single base color.
//!
//! This crate knows nothing about themes, variants or resource caches. Those
//! live in the `lacquer` crate, which builds an [`Options`] map and hands it to
//! a [`TemplateEngine`].
//!
//! ## Core Concepts
//!
//! - [`ColorToken`]: canonical RGBA color, parsed from hex or `rgb()` notation
//! - [`color::generate`]: the ten-step tonal ramp around a base color
//! - [`Options`] / [`OptionValue`]: the flat option map fed to templates
//! - [`OptionResolver`]: turns one raw option value into substitution text
//! - [`TemplateEngine`]: `#include` expansion, `@key` substitution, `N*DPI` scaling
//!
//! ## Quick Start
//!
//! ```rust
//! use lacquer_render::{Options, ResolveContext, TemplateEngine};
//!
//! let engine = TemplateEngine::new();
//! let options = Options::new()
//!     .with("background_color", "#323232")
//!     .with("padding", "^4");
//!
//! let css = engine.render_text(
//!     "QWidget { background: @background_color; padding: @paddingpx; border: 1*DPIpx; }",
//!     &options,
//!     &ResolveContext::new(1.5),
//! );
//! assert_eq!(
//!     css,
//!     "QWidget { background: rgba(50,50,50,255); padding: 6px; border: 1px; }"
//! );
//! ```
//!
//! ## Color Ramps
//!
//! ```rust
//! use lacquer_render::{color, ColorToken};
//!
//! let accent = ColorToken::parse("#1890FF").unwrap();
//! assert_eq!(color::generate(accent, 6).unwrap(), accent);
//! assert_eq!(color::fade(accent, 15), "rgba(24,144,255,15%)");
//! ```

pub mod color;
mod error;
pub mod prelude;
pub mod resolve;
pub mod source;
pub mod template;
pub mod value;

pub use error::{ColorError, RenderError};

pub use color::{ColorToken, DARK_LUMINANCE_THRESHOLD};

pub use value::{OptionKind, OptionValue, Options};

pub use resolve::{dpi_scale, OptionResolver, PathLookup, ResolveContext, ICON_CATEGORY};

pub use source::{EmbeddedReader, FsReader, SourceReader};

pub use template::{KeyOrder, Rendered, TemplateEngine};
