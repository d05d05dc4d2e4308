//! Commonly used types in one import.
//!
//! ```rust
//! use lacquer_render::prelude::*;
//!
//! let options = Options::new().with("accent_color", "#1890FF");
//! let css = TemplateEngine::new().render_text("@accent_color", &options, &ResolveContext::default());
//! assert_eq!(css, "rgba(24,144,255,255)");
//! ```

pub use crate::color::{fade, generate};
pub use crate::{
    ColorToken, OptionResolver, OptionValue, Options, RenderError, ResolveContext, TemplateEngine,
};
