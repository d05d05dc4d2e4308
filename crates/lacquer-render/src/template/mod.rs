//! Stylesheet template rendering.
//!
//! A stylesheet template is plain text (typically Qt-style CSS) with three
//! kinds of markup, processed in this order:
//!
//! 1. **Includes**: `#include <relative-path>` at the start of a line splices in
//!    another file (see [`IncludeExpander`]).
//! 2. **Option references**: `@key` anywhere in the text is replaced by the
//!    resolved value of `key` (see [`OptionResolver`](crate::OptionResolver)
//!    and [`KeyOrder`]).
//! 3. **DPI tokens**: `N*DPI` is replaced by `N` scaled by the DPI factor (see
//!    [`rewrite_dpi_tokens`]).
//!
//! There are no loops, conditionals or expressions beyond these forms.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use std::sync::Arc;
//! use lacquer_render::{Options, ResolveContext, TemplateEngine};
//! use lacquer_render::source::EmbeddedReader;
//!
//! let reader = EmbeddedReader::from_entries(&[
//!     ("style.css", "#include colors.css\nQLabel { padding: @pad; margin: 2*DPIpx; }"),
//!     ("colors.css", "QWidget { color: @title_color; }"),
//! ]);
//! let engine = TemplateEngine::with_reader(Arc::new(reader));
//! let options = Options::new()
//!     .with("title_color", "#112233")
//!     .with("pad", "^4");
//!
//! let css = engine.render(Path::new("style.css"), &options, &ResolveContext::new(2.0));
//! assert!(css.contains("color: rgba(17,34,51,255);"));
//! assert!(css.contains("padding: 8; margin: 4px;"));
//! ```
//!
//! # Failure Handling
//!
//! [`TemplateEngine::render`] never fails: a missing top-level file renders as
//! an empty string, a missing include is skipped, and a cyclic include is cut.
//! Use [`TemplateEngine::try_render`] to learn about any of these.

mod dpi;
mod include;
mod order;

pub use dpi::rewrite_dpi_tokens;
pub use include::{include_marker, Expansion, IncludeExpander, INCLUDE_DIRECTIVE};
pub use order::KeyOrder;

use std::path::Path;
use std::sync::Arc;

use crate::error::RenderError;
use crate::resolve::{OptionResolver, ResolveContext};
use crate::source::{FsReader, SourceReader};
use crate::value::Options;

/// Prefix of an option reference in template text.
pub const OPTION_PREFIX: char = '@';

/// A rendered stylesheet plus the problems that were skipped while rendering it.
#[derive(Debug)]
pub struct Rendered {
    pub text: String,
    pub skipped: Vec<RenderError>,
}

/// Renders stylesheet templates.
///
/// The engine is cheap to clone and holds no per-render state; options and
/// DPI are passed to each call.
#[derive(Clone)]
pub struct TemplateEngine {
    reader: Arc<dyn SourceReader>,
    resolver: OptionResolver,
    key_order: KeyOrder,
}

impl TemplateEngine {
    /// Creates an engine reading templates and checking icon paths on disk.
    pub fn new() -> Self {
        Self::with_reader(Arc::new(FsReader))
    }

    /// Creates an engine that reads everything through `reader`.
    pub fn with_reader(reader: Arc<dyn SourceReader>) -> Self {
        Self {
            resolver: OptionResolver::with_reader(Arc::clone(&reader)),
            reader,
            key_order: KeyOrder::default(),
        }
    }

    /// Sets the key ordering strategy.
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    pub fn key_order(&self) -> KeyOrder {
        self.key_order
    }

    pub fn resolver(&self) -> &OptionResolver {
        &self.resolver
    }

    /// Renders the template at `path`.
    ///
    /// Returns an empty string if `path` does not exist.
    pub fn render(&self, path: &Path, options: &Options, ctx: &ResolveContext) -> String {
        match self.try_render(path, options, ctx) {
            Ok(rendered) => rendered.text,
            Err(err) => {
                tracing::debug!(error = %err, "rendering empty stylesheet");
                String::new()
            }
        }
    }

    /// Renders the template at `path`, reporting what was skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TemplateNotFound`] if `path` does not exist.
    /// Missing or cyclic includes are not errors; they are listed in
    /// [`Rendered::skipped`].
    pub fn try_render(
        &self,
        path: &Path,
        options: &Options,
        ctx: &ResolveContext,
    ) -> Result<Rendered, RenderError> {
        let expansion = IncludeExpander::new(Arc::clone(&self.reader))
            .expand_file(path)
            .ok_or_else(|| RenderError::TemplateNotFound(path.to_path_buf()))?;

        Ok(Rendered {
            text: self.format(&expansion.text, options, ctx),
            skipped: expansion.skipped,
        })
    }

    /// Renders template text that does not come from a file.
    ///
    /// `#include` directives are left as they are, since there is no directory
    /// to resolve them against.
    pub fn render_text(&self, text: &str, options: &Options, ctx: &ResolveContext) -> String {
        self.format(text, options, ctx)
    }

    /// Substitutes options, then rewrites DPI tokens.
    fn format(&self, text: &str, options: &Options, ctx: &ResolveContext) -> String {
        let substituted = self.substitute(text, options, ctx);
        rewrite_dpi_tokens(&substituted, ctx.dpi)
    }

    /// Replaces every `@key` reference, keys taken in [`KeyOrder`].
    pub fn substitute(&self, text: &str, options: &Options, ctx: &ResolveContext) -> String {
        let mut data = text.to_string();
        if options.is_empty() {
            return data;
        }

        for key in self.key_order.order(options) {
            let Some(raw) = options.get(key) else {
                continue;
            };
            let token = format!("{}{}", OPTION_PREFIX, key);
            if !data.contains(&token) {
                continue;
            }
            let value = self.resolver.resolve(key, raw, ctx);
            data = data.replace(&token, &value);
        }

        data
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
