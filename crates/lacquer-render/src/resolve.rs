//! Turning raw option values into substitution text.
//!
//! [`OptionResolver::resolve`] applies the rules below, first match wins:
//!
//! | Raw value / key | Result |
//! |-----------------|--------|
//! | value starts with `@^N` | `N × dpi`, as an integer |
//! | value starts with `^N` | `N × dpi`, as an integer |
//! | key contains `icon` | first existing path for the file name, else the name |
//! | value is a hex color | `rgba(r,g,b,a)` |
//! | anything else | the value, stringified |
//!
//! Resolution never fails. A scale marker followed by something that is not an
//! integer, or a hex-shaped value that is not valid hex, falls back to the raw
//! text.
//!
//! ```rust
//! use lacquer_render::{OptionResolver, ResolveContext};
//!
//! let resolver = OptionResolver::new();
//! let ctx = ResolveContext::new(2.0);
//!
//! assert_eq!(resolver.resolve("padding", &"^4".into(), &ctx), "8");
//! assert_eq!(resolver.resolve("border", &"#112233".into(), &ctx), "rgba(17,34,51,255)");
//! assert_eq!(resolver.resolve("unit", &"px".into(), &ctx), "px");
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::ColorToken;
use crate::source::{FsReader, SourceReader};
use crate::value::{OptionKind, OptionValue, SCALE_MARKER, SCALE_MARKER_REF};

/// Registry category used for icon lookups.
pub const ICON_CATEGORY: &str = "icons";

/// Namespace used for icon lookups when no theme name is known.
pub const DEFAULT_ICON_NAMESPACE: &str = "default";

/// Looks up resource files by category, namespace and name.
///
/// This is the seam to the host application's resource registry. Returning
/// a path is not a promise that it exists; callers check.
pub trait PathLookup: Send + Sync {
    fn lookup(&self, category: &str, namespace: &str, name: &str) -> Option<PathBuf>;
}

/// Scales an integer by the DPI factor, truncating towards zero.
pub fn dpi_scale(value: i64, dpi: f64) -> i64 {
    (value as f64 * dpi) as i64
}

/// Per-render inputs for option resolution.
#[derive(Clone)]
pub struct ResolveContext {
    /// Display density factor (1.0 = 100%).
    pub dpi: f64,
    /// Directories searched, in order, for icon file names.
    pub path_roots: Vec<PathBuf>,
    /// Namespace passed to the registry for icon lookups (typically the theme name).
    pub icon_namespace: String,
    /// Registry consulted after the path roots.
    pub registry: Option<Arc<dyn PathLookup>>,
}

impl ResolveContext {
    pub fn new(dpi: f64) -> Self {
        Self {
            dpi,
            path_roots: Vec::new(),
            icon_namespace: DEFAULT_ICON_NAMESPACE.to_string(),
            registry: None,
        }
    }

    pub fn with_path_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.path_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_icon_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.icon_namespace = namespace.into();
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn PathLookup>) -> Self {
        self.registry = Some(registry);
        self
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl std::fmt::Debug for ResolveContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolveContext")
            .field("dpi", &self.dpi)
            .field("path_roots", &self.path_roots)
            .field("icon_namespace", &self.icon_namespace)
            .field("registry", &self.registry.is_some())
            .finish()
    }
}

/// Resolves raw option values to substitution text.
///
/// Holds the reader used for icon existence checks; everything else comes
/// from the [`ResolveContext`] passed per call.
#[derive(Clone)]
pub struct OptionResolver {
    reader: Arc<dyn SourceReader>,
}

impl OptionResolver {
    /// Creates a resolver that checks icon paths on the local filesystem.
    pub fn new() -> Self {
        Self::with_reader(Arc::new(FsReader))
    }

    /// Creates a resolver that checks icon paths through `reader`.
    pub fn with_reader(reader: Arc<dyn SourceReader>) -> Self {
        Self { reader }
    }

    /// Resolves `raw` for `key` under `ctx`.
    pub fn resolve(&self, key: &str, raw: &OptionValue, ctx: &ResolveContext) -> String {
        let text = raw.to_string();

        match OptionKind::classify(key, &text) {
            OptionKind::ScaleToken => Self::resolve_scale(&text, ctx.dpi),
            OptionKind::PathToken => self.resolve_path(&text, ctx),
            OptionKind::ColorToken => match ColorToken::parse(&text) {
                Ok(color) => color.to_rgba_string(),
                Err(err) => {
                    tracing::trace!(key, value = %text, error = %err, "hex-shaped value kept verbatim");
                    text
                }
            },
            OptionKind::Literal => text,
        }
    }

    fn resolve_scale(text: &str, dpi: f64) -> String {
        let digits = text
            .strip_prefix(SCALE_MARKER_REF)
            .or_else(|| text.strip_prefix(SCALE_MARKER))
            .unwrap_or(text);

        match digits.trim().parse::<i64>() {
            Ok(n) => dpi_scale(n, dpi).to_string(),
            Err(_) => {
                tracing::trace!(value = %text, "scale marker without integer kept verbatim");
                text.to_string()
            }
        }
    }

    fn resolve_path(&self, name: &str, ctx: &ResolveContext) -> String {
        self.find_icon(name, ctx)
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string())
    }

    /// Finds the first existing file for `name`: path roots in order, then the registry.
    pub fn find_icon(&self, name: &str, ctx: &ResolveContext) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        for root in &ctx.path_roots {
            if root.as_os_str().is_empty() {
                continue;
            }
            let candidate = root.join(name);
            if self.reader.exists(&candidate) {
                return Some(candidate);
            }
        }

        let registry = ctx.registry.as_ref()?;
        registry
            .lookup(ICON_CATEGORY, &ctx.icon_namespace, name)
            .filter(|path| self.reader.exists(path))
    }

    /// Returns true if `path` exists according to this resolver's reader.
    pub fn exists(&self, path: &Path) -> bool {
        self.reader.exists(path)
    }
}

impl Default for OptionResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::EmbeddedReader;
    use proptest::prelude::*;

    struct FixedLookup(PathBuf);

    impl PathLookup for FixedLookup {
        fn lookup(&self, category: &str, namespace: &str, name: &str) -> Option<PathBuf> {
            assert_eq!(category, ICON_CATEGORY);
            Some(self.0.join(namespace).join(name))
        }
    }

    fn embedded(paths: &[&str]) -> OptionResolver {
        let mut reader = EmbeddedReader::new();
        for path in paths {
            reader.insert(path, "");
        }
        OptionResolver::with_reader(Arc::new(reader))
    }

    #[test]
    fn test_scale_markers() {
        let resolver = OptionResolver::new();
        let ctx = ResolveContext::new(1.5);
        assert_eq!(resolver.resolve("w", &"^10".into(), &ctx), "15");
        assert_eq!(resolver.resolve("w", &"@^10".into(), &ctx), "15");
        assert_eq!(resolver.resolve("w", &"^3".into(), &ctx), "4");
    }

    #[test]
    fn test_scale_marker_without_integer_is_verbatim() {
        let resolver = OptionResolver::new();
        let ctx = ResolveContext::new(2.0);
        assert_eq!(resolver.resolve("w", &"^abc".into(), &ctx), "^abc");
    }

    #[test]
    fn test_hex_to_rgba() {
        let resolver = OptionResolver::new();
        let ctx = ResolveContext::default();
        assert_eq!(
            resolver.resolve("background_color", &"#112233".into(), &ctx),
            "rgba(17,34,51,255)"
        );
        assert_eq!(
            resolver.resolve("background_color", &"#11223380".into(), &ctx),
            "rgba(17,34,51,128)"
        );
    }

    #[test]
    fn test_invalid_hex_is_verbatim() {
        let resolver = OptionResolver::new();
        let ctx = ResolveContext::default();
        assert_eq!(resolver.resolve("c", &"#GGHHII".into(), &ctx), "#GGHHII");
    }

    #[test]
    fn test_numbers_and_literals() {
        let resolver = OptionResolver::new();
        let ctx = ResolveContext::new(2.0);
        assert_eq!(resolver.resolve("font_size", &OptionValue::Int(14), &ctx), "14");
        assert_eq!(resolver.resolve("ratio", &OptionValue::Float(0.5), &ctx), "0.5");
        assert_eq!(resolver.resolve("family", &"Arial".into(), &ctx), "Arial");
    }

    #[test]
    fn test_icon_found_in_first_root() {
        let resolver = embedded(&["theme/res/check.png", "style/res/check.png"]);
        let ctx = ResolveContext::default().with_path_roots(["theme/res", "style/res"]);
        assert_eq!(
            resolver.resolve("check_icon", &"check.png".into(), &ctx),
            Path::new("theme/res").join("check.png").to_string_lossy()
        );
    }

    #[test]
    fn test_icon_falls_back_to_registry() {
        let resolver = embedded(&["icons/dark/check.png"]);
        let ctx = ResolveContext::default()
            .with_path_roots(["", "theme/res"])
            .with_icon_namespace("dark")
            .with_registry(Arc::new(FixedLookup(PathBuf::from("icons"))));
        assert_eq!(
            resolver.resolve("check_icon", &"check.png".into(), &ctx),
            Path::new("icons")
                .join("dark")
                .join("check.png")
                .to_string_lossy()
        );
    }

    #[test]
    fn test_icon_not_found_passes_name_through() {
        let resolver = embedded(&[]);
        let ctx = ResolveContext::default()
            .with_path_roots(["theme/res"])
            .with_registry(Arc::new(FixedLookup(PathBuf::from("icons"))));
        assert_eq!(
            resolver.resolve("check_icon", &"check.png".into(), &ctx),
            "check.png"
        );
    }

    proptest! {
        #[test]
        fn prop_scale_markers_multiply(n in -10_000i64..10_000, d in 1i64..8) {
            let resolver = OptionResolver::new();
            let ctx = ResolveContext::new(d as f64);
            let expected = (n * d).to_string();
            prop_assert_eq!(resolver.resolve("k", &format!("^{}", n).into(), &ctx), expected.clone());
            prop_assert_eq!(resolver.resolve("k", &format!("@^{}", n).into(), &ctx), expected);
        }
    }
}
