//! Setup builder and resource owner for theming a host application.
//!
//! [`ThemeSetup`] collects configuration (DPI, host application, resource
//! directories, default theme and variant) and [`ThemeSetup::build`] turns it
//! into [`ThemeResources`], which owns the resource registry and the caches
//! for themes, icons and pixmaps.
//!
//! # Example
//!
//! ```rust,ignore
//! use lacquer::{ThemeSetup, Variant};
//!
//! let resources = ThemeSetup::new()
//!     .host("maya", "2024")
//!     .dpi(1.5)
//!     .styles_dir("resources/styles")
//!     .themes_dir("resources/themes")
//!     .icons_dir("resources/icons")
//!     .default_theme("midnight")
//!     .detect_variant()
//!     .build()?;
//!
//! if let Some(theme) = resources.default_theme() {
//!     let css = theme.lock().unwrap().stylesheet();
//! }
//! ```
//!
//! # Lifecycle
//!
//! The caches live as long as the [`ThemeResources`]. Dropping it, or calling
//! [`ThemeResources::shutdown`], clears them. Instances handed out earlier
//! stay valid; they are just no longer shared with later requests.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use lacquer_render::ColorToken;

use crate::cache::{Factory, ResourceCache};
use crate::error::ThemeError;
use crate::paint::{Icon, IconFactory, Painter, Pixmap, PixmapFactory};
use crate::registry::{
    DirectoryRegistry, ResourceRegistry, ICONS_CATEGORY, STYLES_CATEGORY, THEMES_CATEGORY,
};
use crate::theme::{
    detect_variant, SharedTheme, ThemeModel, Variant, DEFAULT_STYLE_EXTENSION,
    DEFINITION_EXTENSION,
};

/// Name and version of the application hosting the widgets.
///
/// Used to prefer host-specific stylesheets (`default_maya2024.css`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HostInfo {
    pub name: String,
    pub version: String,
}

impl HostInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// `<name><version>`, or `None` without a host name.
    pub fn tag(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("{}{}", self.name, self.version))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum VariantChoice {
    #[default]
    FromDefinition,
    Fixed(Variant),
    Detect,
}

/// Builder for [`ThemeResources`].
#[derive(Debug, Default)]
pub struct ThemeSetup {
    dpi: Option<f64>,
    host: HostInfo,
    registry: DirectoryRegistry,
    style_extension: Option<String>,
    default_theme: Option<String>,
    variant: VariantChoice,
}

impl ThemeSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display density factor. Defaults to 1.0.
    pub fn dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Sets the host application, enabling host-specific stylesheets.
    pub fn host(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.host = HostInfo::new(name, version);
        self
    }

    /// Registers a resource directory for `category`.
    ///
    /// Directories registered first are searched first.
    pub fn resource_dir(mut self, category: &str, dir: impl AsRef<Path>) -> Self {
        self.registry.add_dir(category, dir);
        self
    }

    pub fn styles_dir(self, dir: impl AsRef<Path>) -> Self {
        self.resource_dir(STYLES_CATEGORY, dir)
    }

    pub fn themes_dir(self, dir: impl AsRef<Path>) -> Self {
        self.resource_dir(THEMES_CATEGORY, dir)
    }

    pub fn icons_dir(self, dir: impl AsRef<Path>) -> Self {
        self.resource_dir(ICONS_CATEGORY, dir)
    }

    /// Sets the stylesheet file extension. Defaults to `css`.
    pub fn style_extension(mut self, extension: &str) -> Self {
        self.style_extension = Some(extension.trim_start_matches('.').to_string());
        self
    }

    /// Sets the default theme, as a definition file path or a theme name
    /// looked up in the themes directories.
    pub fn default_theme(mut self, theme: impl Into<String>) -> Self {
        self.default_theme = Some(theme.into());
        self
    }

    /// Uses `variant` for themes created by the resources.
    ///
    /// Without this or [`detect_variant`](Self::detect_variant), each theme
    /// uses the variant its definition declares, or `normal`.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = VariantChoice::Fixed(variant);
        self
    }

    /// Follows the OS light/dark preference at build time.
    pub fn detect_variant(mut self) -> Self {
        self.variant = VariantChoice::Detect;
        self
    }

    /// Validates the configuration and creates the resources.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] for a non-positive or non-finite DPI or
    /// an empty stylesheet extension, and [`ThemeError::ThemeNotFound`] if the
    /// default theme cannot be located.
    pub fn build(self) -> Result<ThemeResources, ThemeError> {
        let dpi = self.dpi.unwrap_or(1.0);
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(ThemeError::Config(format!("invalid DPI factor {}", dpi)));
        }

        let style_extension = self
            .style_extension
            .unwrap_or_else(|| DEFAULT_STYLE_EXTENSION.to_string());
        if style_extension.is_empty() {
            return Err(ThemeError::Config("empty stylesheet extension".into()));
        }

        let variant = match self.variant {
            VariantChoice::FromDefinition => None,
            VariantChoice::Fixed(v) => Some(v),
            VariantChoice::Detect => Some(detect_variant()),
        };

        let default_theme = match &self.default_theme {
            Some(theme) => Some(
                locate_theme(&self.registry, theme)
                    .ok_or_else(|| ThemeError::ThemeNotFound(theme.clone()))?,
            ),
            None => None,
        };

        tracing::debug!(
            dpi,
            ?variant,
            host = ?self.host.tag(),
            default_theme = ?default_theme,
            "theme resources ready"
        );

        let registry: Arc<dyn ResourceRegistry> = Arc::new(self.registry);
        Ok(ThemeResources {
            theme_factory: ThemeFactory {
                registry: Arc::clone(&registry),
                host: self.host,
                dpi,
                style_extension,
            },
            registry,
            variant,
            default_theme,
            themes: ResourceCache::new(),
            icons: ResourceCache::new(),
            pixmaps: ResourceCache::new(),
        })
    }
}

fn locate_theme(registry: &dyn ResourceRegistry, theme: &str) -> Option<PathBuf> {
    let path = Path::new(theme);
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    let file = if path.extension().is_some() {
        theme.to_string()
    } else {
        format!("{}.{}", theme, DEFINITION_EXTENSION)
    };
    registry.resolve(THEMES_CATEGORY, "", &file)
}

/// Builds theme models for the theme cache.
///
/// Arguments are the definition file and the variant, `None` keeping the
/// definition's own.
struct ThemeFactory {
    registry: Arc<dyn ResourceRegistry>,
    host: HostInfo,
    dpi: f64,
    style_extension: String,
}

impl Factory for ThemeFactory {
    type Args = (PathBuf, Option<Variant>);
    type Output = Mutex<ThemeModel>;

    fn build(&self, (path, variant): &Self::Args) -> Self::Output {
        let mut model = ThemeModel::new()
            .with_host(self.host.clone())
            .with_dpi(self.dpi)
            .with_style_extension(&self.style_extension)
            .with_registry(Arc::clone(&self.registry))
            .with_definition_file(path);
        if let Some(variant) = variant {
            model = model.with_variant(*variant);
        }
        Mutex::new(model)
    }
}

/// Owner of the resource registry and the theme, icon and pixmap caches.
pub struct ThemeResources {
    registry: Arc<dyn ResourceRegistry>,
    theme_factory: ThemeFactory,
    variant: Option<Variant>,
    default_theme: Option<PathBuf>,
    themes: ResourceCache,
    icons: ResourceCache,
    pixmaps: ResourceCache,
}

impl ThemeResources {
    pub fn registry(&self) -> Arc<dyn ResourceRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn dpi(&self) -> f64 {
        self.theme_factory.dpi
    }

    pub fn host(&self) -> &HostInfo {
        &self.theme_factory.host
    }

    /// Variant forced on themes by [`theme`](Self::theme), if any.
    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    pub fn default_theme_path(&self) -> Option<&Path> {
        self.default_theme.as_deref()
    }

    /// Finds a theme definition by file path or name.
    pub fn find_theme(&self, theme: &str) -> Option<PathBuf> {
        locate_theme(self.registry.as_ref(), theme)
    }

    /// The shared theme for `path` in the configured variant.
    ///
    /// Each (file, variant) pair is loaded once; later calls return the same
    /// instance until the resources are shut down.
    pub fn theme(&self, path: impl AsRef<Path>) -> SharedTheme {
        self.themes
            .get_or_create(&self.theme_factory, (path.as_ref().to_path_buf(), self.variant))
    }

    /// The shared theme for `path` in `variant`.
    pub fn theme_with_variant(&self, path: impl AsRef<Path>, variant: Variant) -> SharedTheme {
        self.themes.get_or_create(
            &self.theme_factory,
            (path.as_ref().to_path_buf(), Some(variant)),
        )
    }

    /// The shared default theme, if one was configured.
    pub fn default_theme(&self) -> Option<SharedTheme> {
        self.default_theme.as_deref().map(|p| self.theme(p))
    }

    /// Resolves an icon file name through the registry, scoped by `namespace`.
    pub fn icon_path(&self, namespace: &str, name: &str) -> Option<PathBuf> {
        self.registry.resolve(ICONS_CATEGORY, namespace, name)
    }

    /// The shared icon for `path`, colorized and sized as requested.
    pub fn icon<P: Painter>(
        &self,
        painter: &Arc<P>,
        path: impl AsRef<Path>,
        color: Option<ColorToken>,
        size: Option<u32>,
    ) -> Arc<Icon<P::Image>> {
        let factory = IconFactory::new(Arc::clone(painter)).with_dpi(self.dpi());
        self.icons
            .get_or_create(&factory, (path.as_ref().to_path_buf(), color, size))
    }

    /// The shared pixmap for `path`, painted with `color` if given.
    pub fn pixmap<P: Painter>(
        &self,
        painter: &Arc<P>,
        path: impl AsRef<Path>,
        color: Option<ColorToken>,
    ) -> Arc<Pixmap<P::Image>> {
        let factory = PixmapFactory::new(Arc::clone(painter));
        self.pixmaps
            .get_or_create(&factory, (path.as_ref().to_path_buf(), color))
    }

    pub fn themes(&self) -> &ResourceCache {
        &self.themes
    }

    pub fn icons(&self) -> &ResourceCache {
        &self.icons
    }

    pub fn pixmaps(&self) -> &ResourceCache {
        &self.pixmaps
    }

    /// Clears every cache.
    pub fn shutdown(&self) {
        self.themes.clear();
        self.icons.clear();
        self.pixmaps.clear();
    }
}

impl Drop for ThemeResources {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for ThemeResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeResources")
            .field("dpi", &self.theme_factory.dpi)
            .field("host", &self.theme_factory.host)
            .field("variant", &self.variant)
            .field("default_theme", &self.default_theme)
            .field("themes", &self.themes.len())
            .field("icons", &self.icons.len())
            .field("pixmaps", &self.pixmaps.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::testing::TextPainter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_host_tag() {
        assert_eq!(HostInfo::new("maya", "2024").tag(), Some("maya2024".into()));
        assert_eq!(HostInfo::default().tag(), None);
        assert!(HostInfo::new("", "1").is_empty());
    }

    #[test]
    fn test_build_defaults() {
        let resources = ThemeSetup::new().build().unwrap();
        assert_eq!(resources.dpi(), 1.0);
        assert_eq!(resources.variant(), None);
        assert!(resources.host().is_empty());
        assert!(resources.default_theme().is_none());
    }

    #[test]
    fn test_invalid_dpi() {
        for dpi in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = ThemeSetup::new().dpi(dpi).build().unwrap_err();
            assert!(matches!(err, ThemeError::Config(_)), "dpi {}", dpi);
        }
    }

    #[test]
    fn test_empty_style_extension() {
        let err = ThemeSetup::new().style_extension(".").build().unwrap_err();
        assert!(matches!(err, ThemeError::Config(_)));
    }

    #[test]
    fn test_default_theme_by_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("midnight.yml"), "name: Midnight\n").unwrap();

        let resources = ThemeSetup::new()
            .themes_dir(dir.path())
            .variant(Variant::Dark)
            .default_theme("midnight")
            .build()
            .unwrap();

        let theme = resources.default_theme().unwrap();
        let model = theme.lock().unwrap();
        assert_eq!(model.name(), "Midnight");
        assert_eq!(model.variant(), Variant::Dark);
    }

    #[test]
    fn test_missing_default_theme() {
        let err = ThemeSetup::new().default_theme("nowhere").build().unwrap_err();
        assert!(matches!(err, ThemeError::ThemeNotFound(name) if name == "nowhere"));
    }

    #[test]
    fn test_theme_cache_identity() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("t.yml");
        fs::write(&file, "name: T\n").unwrap();
        let resources = ThemeSetup::new().build().unwrap();

        let a = resources.theme(&file);
        let b = resources.theme(&file);
        let light = resources.theme_with_variant(&file, Variant::Light);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &light));
        assert_eq!(resources.themes().len(), 2);

        resources.shutdown();
        assert!(resources.themes().is_empty());
        assert!(!Arc::ptr_eq(&a, &resources.theme(&file)));
    }

    #[test]
    fn test_icons_and_pixmaps_are_cached() {
        let resources = ThemeSetup::new().build().unwrap();
        let painter = Arc::new(TextPainter);
        let red = Some(ColorToken::rgb(255, 0, 0));

        let a = resources.icon(&painter, "check.png", red, None);
        let b = resources.icon(&painter, "check.png", red, None);
        assert!(Arc::ptr_eq(&a, &b));

        let p = resources.pixmap(&painter, "check.png", red);
        assert_eq!(p.color(), red);
        assert_eq!(resources.icons().len(), 1);
        assert_eq!(resources.pixmaps().len(), 1);
    }
}
