//! The theme model: typed attributes, declared overrides and variants.
//!
//! A [`ThemeModel`] owns everything needed to produce a stylesheet for one
//! theme:
//!
//! - the built-in [`ThemeAttributes`] (sizes, fonts, surface palette, ramps),
//! - the overrides declared in its definition file, globally and per variant,
//! - the active [`Variant`], DPI factor and host information,
//! - the registry used to find stylesheet templates and icons.
//!
//! [`ThemeModel::options`] flattens all of it into the option map consumed by
//! [`TemplateEngine`], and [`ThemeModel::stylesheet`] renders the theme's
//! stylesheet template with it.
//!
//! # Option Precedence
//!
//! Options are layered, later layers winning per key:
//!
//! 1. `defaults`: the typed attributes plus `darkness`, `theme_resources` and
//!    `style_resources`
//! 2. `overrides`: the definition file's `overrides` and `resources`
//! 3. `variant:<active>`: the definition file's section for the active variant
//!
//! Every resolved key is also emitted as three shadow keys, `key[normal]`,
//! `key[dark]` and `key[light]`, each holding that variant's declared value or
//! else the resolved one, so one stylesheet can reference every variant.
//!
//! # Change Notification
//!
//! Mutations that affect rendering notify subscribers registered with
//! [`ThemeModel::subscribe`]. Callbacks run synchronously while the caller
//! holds the model; they must not lock a [`SharedTheme`] wrapping it.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use lacquer_render::{
    dpi_scale, ColorToken, OptionValue, Options, RenderError, ResolveContext, TemplateEngine,
};

use super::definition::ThemeDefinition;
use super::layers::{variant_layer, OverrideLayers, DEFAULTS_LAYER, OVERRIDES_LAYER};
use super::palette::{Swatch, ThemeAttributes};
use super::variant::Variant;
use crate::error::ThemeError;
use crate::registry::{RegistryLookup, ResourceRegistry, STYLES_CATEGORY};
use crate::setup::HostInfo;

/// Theme name used until a definition provides one.
pub const DEFAULT_THEME_NAME: &str = "Default";

/// Stylesheet name used until a definition provides one.
pub const DEFAULT_STYLE: &str = "default";

/// Extension of stylesheet templates.
pub const DEFAULT_STYLE_EXTENSION: &str = "css";

/// Directory, next to a theme or stylesheet file, holding its resources.
pub const RESOURCES_DIR: &str = "resources";

/// A theme shared between widgets.
pub type SharedTheme = Arc<Mutex<ThemeModel>>;

type Subscriber = Box<dyn Fn(&ThemeChange) + Send + Sync>;

/// Handle returned by [`ThemeModel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// What changed in a theme.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeChange {
    /// The accent color (and its ramp) changed.
    Accent(ColorToken),
    /// The active variant changed and the definition was re-read.
    Variant(Variant),
    /// One or more attributes were set through [`ThemeModel::apply_settings`].
    Settings,
}

/// A single option looked up with [`ThemeModel::option`].
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValue {
    Int(i64),
    Float(f64),
    Color(ColorToken),
    Text(String),
}

impl ThemeValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ThemeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<ColorToken> {
        match self {
            ThemeValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

impl fmt::Display for ThemeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeValue::Int(i) => write!(f, "{}", i),
            ThemeValue::Float(v) => write!(f, "{}", v),
            ThemeValue::Color(c) => write!(f, "{}", c),
            ThemeValue::Text(s) => f.write_str(s),
        }
    }
}

/// Theme state and the operations producing stylesheets from it.
pub struct ThemeModel {
    name: String,
    style: String,
    definition_path: Option<PathBuf>,
    dpi: f64,
    variant: Variant,
    attributes: ThemeAttributes,
    declared: OverrideLayers,
    host: HostInfo,
    style_extension: String,
    registry: Option<Arc<dyn ResourceRegistry>>,
    engine: TemplateEngine,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl ThemeModel {
    /// Creates the default theme: normal variant, blue accent, no definition file.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_THEME_NAME.to_string(),
            style: DEFAULT_STYLE.to_string(),
            definition_path: None,
            dpi: 1.0,
            variant: Variant::Normal,
            attributes: ThemeAttributes::new(Variant::Normal, Swatch::BLUE),
            declared: OverrideLayers::new(),
            host: HostInfo::default(),
            style_extension: DEFAULT_STYLE_EXTENSION.to_string(),
            registry: None,
            engine: TemplateEngine::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a theme from a definition file.
    ///
    /// A file that is missing or cannot be parsed is logged and leaves the
    /// defaults in place; the path is kept so later reloads can pick it up.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::new().with_definition_file(path)
    }

    /// Creates a theme from an already parsed definition.
    pub fn from_definition(definition: ThemeDefinition) -> Self {
        let mut model = Self::new();
        model.apply_definition(definition, true);
        model
    }

    /// Loads the definition file at `path`.
    ///
    /// A `variant` declared in the file becomes the active variant.
    pub fn with_definition_file(mut self, path: impl AsRef<Path>) -> Self {
        self.definition_path = Some(path.as_ref().to_path_buf());
        if let Err(err) = self.load_definition(true) {
            tracing::warn!(error = %err, "theme definition not loaded, keeping defaults");
        }
        self
    }

    /// Sets the active variant without notifying or re-reading the definition.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.activate(variant);
        self
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_host(mut self, host: HostInfo) -> Self {
        self.host = host;
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn ResourceRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the stylesheet extension, with or without the leading dot.
    pub fn with_style_extension(mut self, extension: &str) -> Self {
        self.style_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_engine(mut self, engine: TemplateEngine) -> Self {
        self.engine = engine;
        self
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn set_dpi(&mut self, dpi: f64) {
        self.dpi = dpi;
    }

    pub fn definition_path(&self) -> Option<&Path> {
        self.definition_path.as_deref()
    }

    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    pub fn attributes(&self) -> &ThemeAttributes {
        &self.attributes
    }

    /// File-declared override layers (`overrides` and one per variant).
    pub fn declared_layers(&self) -> &OverrideLayers {
        &self.declared
    }

    pub fn accent_color(&self) -> ColorToken {
        self.attributes.accent()
    }

    pub fn default_size(&self) -> i64 {
        self.attributes.sizes.default_size
    }

    // ─── Mutations ──────────────────────────────────────────────────────────

    /// Sets the accent color, recomputes its ramp and notifies subscribers.
    pub fn set_accent_color(&mut self, color: ColorToken) {
        self.attributes.set_accent(color);
        self.notify(&ThemeChange::Accent(self.attributes.accent()));
    }

    /// Switches to `variant`, re-reading the definition file, and notifies subscribers.
    ///
    /// If the file can no longer be read, the previously loaded overrides stay
    /// in effect.
    pub fn set_variant(&mut self, variant: Variant) {
        if let Err(err) = self.load_definition(false) {
            tracing::warn!(error = %err, "theme definition reload failed, keeping previous overrides");
        }
        self.activate(variant);
        self.notify(&ThemeChange::Variant(variant));
    }

    /// [`set_variant`](Self::set_variant) by name.
    pub fn set_variant_name(&mut self, name: &str) -> Result<(), ThemeError> {
        let variant = name.parse()?;
        self.set_variant(variant);
        Ok(())
    }

    /// Re-reads the definition file, reporting failures.
    ///
    /// The active variant is kept. Does nothing for a model without a file.
    pub fn reload(&mut self) -> Result<(), ThemeError> {
        self.load_definition(false)
    }

    /// Sets built-in attributes by name and notifies subscribers once.
    ///
    /// `accent_color` (or `accentColor`) recomputes the accent ramp. Unknown
    /// names and values of the wrong shape are ignored.
    pub fn apply_settings<I, K, V>(&mut self, settings: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        for (name, value) in settings {
            let name = match name.as_ref() {
                "accentColor" => "accent_color",
                other => other,
            };
            let value = value.into();
            if !self.attributes.set(name, &value) {
                tracing::debug!(setting = name, value = %value, "theme setting ignored");
            }
        }
        self.notify(&ThemeChange::Settings);
    }

    /// Registers `callback` for change notifications.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&ThemeChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn notify(&self, change: &ThemeChange) {
        tracing::trace!(theme = %self.name, ?change, "theme changed");
        for (_, callback) in &self.subscribers {
            callback(change);
        }
    }

    fn activate(&mut self, variant: Variant) {
        self.variant = variant;
        self.attributes.apply_variant_palette(variant);
    }

    // ─── Definition loading ─────────────────────────────────────────────────

    fn load_definition(&mut self, adopt_variant: bool) -> Result<(), ThemeError> {
        let Some(path) = self.definition_path.clone() else {
            return Ok(());
        };
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "theme definition file not found");
            return Ok(());
        }

        let definition = ThemeDefinition::from_file(&path)?;
        tracing::debug!(path = %path.display(), "theme definition loaded");
        self.apply_definition(definition, adopt_variant);
        Ok(())
    }

    fn apply_definition(&mut self, definition: ThemeDefinition, adopt_variant: bool) {
        self.style = definition
            .style
            .clone()
            .unwrap_or_else(|| DEFAULT_STYLE.to_string());

        match &definition.name {
            Some(name) if !name.trim().is_empty() => self.name = name.clone(),
            _ => tracing::warn!(
                path = ?self.definition_path,
                "theme definition has no name, keeping '{}'",
                self.name
            ),
        }

        if let Some(accent) = definition.accent_color {
            self.attributes.set_accent(accent);
        }

        let mut declared = OverrideLayers::new();
        declared.set_layer(OVERRIDES_LAYER, definition.global_overrides());
        for variant in Variant::ALL {
            declared.set_layer(variant_layer(variant), definition.variant_overrides(variant));
        }
        self.declared = declared;

        let variant = match definition.variant {
            Some(declared) if adopt_variant => declared,
            _ => self.variant,
        };
        self.activate(variant);
    }

    // ─── Derived values ─────────────────────────────────────────────────────

    /// Returns true if the active background is dark.
    ///
    /// The background is the declared `background_color` override for the
    /// active variant if any, else the palette background. An override that
    /// is not a color counts as dark.
    pub fn is_dark(&self) -> bool {
        let declared = self
            .declared
            .layer(&variant_layer(self.variant))
            .and_then(|l| l.get("background_color"))
            .or_else(|| {
                self.declared
                    .layer(OVERRIDES_LAYER)
                    .and_then(|l| l.get("background_color"))
            });

        match declared {
            None => self.attributes.palette.background_color.is_dark(),
            Some(value) => match value.as_color() {
                Some(color) => color.is_dark(),
                None => {
                    tracing::warn!(value = %value, "background_color is not a color, assuming dark");
                    true
                }
            },
        }
    }

    /// Foreground color for text drawn directly on the background.
    pub fn foreground_color(&self) -> ColorToken {
        if self.is_dark() {
            ColorToken::rgba(250, 250, 250, 255)
        } else {
            ColorToken::rgba(0, 40, 80, 180)
        }
    }

    /// `<definition dir>/resources/<definition stem>`, for a theme loaded from a file.
    pub fn theme_resources_dir(&self) -> Option<PathBuf> {
        self.definition_path
            .as_deref()
            .filter(|p| p.is_file())
            .and_then(resources_dir)
    }

    /// `<stylesheet dir>/resources/<stylesheet stem>`, if a stylesheet was found.
    pub fn style_resources_dir(&self) -> Option<PathBuf> {
        self.stylesheet_path()
            .filter(|p| p.is_file())
            .and_then(|p| resources_dir(&p))
    }

    /// Stylesheet file names to try, most specific first.
    pub fn stylesheet_candidates(&self) -> Vec<String> {
        let style = if self.style.is_empty() {
            DEFAULT_STYLE
        } else {
            &self.style
        };
        let mut candidates = Vec::with_capacity(2);
        if let Some(tag) = self.host.tag() {
            candidates.push(format!("{}_{}.{}", style, tag, self.style_extension));
        }
        candidates.push(format!("{}.{}", style, self.style_extension));
        candidates
    }

    /// Finds the stylesheet template through the registry.
    pub fn stylesheet_path(&self) -> Option<PathBuf> {
        let registry = self.registry.as_ref()?;
        self.stylesheet_candidates()
            .iter()
            .find_map(|file| registry.resolve(STYLES_CATEGORY, "", file))
    }

    fn computed_options(&self) -> Options {
        let path_text = |p: Option<PathBuf>| {
            p.map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        Options::new()
            .with("darkness", if self.is_dark() { "white" } else { "black" })
            .with("theme_resources", path_text(self.theme_resources_dir()))
            .with("style_resources", path_text(self.style_resources_dir()))
    }

    /// The full layer stack used to resolve options.
    pub fn layers(&self, include_instance_state: bool) -> OverrideLayers {
        let mut defaults = Options::new();
        if include_instance_state {
            defaults.extend(self.attributes.to_options());
        }
        defaults.extend(self.computed_options());

        let active = variant_layer(self.variant);
        let mut layers = OverrideLayers::new().with_layer(DEFAULTS_LAYER, defaults);
        for name in [OVERRIDES_LAYER, active.as_str()] {
            if let Some(values) = self.declared.layer(name) {
                layers.set_layer(name, values.clone());
            }
        }
        layers
    }

    /// Flattened options for template substitution, with variant shadow keys.
    ///
    /// With `include_instance_state`, every typed attribute is included;
    /// without it, only computed and declared options are.
    pub fn options(&self, include_instance_state: bool) -> Options {
        let resolved = self.layers(include_instance_state).flatten();

        let mut keys: BTreeSet<&str> = resolved.keys().collect();
        for variant in Variant::ALL {
            if let Some(layer) = self.declared.layer(&variant_layer(variant)) {
                keys.extend(layer.keys());
            }
        }

        let mut options = resolved.clone();
        for key in keys {
            for variant in Variant::ALL {
                let value = self
                    .declared
                    .layer(&variant_layer(variant))
                    .and_then(|l| l.get(key))
                    .or_else(|| resolved.get(key));
                if let Some(value) = value {
                    options.insert(variant.qualify(key), value.clone());
                }
            }
        }
        options
    }

    /// Looks up one option: typed attributes first, then declared options.
    ///
    /// `^N` values come back DPI-scaled and hex strings as colors.
    pub fn option(&self, name: &str) -> Option<ThemeValue> {
        if let Some(value) = self.attributes.get(name) {
            return Some(self.typed(value));
        }
        self.options(false).get(name).cloned().map(|v| self.typed(v))
    }

    fn typed(&self, value: OptionValue) -> ThemeValue {
        match value {
            OptionValue::Int(i) => ThemeValue::Int(i),
            OptionValue::Float(f) => ThemeValue::Float(f),
            OptionValue::Str(s) => {
                if let Some(n) = s.strip_prefix('^').and_then(|n| n.trim().parse::<i64>().ok()) {
                    return ThemeValue::Int(dpi_scale(n, self.dpi));
                }
                if lacquer_render::color::is_hex_shaped(&s) {
                    if let Ok(color) = ColorToken::parse(&s) {
                        return ThemeValue::Color(color);
                    }
                }
                ThemeValue::Text(s)
            }
        }
    }

    // ─── Stylesheet ─────────────────────────────────────────────────────────

    /// Resolution context for this theme: DPI, resource roots, icon registry.
    pub fn resolve_context(&self) -> ResolveContext {
        let roots = [self.theme_resources_dir(), self.style_resources_dir()]
            .into_iter()
            .flatten();
        let mut ctx = ResolveContext::new(self.dpi)
            .with_path_roots(roots)
            .with_icon_namespace(self.name.clone());
        if let Some(registry) = &self.registry {
            ctx = ctx.with_registry(Arc::new(RegistryLookup(Arc::clone(registry))));
        }
        ctx
    }

    /// Renders the theme's stylesheet.
    ///
    /// Returns an empty string when no stylesheet template is found.
    pub fn stylesheet(&self) -> String {
        match self.try_stylesheet() {
            Ok(css) => css,
            Err(err) => {
                tracing::debug!(theme = %self.name, error = %err, "no stylesheet rendered");
                String::new()
            }
        }
    }

    /// Renders the theme's stylesheet, failing if no template is found.
    pub fn try_stylesheet(&self) -> Result<String, ThemeError> {
        let path = self.stylesheet_path().ok_or_else(|| {
            let wanted = self
                .stylesheet_candidates()
                .pop()
                .unwrap_or_else(|| DEFAULT_STYLE.to_string());
            RenderError::TemplateNotFound(PathBuf::from(wanted))
        })?;

        let rendered = self
            .engine
            .try_render(&path, &self.options(true), &self.resolve_context())?;
        for skipped in &rendered.skipped {
            tracing::debug!(theme = %self.name, %skipped, "stylesheet include skipped");
        }
        Ok(rendered.text)
    }
}

fn resources_dir(path: &Path) -> Option<PathBuf> {
    let dir = path.parent()?;
    let stem = path.file_stem()?;
    Some(dir.join(RESOURCES_DIR).join(stem))
}

impl Default for ThemeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ThemeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeModel")
            .field("name", &self.name)
            .field("style", &self.style)
            .field("variant", &self.variant)
            .field("dpi", &self.dpi)
            .field("accent", &self.attributes.accent())
            .field("definition_path", &self.definition_path)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
