use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lacquer_render::{dpi_scale, ColorToken};

use super::pixmap::Pixmap;
use super::{Painter, DEFAULT_ICON_COLOR};
use crate::cache::Factory;

/// Whether a checkable icon is on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconState {
    On,
    Off,
}

/// Interaction mode an icon is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IconMode {
    Normal,
    Active,
    Disabled,
    Selected,
}

impl IconState {
    pub const ALL: [IconState; 2] = [IconState::On, IconState::Off];
}

impl IconMode {
    pub const ALL: [IconMode; 4] = [
        IconMode::Normal,
        IconMode::Active,
        IconMode::Disabled,
        IconMode::Selected,
    ];
}

/// An image per (mode, state) slot.
///
/// Lookups fall back the way toolkit icons do: the exact slot, then the
/// normal mode for the same state, then the normal off image.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon<I> {
    pixmaps: BTreeMap<(IconMode, IconState), I>,
    color: Option<ColorToken>,
}

impl<I> Default for Icon<I> {
    fn default() -> Self {
        Self {
            pixmaps: BTreeMap::new(),
            color: None,
        }
    }
}

impl<I: Clone> Icon<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// An icon with `image` as its normal off image.
    pub fn from_image(image: I) -> Self {
        let mut icon = Self::new();
        icon.add_pixmap(IconMode::Normal, IconState::Off, image);
        icon
    }

    /// Loads `path` as the icon's only image. Null if it cannot be loaded.
    pub fn load<P: Painter<Image = I>>(painter: &P, path: impl AsRef<Path>) -> Self {
        match painter.load(path.as_ref()) {
            Some(image) => Self::from_image(image),
            None => Self::new(),
        }
    }

    pub fn add_pixmap(&mut self, mode: IconMode, state: IconState, image: I) {
        self.pixmaps.insert((mode, state), image);
    }

    pub fn pixmap(&self, mode: IconMode, state: IconState) -> Option<&I> {
        self.pixmaps
            .get(&(mode, state))
            .or_else(|| self.pixmaps.get(&(IconMode::Normal, state)))
            .or_else(|| self.base())
    }

    /// The normal off image.
    pub fn base(&self) -> Option<&I> {
        self.pixmaps.get(&(IconMode::Normal, IconState::Off))
    }

    pub fn is_null(&self) -> bool {
        self.pixmaps.is_empty()
    }

    /// Number of explicitly set slots.
    pub fn slot_count(&self) -> usize {
        self.pixmaps.len()
    }

    /// The color the icon was last colorized with.
    pub fn color(&self) -> Option<ColorToken> {
        self.color
    }

    /// Builds an icon with every `On/Off × mode` slot set.
    ///
    /// Each slot is `path` (or its per-mode/per-slot override) painted with
    /// the slot's color, which falls back to the mode color, then to
    /// `options.color`.
    pub fn state_icon<P: Painter<Image = I>>(
        painter: &P,
        path: impl AsRef<Path>,
        options: &StateIconOptions,
    ) -> Self {
        let path = path.as_ref();
        let mut icon = Self::new();
        for state in IconState::ALL {
            for mode in IconMode::ALL {
                let (slot_path, color) = options.slot(path, mode, state);
                let pixmap = Pixmap::load(painter, slot_path, Some(color));
                if let Some(image) = pixmap.image() {
                    icon.add_pixmap(mode, state, image.clone());
                }
            }
        }
        icon.color = Some(options.color);
        icon
    }

    /// Paints the base image with `color`, optionally overlays another icon,
    /// then scales to `size` (DPI-scaled) or the base image's size.
    ///
    /// Returns a null icon if this one is null.
    pub fn colorize<P: Painter<Image = I>>(
        &self,
        painter: &P,
        color: ColorToken,
        overlay: Option<(&Icon<I>, ColorToken)>,
        size: Option<u32>,
        dpi: f64,
    ) -> Self {
        let Some(base) = self.base() else {
            return Self::new();
        };
        let mut image = painter.paint_mask(base, color);
        if let Some(over) = overlay.and_then(|(icon, c)| icon.base().map(|img| (img, c))) {
            image = painter.overlay(&image, over.0, Some(over.1));
        }
        let size = size.unwrap_or_else(|| painter.size(base));
        let mut icon = Self::from_image(painter.scale(&image, scaled(size, dpi)));
        icon.color = Some(color);
        icon
    }

    /// Scales the base image to `size`. Returns a null icon if this one is null.
    pub fn resize<P: Painter<Image = I>>(&self, painter: &P, size: u32) -> Self {
        match self.base() {
            Some(base) => Self::from_image(painter.scale(base, size)),
            None => Self::new(),
        }
    }

    /// Adds a grayscale disabled image for every state that has a normal image.
    pub fn grayscale<P: Painter<Image = I>>(&self, painter: &P) -> Self {
        let mut icon = self.clone();
        for state in IconState::ALL {
            if let Some(normal) = self.pixmaps.get(&(IconMode::Normal, state)) {
                icon.add_pixmap(IconMode::Disabled, state, painter.grayscale(normal));
            }
        }
        icon
    }
}

fn scaled(size: u32, dpi: f64) -> u32 {
    u32::try_from(dpi_scale(i64::from(size), dpi)).unwrap_or(0)
}

/// Per-mode and per-slot overrides for [`Icon::state_icon`].
#[derive(Debug, Clone, PartialEq)]
pub struct StateIconOptions {
    /// Color for every slot without a more specific one. Defaults to black.
    pub color: ColorToken,
    mode_colors: BTreeMap<IconMode, ColorToken>,
    state_colors: BTreeMap<IconState, ColorToken>,
    slot_colors: BTreeMap<(IconMode, IconState), ColorToken>,
    mode_paths: BTreeMap<IconMode, PathBuf>,
    state_paths: BTreeMap<IconState, PathBuf>,
    slot_paths: BTreeMap<(IconMode, IconState), PathBuf>,
}

impl Default for StateIconOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_ICON_COLOR,
            mode_colors: BTreeMap::new(),
            state_colors: BTreeMap::new(),
            slot_colors: BTreeMap::new(),
            mode_paths: BTreeMap::new(),
            state_paths: BTreeMap::new(),
            slot_paths: BTreeMap::new(),
        }
    }
}

impl StateIconOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: ColorToken) -> Self {
        self.color = color;
        self
    }

    /// Color for one mode in both states (for example `color_active`).
    pub fn mode_color(mut self, mode: IconMode, color: ColorToken) -> Self {
        self.mode_colors.insert(mode, color);
        self
    }

    /// Color for the normal mode of one state (`color_on`, `color_off`).
    pub fn state_color(mut self, state: IconState, color: ColorToken) -> Self {
        self.state_colors.insert(state, color);
        self
    }

    /// Color for a single slot (for example `color_on_selected`).
    pub fn slot_color(mut self, mode: IconMode, state: IconState, color: ColorToken) -> Self {
        self.slot_colors.insert((mode, state), color);
        self
    }

    /// Image for one mode in both states.
    pub fn mode_path(mut self, mode: IconMode, path: impl Into<PathBuf>) -> Self {
        self.mode_paths.insert(mode, path.into());
        self
    }

    /// Image for the normal mode of one state.
    pub fn state_path(mut self, state: IconState, path: impl Into<PathBuf>) -> Self {
        self.state_paths.insert(state, path.into());
        self
    }

    pub fn slot_path(
        mut self,
        mode: IconMode,
        state: IconState,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.slot_paths.insert((mode, state), path.into());
        self
    }

    fn slot<'a>(&'a self, base: &'a Path, mode: IconMode, state: IconState) -> (&'a Path, ColorToken) {
        let (path, color) = if mode == IconMode::Normal {
            (self.state_paths.get(&state), self.state_colors.get(&state))
        } else {
            (self.mode_paths.get(&mode), self.mode_colors.get(&mode))
        };
        let path = self
            .slot_paths
            .get(&(mode, state))
            .or(path)
            .map(PathBuf::as_path)
            .unwrap_or(base);
        let color = self
            .slot_colors
            .get(&(mode, state))
            .or(color)
            .copied()
            .unwrap_or(self.color);
        (path, color)
    }
}

/// Several icons composited into one, largest first.
///
/// The first layer is the background; every later layer is overlaid on it,
/// scaled relative to the first layer's size. Missing colors leave a layer
/// as drawn; missing scales default to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredIcon<I> {
    layers: Vec<(Icon<I>, Option<ColorToken>, f64)>,
    tint: Option<ColorToken>,
    grayscale: bool,
}

impl<I: Clone> LayeredIcon<I> {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            tint: None,
            grayscale: false,
        }
    }

    pub fn layer(mut self, icon: Icon<I>, color: Option<ColorToken>, scale: f64) -> Self {
        self.layers.push((icon, color, scale));
        self
    }

    pub fn tint(mut self, color: ColorToken) -> Self {
        self.tint = Some(color);
        self
    }

    pub fn grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Composites the layers into a single icon of `size` (DPI-scaled).
    ///
    /// Returns `None` without layers or when the first layer is null. With
    /// grayscale on, the result also carries a disabled image.
    pub fn compose<P: Painter<Image = I>>(&self, painter: &P, size: u32, dpi: f64) -> Option<Icon<I>> {
        let ((first, first_color, first_scale), rest) = self.layers.split_first()?;
        let base = first.base()?;
        let orig = painter.size(base) as f64;

        let mut image = painter.scale(base, (orig * first_scale) as u32);
        if let Some(color) = first_color {
            image = painter.paint_mask(&image, *color);
        }
        for (icon, color, scale) in rest {
            let Some(over) = icon.base() else {
                tracing::debug!("null icon layer skipped");
                continue;
            };
            let over = painter.scale(over, (orig * scale) as u32);
            image = painter.overlay(&image, &over, *color);
        }
        if let Some(tint) = self.tint {
            image = painter.tint(&image, tint);
        }

        let image = painter.scale(&image, scaled(size, dpi));
        let icon = if self.grayscale {
            Icon::from_image(painter.grayscale(&image)).grayscale(painter)
        } else {
            Icon::from_image(image)
        };
        Some(icon)
    }
}

impl<I: Clone> Default for LayeredIcon<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds [`Icon`]s for a [`ResourceCache`](crate::ResourceCache).
///
/// Arguments are the image path, an optional color and an optional size.
/// A color produces a colorized icon; a size without a color only resizes.
pub struct IconFactory<P> {
    painter: Arc<P>,
    dpi: f64,
}

impl<P: Painter> IconFactory<P> {
    pub fn new(painter: Arc<P>) -> Self {
        Self { painter, dpi: 1.0 }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }
}

impl<P: Painter> Factory for IconFactory<P> {
    type Args = (PathBuf, Option<ColorToken>, Option<u32>);
    type Output = Icon<P::Image>;

    fn build(&self, (path, color, size): &Self::Args) -> Self::Output {
        let painter = self.painter.as_ref();
        let icon = Icon::load(painter, path);
        if icon.is_null() {
            tracing::debug!(path = %path.display(), "icon not loaded");
            return icon;
        }
        match (color, size) {
            (Some(color), _) => icon.colorize(painter, *color, None, *size, self.dpi),
            (None, Some(size)) => icon.resize(painter, scaled(*size, self.dpi)),
            (None, None) => icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::testing::TextPainter;
    use crate::ResourceCache;

    const RED: ColorToken = ColorToken::rgb(255, 0, 0);
    const BLUE: ColorToken = ColorToken::rgb(0, 0, 255);

    #[test]
    fn test_state_icon_fills_every_slot() {
        let icon = Icon::state_icon(&TextPainter, "check.png", &StateIconOptions::new());
        assert_eq!(icon.slot_count(), 8);
        assert_eq!(icon.color(), Some(DEFAULT_ICON_COLOR));
        assert_eq!(
            icon.pixmap(IconMode::Selected, IconState::On).map(String::as_str),
            Some("check.png|#000000")
        );
    }

    #[test]
    fn test_state_icon_fallbacks() {
        let options = StateIconOptions::new()
            .color(BLUE)
            .mode_color(IconMode::Active, RED)
            .slot_color(IconMode::Active, IconState::On, ColorToken::rgb(0, 255, 0))
            .state_path(IconState::On, "check_on.png")
            .mode_path(IconMode::Disabled, "check_off.png");
        let icon = Icon::state_icon(&TextPainter, "check.png", &options);

        let slot = |mode, state| icon.pixmap(mode, state).cloned().unwrap_or_default();
        assert_eq!(slot(IconMode::Normal, IconState::On), "check_on.png|#0000FF");
        assert_eq!(slot(IconMode::Normal, IconState::Off), "check.png|#0000FF");
        assert_eq!(slot(IconMode::Active, IconState::Off), "check.png|#FF0000");
        assert_eq!(slot(IconMode::Active, IconState::On), "check.png|#00FF00");
        assert_eq!(slot(IconMode::Disabled, IconState::On), "check_off.png|#0000FF");
    }

    #[test]
    fn test_pixmap_lookup_falls_back_to_base() {
        let icon = Icon::from_image("base".to_string());
        assert_eq!(
            icon.pixmap(IconMode::Active, IconState::On).map(String::as_str),
            Some("base")
        );
        assert!(Icon::<String>::new().pixmap(IconMode::Normal, IconState::Off).is_none());
    }

    #[test]
    fn test_colorize_with_overlay() {
        let icon = Icon::from_image("folder".to_string());
        let badge = Icon::from_image("badge".to_string());
        let out = icon.colorize(&TextPainter, RED, Some((&badge, BLUE)), Some(20), 1.5);
        assert_eq!(
            out.base().map(String::as_str),
            Some("folder|#FF0000+(badge|#0000FF)@30")
        );
        assert_eq!(out.color(), Some(RED));
        assert!(Icon::<String>::new()
            .colorize(&TextPainter, RED, None, None, 1.0)
            .is_null());
    }

    #[test]
    fn test_grayscale_adds_disabled() {
        let icon = Icon::from_image("x".to_string()).grayscale(&TextPainter);
        assert_eq!(
            icon.pixmap(IconMode::Disabled, IconState::Off).map(String::as_str),
            Some("gray(x)")
        );
        assert_eq!(icon.base().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_layered_icon() {
        let layered = LayeredIcon::new()
            .layer(Icon::from_image("bg".to_string()), Some(RED), 1.0)
            .layer(Icon::from_image("fg".to_string()), None, 0.5)
            .tint(BLUE);
        let icon = layered.compose(&TextPainter, 24, 2.0).unwrap();
        assert_eq!(
            icon.base().map(String::as_str),
            Some("bg@16|#FF0000+(fg@8)~#0000FF@48")
        );
        assert!(LayeredIcon::<String>::new().compose(&TextPainter, 24, 1.0).is_none());
    }

    #[test]
    fn test_layered_grayscale() {
        let icon = LayeredIcon::new()
            .layer(Icon::from_image("bg".to_string()), None, 1.0)
            .grayscale(true)
            .compose(&TextPainter, 16, 1.0)
            .unwrap();
        assert_eq!(icon.base().map(String::as_str), Some("gray(bg@16@16)"));
        assert_eq!(
            icon.pixmap(IconMode::Disabled, IconState::Off).map(String::as_str),
            Some("gray(gray(bg@16@16))")
        );
    }

    #[test]
    fn test_icon_factory_identity_by_color() {
        let cache = ResourceCache::new();
        let factory = IconFactory::new(Arc::new(TextPainter));
        let path = PathBuf::from("path.svg");

        let red_a = cache.get_or_create(&factory, (path.clone(), Some(RED), None));
        let red_b = cache.get_or_create(&factory, (path.clone(), Some(RED), None));
        let blue = cache.get_or_create(&factory, (path, Some(BLUE), None));

        assert!(Arc::ptr_eq(&red_a, &red_b));
        assert!(!Arc::ptr_eq(&red_a, &blue));
        assert_eq!(red_a.base().map(String::as_str), Some("path.svg|#FF0000@16"));
    }

    #[test]
    fn test_icon_factory_resize_only_and_missing() {
        let factory = IconFactory::new(Arc::new(TextPainter)).with_dpi(2.0);
        let resized = factory.build(&(PathBuf::from("a.png"), None, Some(10)));
        assert_eq!(resized.base().map(String::as_str), Some("a.png@20"));
        assert!(factory
            .build(&(PathBuf::from("missing.png"), Some(RED), None))
            .is_null());
    }
}
