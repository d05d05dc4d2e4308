use std::path::{Path, PathBuf};
use std::sync::Arc;

use lacquer_render::ColorToken;

use super::Painter;
use crate::cache::Factory;

/// A loaded image and the color painted over it.
///
/// A pixmap whose file could not be loaded is null: it keeps its path and
/// color but has no image, and every drawing operation on it is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap<I> {
    path: PathBuf,
    image: Option<I>,
    color: Option<ColorToken>,
}

impl<I: Clone> Pixmap<I> {
    /// Loads `path`, painting `color` over its mask if given.
    pub fn load<P>(painter: &P, path: impl AsRef<Path>, color: Option<ColorToken>) -> Self
    where
        P: Painter<Image = I>,
    {
        let path = path.as_ref().to_path_buf();
        let image = painter.load(&path);
        if image.is_none() {
            tracing::debug!(path = %path.display(), "pixmap not loaded");
        }
        let mut pixmap = Self {
            path,
            image,
            color: None,
        };
        if let Some(color) = color {
            pixmap.set_color(painter, color);
        }
        pixmap
    }

    /// Wraps an already loaded image.
    pub fn from_image(path: impl Into<PathBuf>, image: I) -> Self {
        Self {
            path: path.into(),
            image: Some(image),
            color: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn image(&self) -> Option<&I> {
        self.image.as_ref()
    }

    pub fn color(&self) -> Option<ColorToken> {
        self.color
    }

    pub fn is_null(&self) -> bool {
        self.image.is_none()
    }

    pub fn set_color<P: Painter<Image = I>>(&mut self, painter: &P, color: ColorToken) {
        if let Some(image) = &self.image {
            self.image = Some(painter.paint_mask(image, color));
        }
        self.color = Some(color);
    }

    /// Draws `over` centered on this pixmap, recolored with `color` if given.
    pub fn overlay<P: Painter<Image = I>>(
        &mut self,
        painter: &P,
        over: &Pixmap<I>,
        color: Option<ColorToken>,
    ) {
        if let (Some(image), Some(over)) = (&self.image, &over.image) {
            self.image = Some(painter.overlay(image, over, color));
        }
    }

    pub fn tint<P: Painter<Image = I>>(&mut self, painter: &P, color: ColorToken) {
        if let Some(image) = &self.image {
            self.image = Some(painter.tint(image, color));
        }
    }

    pub fn grayscale<P: Painter<Image = I>>(&mut self, painter: &P) {
        if let Some(image) = &self.image {
            self.image = Some(painter.grayscale(image));
        }
    }
}

/// Builds [`Pixmap`]s for a [`ResourceCache`](crate::ResourceCache).
///
/// Arguments are the image path and an optional color.
pub struct PixmapFactory<P> {
    painter: Arc<P>,
}

impl<P: Painter> PixmapFactory<P> {
    pub fn new(painter: Arc<P>) -> Self {
        Self { painter }
    }

    pub fn painter(&self) -> &Arc<P> {
        &self.painter
    }
}

impl<P: Painter> Factory for PixmapFactory<P> {
    type Args = (PathBuf, Option<ColorToken>);
    type Output = Pixmap<P::Image>;

    fn build(&self, (path, color): &Self::Args) -> Self::Output {
        Pixmap::load(self.painter.as_ref(), path, *color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::testing::TextPainter;
    use crate::ResourceCache;

    #[test]
    fn test_load_and_color() {
        let pixmap = Pixmap::load(&TextPainter, "icons/check.png", Some(ColorToken::rgb(255, 0, 0)));
        assert_eq!(pixmap.image().map(String::as_str), Some("check.png|#FF0000"));
        assert_eq!(pixmap.color(), Some(ColorToken::rgb(255, 0, 0)));
        assert!(!pixmap.is_null());
    }

    #[test]
    fn test_null_pixmap_ignores_drawing() {
        let mut pixmap = Pixmap::load(&TextPainter, "missing.png", None);
        pixmap.set_color(&TextPainter, ColorToken::rgb(0, 0, 255));
        pixmap.grayscale(&TextPainter);
        assert!(pixmap.is_null());
        assert_eq!(pixmap.color(), Some(ColorToken::rgb(0, 0, 255)));
        assert_eq!(pixmap.path(), Path::new("missing.png"));
    }

    #[test]
    fn test_overlay_and_tint() {
        let mut base = Pixmap::from_image("base.png", "base".to_string());
        let badge = Pixmap::from_image("badge.png", "badge".to_string());
        base.overlay(&TextPainter, &badge, Some(ColorToken::rgb(255, 255, 255)));
        base.tint(&TextPainter, ColorToken::rgb(0, 0, 0));
        assert_eq!(base.image().map(String::as_str), Some("base+(badge|#FFFFFF)~#000000"));
    }

    #[test]
    fn test_factory_shares_by_path_and_color() {
        let cache = ResourceCache::new();
        let factory = PixmapFactory::new(Arc::new(TextPainter));
        let red = Some(ColorToken::rgb(255, 0, 0));

        let a = cache.get_or_create(&factory, (PathBuf::from("a.png"), red));
        let b = cache.get_or_create(&factory, (PathBuf::from("a.png"), red));
        let c = cache.get_or_create(&factory, (PathBuf::from("a.png"), None));

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
    }
}
