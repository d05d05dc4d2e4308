//! Icon and pixmap descriptors over an external drawing backend.
//!
//! Lacquer never draws. The widget toolkit provides a [`Painter`] that loads,
//! scales and recolors images; this module only decides which operations to
//! apply, in which order, for which icon state. Built icons and pixmaps are
//! shared through a [`ResourceCache`](crate::ResourceCache) via
//! [`IconFactory`] and [`PixmapFactory`].

mod icon;
mod pixmap;

pub use icon::{Icon, IconFactory, IconMode, IconState, LayeredIcon, StateIconOptions};
pub use pixmap::{Pixmap, PixmapFactory};

use std::path::Path;

use lacquer_render::ColorToken;

/// Default color painted over a state icon's mask.
pub const DEFAULT_ICON_COLOR: ColorToken = ColorToken::rgb(0, 0, 0);

/// Drawing primitives supplied by the widget toolkit.
///
/// All operations are pure: they return a new image and leave their inputs
/// untouched.
pub trait Painter: Send + Sync + 'static {
    type Image: Clone + Send + Sync + 'static;

    /// Loads the image at `path`, or `None` if it cannot be read.
    fn load(&self, path: &Path) -> Option<Self::Image>;

    /// Edge length, in pixels, of the image's larger side.
    fn size(&self, image: &Self::Image) -> u32;

    /// Scales the image to fit a `size`×`size` square, keeping aspect ratio.
    fn scale(&self, image: &Self::Image, size: u32) -> Self::Image;

    /// Fills the image's opaque area with `color`.
    fn paint_mask(&self, image: &Self::Image, color: ColorToken) -> Self::Image;

    /// Draws `over` centered on `image`, recolored with `color` if given.
    fn overlay(
        &self,
        image: &Self::Image,
        over: &Self::Image,
        color: Option<ColorToken>,
    ) -> Self::Image;

    /// Additive tint.
    fn tint(&self, image: &Self::Image, color: ColorToken) -> Self::Image;

    fn grayscale(&self, image: &Self::Image) -> Self::Image;
}
