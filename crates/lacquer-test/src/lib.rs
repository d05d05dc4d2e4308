//! Test fixtures for lacquer.
//!
//! - [`ResourceTree`]: a temporary on-disk resource layout (`styles/`,
//!   `themes/`, `icons/`) with helpers to write files and a matching
//!   [`ThemeSetup`]
//! - [`RecordingPainter`]: a [`Painter`] whose images are strings and which
//!   records every operation it performs
//! - [`PinnedVariant`]: pins the global variant detector for one test
//!
//! Tests that pin the detector must be marked `#[serial]` (from `serial_test`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use lacquer::{
    reset_variant_detector, set_variant_detector, Painter, ThemeSetup, Variant, ICONS_CATEGORY,
    STYLES_CATEGORY, THEMES_CATEGORY,
};
use lacquer_render::ColorToken;
use tempfile::TempDir;

/// A temporary resource directory, removed on drop.
///
/// Layout:
///
/// ```text
/// <root>/styles/<name>.css
/// <root>/styles/resources/<style>/...
/// <root>/themes/<name>.yml
/// <root>/themes/resources/<theme>/...
/// <root>/icons/[<namespace>/]<file>
/// ```
pub struct ResourceTree {
    dir: TempDir,
}

impl ResourceTree {
    pub fn new() -> io::Result<Self> {
        let dir = TempDir::new()?;
        for category in [STYLES_CATEGORY, THEMES_CATEGORY, ICONS_CATEGORY] {
            fs::create_dir_all(dir.path().join(category))?;
        }
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.root().join(category)
    }

    /// Writes `content` to `<root>/<relative>`, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> io::Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Writes `styles/<file>`.
    pub fn style(&self, file: &str, content: &str) -> io::Result<PathBuf> {
        self.write(Path::new(STYLES_CATEGORY).join(file), content)
    }

    /// Writes `themes/<name>.yml`.
    pub fn theme(&self, name: &str, yaml: &str) -> io::Result<PathBuf> {
        self.write(Path::new(THEMES_CATEGORY).join(format!("{}.yml", name)), yaml)
    }

    /// Writes an empty icon file at `icons/<relative>`.
    pub fn icon(&self, relative: &str) -> io::Result<PathBuf> {
        self.write(Path::new(ICONS_CATEGORY).join(relative), "")
    }

    /// A setup with this tree's styles, themes and icons directories registered.
    pub fn setup(&self) -> ThemeSetup {
        ThemeSetup::new()
            .styles_dir(self.category_dir(STYLES_CATEGORY))
            .themes_dir(self.category_dir(THEMES_CATEGORY))
            .icons_dir(self.category_dir(ICONS_CATEGORY))
    }
}

/// A painter for assertions: images are strings describing how they were made.
///
/// `load` succeeds for any path whose file name does not start with
/// `missing`, producing the file name. Every call is appended to
/// [`ops`](Self::ops).
#[derive(Debug)]
pub struct RecordingPainter {
    ops: Mutex<Vec<String>>,
    size: u32,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::with_size(16)
    }

    /// A painter reporting `size` as every image's size.
    pub fn with_size(size: u32) -> Self {
        Self {
            ops: Mutex::new(Vec::new()),
            size,
        }
    }

    /// Operations performed so far, oldest first.
    pub fn ops(&self) -> Vec<String> {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, op: &str) -> usize {
        self.ops()
            .iter()
            .filter(|o| o.split(' ').next() == Some(op))
            .count()
    }

    fn record(&self, op: String) {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(op);
    }
}

impl Default for RecordingPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl Painter for RecordingPainter {
    type Image = String;

    fn load(&self, path: &Path) -> Option<String> {
        self.record(format!("load {}", path.display()));
        let name = path.file_name()?.to_str()?;
        (!name.starts_with("missing")).then(|| name.to_string())
    }

    fn size(&self, _image: &String) -> u32 {
        self.size
    }

    fn scale(&self, image: &String, size: u32) -> String {
        self.record(format!("scale {} {}", image, size));
        format!("{}@{}", image, size)
    }

    fn paint_mask(&self, image: &String, color: ColorToken) -> String {
        self.record(format!("paint_mask {} {}", image, color));
        format!("{}|{}", image, color)
    }

    fn overlay(&self, image: &String, over: &String, color: Option<ColorToken>) -> String {
        self.record(format!("overlay {} {}", image, over));
        match color {
            Some(c) => format!("{}+({}|{})", image, over, c),
            None => format!("{}+({})", image, over),
        }
    }

    fn tint(&self, image: &String, color: ColorToken) -> String {
        self.record(format!("tint {} {}", image, color));
        format!("{}~{}", image, color)
    }

    fn grayscale(&self, image: &String) -> String {
        self.record(format!("grayscale {}", image));
        format!("gray({})", image)
    }
}

/// Pins [`detect_variant`](lacquer::detect_variant) until dropped.
pub struct PinnedVariant(());

impl PinnedVariant {
    pub fn dark() -> Self {
        set_variant_detector(|| Variant::Dark);
        Self(())
    }

    pub fn light() -> Self {
        set_variant_detector(|| Variant::Light);
        Self(())
    }

    pub fn normal() -> Self {
        set_variant_detector(|| Variant::Normal);
        Self(())
    }
}

impl Drop for PinnedVariant {
    fn drop(&mut self) {
        reset_variant_detector();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_layout() {
        let tree = ResourceTree::new().unwrap();
        let style = tree.style("default.css", "QWidget {}").unwrap();
        let theme = tree.theme("midnight", "name: Midnight\n").unwrap();
        let icon = tree.icon("Midnight/check.png").unwrap();

        assert_eq!(style, tree.root().join("styles/default.css"));
        assert_eq!(theme, tree.root().join("themes/midnight.yml"));
        assert!(icon.is_file());
    }

    #[test]
    fn test_recording_painter() {
        let painter = RecordingPainter::new();
        let image = painter.load(Path::new("a/check.png")).unwrap();
        let image = painter.paint_mask(&image, ColorToken::rgb(255, 0, 0));
        assert_eq!(image, "check.png|#FF0000");
        assert!(painter.load(Path::new("missing.png")).is_none());
        assert_eq!(painter.count("load"), 2);
        assert_eq!(painter.count("paint_mask"), 1);
    }
}
