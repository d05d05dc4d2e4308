//! Resource lookup by category.
//!
//! The host application owns where resources live on disk. This module
//! defines the interface the theme layer uses to ask for them,
//! [`ResourceRegistry`], and a directory-backed implementation,
//! [`DirectoryRegistry`], good enough for most hosts and for tests.
//!
//! # Resolution
//!
//! A lookup names a category (`"styles"`, `"icons"`, `"themes"`), an optional
//! subkey (for icons, the theme name) and a file name. [`DirectoryRegistry`]
//! searches the directories registered for the category in registration order
//! (first directory wins), and in each directory tries `<dir>/<subkey>/<name>`
//! before `<dir>/<name>`.
//!
//! ```rust,ignore
//! use lacquer::DirectoryRegistry;
//!
//! let mut registry = DirectoryRegistry::new();
//! registry.add_dir("styles", "./resources/styles");
//! registry.add_dir("icons", "./resources/icons");
//!
//! let sheet = registry.resolve("styles", "", "default.css");
//! let check = registry.resolve("icons", "dark", "check.png");
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lacquer_render::PathLookup;

/// Category holding stylesheet templates.
pub const STYLES_CATEGORY: &str = "styles";

/// Category holding theme definition files.
pub const THEMES_CATEGORY: &str = "themes";

/// Category holding icon images.
pub const ICONS_CATEGORY: &str = lacquer_render::ICON_CATEGORY;

/// Host-provided resource lookup.
pub trait ResourceRegistry: Send + Sync {
    /// Returns the path of `name` in `category`, scoped by `subkey` if non-empty.
    ///
    /// Implementations should only return paths that exist.
    fn resolve(&self, category: &str, subkey: &str, name: &str) -> Option<PathBuf>;
}

/// Directory-backed [`ResourceRegistry`].
#[derive(Debug, Clone, Default)]
pub struct DirectoryRegistry {
    dirs: HashMap<String, Vec<PathBuf>>,
}

impl DirectoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `dir` for `category`. Earlier registrations take precedence.
    pub fn add_dir(&mut self, category: impl Into<String>, dir: impl AsRef<Path>) -> &mut Self {
        self.dirs
            .entry(category.into())
            .or_default()
            .push(dir.as_ref().to_path_buf());
        self
    }

    /// Builder-style [`add_dir`](Self::add_dir).
    pub fn with_dir(mut self, category: impl Into<String>, dir: impl AsRef<Path>) -> Self {
        self.add_dir(category, dir);
        self
    }

    /// Directories registered for `category`, in search order.
    pub fn dirs(&self, category: &str) -> &[PathBuf] {
        self.dirs.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.dirs.keys().map(String::as_str)
    }
}

impl ResourceRegistry for DirectoryRegistry {
    fn resolve(&self, category: &str, subkey: &str, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        for dir in self.dirs(category) {
            if !subkey.is_empty() {
                let scoped = dir.join(subkey).join(name);
                if scoped.is_file() {
                    return Some(scoped);
                }
            }
            let direct = dir.join(name);
            if direct.is_file() {
                return Some(direct);
            }
        }

        tracing::trace!(category, subkey, name, "resource not found");
        None
    }
}

/// Adapts a [`ResourceRegistry`] to the render crate's [`PathLookup`] seam.
#[derive(Clone)]
pub struct RegistryLookup(pub Arc<dyn ResourceRegistry>);

impl PathLookup for RegistryLookup {
    fn lookup(&self, category: &str, namespace: &str, name: &str) -> Option<PathBuf> {
        self.0.resolve(category, namespace, name)
    }
}
