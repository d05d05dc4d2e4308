//! Read-only access to template sources.
//!
//! The engine never touches the filesystem directly; it goes through a
//! [`SourceReader`]. [`FsReader`] reads from disk, [`EmbeddedReader`] serves
//! in-memory content (compile-time `include_str!` bundles, tests).
//!
//! A reader answers two questions: does a path exist, and what is its text.
//! Missing files are `None`, never errors; callers decide whether absence
//! matters.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Read-only text source.
pub trait SourceReader: Send + Sync {
    /// Returns the text at `path`, or `None` if it does not exist or cannot be read.
    fn read(&self, path: &Path) -> Option<String>;

    /// Returns true if `path` names an existing file.
    fn exists(&self, path: &Path) -> bool;
}

/// Reads sources from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> Option<String> {
        if !path.is_file() {
            return None;
        }
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "failed to read source");
                None
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Serves sources from memory, keyed by normalized path.
///
/// Paths are normalized lexically (`a/./b/../c` becomes `a/c`) on both insert
/// and lookup, so relative includes resolve the same way they would on disk.
///
/// ```rust
/// use std::path::Path;
/// use lacquer_render::source::{EmbeddedReader, SourceReader};
///
/// let reader = EmbeddedReader::from_entries(&[
///     ("styles/default.css", "#include base/colors.css\n"),
///     ("styles/base/colors.css", "QWidget { color: @title_color; }"),
/// ]);
/// assert!(reader.exists(Path::new("styles/./base/colors.css")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddedReader {
    files: HashMap<PathBuf, String>,
}

impl EmbeddedReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader from `(path, content)` pairs.
    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        let mut reader = Self::new();
        for (path, content) in entries {
            reader.insert(path, *content);
        }
        reader
    }

    /// Adds or replaces a source.
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files
            .insert(normalize_path(path.as_ref()), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceReader for EmbeddedReader {
    fn read(&self, path: &Path) -> Option<String> {
        self.files.get(&normalize_path(path)).cloned()
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize_path(path))
    }
}

/// Lexically normalizes a path: drops `.` components and folds `..` into its parent.
///
/// Leading `..` components that cannot be folded are kept. No filesystem access.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().map(|c| c.as_os_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize_path(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn test_embedded_reader_lookup() {
        let reader = EmbeddedReader::from_entries(&[("styles/a.css", "body")]);
        assert_eq!(
            reader.read(Path::new("styles/sub/../a.css")).as_deref(),
            Some("body")
        );
        assert!(reader.read(Path::new("styles/b.css")).is_none());
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn test_fs_reader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("style.css");
        fs::write(&path, "QWidget {}").unwrap();

        let reader = FsReader;
        assert!(reader.exists(&path));
        assert_eq!(reader.read(&path).as_deref(), Some("QWidget {}"));
        assert!(!reader.exists(&dir.path().join("missing.css")));
        assert!(reader.read(dir.path()).is_none());
    }
}
