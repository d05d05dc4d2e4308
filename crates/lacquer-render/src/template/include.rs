//! `#include` expansion.
//!
//! A line starting with `#include ` names a file relative to the directory of
//! the file containing it. The named file is expanded recursively and its lines
//! are spliced in place of the directive, preceded by a traceability comment:
//!
//! ```text
//! line1                      line1
//! #include sub.css    =>    /*Included from: styles/sub.css*/
//! line3                      subline
//!                            line3
//! ```
//!
//! Missing includes are skipped. A chain that includes a file already being
//! expanded is cut at the repeated file (logged as a warning) instead of
//! recursing forever.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::RenderError;
use crate::source::{normalize_path, SourceReader};

/// Prefix marking an include directive. Must start the line.
pub const INCLUDE_DIRECTIVE: &str = "#include ";

/// Formats the comment line inserted before included content.
pub fn include_marker(path: &Path) -> String {
    format!("/*Included from: {}*/", path.display())
}

/// Expands include directives using a [`SourceReader`].
#[derive(Clone)]
pub struct IncludeExpander {
    reader: Arc<dyn SourceReader>,
}

/// Output of an expansion, with the problems that were skipped over.
#[derive(Debug, Default)]
pub struct Expansion {
    /// Expanded text.
    pub text: String,
    /// Includes that were skipped (unresolved or cyclic), in encounter order.
    pub skipped: Vec<RenderError>,
}

impl IncludeExpander {
    pub fn new(reader: Arc<dyn SourceReader>) -> Self {
        Self { reader }
    }

    /// Reads `path` and expands its includes.
    ///
    /// Returns `None` when `path` itself does not exist.
    pub fn expand_file(&self, path: &Path) -> Option<Expansion> {
        let data = self.reader.read(path)?;
        Some(self.expand(path, &data))
    }

    /// Expands includes in `data`, resolving them relative to `path`'s directory.
    pub fn expand(&self, path: &Path, data: &str) -> Expansion {
        let mut expansion = Expansion::default();
        let mut stack = vec![normalize_path(path)];
        expansion.text = self.expand_inner(path, data, &mut stack, &mut expansion.skipped);
        expansion
    }

    fn expand_inner(
        &self,
        path: &Path,
        data: &str,
        stack: &mut Vec<PathBuf>,
        skipped: &mut Vec<RenderError>,
    ) -> String {
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let mut lines: Vec<String> = Vec::new();

        for line in data.split('\n') {
            let Some(target) = line.strip_prefix(INCLUDE_DIRECTIVE) else {
                lines.push(line.to_string());
                continue;
            };

            let target = normalize_path(&dir.join(target.trim_end_matches('\r').trim()));

            if stack.contains(&target) {
                let mut chain = stack.clone();
                chain.push(target.clone());
                tracing::warn!(
                    include = %target.display(),
                    from = %path.display(),
                    "cyclic include skipped"
                );
                skipped.push(RenderError::CyclicInclude { chain });
                continue;
            }

            let Some(content) = self.reader.read(&target) else {
                tracing::debug!(
                    include = %target.display(),
                    from = %path.display(),
                    "include not found, skipping"
                );
                skipped.push(RenderError::UnresolvedInclude {
                    from: path.to_path_buf(),
                    target,
                });
                continue;
            };

            stack.push(target.clone());
            let expanded = self.expand_inner(&target, &content, stack, skipped);
            stack.pop();

            if !expanded.is_empty() {
                lines.push(include_marker(&target));
            }
            lines.extend(expanded.split('\n').map(str::to_string));
        }

        lines.join("\n")
    }
}
