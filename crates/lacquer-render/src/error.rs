//! Error types for color parsing and stylesheet rendering.
//!
//! Most failures in this crate are absorbed where they happen: an include that
//! cannot be read is skipped, a hex-shaped value that fails to parse passes
//! through unchanged. The types here exist for the strict entry points
//! ([`TemplateEngine::try_render`](crate::TemplateEngine::try_render),
//! [`ColorToken::parse`](crate::ColorToken::parse)) and for diagnostics.

use std::fmt;
use std::path::PathBuf;

/// Error returned when a value cannot be interpreted as a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The value looks like a color (e.g. starts with `#`) but is not a valid one.
    InvalidColorFormat(String),

    /// A ramp step outside `1..=10` was requested.
    StepOutOfRange(u8),

    /// A numeric channel was outside `0..=255`.
    ChannelOutOfRange {
        /// Channel position (0 = red, 3 = alpha).
        index: usize,
        /// The offending value.
        value: i64,
    },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidColorFormat(value) => {
                write!(f, "invalid color format: {}", value)
            }
            ColorError::StepOutOfRange(step) => {
                write!(f, "ramp step {} out of range (1-10)", step)
            }
            ColorError::ChannelOutOfRange { index, value } => {
                write!(f, "color channel {} out of range (0-255): {}", index, value)
            }
        }
    }
}

impl std::error::Error for ColorError {}

/// Error type for stylesheet rendering operations.
///
/// [`TemplateEngine::render`](crate::TemplateEngine::render) never returns these;
/// it degrades to partial or empty output instead. They surface from
/// [`TemplateEngine::try_render`](crate::TemplateEngine::try_render) and from
/// [`IncludeExpander`](crate::template::IncludeExpander) diagnostics.
#[derive(Debug)]
pub enum RenderError {
    /// The top-level stylesheet file does not exist.
    TemplateNotFound(PathBuf),

    /// An `#include` target does not exist.
    UnresolvedInclude {
        /// File containing the directive.
        from: PathBuf,
        /// Path the directive resolved to.
        target: PathBuf,
    },

    /// An `#include` chain leads back to a file already being expanded.
    CyclicInclude {
        /// Expansion stack, outermost first, ending with the repeated file.
        chain: Vec<PathBuf>,
    },

    /// I/O error while reading a source.
    IoError(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateNotFound(path) => {
                write!(f, "stylesheet not found: {}", path.display())
            }
            RenderError::UnresolvedInclude { from, target } => write!(
                f,
                "unresolved include in {}: {}",
                from.display(),
                target.display()
            ),
            RenderError::CyclicInclude { chain } => {
                let chain: Vec<String> = chain.iter().map(|p| p.display().to_string()).collect();
                write!(f, "cyclic include: {}", chain.join(" -> "))
            }
            RenderError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_error_display() {
        let err = ColorError::InvalidColorFormat("#GGHHII".to_string());
        assert!(err.to_string().contains("invalid color format"));
        assert!(err.to_string().contains("#GGHHII"));
    }

    #[test]
    fn test_cyclic_include_display() {
        let err = RenderError::CyclicInclude {
            chain: vec![
                PathBuf::from("a.css"),
                PathBuf::from("b.css"),
                PathBuf::from("a.css"),
            ],
        };
        assert!(err.to_string().contains("a.css -> b.css -> a.css"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let render_err: RenderError = io_err.into();
        assert!(matches!(render_err, RenderError::IoError(_)));
        assert!(std::error::Error::source(&render_err).is_some());
    }
}
