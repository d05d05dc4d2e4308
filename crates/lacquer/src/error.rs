//! Error types for theme loading and configuration.

use std::io;
use std::path::PathBuf;

use lacquer_render::RenderError;

/// Errors raised while loading or configuring a theme.
///
/// Most of these never reach [`ThemeModel`](crate::ThemeModel) callers: a
/// definition file that fails to load is logged and the model keeps its
/// previous state. They are returned from the strict entry points such as
/// [`ThemeDefinition::from_file`](crate::ThemeDefinition::from_file).
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The theme definition file could not be read.
    #[error("failed to read theme definition {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The theme definition file is not valid YAML or has the wrong shape.
    #[error("failed to parse theme definition {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A variant name outside `normal`, `dark` and `light`.
    #[error("unknown theme variant '{0}' (expected normal, dark or light)")]
    UnknownVariant(String),

    /// A named theme has no definition file in the registry.
    #[error("theme not found: {0}")]
    ThemeNotFound(String),

    /// Invalid setup configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Stylesheet rendering failed in strict mode.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ThemeError {
    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_message() {
        let err = ThemeError::UnknownVariant("sepia".into());
        assert_eq!(
            err.to_string(),
            "unknown theme variant 'sepia' (expected normal, dark or light)"
        );
    }

    #[test]
    fn test_read_error_has_source() {
        let err = ThemeError::Read {
            path: PathBuf::from("themes/dark.yml"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("themes/dark.yml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_render_error_is_transparent() {
        let err: ThemeError = RenderError::TemplateNotFound(PathBuf::from("a.css")).into();
        assert_eq!(
            err.to_string(),
            RenderError::TemplateNotFound(PathBuf::from("a.css")).to_string()
        );
    }
}
