//! Widget-side access to a shared theme.

use std::sync::{MutexGuard, PoisonError};

use lacquer_render::ColorToken;

use super::model::{SharedTheme, ThemeModel};
use super::palette::{Sizes, Swatch};

/// Theme accessors for a widget that may not have a theme yet.
///
/// Every accessor has a fallback, so widgets can be built before a theme is
/// assigned: default size [`Sizes::SMALL`], accent [`Swatch::BLUE`], an empty
/// stylesheet and a dark background.
#[derive(Debug, Clone, Default)]
pub struct ThemeAware {
    theme: Option<SharedTheme>,
}

impl ThemeAware {
    pub fn new(theme: Option<SharedTheme>) -> Self {
        Self { theme }
    }

    pub fn with_theme(theme: SharedTheme) -> Self {
        Self { theme: Some(theme) }
    }

    pub fn theme(&self) -> Option<&SharedTheme> {
        self.theme.as_ref()
    }

    pub fn set_theme(&mut self, theme: Option<SharedTheme>) {
        self.theme = theme;
    }

    fn lock(&self) -> Option<MutexGuard<'_, ThemeModel>> {
        self.theme
            .as_ref()
            .map(|t| t.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn default_size(&self) -> i64 {
        self.lock()
            .map(|t| t.default_size())
            .unwrap_or(Sizes::SMALL)
    }

    pub fn accent_color(&self) -> ColorToken {
        self.lock()
            .map(|t| t.accent_color())
            .unwrap_or(Swatch::BLUE)
    }

    pub fn stylesheet(&self) -> String {
        self.lock().map(|t| t.stylesheet()).unwrap_or_default()
    }

    pub fn is_dark(&self) -> bool {
        self.lock().map(|t| t.is_dark()).unwrap_or(true)
    }
}

impl From<SharedTheme> for ThemeAware {
    fn from(theme: SharedTheme) -> Self {
        Self::with_theme(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Variant;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_fallbacks_without_theme() {
        let aware = ThemeAware::default();
        assert!(aware.theme().is_none());
        assert_eq!(aware.default_size(), Sizes::SMALL);
        assert_eq!(aware.accent_color(), Swatch::BLUE);
        assert_eq!(aware.stylesheet(), "");
        assert!(aware.is_dark());
    }

    #[test]
    fn test_reads_assigned_theme() {
        let theme = Arc::new(Mutex::new(ThemeModel::new().with_variant(Variant::Light)));
        theme.lock().unwrap().set_accent_color(Swatch::GOLD);
        theme
            .lock()
            .unwrap()
            .apply_settings([("default_size", lacquer_render::OptionValue::Int(40))]);

        let aware = ThemeAware::from(Arc::clone(&theme));
        assert_eq!(aware.accent_color(), Swatch::GOLD);
        assert_eq!(aware.default_size(), 40);
        assert!(!aware.is_dark());
    }
}
