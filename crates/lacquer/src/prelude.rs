//! Convenient imports for hosts.
//!
//! ```rust
//! use lacquer::prelude::*;
//!
//! let theme = ThemeModel::new().with_variant(Variant::Light);
//! assert!(!theme.is_dark());
//! ```

pub use crate::{
    ColorToken, DirectoryRegistry, Options, ResourceCache, ResourceRegistry, SharedTheme,
    ThemeAware, ThemeChange, ThemeError, ThemeModel, ThemeResources, ThemeSetup, Variant,
};
