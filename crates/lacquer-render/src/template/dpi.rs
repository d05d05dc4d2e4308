//! `N*DPI` arithmetic tokens.
//!
//! After option substitution, every `<integer>*DPI` token in the text is
//! replaced by the integer multiplied by the DPI factor, truncated towards
//! zero. This is independent of the `^N` option markers; a template may use
//! both.
//!
//! ```rust
//! use lacquer_render::template::rewrite_dpi_tokens;
//!
//! let css = "QPushButton { padding: 4*DPIpx; min-height: 24*DPIpx; }";
//! assert_eq!(
//!     rewrite_dpi_tokens(css, 1.5),
//!     "QPushButton { padding: 6px; min-height: 36px; }"
//! );
//! ```

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::resolve::dpi_scale;

static DPI_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\*DPI").expect("DPI token pattern"));

/// Replaces every `N*DPI` token in `text` with `trunc(N × dpi)`.
///
/// Numbers too large for an `i64` are left untouched.
pub fn rewrite_dpi_tokens(text: &str, dpi: f64) -> String {
    if !text.contains("*DPI") {
        return text.to_string();
    }

    DPI_TOKEN
        .replace_all(text, |caps: &Captures<'_>| match caps[1].parse::<i64>() {
            Ok(n) => dpi_scale(n, dpi).to_string(),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}
