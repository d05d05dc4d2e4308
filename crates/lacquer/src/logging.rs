//! Logging setup for host applications.
//!
//! The library itself only emits `tracing` events. Hosts that do not install
//! their own subscriber can call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Environment variable read for the filter directives.
pub const LOG_ENV: &str = "LACQUER_LOG";

/// Installs a `fmt` subscriber filtered by `LACQUER_LOG`, falling back to `default_filter`.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(default_filter, "lacquer logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("warn");
        init("debug");
    }
}
