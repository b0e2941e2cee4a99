//! Logging setup.
//!
//! The router and runner emit `tracing` events; this installs a formatting
//! subscriber for binaries and tests that want to see them.

use tracing_subscriber::EnvFilter;

/// Installs a global `fmt` subscriber.
///
/// The filter is read from `RUST_LOG`, falling back to `default_filter`
/// (e.g. `"lanekit=debug"`). Returns `false` if a global subscriber was
/// already installed.
pub fn init_logging(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Installs a global subscriber that writes JSON lines.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_json_logging(default_filter: &str) -> bool {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .try_init()
        .is_ok()
}
