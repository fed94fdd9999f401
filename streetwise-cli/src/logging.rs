//! Diagnostic logging for the binary.
//!
//! Library crates log through the `log` facade; the subscriber installed
//! here bridges those records and writes them to stderr so stdout carries
//! only JSON.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Installing twice is harmless; the second attempt is ignored.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if installed.is_err() {
        log::debug!("logging subscriber already installed");
    }
}
