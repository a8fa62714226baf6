// src/logging.rs
//! Logging initialization.
//!
//! Logs go to stderr so stdout carries nothing but per-file result blocks.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `warn`, or `debug` when
/// `verbose` is on. Calling this twice is harmless: the second install is
/// ignored.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
