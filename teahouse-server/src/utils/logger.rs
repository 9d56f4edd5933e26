//! Logging Infrastructure
//!
//! Structured logging setup with env-driven level.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `LOG_LEVEL` (or the standard `RUST_LOG` filter syntax) controls
/// verbosity; defaults to `info`.
pub fn init_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .init();
}
