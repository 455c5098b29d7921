//! Tracing/logging initialization.
//!
//! Logs go to stderr as JSON so stdout stays free for command output.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Build the filter: `RUST_LOG` wins, `default_directive` otherwise.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
