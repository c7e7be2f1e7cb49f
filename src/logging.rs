//! Diagnostic logging setup.
//!
//! User-facing output goes to stdout with `println!`. Diagnostics go through
//! `tracing` to stderr, filtered by `KERNEL_SWEEP_LOG` (for example
//! `KERNEL_SWEEP_LOG=kernel_sweep=debug`).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "KERNEL_SWEEP_LOG";

const DEFAULT_FILTER: &str = "kernel_sweep=warn";

/// Install the global tracing subscriber.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Ignore a second initialization rather than panicking.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
