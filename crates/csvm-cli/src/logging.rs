//! Diagnostic logging for the CLI.
//!
//! The library crates emit `tracing` events; this installs the only
//! subscriber. Logs go to stderr so they never mix with program output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives (`CSVM_LOG=debug`).
pub const LOG_ENV: &str = "CSVM_LOG";

/// Filter used when `CSVM_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

pub fn init(color: bool) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color)
        .with_target(false)
        .try_init();
}
