//! Diagnostic logging to standard error.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "COLORIZE_LOG";

/// Install the stderr subscriber. Filtered through `COLORIZE_LOG`, warnings only by default.
///
/// Calling this more than once is harmless.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .try_init();
}
