//! Diagnostic logging setup.
//!
//! User-facing progress is printed to stdout by the dispatcher; `tracing`
//! events are diagnostics and always go to stderr so they never mix with
//! output that scripts may parse.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "RUNNER_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
