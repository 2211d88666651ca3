//! Tracing initialization

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PB_LOG";

static INIT: Once = Once::new();

/// Initialize logging to stderr.
///
/// Reads the filter from `PB_LOG` (e.g. `PB_LOG=pb_core=trace`). Without it
/// the level is `warn`, or `debug` when `verbose` is set. Stdout is left to
/// the report. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .init();
    });
}
