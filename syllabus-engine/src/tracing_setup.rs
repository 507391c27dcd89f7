//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-crate log levels,
/// e.g. `SYLLABUS_LOG=syllabus_retrieval=debug,syllabus_index=warn`.
pub const LOG_ENV: &str = "SYLLABUS_LOG";

const DEFAULT_FILTER: &str = "syllabus=info";

/// Install the global subscriber, reading [`LOG_ENV`].
///
/// Falls back to `syllabus=info` when the variable is unset or invalid.
/// Idempotent; only the first call in a process has any effect.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install the global subscriber with an explicit filter (for embedding and tests).
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter));
}

fn install(filter: EnvFilter) {
    INIT.call_once(|| {
        let result = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
        if let Err(e) = result {
            // Another subscriber was installed by the host.
            tracing::debug!(error = %e, "tracing subscriber already set");
        }
    });
}
