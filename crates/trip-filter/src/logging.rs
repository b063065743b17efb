/*!
Logging setup for the trip-filter binary.

`RUST_LOG` controls verbosity; without it, INFO and above is shown, which
includes one progress line per processed file. Per-file classification
details are logged at DEBUG, trimming details at TRACE.
*/

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const DEFAULT_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
pub fn setup_logging() {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };

    let fmt_layer = fmt::layer().with_target(false).with_filter(filter);
    let registry = tracing_subscriber::registry().with(fmt_layer);
    registry.init();

    #[cfg(feature = "profiling")]
    tracing::info!("Logging initialized (profiling scopes emitted as tracing spans)");
    #[cfg(not(feature = "profiling"))]
    tracing::debug!("Logging initialized");
}
