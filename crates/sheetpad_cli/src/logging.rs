//! Log subscriber setup for the `sheetpad` binary.
//!
//! Filtering follows the `SHEETPAD_LOG` environment variable using
//! `EnvFilter` syntax, e.g. `SHEETPAD_LOG=debug` or
//! `SHEETPAD_LOG=sheetpad_io_xlsx::session=debug`. Output goes to stderr so
//! stdout carries only the preview text.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
pub const C_ENV_LOG_FILTER: &str = "SHEETPAD_LOG";

/// Install the global stderr subscriber. Defaults to `warn`.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_env(C_ENV_LOG_FILTER).unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    tracing_subscriber::registry().with(console_layer).init();
}
