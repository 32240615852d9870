//! Logging setup for the command line driver.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map a `--log-level` value onto a filter directive.
///
/// Unknown values fall back to `info`.
pub fn level_directive(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Stdout stays
/// free for the JSON result.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .init();
}
