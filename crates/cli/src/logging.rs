//! Tracing subscriber setup
//!
//! `RUST_LOG` wins, then `--debug`, then the `--loglevel` option or the
//! configured default, then `warn`. Logs go to stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter directive used when `RUST_LOG` is not set
pub fn directive(debug: bool, level: Option<&str>) -> &str {
    if debug {
        return "debug";
    }
    match level.map(str::trim) {
        Some(level) if !level.is_empty() => level,
        _ => DEFAULT_DIRECTIVE,
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init(debug: bool, level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(directive(debug, level))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
