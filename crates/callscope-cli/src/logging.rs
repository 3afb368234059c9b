#![forbid(unsafe_code)]

//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

/// Filter directive variable.
pub const ENV_LOG: &str = "CALLSCOPE_LOG";

/// Directive used when `CALLSCOPE_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Build the filter from a `CALLSCOPE_LOG` value.
#[must_use]
pub fn env_filter(value: Option<&str>) -> EnvFilter {
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global fmt subscriber. A second call is a no-op.
pub fn init(value: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(value))
        .with_target(false)
        .try_init();
}
