//! Logging setup for Verdant binaries.
//!
//! Structured logging is controlled by environment variables:
//!
//! - `VERDANT_DEBUG=true` / `1` / `yes` - Enable debug logging
//! - `VERDANT_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `VERDANT_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! Nothing is installed unless one of the first two is set, so the console
//! output of the `verdant` binary stays clean by default.
//!
//! ```rust,no_run
//! use verdant_probe::logging;
//!
//! logging::init();
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Crates whose events pass the level filter.
const CRATES: &[&str] = &[
    "verdant",
    "verdant_probe",
    "verdant_postgres",
    "verdant_mysql",
    "verdant_cli",
];

/// Check if debug logging is enabled via `VERDANT_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("VERDANT_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `VERDANT_LOG_LEVEL`.
///
/// Defaults to "debug" if `VERDANT_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("VERDANT_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `VERDANT_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    env::var("VERDANT_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Build the `EnvFilter` directive string for `level`.
pub fn filter_directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize logging. Subsequent calls are no-ops.
///
/// Logs go to stderr so they never interleave with the probe's console lines.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("VERDANT_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{fmt, prelude::*, EnvFilter};

            let level = get_log_level();
            let filter = EnvFilter::try_new(filter_directives(level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));
            let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

            let installed = match get_log_format() {
                "pretty" => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.pretty())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.json())
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::info!(
                    level = level,
                    format = get_log_format(),
                    "Verdant logging initialized"
                );
            }
        }
    });
}
