//! Tracing setup for the CLI and for applications that want pushwire's logs
//! without configuring a subscriber themselves.
//!
//! `PUSHWIRE_LOG` takes a full filter directive (for example
//! `pushwire=trace,rustls=debug`) and overrides `logging.level` when set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingSettings;

/// Environment variable holding a filter directive that replaces the configured level.
pub const LOG_ENV: &str = "PUSHWIRE_LOG";

/// Normalizes a configured level name. Unknown names fall back to `info`.
pub fn level_name(level: &str) -> &'static str {
    match level.trim().to_lowercase().as_str() {
        "error" => "error",
        "warn" | "warning" => "warn",
        "debug" => "debug",
        "trace" => "trace",
        "off" => "off",
        _ => "info",
    }
}

/// The filter applied when `PUSHWIRE_LOG` is unset: the configured level for
/// pushwire itself and `warn` for the TLS and HTTP stacks underneath it.
pub fn filter_directive(settings: &LoggingSettings) -> String {
    format!("pushwire={},warn", level_name(&settings.level))
}

/// Installs a fmt subscriber. Does nothing if one is already installed.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(settings)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
