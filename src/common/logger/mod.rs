use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod formatter;

pub use formatter::*;

use crate::configs::Config;

/// Builds the filter directive string from the `[logging]` section.
///
/// The codec crates are capped at `error` so their internals never flood the
/// voice logs at debug level.
pub fn filter_directives(config: &Config) -> String {
    let log_level = config
        .logging
        .as_ref()
        .and_then(|l| l.level.as_deref())
        .unwrap_or("info");

    let filters = config
        .logging
        .as_ref()
        .and_then(|l| l.filters.as_deref())
        .unwrap_or("");

    if filters.is_empty() {
        format!("{},audiopus=error", log_level)
    } else {
        format!("{},audiopus=error,{}", log_level, filters)
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over the config.
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let use_ansi = config
        .logging
        .as_ref()
        .and_then(|l| l.ansi)
        .unwrap_or(true);

    let stdout_layer = fmt::layer()
        .event_format(VoiceFormatter::new(use_ansi))
        .with_ansi(use_ansi);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init();
}
