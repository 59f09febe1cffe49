//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize logging from the `RETROFIT_LOG` environment variable.
///
/// Format: `RETROFIT_LOG=retrofit_engine=debug,retrofit_lexicon=info`.
/// Falls back to `info` if `RETROFIT_LOG` is not set or is invalid.
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    let directive = std::env::var(LOG_ENV_VAR).unwrap_or_default();
    install(parse_filter(&directive), false);
}

/// Initialize logging with an explicit filter string and output format.
///
/// An invalid filter falls back to `info`.
pub fn init_tracing_with_filter(filter: &str, json: bool) {
    install(parse_filter(filter), json);
}

/// Parse an `EnvFilter` directive string. Empty or invalid input yields `info`.
pub fn parse_filter(directive: &str) -> EnvFilter {
    if directive.trim().is_empty() {
        return EnvFilter::new("info");
    }
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from a resolved [`LoggingConfig`].
pub fn init_from_config(config: &LoggingConfig) {
    init_tracing_with_filter(config.effective_level(), config.effective_json());
}

// Logs go to stderr so stdout stays free for piped output.
fn install(filter: EnvFilter, json: bool) {
    INIT.call_once(|| {
        let registry = tracing_subscriber::registry().with(filter);
        let result = if json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        // Another subscriber (e.g. a test harness) may already be global.
        let _ = result;
    });
}
