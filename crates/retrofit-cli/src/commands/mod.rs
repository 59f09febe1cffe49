pub mod index;
pub mod join;
pub mod run;

use std::path::PathBuf;

use anyhow::Context;
use retrofit_core::config::CliOverrides;
use retrofit_core::errors::{ConfigError, LoadError, RetrofitError, RetrofitErrorCode};
use retrofit_core::tracing::init_from_config;
use retrofit_core::RetrofitConfig;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Globals {
    /// Resolve layered configuration and install the tracing subscriber.
    pub fn configure(&self, mut overrides: CliOverrides) -> anyhow::Result<RetrofitConfig> {
        overrides.log_level = self.log_level.clone();
        let config = RetrofitConfig::load(self.config.as_deref(), Some(&overrides))
            .context("failed to resolve configuration")?;
        init_from_config(&config.logging);
        Ok(config)
    }
}

/// Render an error for the terminal, prefixed with its stable code when
/// it came from one of the pipeline's error types.
pub fn diagnostic(err: &anyhow::Error) -> String {
    let coded = err
        .downcast_ref::<RetrofitError>()
        .map(|e| e.error_code())
        .or_else(|| err.downcast_ref::<ConfigError>().map(|e| e.error_code()))
        .or_else(|| err.downcast_ref::<LoadError>().map(|e| e.error_code()));
    match coded {
        Some(code) => format!("[{code}] {err:#}"),
        None => format!("{err:#}"),
    }
}
