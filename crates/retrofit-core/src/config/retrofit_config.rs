//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, RunConfig};
use crate::constants::LOG_ENV_VAR;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RETROFIT_*`)
/// 3. Config file (`--config <path>`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetrofitConfig {
    pub run: RunConfig,
    pub logging: LoggingConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub vectors: Option<PathBuf>,
    pub lexicon: Option<PathBuf>,
    pub alignment: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub iterations: Option<usize>,
    pub phrase_dimension: Option<usize>,
    pub log_level: Option<String>,
}

impl RetrofitConfig {
    /// Load configuration with layered resolution.
    ///
    /// A config path that was given explicitly but does not exist is an error.
    pub fn load(
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_file {
            Self::merge_toml_file(&mut config, path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RetrofitConfig) -> Result<(), ConfigError> {
        if let Some(dim) = config.run.phrase_dimension {
            if dim == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "run.phrase_dimension".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(ref level) = config.logging.level {
            if level.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "logging.level".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut RetrofitConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: RetrofitConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut RetrofitConfig, other: &RetrofitConfig) {
        if other.run.vectors.is_some() {
            base.run.vectors = other.run.vectors.clone();
        }
        if other.run.lexicon.is_some() {
            base.run.lexicon = other.run.lexicon.clone();
        }
        if other.run.alignment.is_some() {
            base.run.alignment = other.run.alignment.clone();
        }
        if other.run.output.is_some() {
            base.run.output = other.run.output.clone();
        }
        if other.run.iterations.is_some() {
            base.run.iterations = other.run.iterations;
        }
        if other.run.phrase_dimension.is_some() {
            base.run.phrase_dimension = other.run.phrase_dimension;
        }

        if other.logging.level.is_some() {
            base.logging.level = other.logging.level.clone();
        }
        if other.logging.json.is_some() {
            base.logging.json = other.logging.json;
        }
    }

    /// Apply environment variable overrides.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut RetrofitConfig) {
        if let Ok(val) = std::env::var("RETROFIT_ITERATIONS") {
            if let Ok(v) = val.parse::<usize>() {
                config.run.iterations = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETROFIT_LEXICON") {
            config.run.lexicon = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("RETROFIT_ALIGNMENT") {
            config.run.alignment = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var(LOG_ENV_VAR) {
            config.logging.level = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RetrofitConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.vectors {
            config.run.vectors = Some(v.clone());
        }
        if let Some(ref v) = cli.lexicon {
            config.run.lexicon = Some(v.clone());
        }
        if let Some(ref v) = cli.alignment {
            config.run.alignment = Some(v.clone());
        }
        if let Some(ref v) = cli.output {
            config.run.output = Some(v.clone());
        }
        if let Some(v) = cli.iterations {
            config.run.iterations = Some(v);
        }
        if let Some(v) = cli.phrase_dimension {
            config.run.phrase_dimension = Some(v);
        }
        if let Some(ref v) = cli.log_level {
            config.logging.level = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
