//! Configuration errors.

use super::error_code::{self, RetrofitErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("must supply a lexicon, an alignment index, or both")]
    NoKnowledgeSource,
}

impl RetrofitErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoKnowledgeSource => error_code::NO_KNOWLEDGE_SOURCE,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
