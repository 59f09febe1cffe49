//! Retrofitting engine errors.

use super::error_code::{self, RetrofitErrorCode};

/// Errors raised by the estimator and the update loop.
#[derive(Debug, thiserror::Error)]
pub enum RetrofitError {
    #[error("must supply a lexicon, an alignment index, or both")]
    NoKnowledgeSource,

    #[error("no average offset for pattern '{pattern}' (needed while updating '{word}')")]
    MissingAlignmentOffset { pattern: String, word: String },

    #[error("'{word}' is neither side of pair ({source_form}, {target_form}) under '{pattern}'")]
    PairIntegrity {
        word: String,
        pattern: String,
        source_form: String,
        target_form: String,
    },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("no vector for '{word}'")]
    MissingVector { word: String },
}

impl RetrofitErrorCode for RetrofitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoKnowledgeSource => error_code::NO_KNOWLEDGE_SOURCE,
            Self::MissingAlignmentOffset { .. } => error_code::MISSING_OFFSET,
            Self::PairIntegrity { .. } => error_code::PAIR_INTEGRITY,
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            Self::MissingVector { .. } => error_code::MISSING_VECTOR,
        }
    }
}
