//! Retrofit run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ITERATIONS;
use crate::errors::ConfigError;

/// Inputs and parameters for one retrofitting run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunConfig {
    /// Input vector file (plain or `.gz`).
    pub vectors: Option<PathBuf>,
    /// Lexicon file: head word followed by related words per line.
    pub lexicon: Option<PathBuf>,
    /// Alignment index JSON.
    pub alignment: Option<PathBuf>,
    /// Output vector file (plain or `.gz`).
    pub output: Option<PathBuf>,
    /// Number of iterations. Default: 10.
    pub iterations: Option<usize>,
    /// When set, vector lines carry multi-token words followed by exactly
    /// this many components.
    pub phrase_dimension: Option<usize>,
}

/// A fully resolved run: every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub vectors: PathBuf,
    pub lexicon: Option<PathBuf>,
    pub alignment: Option<PathBuf>,
    pub output: PathBuf,
    pub iterations: usize,
    pub phrase_dimension: Option<usize>,
}

impl RunConfig {
    /// Returns the effective iteration count, defaulting to 10.
    pub fn effective_iterations(&self) -> usize {
        self.iterations.unwrap_or(DEFAULT_ITERATIONS)
    }

    /// Resolve into [`RunSettings`].
    ///
    /// The knowledge-source check comes first so a run with no lexicon and
    /// no alignment index is rejected before anything else is inspected.
    pub fn resolve(&self) -> Result<RunSettings, ConfigError> {
        if self.lexicon.is_none() && self.alignment.is_none() {
            return Err(ConfigError::NoKnowledgeSource);
        }
        let vectors = self.vectors.clone().ok_or_else(|| ConfigError::ValidationFailed {
            field: "run.vectors".to_string(),
            message: "input vector path is required".to_string(),
        })?;
        let output = self.output.clone().ok_or_else(|| ConfigError::ValidationFailed {
            field: "run.output".to_string(),
            message: "output vector path is required".to_string(),
        })?;
        Ok(RunSettings {
            vectors,
            lexicon: self.lexicon.clone(),
            alignment: self.alignment.clone(),
            output,
            iterations: self.effective_iterations(),
            phrase_dimension: self.phrase_dimension,
        })
    }
}
