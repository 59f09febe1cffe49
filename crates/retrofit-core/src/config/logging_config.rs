//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Configuration for log output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string. Default: "info".
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable output. Default: false.
    pub json: Option<bool>,
}

impl LoggingConfig {
    /// Returns the effective filter, defaulting to "info".
    pub fn effective_level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    /// Returns whether JSON output is enabled, defaulting to false.
    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(false)
    }
}
