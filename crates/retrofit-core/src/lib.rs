//! # retrofit-core
//!
//! Foundation crate for the retrofitting pipeline.
//! Defines word normalization, vector arithmetic, errors, config, tracing,
//! and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod vector;
pub mod word;

// Re-export the most commonly used types at the crate root.
pub use config::RetrofitConfig;
pub use errors::{ConfigError, LoadError, RetrofitError, RetrofitErrorCode};
pub use word::normalize_word;
