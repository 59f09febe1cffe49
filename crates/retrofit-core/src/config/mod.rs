//! Configuration system for the retrofitting pipeline.
//! TOML-based, 4-layer resolution: CLI > env > config file > defaults.

pub mod logging_config;
pub mod retrofit_config;
pub mod run_config;

pub use logging_config::LoggingConfig;
pub use retrofit_config::{CliOverrides, RetrofitConfig};
pub use run_config::{RunConfig, RunSettings};
