//! Structured logging via `tracing` with an `EnvFilter`.

pub mod setup;

pub use setup::{init_from_config, init_tracing, init_tracing_with_filter, parse_filter};
