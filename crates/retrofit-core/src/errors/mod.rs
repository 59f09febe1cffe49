//! Error handling for the retrofitting pipeline.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod load_error;
pub mod retrofit_error;

pub use config_error::ConfigError;
pub use error_code::RetrofitErrorCode;
pub use load_error::{LoadError, RecordError};
pub use retrofit_error::RetrofitError;
