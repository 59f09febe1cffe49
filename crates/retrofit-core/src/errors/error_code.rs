//! RetrofitErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// for exit diagnostics and log fields.
pub trait RetrofitErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn diagnostic(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NO_KNOWLEDGE_SOURCE: &str = "NO_KNOWLEDGE_SOURCE";
pub const IO_ERROR: &str = "IO_ERROR";
pub const FORMAT_ERROR: &str = "FORMAT_ERROR";
pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
pub const MISSING_OFFSET: &str = "MISSING_OFFSET";
pub const PAIR_INTEGRITY: &str = "PAIR_INTEGRITY";
pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
pub const MISSING_VECTOR: &str = "MISSING_VECTOR";
