//! Input loading errors.

use std::path::PathBuf;

use super::error_code::{self, RetrofitErrorCode};

/// Fatal errors while reading or writing an input/output file.
///
/// Per-record problems are not fatal; they are collected as
/// [`RecordError`] values in the loader's report instead.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {format} in {path}: {message}")]
    Format {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("no usable vectors in {path}")]
    EmptyInput { path: PathBuf },
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl RetrofitErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Format { .. } => error_code::FORMAT_ERROR,
            Self::EmptyInput { .. } => error_code::EMPTY_INPUT,
        }
    }
}

/// A single skipped record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {reason}")]
pub struct RecordError {
    /// 1-based line number in the source file.
    pub line: usize,
    pub reason: String,
}
