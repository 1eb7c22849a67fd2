//! Error types for the data-loader crate.
//!
//! Every fallible operation on a store (generating, writing, reading,
//! validating) reports one of these variants. The binary wraps them with
//! `anyhow` context; library callers can match on them directly.

use thiserror::Error;

/// Errors that can occur while building, persisting or loading a store
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Store file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a store
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Store file exists but is not a valid serialized store
    ///
    /// `line` is the 1-based line reported by the JSON parser (0 when the
    /// parser had no position, e.g. an early EOF on an empty file).
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field or argument had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A store was read successfully but its contents break an invariant
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
