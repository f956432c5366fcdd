//! Error types for the Wayfinder CLI.
//!
//! This module defines a unified error enum covering all error categories
//! in the application: configuration, catalog/document data, caller
//! arguments, upstream model calls, I/O, and serialization.

use thiserror::Error;

/// Unified error type for the Wayfinder CLI.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid configuration: bad chunking/index parameters, malformed
    /// config file. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed catalog or policy document data. Fatal at load; the
    /// message names the offending record and field.
    #[error("Data error: {0}")]
    Data(String),

    /// A caller passed an argument the API rejects (e.g. retrieval k of
    /// zero). Indicates a bug in the calling code, not in the data.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An opaque upstream call (embedding or text generation) failed.
    /// Propagated verbatim to the caller; never retried inside the core.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
