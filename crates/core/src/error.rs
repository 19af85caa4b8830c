//! Error types for Quarry
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::OperationKind;
use std::io;
use thiserror::Error;

/// Result type alias for Quarry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for repositories and the collections behind them
#[derive(Debug, Error)]
pub enum Error {
    /// No operation is registered under this kind and name
    #[error("{name} {kind} operation is not implemented")]
    OperationNotImplemented {
        /// Kind that was looked up
        kind: OperationKind,
        /// Name as supplied by the caller
        name: String,
    },

    /// Method-style operation name without a recognised prefix
    #[error("Invalid operation name: {0}")]
    InvalidOperationName(String),

    /// Criteria key uses a lookup the collection does not understand
    #[error("Invalid lookup '{lookup}' in criteria key '{key}'")]
    InvalidLookup {
        /// Full criteria key, e.g. `age__between`
        key: String,
        /// Lookup suffix that was rejected
        lookup: String,
    },

    /// Criteria value is not usable with its lookup
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Build an `OperationNotImplemented` error
    pub fn not_implemented(kind: OperationKind, name: impl Into<String>) -> Self {
        Error::OperationNotImplemented {
            kind,
            name: name.into(),
        }
    }

    /// True if this error reports a missing operation
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Error::OperationNotImplemented { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
