//! Error types for launchdash.
//!
//! This module defines all error types used throughout the launchdash crate,
//! providing detailed context for debugging and user-friendly error messages.
//! The aggregators themselves never fail; everything here is about loading
//! data, reading configuration, and serving the dashboard.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for launchdash operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Data Errors ===
    /// Failed to open the launch data file.
    #[error("failed to open launch data at {path}: {source}")]
    DataOpen {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("missing column '{column}' in launch data header")]
    MissingColumn {
        /// The configured column name that was not found.
        column: String,
    },

    /// A row violates the launch record invariants.
    #[error("invalid launch record on line {line}: {message}")]
    InvalidRecord {
        /// 1-based line number in the source file.
        line: u64,
        /// Description of the violation.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// The HTTP listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for launchdash operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid record error for the given line.
    #[must_use]
    pub fn invalid_record(line: u64, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            message: message.into(),
        }
    }

    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if the launch data was read but its contents were rejected.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Csv(_)
                | Self::MissingColumn { .. }
                | Self::InvalidRecord { .. }
        )
    }
}
