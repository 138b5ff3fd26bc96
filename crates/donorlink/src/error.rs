//! Error types for donorlink.
//!
//! This module defines the error types used throughout the donorlink crate.
//! Field-level validation failures are not represented here; they stay inside
//! the validation engine as [`crate::validation::ValidationError`].

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for donorlink operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Record Store Errors ===
    /// The record store could not be reached or refused the operation.
    #[error("record store unavailable during {operation}: {message}")]
    StoreUnavailable {
        /// The store operation that failed.
        operation: &'static str,
        /// Description of what went wrong.
        message: String,
    },

    /// A stored record could not be decoded.
    #[error("corrupt record {id} in {collection}: {message}")]
    CorruptRecord {
        /// Collection the record was read from.
        collection: String,
        /// Store-assigned identity of the record.
        id: String,
        /// Description of what went wrong.
        message: String,
    },

    /// No record with the given identity exists.
    #[error("record not found: {0}")]
    RecordNotFound(String),

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

    // === Domain Errors ===
    /// A search was attempted without an organ.
    #[error("search requires an organ")]
    EmptyCriteria,

    /// A form value could not be converted into a record field.
    #[error("invalid value for '{field}': {message}")]
    InvalidField {
        /// Form field name.
        field: String,
        /// Description of the problem.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for donorlink operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a store-unavailable error for the given operation.
    #[must_use]
    pub fn store_unavailable(operation: &'static str, message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            operation,
            message: message.into(),
        }
    }

    /// Create an invalid-field error.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error means the record store could not be reached.
    #[must_use]
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    /// Check if the user can simply retry the operation that produced this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable { .. } | Self::DatabaseQuery(_) | Self::Io(_)
        )
    }
}
