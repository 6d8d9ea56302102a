/// Structured error types for blogctl-core.
///
/// The server crate maps these onto HTTP responses; the binary wraps them
/// in `anyhow` with context.

use std::io;
use thiserror::Error;

use crate::models::EntryId;

/// Main error type for entry store operations
#[derive(Error, Debug)]
pub enum BlogError {
    /// No entry with the requested id
    #[error("Entry {id} not found")]
    NotFound { id: EntryId },

    /// Underlying SQLite failure (disk, connection, constraint)
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for blogctl-core operations
pub type Result<T> = std::result::Result<T, BlogError>;

impl BlogError {
    /// Create a not-found error for an entry id
    pub fn not_found(id: EntryId) -> Self {
        Self::NotFound { id }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
