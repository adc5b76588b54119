//! Error types for Cumulus.

use thiserror::Error;

/// Common error type for Cumulus operations.
#[derive(Error, Debug)]
pub enum CumulusError {
    /// No token, an unknown token, or a revoked token was presented.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Login failed: unknown login or wrong password.
    ///
    /// The two cases are deliberately indistinguishable to callers.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Invalid user input (empty payload, blank or unsafe filename).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A record already exists for the same (owner, filename) pair.
    #[error("conflict: {0}")]
    Conflict(String),

    /// I/O failure while writing, renaming, or deleting a blob.
    #[error("storage error: {0}")]
    Storage(String),

    /// Metadata and blob state diverged: a record exists but its blob is
    /// missing on disk. Indicates a prior write-path defect, not a normal
    /// miss, and is logged at error level so operators can alert on it.
    #[error("storage inconsistency: {0}")]
    Inconsistency(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for CumulusError {
    fn from(e: sqlx::Error) -> Self {
        CumulusError::Database(e.to_string())
    }
}

/// Result type alias for Cumulus operations.
pub type Result<T> = std::result::Result<T, CumulusError>;
