//! Error types for Medoka.

use thiserror::Error;

/// Common error type for Medoka.
#[derive(Error, Debug)]
pub enum MedokaError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx layer; the original error text is kept for
    /// logging but must never reach an HTTP response body.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for MedokaError {
    fn from(e: sqlx::Error) -> Self {
        MedokaError::Database(e.to_string())
    }
}

/// Result type alias for Medoka operations.
pub type Result<T> = std::result::Result<T, MedokaError>;
