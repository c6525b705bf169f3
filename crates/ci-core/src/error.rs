//! Error types for ci-core

use thiserror::Error;

/// Main error type for ci-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{0}")]
    DoesNotExist(String),

    #[error("Invalid principal URI: {0}")]
    InvalidPrincipal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned: {0}")]
    Lock(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error reports a missing record rather than a failure
    pub fn is_does_not_exist(&self) -> bool {
        matches!(self, Error::DoesNotExist(_))
    }
}

/// Result type alias for ci-core
pub type Result<T> = std::result::Result<T, Error>;
