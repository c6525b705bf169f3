//! Error types for ci-carddav

use http::StatusCode;
use thiserror::Error;

/// Failures surfaced to the DAV protocol engine
#[derive(Error, Debug)]
pub enum DavError {
    #[error("This addressbook is immutable")]
    Immutable,

    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: ci_core::Error,
    },

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error(transparent)]
    Store(#[from] ci_core::Error),
}

impl DavError {
    /// HTTP status the protocol engine should answer with
    pub fn status(&self) -> StatusCode {
        match self {
            DavError::Immutable | DavError::Forbidden(_) => StatusCode::FORBIDDEN,
            DavError::NotFound { .. } => StatusCode::NOT_FOUND,
            DavError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            DavError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            DavError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias for DAV operations
pub type DavResult<T> = std::result::Result<T, DavError>;
