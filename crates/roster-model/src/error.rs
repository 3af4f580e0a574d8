//! Errors reported by directory implementations.

use thiserror::Error;

/// Failure of a single remote directory operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DirectoryError {
    /// The request never produced a response (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The directory answered with a non-success status.
    #[error("directory returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to decode directory response: {0}")]
    Decode(String),

    /// An entity referenced by id does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The directory rejected a write because of a uniqueness constraint.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Result type for directory operations.
pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
