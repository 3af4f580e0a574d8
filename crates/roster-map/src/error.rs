//! Error types for manual mapping overrides.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    /// Override is not of the form `field=column`.
    #[error("invalid mapping override '{0}', expected FIELD=COLUMN")]
    InvalidOverride(String),

    /// Field name is not a roster field.
    #[error("unknown roster field '{0}'")]
    UnknownField(String),

    /// Column is not among the detected columns.
    #[error("column '{column}' for field {field} is not in the sheet")]
    UnknownColumn { field: String, column: String },

    /// Mapping document is not valid JSON.
    #[error("invalid mapping document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MappingError>;
