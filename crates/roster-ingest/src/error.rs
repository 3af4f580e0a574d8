//! Error types for roster ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting a roster table.
///
/// Every variant is terminal for the import: the file has to be fixed and
/// picked again.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Roster file not found.
    #[error("roster file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the maximum allowed size.
    #[error("file is too large ({size} bytes, maximum is {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },

    // === Parsing Errors ===
    /// File is empty or has no non-blank rows.
    #[error("roster file is empty")]
    Empty,

    /// File uses an encoding that cannot be decoded.
    #[error("unsupported encoding: {encoding}")]
    UnsupportedEncoding { encoding: &'static str },

    /// CSV content could not be parsed.
    #[error("failed to parse CSV: {message}")]
    CsvParse { message: String },

    /// Spreadsheet container could not be opened or read.
    #[error("failed to read spreadsheet: {message}")]
    Spreadsheet { message: String },

    /// Spreadsheet has no worksheets.
    #[error("spreadsheet has no worksheets")]
    NoSheets,
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::CsvParse {
            message: err.to_string(),
        }
    }
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        Self::Spreadsheet {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
