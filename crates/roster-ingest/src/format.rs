//! Input format detection.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Zip container signature (xlsx, xlsb, ods).
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
/// OLE compound document signature (legacy xls).
const OLE_MAGIC: [u8; 4] = [0xD0, 0xCF, 0x11, 0xE0];

/// Supported roster file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFormat {
    /// Delimited text (comma, semicolon or tab).
    Csv,
    /// Workbook readable by calamine (xlsx, xlsm, xlsb, xls, ods).
    Spreadsheet,
}

impl TableFormat {
    /// Guesses the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Guesses the format from leading magic bytes, defaulting to CSV.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(&ZIP_MAGIC) || bytes.starts_with(&OLE_MAGIC) {
            Self::Spreadsheet
        } else {
            Self::Csv
        }
    }

    /// Extension first, then content.
    pub fn detect(path: &Path, bytes: &[u8]) -> Self {
        Self::from_extension(path).unwrap_or_else(|| Self::sniff(bytes))
    }
}
