//! Spreadsheet extraction (first worksheet only).

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::error::{IngestError, Result};
use crate::header::normalize_cell;

/// Reads the first worksheet as rows of trimmed cells.
pub fn read_sheet_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoSheets)??;
    tracing::debug!(
        height = range.height(),
        width = range.width(),
        "read first worksheet"
    );
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Renders a cell as text. Whole floats lose their fraction so phone
/// numbers and ids stored as numbers read back as typed.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => normalize_cell(value),
        Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", *value as i64)
        }
        other => normalize_cell(&other.to_string()),
    }
}
