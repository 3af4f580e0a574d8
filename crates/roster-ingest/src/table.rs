//! Roster table extraction from bytes or files.

use std::path::Path;

use roster_model::RawRow;

use crate::delimited::read_csv_rows;
use crate::error::{IngestError, Result};
use crate::format::TableFormat;
use crate::header::{column_names, detect_header_row};
use crate::sheet::read_sheet_rows;

/// Maximum roster file size (50 MB).
pub const MAX_ROSTER_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Extracted cell grid with the detected header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterTable {
    /// Every row of the sheet in order, including rows above the header.
    pub rows: Vec<Vec<String>>,
    /// Index of the header row within `rows`.
    pub header_index: usize,
    /// Unique column names derived from the header row.
    pub columns: Vec<String>,
}

impl RosterTable {
    /// Detects the header and names the columns.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        if rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.trim().is_empty()))
        {
            return Err(IngestError::Empty);
        }
        let header_index = detect_header_row(&rows);
        let columns = column_names(&rows[header_index]);
        Ok(Self {
            rows,
            header_index,
            columns,
        })
    }

    /// Rows below the header.
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[self.header_index + 1..]
    }

    /// Data rows keyed by column name, with fully blank rows dropped.
    ///
    /// Cells past the last named column are ignored; short rows read as blank.
    pub fn raw_rows(&self) -> Vec<RawRow> {
        self.data_rows()
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| {
                        (column.as_str(), row.get(idx).map(String::as_str).unwrap_or(""))
                    })
                    .collect::<RawRow>()
            })
            .filter(|row| !row.is_blank())
            .collect()
    }
}

/// Extracts a roster table from in-memory bytes.
pub fn read_table_bytes(bytes: &[u8], format: TableFormat) -> Result<RosterTable> {
    if bytes.is_empty() {
        return Err(IngestError::Empty);
    }
    let size = bytes.len() as u64;
    if size > MAX_ROSTER_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            size,
            max_size: MAX_ROSTER_FILE_SIZE,
        });
    }
    let rows = match format {
        TableFormat::Csv => read_csv_rows(bytes)?,
        TableFormat::Spreadsheet => read_sheet_rows(bytes)?,
    };
    let table = RosterTable::from_rows(rows)?;
    tracing::info!(
        ?format,
        rows = table.rows.len(),
        header_index = table.header_index,
        columns = table.columns.len(),
        "extracted roster table"
    );
    Ok(table)
}

/// Reads a roster file, detecting its format from the extension or content.
pub fn read_table(path: &Path) -> Result<RosterTable> {
    let metadata = std::fs::metadata(path).map_err(|e| map_io_error(path, e))?;
    if metadata.len() > MAX_ROSTER_FILE_SIZE {
        return Err(IngestError::FileTooLarge {
            size: metadata.len(),
            max_size: MAX_ROSTER_FILE_SIZE,
        });
    }
    let bytes = std::fs::read(path).map_err(|e| map_io_error(path, e))?;
    let format = TableFormat::detect(path, &bytes);
    read_table_bytes(&bytes, format)
}

fn map_io_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_raw_rows_below_header() {
        let table = read_table_bytes(
            b",\nStaff list\nDept,Team,Name\nOps,Alpha,Ivanov\n,,\n,,Petrov,extra\n",
            TableFormat::Csv,
        )
        .unwrap();
        assert_eq!(table.header_index, 2);
        assert_eq!(table.columns, vec!["Dept", "Team", "Name"]);

        let raw = table.raw_rows();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].get("Dept"), "Ops");
        assert_eq!(raw[1].get("Dept"), "");
        assert_eq!(raw[1].get("Name"), "Petrov");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            read_table_bytes(b"", TableFormat::Csv),
            Err(IngestError::Empty)
        ));
        assert!(matches!(
            read_table_bytes(b",,\n,,\n", TableFormat::Csv),
            Err(IngestError::Empty)
        ));
    }
}
