//! Roster data ingestion.
//!
//! Turns raw roster bytes (CSV or a spreadsheet workbook) into an ordered
//! grid of trimmed cells, locates the header row and names the columns.
//!
//! # Features
//!
//! - **Format detection**: by extension, falling back to magic bytes
//! - **CSV decoding**: UTF-8 (BOM tolerated) or Windows-1251, with `,`/`;`/tab
//!   delimiter sniffing
//! - **Spreadsheets**: first worksheet of xlsx/xlsb/xls/ods via calamine
//! - **Header detection**: first of the leading 20 rows with two or more
//!   non-empty cells
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use roster_ingest::read_table;
//!
//! let table = read_table(Path::new("staff.xlsx"))?;
//! println!("header at row {}: {:?}", table.header_index, table.columns);
//! let rows = table.raw_rows();
//! ```

mod delimited;
mod error;
mod format;
mod header;
mod sheet;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Extraction ===
pub use delimited::{decode_text, read_csv_rows, sniff_delimiter};
pub use format::TableFormat;
pub use header::{HEADER_MIN_CELLS, HEADER_SCAN_ROWS, column_names, detect_header_row};
pub use sheet::read_sheet_rows;
pub use table::{MAX_ROSTER_FILE_SIZE, RosterTable, read_table, read_table_bytes};
