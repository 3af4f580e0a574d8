//! Delimited text extraction.

use csv::ReaderBuilder;
use encoding_rs::WINDOWS_1251;

use crate::error::{IngestError, Result};
use crate::header::{HEADER_SCAN_ROWS, normalize_cell};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Decodes CSV bytes to text.
///
/// UTF-8 (with or without BOM) is read as is; anything else is treated as
/// Windows-1251, the usual encoding of legacy Cyrillic spreadsheet exports.
pub fn decode_text(bytes: &[u8]) -> Result<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            encoding: "UTF-16 BE",
        });
    }
    let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => {
            let (text, _, had_errors) = WINDOWS_1251.decode(body);
            tracing::debug!(had_errors, "decoded non-UTF-8 CSV as windows-1251");
            Ok(text.into_owned())
        }
    }
}

/// Picks the delimiter that occurs most often outside quotes in the leading
/// non-empty lines. Ties resolve in favor of the comma.
pub fn sniff_delimiter(text: &str) -> u8 {
    let mut counts = [0usize; DELIMITERS.len()];
    let lines = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(HEADER_SCAN_ROWS);
    for line in lines {
        let mut in_quotes = false;
        for byte in line.bytes() {
            if byte == b'"' {
                in_quotes = !in_quotes;
                continue;
            }
            if in_quotes {
                continue;
            }
            if let Some(idx) = DELIMITERS.iter().position(|d| *d == byte) {
                counts[idx] += 1;
            }
        }
    }
    let mut best = 0usize;
    for idx in 1..DELIMITERS.len() {
        if counts[idx] > counts[best] {
            best = idx;
        }
    }
    DELIMITERS[best]
}

/// Reads every record as a row of trimmed cells.
pub fn read_csv_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let text = decode_text(bytes)?;
    let delimiter = sniff_delimiter(&text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(rows)
}
