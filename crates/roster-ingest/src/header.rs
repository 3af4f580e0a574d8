//! Header row detection and column naming.

use std::collections::HashSet;

/// Number of leading rows inspected when looking for the header.
pub const HEADER_SCAN_ROWS: usize = 20;

/// Minimum non-empty cells for a row to qualify as the header.
pub const HEADER_MIN_CELLS: usize = 2;

/// Normalizes a header cell: trims, strips a BOM and collapses inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a data cell: trims and strips a BOM.
pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Picks the header row: the first of the leading rows with at least two
/// non-empty cells, falling back to row 0.
pub fn detect_header_row(rows: &[Vec<String>]) -> usize {
    rows.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| {
            row.iter().filter(|cell| !cell.trim().is_empty()).count() >= HEADER_MIN_CELLS
        })
        .unwrap_or(0)
}

/// Builds unique column names from a header row.
///
/// Repeats get a counter suffix (`Name`, `Name_2`, `Name_3`); blank cells are
/// named after their 1-based position.
pub fn column_names(header: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(header.len());
    let mut columns = Vec::with_capacity(header.len());
    for (idx, raw) in header.iter().enumerate() {
        let base = match normalize_header(raw) {
            name if name.is_empty() => format!("column_{}", idx + 1),
            name => name,
        };
        let mut candidate = base.clone();
        let mut counter = 2usize;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        seen.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}
