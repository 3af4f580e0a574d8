use std::fs;
use std::path::PathBuf;

use roster_ingest::{IngestError, TableFormat, read_table, read_table_bytes};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_semicolon_roster_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "roster.csv",
        "Штатное расписание;;\nОтдел;Группа;ФИО\nОперативный;Альфа;Иванов И.И.\n;;Петров П.П.\n"
            .as_bytes(),
    );

    let table = read_table(&path).expect("read roster");
    assert_eq!(table.header_index, 1);
    assert_eq!(table.columns, vec!["Отдел", "Группа", "ФИО"]);

    let rows = table.raw_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("Отдел"), "Оперативный");
    assert_eq!(rows[1].get("ФИО"), "Петров П.П.");
}

#[test]
fn header_detection_skips_title_rows() {
    let table = read_table_bytes(b",\nTitle\nDept,Team,Name\nOps,Alpha,Ivanov\n", TableFormat::Csv)
        .expect("read table");
    assert_eq!(table.header_index, 2);
    assert_eq!(table.data_rows().len(), 1);
}

#[test]
fn duplicate_headers_get_suffixes() {
    let table = read_table_bytes(b"Name,Name\nIvanov,Ivanova\n", TableFormat::Csv)
        .expect("read table");
    assert_eq!(table.columns, vec!["Name", "Name_2"]);
    let rows = table.raw_rows();
    assert_eq!(rows[0].get("Name_2"), "Ivanova");
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn empty_file_is_a_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "empty.csv", b"");
    assert!(matches!(read_table(&path), Err(IngestError::Empty)));
}

#[test]
fn corrupt_workbook_is_a_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "roster.xlsx", b"definitely not a workbook");
    assert!(matches!(
        read_table(&path),
        Err(IngestError::Spreadsheet { .. })
    ));
}
