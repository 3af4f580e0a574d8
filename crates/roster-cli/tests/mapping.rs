//! Mapping resolution as the CLI performs it.

use roster_cli::mapping::resolve_mapping;
use roster_map::{MappingError, guess_mapping};
use roster_model::RosterField;

fn columns() -> Vec<String> {
    ["Отдел", "Группа", "Сотрудник", "Позывной", "Тел."]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

#[test]
fn document_then_overrides() {
    let columns = columns();
    let guessed = guess_mapping(&columns);
    assert_eq!(guessed.get(RosterField::FullName), Some("Сотрудник"));

    let mapping = resolve_mapping(
        guessed,
        Some(r#"{"full_name": "Позывной"}"#),
        &["team=".to_string(), "phone=Тел.".to_string()],
        &columns,
    )
    .expect("mapping");

    assert_eq!(mapping.get(RosterField::Unit), Some("Отдел"));
    assert_eq!(mapping.get(RosterField::FullName), Some("Позывной"));
    assert_eq!(mapping.get(RosterField::Team), None);
    assert_eq!(mapping.get(RosterField::Phone), Some("Тел."));
}

#[test]
fn stale_document_columns_are_rejected() {
    let columns = columns();
    let err = resolve_mapping(
        guess_mapping(&columns),
        Some(r#"{"email": "E-mail"}"#),
        &[],
        &columns,
    )
    .expect_err("column missing from sheet");
    assert!(matches!(err, MappingError::UnknownColumn { .. }));
}
