//! Manual overrides applied on top of a guessed mapping.

use roster_model::{ColumnMapping, RosterField};

use crate::error::{MappingError, Result};

/// A single `field=column` override. An empty column clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOverride {
    pub field: RosterField,
    pub column: Option<String>,
}

/// Parses `field=column`, e.g. `full_name=ФИО` or `team=`.
pub fn parse_override(raw: &str) -> Result<MappingOverride> {
    let (field, column) = raw
        .split_once('=')
        .ok_or_else(|| MappingError::InvalidOverride(raw.to_string()))?;
    let field = field
        .parse::<RosterField>()
        .map_err(|_| MappingError::UnknownField(field.trim().to_string()))?;
    let column = Some(column.trim().to_string()).filter(|c| !c.is_empty());
    Ok(MappingOverride { field, column })
}

/// Parses a JSON mapping document (`{"unit": "Dept", "full_name": "Name"}`).
pub fn parse_mapping_document(json: &str) -> Result<ColumnMapping> {
    Ok(serde_json::from_str(json)?)
}

/// Applies overrides in order, rejecting columns absent from the sheet.
pub fn apply_overrides(
    mut mapping: ColumnMapping,
    overrides: &[MappingOverride],
    columns: &[String],
) -> Result<ColumnMapping> {
    for item in overrides {
        if let Some(column) = &item.column {
            ensure_column(item.field, column, columns)?;
        }
        mapping.set(item.field, item.column.clone());
    }
    Ok(mapping)
}

/// Checks that every bound column exists in the sheet.
pub fn validate_mapping(mapping: &ColumnMapping, columns: &[String]) -> Result<()> {
    for (field, column) in mapping.bindings() {
        ensure_column(field, column, columns)?;
    }
    Ok(())
}

fn ensure_column(field: RosterField, column: &str, columns: &[String]) -> Result<()> {
    if columns.iter().any(|c| c == column) {
        Ok(())
    } else {
        Err(MappingError::UnknownColumn {
            field: field.to_string(),
            column: column.to_string(),
        })
    }
}
