//! Final column mapping from the guess, a mapping document and `--map` flags.

use roster_map::{
    Result, apply_overrides, parse_mapping_document, parse_override, validate_mapping,
};
use roster_model::ColumnMapping;

/// Layers, in order: the guessed mapping, the JSON document (if any), then
/// each `field=column` override. Every bound column must exist.
pub fn resolve_mapping(
    guessed: ColumnMapping,
    document: Option<&str>,
    overrides: &[String],
    columns: &[String],
) -> Result<ColumnMapping> {
    let mut mapping = guessed;
    if let Some(json) = document {
        mapping.merge(&parse_mapping_document(json)?);
    }
    let overrides = overrides
        .iter()
        .map(|raw| parse_override(raw))
        .collect::<Result<Vec<_>>>()?;
    let mapping = apply_overrides(mapping, &overrides, columns)?;
    validate_mapping(&mapping, columns)?;
    Ok(mapping)
}
