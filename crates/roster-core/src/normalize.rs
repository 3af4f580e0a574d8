//! Fill-down resolution of raw sheet rows.

use roster_model::{ColumnMapping, NormalizedRow, RawRow, UNASSIGNED_TEAM, UNASSIGNED_UNIT};

/// Hierarchy values carried down from the last row that set them.
#[derive(Debug, Default)]
struct CarryForward {
    parent_unit: Option<String>,
    unit: Option<String>,
    team: Option<String>,
}

/// Converts raw rows into roster records in a single pass.
///
/// Blank `parent_unit`, `unit` and `team` cells inherit the nearest value
/// above them. Rows without a name are dropped and leave the inherited
/// values untouched. Returns nothing unless both `unit` and `full_name`
/// are mapped.
pub fn normalize(rows: &[RawRow], mapping: &ColumnMapping) -> Vec<NormalizedRow> {
    let (Some(unit_column), Some(name_column)) =
        (mapping.unit.as_deref(), mapping.full_name.as_deref())
    else {
        tracing::debug!("mapping lacks unit or full_name, nothing to normalize");
        return Vec::new();
    };

    let mut carry = CarryForward::default();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let full_name = row.get(name_column);
        if full_name.is_empty() {
            continue;
        }
        carry_cell(&mut carry.parent_unit, row, mapping.parent_unit.as_deref());
        carry_cell(&mut carry.unit, row, Some(unit_column));
        carry_cell(&mut carry.team, row, mapping.team.as_deref());

        out.push(NormalizedRow {
            parent_unit: carry.parent_unit.clone(),
            unit: carry
                .unit
                .clone()
                .unwrap_or_else(|| UNASSIGNED_UNIT.to_string()),
            team: carry
                .team
                .clone()
                .unwrap_or_else(|| UNASSIGNED_TEAM.to_string()),
            full_name: full_name.to_string(),
            role: optional_cell(row, mapping.role.as_deref()),
            rank: optional_cell(row, mapping.rank.as_deref()),
            phone: optional_cell(row, mapping.phone.as_deref()),
            email: optional_cell(row, mapping.email.as_deref()),
        });
    }
    tracing::info!(input = rows.len(), normalized = out.len(), "normalized roster rows");
    out
}

fn carry_cell(slot: &mut Option<String>, row: &RawRow, column: Option<&str>) {
    if let Some(value) = optional_cell(row, column) {
        *slot = Some(value);
    }
}

fn optional_cell(row: &RawRow, column: Option<&str>) -> Option<String> {
    let value = row.get(column?);
    (!value.is_empty()).then(|| value.to_string())
}
