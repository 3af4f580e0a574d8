//! Pure projections of normalized rows: candidate units, team groups,
//! distinct people, and the dry-run diff against a registry.

use std::collections::{HashMap, HashSet};

use roster_model::{DryRunResult, NormalizedRow, TeamPair, UnitPair, normalize_key};

use crate::registry::Registry;

/// Rows sharing one `((parent, unit), team)` key, in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamGroup {
    /// Display names from the group's first row.
    pub pair: TeamPair,
    /// Member names in row order, duplicates included.
    pub members: Vec<String>,
}

/// Unique `(parent, unit)` pairs in first-seen order.
pub fn unit_pairs(rows: &[NormalizedRow]) -> Vec<UnitPair> {
    let mut seen = HashSet::new();
    rows.iter()
        .map(|row| UnitPair::new(row.parent_unit.as_deref(), row.unit.clone()))
        .filter(|pair| seen.insert(pair.key()))
        .collect()
}

/// Groups rows by normalized `((parent, unit), team)`, in encounter order of
/// the key. Same-named units under different parents get separate groups.
pub fn team_groups(rows: &[NormalizedRow]) -> Vec<TeamGroup> {
    let mut groups: Vec<TeamGroup> = Vec::new();
    let mut index = HashMap::new();
    for row in rows {
        let pair = TeamPair::new(row.unit.clone(), row.team.clone())
            .with_parent(row.parent_unit.as_deref());
        let slot = *index.entry(pair.key()).or_insert_with(|| {
            groups.push(TeamGroup {
                pair,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(row.full_name.clone());
    }
    groups
}

/// First row per normalized full name, in encounter order.
pub fn distinct_people(rows: &[NormalizedRow]) -> Vec<&NormalizedRow> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(normalize_key(&row.full_name)))
        .collect()
}

/// Computes what an import would create, without touching the directory.
///
/// Teams whose unit does not exist yet are still listed.
pub fn plan(rows: &[NormalizedRow], registry: &Registry) -> DryRunResult {
    let units_to_create = unit_pairs(rows)
        .into_iter()
        .filter(|pair| {
            registry
                .resolve_unit(pair.parent.as_deref(), &pair.name)
                .is_none()
        })
        .collect();

    let teams_to_create = team_groups(rows)
        .into_iter()
        .filter(|group| {
            registry
                .resolve_unit(group.pair.parent.as_deref(), &group.pair.unit)
                .is_none_or(|unit_id| registry.team(unit_id, &group.pair.team).is_none())
        })
        .map(|group| group.pair)
        .collect();

    let people_to_create = distinct_people(rows)
        .into_iter()
        .filter(|row| registry.person_id(&row.full_name).is_none())
        .cloned()
        .collect();

    DryRunResult {
        units_to_create,
        teams_to_create,
        people_to_create,
    }
}
