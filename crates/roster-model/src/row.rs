//! Raw sheet rows and the normalized records derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder unit for rows with no unit value and nothing to inherit.
pub const UNASSIGNED_UNIT: &str = "Unassigned unit";
/// Placeholder team for rows with no team value and nothing to inherit.
pub const UNASSIGNED_TEAM: &str = "Unassigned team";

/// One data row below the header, keyed by detected column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub cells: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed cell for `column`, or `""` when absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(|v| v.trim()).unwrap_or("")
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into().trim().to_string());
    }

    /// True when every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

/// A roster record after fill-down resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub parent_unit: Option<String>,
    pub unit: String,
    pub team: String,
    pub full_name: String,
    pub role: Option<String>,
    pub rank: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NormalizedRow {
    /// Minimal row with only the hierarchy and name filled in.
    pub fn new(
        parent_unit: Option<&str>,
        unit: impl Into<String>,
        team: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            parent_unit: parent_unit.map(str::to_string),
            unit: unit.into(),
            team: team.into(),
            full_name: full_name.into(),
            role: None,
            rank: None,
            phone: None,
            email: None,
        }
    }
}
