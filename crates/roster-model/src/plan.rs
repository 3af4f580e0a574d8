//! Dry-run output: what an import would create.

use serde::{Deserialize, Serialize};

use crate::keys::{UnitKey, normalize_key};
use crate::row::NormalizedRow;

/// A candidate unit as named in the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPair {
    pub parent: Option<String>,
    pub name: String,
}

impl UnitPair {
    pub fn new(parent: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            parent: parent
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            name: name.into(),
        }
    }

    pub fn key(&self) -> UnitKey {
        UnitKey::new(self.parent.as_deref(), &self.name)
    }
}

/// A candidate team as named in the sheet, scoped like its unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub unit: String,
    pub team: String,
}

impl TeamPair {
    pub fn new(unit: impl Into<String>, team: impl Into<String>) -> Self {
        Self {
            parent: None,
            unit: unit.into(),
            team: team.into(),
        }
    }

    /// Sets the parent of the owning unit. A blank parent counts as none.
    #[must_use]
    pub fn with_parent(mut self, parent: Option<&str>) -> Self {
        self.parent = parent
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        self
    }

    /// Identity of the owning unit.
    pub fn unit_key(&self) -> UnitKey {
        UnitKey::new(self.parent.as_deref(), &self.unit)
    }

    /// Normalized `((parent, unit), team)` grouping key.
    pub fn key(&self) -> (UnitKey, String) {
        (self.unit_key(), normalize_key(&self.team))
    }
}

/// Creation plan computed without side effects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryRunResult {
    pub units_to_create: Vec<UnitPair>,
    pub teams_to_create: Vec<TeamPair>,
    pub people_to_create: Vec<NormalizedRow>,
}

impl DryRunResult {
    /// True when the directory already matches the sheet's entities.
    pub fn is_empty(&self) -> bool {
        self.units_to_create.is_empty()
            && self.teams_to_create.is_empty()
            && self.people_to_create.is_empty()
    }
}
