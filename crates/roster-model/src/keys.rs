//! Normalized identities used for every registry lookup.

use serde::{Deserialize, Serialize};

/// Normalizes a sheet or directory value for matching: trim + case-fold.
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Identity of a unit scoped by its parent's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitKey {
    pub parent: Option<String>,
    pub name: String,
}

impl UnitKey {
    /// Builds a key, normalizing both parts. A blank parent counts as no parent.
    pub fn new(parent: Option<&str>, name: &str) -> Self {
        let parent = parent.map(normalize_key).filter(|p| !p.is_empty());
        Self {
            parent,
            name: normalize_key(name),
        }
    }
}

/// Identity of a team within a persisted unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamKey {
    pub unit_id: i64,
    pub name: String,
}

impl TeamKey {
    pub fn new(unit_id: i64, name: &str) -> Self {
        Self {
            unit_id,
            name: normalize_key(name),
        }
    }
}
