//! Binding of semantic roster fields to detected column names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Semantic fields a roster sheet can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterField {
    ParentUnit,
    Unit,
    Team,
    FullName,
    Role,
    Rank,
    Phone,
    Email,
}

impl RosterField {
    /// All fields in display order.
    pub const ALL: [RosterField; 8] = [
        RosterField::ParentUnit,
        RosterField::Unit,
        RosterField::Team,
        RosterField::FullName,
        RosterField::Role,
        RosterField::Rank,
        RosterField::Phone,
        RosterField::Email,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ParentUnit => "parent_unit",
            Self::Unit => "unit",
            Self::Team => "team",
            Self::FullName => "full_name",
            Self::Role => "role",
            Self::Rank => "rank",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    /// Fields without which normalization produces no rows.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Unit | Self::FullName)
    }
}

impl fmt::Display for RosterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown roster field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for RosterField {
    type Err = UnknownField;

    /// Accepts snake_case, camelCase and kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "parentunit" | "parent" => Ok(Self::ParentUnit),
            "unit" => Ok(Self::Unit),
            "team" => Ok(Self::Team),
            "fullname" | "name" => Ok(Self::FullName),
            "role" => Ok(Self::Role),
            "rank" => Ok(Self::Rank),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Optional column binding for each roster field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ColumnMapping {
    /// Returns the column bound to `field`, if any.
    pub fn get(&self, field: RosterField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Binds or clears `field`. Blank column names clear the binding.
    pub fn set(&mut self, field: RosterField, column: Option<String>) {
        *self.slot_mut(field) = column.filter(|c| !c.trim().is_empty());
    }

    /// Whether both `unit` and `full_name` are bound.
    pub fn is_complete(&self) -> bool {
        self.unit.is_some() && self.full_name.is_some()
    }

    /// Bound fields in display order.
    pub fn bindings(&self) -> impl Iterator<Item = (RosterField, &str)> {
        RosterField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|column| (field, column)))
    }

    /// Overlays every binding of `other` onto `self`.
    pub fn merge(&mut self, other: &ColumnMapping) {
        for (field, column) in other.bindings() {
            self.set(field, Some(column.to_string()));
        }
    }

    fn slot(&self, field: RosterField) -> &Option<String> {
        match field {
            RosterField::ParentUnit => &self.parent_unit,
            RosterField::Unit => &self.unit,
            RosterField::Team => &self.team,
            RosterField::FullName => &self.full_name,
            RosterField::Role => &self.role,
            RosterField::Rank => &self.rank,
            RosterField::Phone => &self.phone,
            RosterField::Email => &self.email,
        }
    }

    fn slot_mut(&mut self, field: RosterField) -> &mut Option<String> {
        match field {
            RosterField::ParentUnit => &mut self.parent_unit,
            RosterField::Unit => &mut self.unit,
            RosterField::Team => &mut self.team,
            RosterField::FullName => &mut self.full_name,
            RosterField::Role => &mut self.role,
            RosterField::Rank => &mut self.rank,
            RosterField::Phone => &mut self.phone,
            RosterField::Email => &mut self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_spellings() {
        assert_eq!("fullName".parse::<RosterField>(), Ok(RosterField::FullName));
        assert_eq!("full_name".parse::<RosterField>(), Ok(RosterField::FullName));
        assert_eq!("parent-unit".parse::<RosterField>(), Ok(RosterField::ParentUnit));
        assert!("salary".parse::<RosterField>().is_err());
    }

    #[test]
    fn set_and_merge_bindings() {
        let mut mapping = ColumnMapping::default();
        mapping.set(RosterField::Unit, Some("Dept".into()));
        mapping.set(RosterField::Team, Some("  ".into()));
        assert_eq!(mapping.get(RosterField::Unit), Some("Dept"));
        assert_eq!(mapping.get(RosterField::Team), None);
        assert!(!mapping.is_complete());

        let mut overrides = ColumnMapping::default();
        overrides.set(RosterField::FullName, Some("Name".into()));
        overrides.set(RosterField::Unit, Some("Division".into()));
        mapping.merge(&overrides);

        assert!(mapping.is_complete());
        let bound: Vec<_> = mapping.bindings().collect();
        assert_eq!(
            bound,
            vec![
                (RosterField::Unit, "Division"),
                (RosterField::FullName, "Name")
            ]
        );
    }
}
