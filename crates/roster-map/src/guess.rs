//! Best-effort column mapping guesses.

use roster_model::{ColumnMapping, RosterField};

use crate::patterns::matches_field;

/// Order in which fields claim columns. The name is claimed first because
/// its header is the most distinctive; each column binds at most one field.
const GUESS_ORDER: [RosterField; 8] = [
    RosterField::FullName,
    RosterField::ParentUnit,
    RosterField::Unit,
    RosterField::Team,
    RosterField::Role,
    RosterField::Rank,
    RosterField::Phone,
    RosterField::Email,
];

/// Guesses a mapping from detected column names.
///
/// Missing guesses are left unset; callers are expected to review and
/// override the result before normalizing.
pub fn guess_mapping(columns: &[String]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    let mut taken = vec![false; columns.len()];
    for field in GUESS_ORDER {
        let found = columns
            .iter()
            .enumerate()
            .find(|(idx, column)| !taken[*idx] && matches_field(field, column));
        if let Some((idx, column)) = found {
            taken[idx] = true;
            mapping.set(field, Some(column.clone()));
        }
    }
    tracing::debug!(
        bound = mapping.bindings().count(),
        complete = mapping.is_complete(),
        "guessed column mapping"
    );
    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn guesses_english_headers() {
        let mapping = guess_mapping(&cols(&[
            "Parent unit",
            "Unit",
            "Team",
            "Full name",
            "Position",
            "Rank",
            "Phone",
            "Email",
        ]));
        assert_eq!(mapping.parent_unit.as_deref(), Some("Parent unit"));
        assert_eq!(mapping.unit.as_deref(), Some("Unit"));
        assert_eq!(mapping.team.as_deref(), Some("Team"));
        assert_eq!(mapping.full_name.as_deref(), Some("Full name"));
        assert_eq!(mapping.role.as_deref(), Some("Position"));
        assert_eq!(mapping.rank.as_deref(), Some("Rank"));
        assert_eq!(mapping.phone.as_deref(), Some("Phone"));
        assert_eq!(mapping.email.as_deref(), Some("Email"));
    }

    #[test]
    fn guesses_russian_headers() {
        let mapping = guess_mapping(&cols(&[
            "Вышестоящее подразделение",
            "Подразделение",
            "Группа",
            "ФИО",
            "Должность",
            "Звание",
            "Телефон",
            "Эл. почта",
        ]));
        assert_eq!(
            mapping.parent_unit.as_deref(),
            Some("Вышестоящее подразделение")
        );
        assert_eq!(mapping.unit.as_deref(), Some("Подразделение"));
        assert_eq!(mapping.team.as_deref(), Some("Группа"));
        assert_eq!(mapping.full_name.as_deref(), Some("ФИО"));
        assert_eq!(mapping.role.as_deref(), Some("Должность"));
        assert_eq!(mapping.rank.as_deref(), Some("Звание"));
        assert_eq!(mapping.phone.as_deref(), Some("Телефон"));
        assert_eq!(mapping.email.as_deref(), Some("Эл. почта"));
    }

    #[test]
    fn unknown_headers_stay_unmapped() {
        let mapping = guess_mapping(&cols(&["A", "B", "C"]));
        assert_eq!(mapping, ColumnMapping::default());
    }

    #[test]
    fn a_column_binds_only_once() {
        let mapping = guess_mapping(&cols(&["Dept", "Staff"]));
        assert_eq!(mapping.full_name.as_deref(), Some("Staff"));
        assert_eq!(mapping.unit.as_deref(), Some("Dept"));
        assert_eq!(mapping.team, None);
    }
}
