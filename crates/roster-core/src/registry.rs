//! In-memory snapshot of the remote directory.

use std::collections::HashMap;

use roster_model::{Person, Team, TeamKey, Unit, UnitKey, normalize_key};

use crate::directory::Directory;
use crate::error::ImportError;

/// Lookup indices over units, teams and people, keyed by normalized names.
///
/// Built once per run and updated as entities are created, so later steps
/// see earlier creations.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    unit_ids: HashMap<UnitKey, i64>,
    unit_ids_by_name: HashMap<String, i64>,
    units: HashMap<i64, Unit>,
    teams: HashMap<TeamKey, Team>,
    person_ids: HashMap<String, i64>,
}

impl Registry {
    /// Reads units, teams and people concurrently and indexes them.
    pub async fn load<D: Directory + ?Sized>(directory: &D) -> Result<Self, ImportError> {
        let (units, teams, people) = futures::try_join!(
            directory.list_units(),
            directory.list_teams(),
            directory.list_people(),
        )?;
        let registry = Self::from_parts(units, teams, people);
        tracing::info!(
            units = registry.units.len(),
            teams = registry.teams.len(),
            people = registry.person_ids.len(),
            "loaded directory registry"
        );
        Ok(registry)
    }

    pub fn from_parts(units: Vec<Unit>, teams: Vec<Team>, people: Vec<Person>) -> Self {
        let mut registry = Self {
            units: units.into_iter().map(|unit| (unit.id, unit)).collect(),
            ..Self::default()
        };
        // Sorted so duplicate names resolve to the oldest record.
        let mut ids: Vec<i64> = registry.units.keys().copied().collect();
        ids.sort_unstable();
        for id in ids {
            registry.index_unit(id);
        }
        for team in teams {
            if let Some(unit_id) = team.unit_id {
                registry
                    .teams
                    .entry(TeamKey::new(unit_id, &team.name))
                    .or_insert(team);
            }
        }
        for person in &people {
            registry.insert_person(person);
        }
        registry
    }

    /// Finds a unit as the sheet names it. With a parent the match is scoped
    /// to that parent; without one any unit of that name matches.
    pub fn resolve_unit(&self, parent: Option<&str>, name: &str) -> Option<i64> {
        let key = UnitKey::new(parent, name);
        if key.parent.is_some() {
            self.unit_ids.get(&key).copied()
        } else {
            self.unit_id_by_name(name)
        }
    }

    pub fn unit_id_by_name(&self, name: &str) -> Option<i64> {
        self.unit_ids_by_name.get(&normalize_key(name)).copied()
    }

    pub fn unit(&self, id: i64) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn insert_unit(&mut self, unit: Unit) {
        let id = unit.id;
        self.units.insert(id, unit);
        self.index_unit(id);
    }

    pub fn team(&self, unit_id: i64, name: &str) -> Option<&Team> {
        self.teams.get(&TeamKey::new(unit_id, name))
    }

    /// Stores `team` under `unit_id`, replacing any previous record.
    pub fn insert_team(&mut self, unit_id: i64, mut team: Team) {
        team.unit_id = Some(unit_id);
        self.teams.insert(TeamKey::new(unit_id, &team.name), team);
    }

    pub fn person_id(&self, full_name: &str) -> Option<i64> {
        self.person_ids.get(&normalize_key(full_name)).copied()
    }

    /// Indexes a person; an existing record with the same name wins.
    pub fn insert_person(&mut self, person: &Person) {
        self.person_ids
            .entry(normalize_key(&person.full_name))
            .or_insert(person.id);
    }

    fn index_unit(&mut self, id: i64) {
        let Some(unit) = self.units.get(&id) else {
            return;
        };
        let parent_name = unit
            .parent_id
            .and_then(|parent_id| self.units.get(&parent_id))
            .map(|parent| parent.name.as_str());
        let key = UnitKey::new(parent_name, &unit.name);
        let by_name = normalize_key(&unit.name);
        self.unit_ids.entry(key).or_insert(id);
        self.unit_ids_by_name.entry(by_name).or_insert(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: i64, name: &str, parent_id: Option<i64>) -> Unit {
        Unit {
            id,
            name: name.into(),
            parent_id,
            description: None,
        }
    }

    fn person(id: i64, name: &str) -> Person {
        Person {
            id,
            full_name: name.into(),
            phone: None,
            email: None,
            role: None,
            rank: None,
        }
    }

    #[test]
    fn units_are_scoped_by_parent_name() {
        // Child listed before its parent.
        let registry = Registry::from_parts(
            vec![
                unit(3, "Ops", Some(2)),
                unit(1, "HQ", None),
                unit(2, "North", Some(1)),
                unit(4, "Ops", Some(1)),
            ],
            vec![],
            vec![],
        );
        assert_eq!(registry.resolve_unit(Some("north"), "OPS"), Some(3));
        assert_eq!(registry.resolve_unit(Some("HQ"), "Ops"), Some(4));
        assert_eq!(registry.resolve_unit(Some("South"), "Ops"), None);
        assert_eq!(registry.resolve_unit(None, " ops "), Some(3));
        assert_eq!(registry.unit_id_by_name("hq"), Some(1));
    }

    #[test]
    fn teams_without_unit_are_not_indexed() {
        let registry = Registry::from_parts(
            vec![unit(1, "HQ", None)],
            vec![
                Team {
                    id: 10,
                    name: "Alpha".into(),
                    unit_id: Some(1),
                    member_ids: vec![5],
                },
                Team {
                    id: 11,
                    name: "Loose".into(),
                    unit_id: None,
                    member_ids: vec![],
                },
            ],
            vec![],
        );
        assert_eq!(registry.team(1, " alpha").map(|t| t.id), Some(10));
        assert!(registry.team(1, "Loose").is_none());
    }

    #[test]
    fn inserts_are_visible_immediately() {
        let mut registry = Registry::from_parts(vec![], vec![], vec![person(1, "Ivanov I.")]);
        assert_eq!(registry.person_id("IVANOV I. "), Some(1));
        registry.insert_person(&person(2, "ivanov i."));
        assert_eq!(registry.person_id("Ivanov I."), Some(1));

        registry.insert_unit(unit(7, "HQ", None));
        registry.insert_unit(unit(8, "Ops", Some(7)));
        assert_eq!(registry.resolve_unit(Some("hq"), "ops"), Some(8));
        assert_eq!(registry.unit(8).map(|u| u.parent_id), Some(Some(7)));
    }
}
