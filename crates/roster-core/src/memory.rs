//! In-process [`Directory`] backed by a serializable snapshot.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use roster_model::{
    DirectoryError, DirectoryResult, NewPerson, NewTeam, NewUnit, Person, Team, Unit,
    normalize_key,
};
use serde::{Deserialize, Serialize};

use crate::directory::Directory;

/// Full directory contents, as stored in a JSON snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub people: Vec<Person>,
}

impl DirectorySnapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug)]
struct State {
    snapshot: DirectorySnapshot,
    next_id: i64,
    mutations: usize,
    fail_after: Option<usize>,
}

/// A directory held in memory. Rejects duplicate names the way the HTTP
/// backend does (`Conflict`) and counts successful mutations.
#[derive(Debug)]
pub struct MemoryDirectory {
    state: Mutex<State>,
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::from_snapshot(DirectorySnapshot::default())
    }
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: DirectorySnapshot) -> Self {
        let max_id = snapshot
            .units
            .iter()
            .map(|u| u.id)
            .chain(snapshot.teams.iter().map(|t| t.id))
            .chain(snapshot.people.iter().map(|p| p.id))
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(State {
                snapshot,
                next_id: max_id + 1,
                mutations: 0,
                fail_after: None,
            }),
        }
    }

    /// Makes every mutation after the first `count` successful ones fail
    /// with a 503 status.
    #[must_use]
    pub fn fail_after(self, count: usize) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.fail_after = Some(count);
        }
        self
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> DirectorySnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot
            .clone()
    }

    /// Successful create and replace calls so far.
    pub fn mutation_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .mutations
    }

    fn lock(&self) -> DirectoryResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| DirectoryError::Transport("memory directory lock poisoned".into()))
    }

    /// Locks the state for a mutation, honoring the injected failure point.
    fn lock_for_mutation(&self) -> DirectoryResult<MutexGuard<'_, State>> {
        let state = self.lock()?;
        match state.fail_after {
            Some(limit) if state.mutations >= limit => Err(DirectoryError::Status {
                status: 503,
                message: "injected failure".into(),
            }),
            _ => Ok(state),
        }
    }
}

impl State {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.mutations += 1;
        id
    }

    fn ensure_unit(&self, id: i64) -> DirectoryResult<()> {
        if self.snapshot.units.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(DirectoryError::NotFound { entity: "unit", id })
        }
    }

    fn ensure_people(&self, ids: &[i64]) -> DirectoryResult<()> {
        match ids
            .iter()
            .find(|id| !self.snapshot.people.iter().any(|p| p.id == **id))
        {
            Some(&id) => Err(DirectoryError::NotFound {
                entity: "person",
                id,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn list_units(&self) -> DirectoryResult<Vec<Unit>> {
        Ok(self.lock()?.snapshot.units.clone())
    }

    async fn list_teams(&self) -> DirectoryResult<Vec<Team>> {
        Ok(self.lock()?.snapshot.teams.clone())
    }

    async fn list_people(&self) -> DirectoryResult<Vec<Person>> {
        Ok(self.lock()?.snapshot.people.clone())
    }

    async fn create_unit(&self, unit: &NewUnit) -> DirectoryResult<Unit> {
        let mut state = self.lock_for_mutation()?;
        if let Some(parent_id) = unit.parent_id {
            state.ensure_unit(parent_id)?;
        }
        let key = normalize_key(&unit.name);
        if state
            .snapshot
            .units
            .iter()
            .any(|u| u.parent_id == unit.parent_id && normalize_key(&u.name) == key)
        {
            return Err(DirectoryError::Conflict(format!(
                "unit '{}' already exists",
                unit.name
            )));
        }
        let created = Unit {
            id: state.allocate_id(),
            name: unit.name.clone(),
            parent_id: unit.parent_id,
            description: unit.description.clone(),
        };
        state.snapshot.units.push(created.clone());
        Ok(created)
    }

    async fn create_person(&self, person: &NewPerson) -> DirectoryResult<Person> {
        let mut state = self.lock_for_mutation()?;
        let key = normalize_key(&person.full_name);
        if state
            .snapshot
            .people
            .iter()
            .any(|p| normalize_key(&p.full_name) == key)
        {
            return Err(DirectoryError::Conflict(format!(
                "person '{}' already exists",
                person.full_name
            )));
        }
        let created = Person {
            id: state.allocate_id(),
            full_name: person.full_name.clone(),
            phone: person.phone.clone(),
            email: person.email.clone(),
            role: person.role.clone(),
            rank: person.rank.clone(),
        };
        state.snapshot.people.push(created.clone());
        Ok(created)
    }

    async fn create_team(&self, team: &NewTeam) -> DirectoryResult<Team> {
        let mut state = self.lock_for_mutation()?;
        state.ensure_unit(team.unit_id)?;
        state.ensure_people(&team.member_ids)?;
        let key = normalize_key(&team.name);
        if state
            .snapshot
            .teams
            .iter()
            .any(|t| t.unit_id == Some(team.unit_id) && normalize_key(&t.name) == key)
        {
            return Err(DirectoryError::Conflict(format!(
                "team '{}' already exists",
                team.name
            )));
        }
        let created = Team {
            id: state.allocate_id(),
            name: team.name.clone(),
            unit_id: Some(team.unit_id),
            member_ids: team.member_ids.clone(),
        };
        state.snapshot.teams.push(created.clone());
        Ok(created)
    }

    async fn replace_team_members(
        &self,
        team_id: i64,
        member_ids: &[i64],
    ) -> DirectoryResult<Team> {
        let mut state = self.lock_for_mutation()?;
        state.ensure_people(member_ids)?;
        let team = state
            .snapshot
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(DirectoryError::NotFound {
                entity: "team",
                id: team_id,
            })?;
        team.member_ids = member_ids.to_vec();
        let updated = team.clone();
        state.mutations += 1;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_duplicates_and_unknown_references() {
        let directory = MemoryDirectory::new();
        let hq = directory
            .create_unit(&NewUnit {
                name: "HQ".into(),
                parent_id: None,
                description: None,
            })
            .await
            .unwrap();
        let dup = directory
            .create_unit(&NewUnit {
                name: " hq".into(),
                parent_id: None,
                description: None,
            })
            .await;
        assert!(matches!(dup, Err(DirectoryError::Conflict(_))));

        let team = directory
            .create_team(&NewTeam {
                name: "Alpha".into(),
                unit_id: hq.id,
                member_ids: vec![999],
            })
            .await;
        assert!(matches!(
            team,
            Err(DirectoryError::NotFound {
                entity: "person",
                id: 999
            })
        ));
        assert_eq!(directory.mutation_count(), 1);
    }

    #[tokio::test]
    async fn injected_failure_after_limit() {
        let directory = MemoryDirectory::new().fail_after(0);
        let err = directory
            .create_person(&NewPerson {
                full_name: "Ivanov".into(),
                phone: None,
                email: None,
                role: None,
                rank: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Status { status: 503, .. }));
        assert!(directory.list_people().await.unwrap().is_empty());
    }

    #[test]
    fn snapshot_json_round_trip_allocates_fresh_ids() {
        let json = r#"{"units":[{"id":7,"name":"HQ"}],"people":[{"id":9,"full_name":"Ivanov"}]}"#;
        let snapshot = DirectorySnapshot::from_json(json).unwrap();
        assert!(snapshot.teams.is_empty());
        let directory = MemoryDirectory::from_snapshot(snapshot.clone());
        assert_eq!(directory.snapshot(), snapshot);
        assert_eq!(directory.lock().unwrap().next_id, 10);
    }
}
