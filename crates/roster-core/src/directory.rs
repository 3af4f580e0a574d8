//! The remote organizational directory as seen by the engine.

use std::sync::Arc;

use async_trait::async_trait;
use roster_model::{DirectoryResult, NewPerson, NewTeam, NewUnit, Person, Team, Unit};

/// Read and mutate operations the import engine needs from a directory.
///
/// `replace_team_members` must substitute the member list entirely; the
/// sync step relies on it to drop people removed from the sheet.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn list_units(&self) -> DirectoryResult<Vec<Unit>>;

    async fn list_teams(&self) -> DirectoryResult<Vec<Team>>;

    async fn list_people(&self) -> DirectoryResult<Vec<Person>>;

    async fn create_unit(&self, unit: &NewUnit) -> DirectoryResult<Unit>;

    async fn create_person(&self, person: &NewPerson) -> DirectoryResult<Person>;

    async fn create_team(&self, team: &NewTeam) -> DirectoryResult<Team>;

    async fn replace_team_members(
        &self,
        team_id: i64,
        member_ids: &[i64],
    ) -> DirectoryResult<Team>;
}

#[async_trait]
impl<T: Directory + ?Sized> Directory for Arc<T> {
    async fn list_units(&self) -> DirectoryResult<Vec<Unit>> {
        (**self).list_units().await
    }

    async fn list_teams(&self) -> DirectoryResult<Vec<Team>> {
        (**self).list_teams().await
    }

    async fn list_people(&self) -> DirectoryResult<Vec<Person>> {
        (**self).list_people().await
    }

    async fn create_unit(&self, unit: &NewUnit) -> DirectoryResult<Unit> {
        (**self).create_unit(unit).await
    }

    async fn create_person(&self, person: &NewPerson) -> DirectoryResult<Person> {
        (**self).create_person(person).await
    }

    async fn create_team(&self, team: &NewTeam) -> DirectoryResult<Team> {
        (**self).create_team(team).await
    }

    async fn replace_team_members(
        &self,
        team_id: i64,
        member_ids: &[i64],
    ) -> DirectoryResult<Team> {
        (**self).replace_team_members(team_id, member_ids).await
    }
}
