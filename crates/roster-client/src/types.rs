//! Wire types of the directory REST API.

use roster_model::{NewTeam, Person, Team};
use serde::{Deserialize, Serialize};

/// Member entry embedded in team responses. Only the id is used.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMember {
    pub id: i64,
}

/// Team as returned by `GET /teams`, `POST /teams` and `PATCH /teams/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub organization_unit_id: Option<i64>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl From<TeamResponse> for Team {
    fn from(team: TeamResponse) -> Self {
        Self {
            id: team.id,
            name: team.name,
            unit_id: team.organization_unit_id,
            member_ids: team.members.into_iter().map(|m| m.id).collect(),
        }
    }
}

/// Body of `POST /teams`. The import never assigns a lead.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTeamRequest<'a> {
    pub name: &'a str,
    pub organization_unit_id: i64,
    pub lead_id: Option<i64>,
    pub member_ids: &'a [i64],
}

impl<'a> From<&'a NewTeam> for CreateTeamRequest<'a> {
    fn from(team: &'a NewTeam) -> Self {
        Self {
            name: &team.name,
            organization_unit_id: team.unit_id,
            lead_id: None,
            member_ids: &team.member_ids,
        }
    }
}

/// Body of `PATCH /teams/{id}`; replaces the member list.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaceMembersRequest<'a> {
    pub member_ids: &'a [i64],
}

/// Person payload of `GET`/`POST /pyrotechnicians`. Account fields the
/// backend adds are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonResponse {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
}

impl From<PersonResponse> for Person {
    fn from(person: PersonResponse) -> Self {
        Self {
            id: person.id,
            full_name: person.full_name,
            phone: person.phone,
            email: person.email.filter(|email| !email.is_empty()),
            role: person.role,
            rank: person.rank,
        }
    }
}

/// FastAPI error body: `{"detail": "..."}` or a validation error list.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_response_collects_member_ids() {
        let json = r#"{
            "id": 4,
            "name": "Alpha",
            "lead": null,
            "organization_unit_id": 2,
            "members": [
                {"id": 7, "full_name": "Ivanov", "email": "i@example.org", "is_active": true},
                {"id": 9, "full_name": "Petrov", "email": "p@example.org", "is_active": true}
            ]
        }"#;
        let team: Team = serde_json::from_str::<TeamResponse>(json).unwrap().into();
        assert_eq!(team.unit_id, Some(2));
        assert_eq!(team.member_ids, vec![7, 9]);
    }

    #[test]
    fn create_team_body_matches_backend() {
        let team = NewTeam {
            name: "Alpha".into(),
            unit_id: 2,
            member_ids: vec![7],
        };
        let body = serde_json::to_value(CreateTeamRequest::from(&team)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Alpha",
                "organization_unit_id": 2,
                "lead_id": null,
                "member_ids": [7]
            })
        );
    }

    #[test]
    fn error_detail_forms() {
        let plain: ErrorResponse =
            serde_json::from_str(r#"{"detail": "Team not found"}"#).unwrap();
        assert_eq!(plain.message(), "Team not found");
        let listed: ErrorResponse =
            serde_json::from_str(r#"{"detail": [{"loc": ["body", "email"]}]}"#).unwrap();
        assert!(listed.message().contains("email"));
    }
}
