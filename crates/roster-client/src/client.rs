//! REST client for the organizational directory.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder, StatusCode};
use roster_core::Directory;
use roster_model::{
    DirectoryError, DirectoryResult, NewPerson, NewTeam, NewUnit, Person, Team, Unit,
};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::types::{
    CreateTeamRequest, ErrorResponse, PersonResponse, ReplaceMembersRequest, TeamResponse,
};

const USER_AGENT_VALUE: &str = concat!("roster-import/", env!("CARGO_PKG_VERSION"));

const UNITS_PATH: &str = "organization/units";
const TEAMS_PATH: &str = "teams";
const PEOPLE_PATH: &str = "pyrotechnicians";

/// [`Directory`] backed by the directory's HTTP API.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl DirectoryClient {
    pub fn new(config: ClientConfig) -> DirectoryResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| DirectoryError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        tracing::debug!(%method, %url, "directory request");
        let builder = self.client.request(method, url);
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> DirectoryResult<T> {
        let response = builder.send().await.map_err(transport_error)?;
        handle_response(response).await
    }
}

/// Checks the status and decodes a JSON body.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> DirectoryResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| DirectoryError::Decode(e.to_string()))
}

fn status_error(status: StatusCode, body: &str) -> DirectoryError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.message())
        .unwrap_or_else(|_| body.trim().to_string());
    if status == StatusCode::CONFLICT {
        DirectoryError::Conflict(message)
    } else {
        DirectoryError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

fn transport_error(error: reqwest::Error) -> DirectoryError {
    if error.is_decode() {
        DirectoryError::Decode(error.to_string())
    } else {
        DirectoryError::Transport(error.to_string())
    }
}

#[async_trait]
impl Directory for DirectoryClient {
    async fn list_units(&self) -> DirectoryResult<Vec<Unit>> {
        self.send(self.request(Method::GET, UNITS_PATH)).await
    }

    async fn list_teams(&self) -> DirectoryResult<Vec<Team>> {
        let teams: Vec<TeamResponse> = self.send(self.request(Method::GET, TEAMS_PATH)).await?;
        Ok(teams.into_iter().map(Team::from).collect())
    }

    async fn list_people(&self) -> DirectoryResult<Vec<Person>> {
        let people: Vec<PersonResponse> =
            self.send(self.request(Method::GET, PEOPLE_PATH)).await?;
        Ok(people.into_iter().map(Person::from).collect())
    }

    async fn create_unit(&self, unit: &NewUnit) -> DirectoryResult<Unit> {
        self.send(self.request(Method::POST, UNITS_PATH).json(unit)).await
    }

    async fn create_person(&self, person: &NewPerson) -> DirectoryResult<Person> {
        let created: PersonResponse = self
            .send(self.request(Method::POST, PEOPLE_PATH).json(person))
            .await?;
        Ok(created.into())
    }

    async fn create_team(&self, team: &NewTeam) -> DirectoryResult<Team> {
        let body = CreateTeamRequest::from(team);
        let created: TeamResponse = self
            .send(self.request(Method::POST, TEAMS_PATH).json(&body))
            .await?;
        Ok(created.into())
    }

    async fn replace_team_members(
        &self,
        team_id: i64,
        member_ids: &[i64],
    ) -> DirectoryResult<Team> {
        let path = format!("{TEAMS_PATH}/{team_id}");
        let body = ReplaceMembersRequest { member_ids };
        let updated: TeamResponse = self
            .send(self.request(Method::PATCH, &path).json(&body))
            .await?;
        Ok(updated.into())
    }
}
