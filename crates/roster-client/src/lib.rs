//! HTTP access to the organizational directory.
//!
//! [`DirectoryClient`] implements [`roster_core::Directory`] over the REST
//! API (`/organization/units`, `/teams`, `/pyrotechnicians`). Team member
//! lists are replaced with `PATCH /teams/{id}`.

mod client;
mod config;
mod types;

pub use client::DirectoryClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use types::{
    CreateTeamRequest, ErrorResponse, PersonResponse, ReplaceMembersRequest, TeamMember,
    TeamResponse,
};
