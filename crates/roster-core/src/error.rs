//! Error types for registry loading and import execution.

use std::fmt;

use roster_model::DirectoryError;
use thiserror::Error;

use crate::engine::ImportReport;

/// Remote mutation kinds, named in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    CreateUnit,
    CreatePerson,
    CreateTeam,
    ReplaceTeamMembers,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateUnit => "create unit",
            Self::CreatePerson => "create person",
            Self::CreateTeam => "create team",
            Self::ReplaceTeamMembers => "replace team members",
        })
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    /// One of the initial directory reads failed.
    #[error("failed to load directory registry: {source}")]
    RegistryFetch {
        #[source]
        source: DirectoryError,
    },

    /// A create or replace call failed; earlier mutations stay applied.
    #[error("failed to {operation} '{subject}': {source}")]
    RemoteMutation {
        operation: MutationKind,
        subject: String,
        #[source]
        source: DirectoryError,
    },

    /// The caller raised the cancel flag.
    #[error("import canceled")]
    Canceled,
}

impl ImportError {
    pub(crate) fn mutation(
        operation: MutationKind,
        subject: impl Into<String>,
        source: DirectoryError,
    ) -> Self {
        Self::RemoteMutation {
            operation,
            subject: subject.into(),
            source,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}

impl From<DirectoryError> for ImportError {
    fn from(source: DirectoryError) -> Self {
        Self::RegistryFetch { source }
    }
}

/// An aborted execution together with everything done before the abort.
#[derive(Debug, Error)]
#[error("import aborted")]
pub struct ImportFailure {
    #[source]
    pub error: ImportError,
    pub report: ImportReport,
}

impl ImportFailure {
    pub fn new(error: ImportError, report: ImportReport) -> Self {
        Self { error, report }
    }
}
