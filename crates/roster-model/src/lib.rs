//! Shared data model for the roster import engine.
//!
//! Types here are transient: they live for one extraction-to-import run and
//! are never persisted by the engine itself.

pub mod directory;
pub mod error;
pub mod keys;
pub mod mapping;
pub mod plan;
pub mod progress;
pub mod row;

pub use directory::{NewPerson, NewTeam, NewUnit, Person, Team, Unit};
pub use error::{DirectoryError, DirectoryResult};
pub use keys::{TeamKey, UnitKey, normalize_key};
pub use mapping::{ColumnMapping, RosterField};
pub use plan::{DryRunResult, TeamPair, UnitPair};
pub use progress::{ImportLog, LogLevel, LogLine, ProgressState};
pub use row::{NormalizedRow, RawRow, UNASSIGNED_TEAM, UNASSIGNED_UNIT};
