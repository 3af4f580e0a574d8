//! Roster reconciliation engine.
//!
//! Takes normalized roster rows and brings a remote organizational
//! directory in line with them:
//!
//! 1. [`Registry::load`] snapshots units, teams and people.
//! 2. [`plan`] computes a side-effect free dry run.
//! 3. [`RosterImporter::execute`] creates missing units parent-first,
//!    creates missing people, then creates teams or replaces their members.
//!
//! Matching is by trimmed, case-folded name, so re-running an import
//! against the same sheet creates nothing new.
//!
//! # Example
//!
//! ```ignore
//! use roster_core::{CancelFlag, MemoryDirectory, RosterImporter, normalize};
//!
//! let rows = normalize(&raw_rows, &mapping);
//! let importer = RosterImporter::new(MemoryDirectory::new());
//! let preview = importer.dry_run(&rows).await?;
//! let mut on_event = |event: &roster_core::ImportEvent| println!("{event:?}");
//! let report = importer.execute(&rows, &mut on_event, &CancelFlag::new()).await?;
//! ```

mod cancel;
mod directory;
mod engine;
mod error;
mod memory;
mod normalize;
mod options;
mod plan;
mod progress;
mod registry;

pub mod people;
pub mod teams;
pub mod units;

pub use cancel::CancelFlag;
pub use directory::Directory;
pub use engine::{ColumnDetection, ImportReport, ImportStatus, RosterImporter, detect_columns};
pub use error::{ImportError, ImportFailure, MutationKind};
pub use memory::{DirectorySnapshot, MemoryDirectory};
pub use normalize::normalize;
pub use options::{DEFAULT_MAX_UNIT_PASSES, ImportOptions};
pub use plan::{TeamGroup, distinct_people, plan, team_groups, unit_pairs};
pub use progress::{CreationCounts, ImportEvent, ImportObserver, NoopObserver, Reporter};
pub use registry::Registry;
pub use units::UnitOutcome;
