//! The import pipeline: column detection, dry-run and ordered execution.

use roster_ingest::{RosterTable, TableFormat, read_table_bytes};
use roster_map::guess_mapping;
use roster_model::{
    ColumnMapping, DryRunResult, ImportLog, NormalizedRow, ProgressState, UnitPair,
};
use serde::Serialize;
use tracing::Instrument;

use crate::cancel::CancelFlag;
use crate::directory::Directory;
use crate::error::{ImportError, ImportFailure};
use crate::options::ImportOptions;
use crate::plan::{distinct_people, plan, team_groups, unit_pairs};
use crate::progress::{CreationCounts, ImportObserver, Reporter};
use crate::registry::Registry;
use crate::{people, teams, units};

/// Columns found in a roster file and the mapping guessed from them.
#[derive(Debug, Clone)]
pub struct ColumnDetection {
    pub columns: Vec<String>,
    pub guessed: ColumnMapping,
    pub table: RosterTable,
}

/// Reads the first table in `bytes` and guesses a column mapping.
pub fn detect_columns(bytes: &[u8], format: TableFormat) -> roster_ingest::Result<ColumnDetection> {
    let table = read_table_bytes(bytes, format)?;
    let guessed = guess_mapping(&table.columns);
    Ok(ColumnDetection {
        columns: table.columns.clone(),
        guessed,
        table,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Completed,
    Canceled,
    Failed,
}

/// Everything an execution run did, complete or not.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub status: ImportStatus,
    pub progress: ProgressState,
    pub log: ImportLog,
    pub counts: CreationCounts,
    pub unresolved_units: Vec<UnitPair>,
}

impl ImportReport {
    fn empty(status: ImportStatus) -> Self {
        Self {
            status,
            progress: ProgressState::default(),
            log: ImportLog::new(),
            counts: CreationCounts::default(),
            unresolved_units: Vec::new(),
        }
    }
}

/// Reconciles normalized roster rows with a [`Directory`].
#[derive(Debug)]
pub struct RosterImporter<D> {
    directory: D,
    options: ImportOptions,
}

impl<D: Directory> RosterImporter<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            options: ImportOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Snapshots the directory.
    pub async fn load_registry(&self) -> Result<Registry, ImportError> {
        Registry::load(&self.directory)
            .instrument(tracing::info_span!("registry"))
            .await
    }

    /// Computes what [`execute`](Self::execute) would create. Only reads
    /// from the directory.
    pub async fn dry_run(&self, rows: &[NormalizedRow]) -> Result<DryRunResult, ImportError> {
        let registry = self.load_registry().await?;
        let result = plan(rows, &registry);
        tracing::info!(
            units = result.units_to_create.len(),
            teams = result.teams_to_create.len(),
            people = result.people_to_create.len(),
            "computed dry run"
        );
        Ok(result)
    }

    /// Creates missing units (parents first), then missing people, then
    /// creates or replaces team memberships.
    ///
    /// Stops at the first failed mutation and returns the partial report
    /// inside [`ImportFailure`]; nothing is rolled back. A raised cancel flag
    /// ends the run with [`ImportStatus::Canceled`] instead of an error.
    pub async fn execute(
        &self,
        rows: &[NormalizedRow],
        observer: &mut dyn ImportObserver,
        cancel: &CancelFlag,
    ) -> Result<ImportReport, ImportFailure> {
        let mut registry = self.load_registry().await.map_err(|error| {
            ImportFailure::new(error, ImportReport::empty(ImportStatus::Failed))
        })?;

        let pairs = unit_pairs(rows);
        let pending_units = pairs
            .iter()
            .filter(|pair| {
                registry
                    .resolve_unit(pair.parent.as_deref(), &pair.name)
                    .is_none()
            })
            .count();
        let groups = team_groups(rows);
        let total = pending_units + distinct_people(rows).len() + groups.len();
        tracing::info!(
            rows = rows.len(),
            pending_units,
            groups = groups.len(),
            total,
            "starting import"
        );

        let mut reporter = Reporter::new(total, observer);
        let mut unresolved_units = Vec::new();
        let outcome = async {
            let outcome = units::create_units(
                &self.directory,
                &mut registry,
                &mut reporter,
                cancel,
                &pairs,
                self.options.max_unit_passes,
                self.options.unit_description.as_deref(),
            )
            .instrument(tracing::info_span!("units"))
            .await?;
            for pair in &outcome.unresolved {
                match pair.parent.as_deref() {
                    Some(parent) if registry.unit_id_by_name(parent).is_none() => {
                        reporter.warn(format!(
                            "unit \"{}\" was not created: parent \"{parent}\" not found",
                            pair.name
                        ));
                    }
                    Some(_) => reporter.warn(format!(
                        "unit \"{}\" was not created: pass limit reached",
                        pair.name
                    )),
                    None => reporter.warn(format!("unit \"{}\" was not created", pair.name)),
                }
                reporter.counts_mut().units_unresolved += 1;
                reporter.advance();
            }
            unresolved_units = outcome.unresolved;

            people::create_people(&self.directory, &mut registry, &mut reporter, cancel, rows)
                .instrument(tracing::info_span!("people"))
                .await?;
            teams::sync_teams(&self.directory, &mut registry, &mut reporter, cancel, &groups)
                .instrument(tracing::info_span!("teams"))
                .await
        }
        .await;

        let status = match &outcome {
            Ok(()) => ImportStatus::Completed,
            Err(ImportError::Canceled) => ImportStatus::Canceled,
            Err(_) => ImportStatus::Failed,
        };
        let (progress, log, counts) = reporter.finish();
        let report = ImportReport {
            status,
            progress,
            log,
            counts,
            unresolved_units,
        };
        tracing::info!(
            status = ?report.status,
            done = report.progress.done,
            total = report.progress.total,
            mutations = report.counts.mutations(),
            "import finished"
        );

        match outcome {
            Ok(()) | Err(ImportError::Canceled) => Ok(report),
            Err(error) => Err(ImportFailure::new(error, report)),
        }
    }
}
