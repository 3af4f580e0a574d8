use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use roster_cli::logging::redact_value;
use roster_cli::mapping::resolve_mapping;
use roster_client::{ClientConfig, DirectoryClient};
use roster_core::{
    CancelFlag, ColumnDetection, Directory, DirectorySnapshot, ImportEvent, ImportFailure,
    ImportOptions, ImportReport, MemoryDirectory, RosterImporter, detect_columns, normalize,
};
use roster_ingest::TableFormat;
use roster_model::{DryRunResult, NormalizedRow};
use tracing::{Instrument, info, info_span, warn};

use crate::cli::{ColumnsArgs, ImportArgs};
use crate::summary::print_columns;

/// How an `import` invocation ended.
pub enum ImportOutcome {
    Planned(DryRunResult),
    Finished(ImportReport),
    Failed(ImportFailure),
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let detection = load_roster(&args.file)?;
    print_columns(&detection, &detection.guessed);
    Ok(())
}

pub async fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    import_roster(args)
        .instrument(info_span!("import", file = %args.file.display()))
        .await
}

async fn import_roster(args: &ImportArgs) -> Result<ImportOutcome> {
    let detection = load_roster(&args.file)?;
    let document = args
        .mapping
        .as_deref()
        .map(|path| {
            fs::read_to_string(path)
                .with_context(|| format!("read mapping document {}", path.display()))
        })
        .transpose()?;
    let mapping = resolve_mapping(
        detection.guessed.clone(),
        document.as_deref(),
        &args.overrides,
        &detection.columns,
    )
    .context("resolve column mapping")?;
    if !mapping.is_complete() {
        warn!(
            "unit and full_name must both be mapped; run `roster-import columns {}` and pass --map",
            args.file.display()
        );
    }

    let rows = normalize(&detection.table.raw_rows(), &mapping);
    for row in &rows {
        tracing::trace!(
            name = redact_value(&row.full_name),
            unit = %row.unit,
            team = %row.team,
            "normalized row"
        );
    }
    if rows.is_empty() {
        warn!("no rows with a name were found");
    }

    let options = ImportOptions {
        max_unit_passes: args.max_unit_passes,
        unit_description: args.unit_description.clone(),
    };

    match &args.snapshot {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read directory snapshot {}", path.display()))?;
            let snapshot = DirectorySnapshot::from_json(&json)
                .with_context(|| format!("parse directory snapshot {}", path.display()))?;
            let importer =
                RosterImporter::new(MemoryDirectory::from_snapshot(snapshot)).with_options(options);
            let outcome = run_with(&importer, &rows, args.dry_run).await?;
            if importer.directory().mutation_count() > 0 {
                let json = importer.directory().snapshot().to_json_pretty()?;
                fs::write(path, json)
                    .with_context(|| format!("write directory snapshot {}", path.display()))?;
                info!(path = %path.display(), "updated directory snapshot");
            }
            Ok(outcome)
        }
        None => {
            let mut config = ClientConfig::new(&args.api.api_url)
                .with_timeout_secs(args.api.timeout_secs);
            if let Some(token) = &args.api.api_token {
                config = config.with_token(token);
            }
            let client = DirectoryClient::new(config).context("create directory client")?;
            let importer = RosterImporter::new(client).with_options(options);
            run_with(&importer, &rows, args.dry_run).await
        }
    }
}

fn load_roster(path: &Path) -> Result<ColumnDetection> {
    let bytes = fs::read(path).with_context(|| format!("read roster {}", path.display()))?;
    let format = TableFormat::detect(path, &bytes);
    let detection = detect_columns(&bytes, format)
        .with_context(|| format!("parse roster {}", path.display()))?;
    info!(
        columns = detection.columns.len(),
        header_row = detection.table.header_index,
        "detected roster columns"
    );
    Ok(detection)
}

async fn run_with<D: Directory>(
    importer: &RosterImporter<D>,
    rows: &[NormalizedRow],
    dry_run: bool,
) -> Result<ImportOutcome> {
    if dry_run {
        let plan = importer.dry_run(rows).await.context("dry run")?;
        return Ok(ImportOutcome::Planned(plan));
    }

    let cancel = CancelFlag::new();
    let signal_flag = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping before the next directory call");
            signal_flag.cancel();
        }
    });

    let bar = progress_bar();
    let bar_handle = bar.clone();
    let mut observer = move |event: &ImportEvent| match event {
        ImportEvent::Progress(state) => {
            bar_handle.set_length(state.total as u64);
            bar_handle.set_position(state.done as u64);
        }
        ImportEvent::Log(line) => {
            tracing::debug!(line = redact_value(&line.message), "import log");
            bar_handle.set_message(line.message.clone());
        }
    };
    let result = importer.execute(rows, &mut observer, &cancel).await;
    ctrl_c.abort();
    bar.finish_and_clear();

    Ok(match result {
        Ok(report) => ImportOutcome::Finished(report),
        Err(failure) => ImportOutcome::Failed(failure),
    })
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {wide_msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
