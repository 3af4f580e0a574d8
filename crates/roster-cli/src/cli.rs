//! CLI argument definitions for the roster importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use roster_core::DEFAULT_MAX_UNIT_PASSES;

#[derive(Parser)]
#[command(
    name = "roster-import",
    version,
    about = "Reconcile a staff roster sheet with the organizational directory",
    long_about = "Reconcile a staff roster sheet with the organizational directory.\n\n\
                  Reads CSV or spreadsheet rosters, fills blank hierarchy cells down,\n\
                  and creates missing units, people and team memberships."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include personal data (names, phones, emails) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show detected columns and the guessed field mapping.
    Columns(ColumnsArgs),

    /// Preview or run an import into the directory.
    Import(ImportArgs),
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// Roster file (csv, xlsx, xls, xlsb, ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Roster file (csv, xlsx, xls, xlsb, ods).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Show what would be created without changing the directory.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Override one field mapping, e.g. `--map full_name=ФИО`. Repeatable.
    /// An empty column (`--map team=`) unbinds the field.
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    pub overrides: Vec<String>,

    /// JSON mapping document applied before `--map` overrides.
    #[arg(long = "mapping", value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Import into a JSON directory snapshot instead of the HTTP API.
    /// Takes precedence over `--api-url`. The snapshot is rewritten after a
    /// run that changed it.
    #[arg(long = "snapshot", value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    #[command(flatten)]
    pub api: ApiArgs,

    /// Maximum passes when creating nested units.
    #[arg(long = "max-unit-passes", default_value_t = DEFAULT_MAX_UNIT_PASSES)]
    pub max_unit_passes: usize,

    /// Description attached to units created by the import.
    #[arg(long = "unit-description", value_name = "TEXT")]
    pub unit_description: Option<String>,
}

#[derive(Args)]
pub struct ApiArgs {
    /// Directory API root.
    #[arg(
        long = "api-url",
        env = "ROSTER_API_URL",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub api_url: String,

    /// Bearer token for the directory API.
    #[arg(long = "api-token", env = "ROSTER_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout-secs", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
