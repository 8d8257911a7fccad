//! CLI argument definitions for the microdata submission pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "microdata-submit",
    version,
    about = "Microdata submission pipeline - split, validate, and package per-variable datasets",
    long_about = "Reshape a wide tabular extract into per-variable long-format record files,\n\
                  fetch per-variable metadata from the registry, validate metadata and\n\
                  datasets through the external validator, and package the variables that\n\
                  pass. Every failure is scoped to its variable; siblings keep going."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full submission pipeline over a wide-table extract.
    Run(RunArgs),

    /// Print the active reserved-column set.
    Reserved(ReservedArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the semicolon-delimited wide-table extract.
    #[arg(value_name = "INPUT_CSV")]
    pub input_csv: PathBuf,

    /// Root directory for per-variable files (default: <INPUT_CSV dir>/input_directory).
    #[arg(long = "output-root", value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Variable-list file, one name per line (default: derive from the header).
    #[arg(long = "variables", value_name = "PATH")]
    pub variables: Option<PathBuf>,

    /// Base URL for metadata retrieval; the lowercase variable name is appended.
    #[arg(
        long = "base-url",
        value_name = "URL",
        required_unless_present_any = ["skip_fetch", "dry_run"]
    )]
    pub base_url: Option<String>,

    /// External validator executable.
    #[arg(
        long = "validator-cmd",
        value_name = "BIN",
        required_unless_present = "dry_run"
    )]
    pub validator_cmd: Option<PathBuf>,

    /// External packager/encryptor executable.
    #[arg(
        long = "packager-cmd",
        value_name = "BIN",
        required_unless_present_any = ["skip_package", "dry_run"]
    )]
    pub packager_cmd: Option<PathBuf>,

    /// Key material location handed to the packager.
    #[arg(
        long = "key-material",
        value_name = "PATH",
        required_unless_present_any = ["skip_package", "dry_run"]
    )]
    pub key_material: Option<PathBuf>,

    /// Output directory for packaged datasets (default: <output-root>/packaged).
    #[arg(long = "package-output", value_name = "DIR")]
    pub package_output: Option<PathBuf>,

    /// Reserved identifier/time columns excluded from processing.
    #[arg(
        long = "reserved",
        value_name = "NAMES",
        value_delimiter = ',',
        default_values_t = ["sidkrg".to_string(), "start_time".to_string(), "stop_time".to_string()]
    )]
    pub reserved: Vec<String>,

    /// What the 4th/5th record fields carry.
    #[arg(long = "record-fields", value_enum, default_value = "timestamps")]
    pub record_fields: RecordFieldsArg,

    /// Skip metadata retrieval (documents must already be on disk).
    #[arg(long = "skip-fetch")]
    pub skip_fetch: bool,

    /// Skip the packaging stage.
    #[arg(long = "skip-package")]
    pub skip_package: bool,

    /// Catalog and symmetry check only; write nothing, touch no network.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the machine-readable pipeline report to this path.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReservedArgs {
    /// Reserved columns to display instead of the defaults.
    #[arg(long = "reserved", value_name = "NAMES", value_delimiter = ',')]
    pub reserved: Vec<String>,
}

/// Record-shape choices for the 4th/5th fields.
#[derive(Clone, Copy, ValueEnum)]
pub enum RecordFieldsArg {
    /// Copy the row's start/stop timestamps.
    Timestamps,
    /// Leave both fields blank.
    Blank,
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
