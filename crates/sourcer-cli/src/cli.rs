//! CLI argument definitions for the record generalizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sourcer_reference::REFERENCE_ENV_VAR;

#[derive(Parser)]
#[command(
    name = "sourcer",
    version,
    about = "Generalize genealogy records into a provider-neutral form",
    long_about = "Convert records extracted from genealogy providers into canonical records.\n\n\
                  Supports FamilySearch (fs) and ScotlandsPeople (scotp) payloads.\n\
                  ScotlandsPeople places are resolved against bundled reference tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Allow names and other personal values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Reference data directory containing `manifest.toml`.
    #[arg(
        long = "reference-dir",
        value_name = "DIR",
        env = REFERENCE_ENV_VAR,
        global = true
    )]
    pub reference_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generalize extracted records and write canonical JSON.
    Generalize(GeneralizeArgs),

    /// List registered providers.
    Providers,

    /// Load the reference data and report table sizes.
    Reference,
}

#[derive(Parser)]
pub struct GeneralizeArgs {
    /// JSON file holding one envelope or an array of envelopes.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write canonical records here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write single-line JSON.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Exit with status 1 when any record could not be generalized.
    #[arg(long = "fail-on-invalid")]
    pub fail_on_invalid: bool,
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
