//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "clarity",
    version,
    about = "Profile, clean and question CSV datasets",
    long_about = "Profile, clean and question CSV datasets.\n\n\
                  Datasets are uploaded into a local store, profiled for missing values\n\
                  and duplicates, cleaned into `cleaned_<name>` copies, and queried in\n\
                  plain language through an OpenAI-compatible model."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values and question text in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Copy a local CSV file into the dataset store.
    Upload(UploadArgs),

    /// List stored datasets.
    Files,

    /// Show quality summary, suggestions and sample rows.
    Profile(ProfileArgs),

    /// Apply cleaning operations and store the result as `cleaned_<NAME>`.
    Clean(CleanArgs),

    /// Ask a question about a dataset.
    Ask(AskArgs),

    /// Show previously asked questions for a dataset.
    History(HistoryArgs),

    /// Print the effective settings as TOML.
    Config,
}

#[derive(Parser)]
pub struct UploadArgs {
    /// CSV file to upload.
    #[arg(value_name = "CSV")]
    pub path: PathBuf,

    /// Store under this name instead of the file name.
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Stored dataset name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Print the response as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Stored dataset name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Operation, e.g. `missing_values:fill_median:Age,City`,
    /// `duplicates:last:id` or `standardize_columns`. Repeatable; runs in order.
    #[arg(long = "op", value_name = "OP")]
    pub ops: Vec<String>,

    /// JSON file with operations, run before any `--op`.
    #[arg(long = "plan", value_name = "PATH")]
    pub plan: Option<PathBuf>,

    /// Print the response as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct AskArgs {
    /// Stored dataset name.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Question in plain language.
    #[arg(value_name = "QUESTION")]
    pub question: String,

    /// Print the response as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct HistoryArgs {
    /// Stored dataset name.
    #[arg(value_name = "NAME")]
    pub name: String,
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
