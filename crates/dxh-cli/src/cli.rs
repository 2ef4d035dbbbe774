//! CLI argument definitions for the hearing sheet.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dxh_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "dx-hearing",
    version,
    about = "DX hearing sheet - fill in, save and submit the internal DX survey",
    long_about = "Fill in the internal DX hearing sheet from the command line.\n\n\
                  Every answer is saved as a local draft. `submit` validates the\n\
                  sheet, sends it to the configured spreadsheet endpoint and saves\n\
                  a transcript file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: <config dir>/settings.toml).
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

    /// Allow answer values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the fields of the configured sheet.
    Fields,

    /// Answer a text field, or pick a select option by value.
    Answer(AnswerArgs),

    /// Toggle a checkbox option, or pick a select option.
    Choose(ChooseArgs),

    /// Show current answers, progress and missing fields.
    Status,

    /// Validate and submit the sheet.
    Submit,

    /// Save a transcript of the current answers.
    Download,

    /// Clear all answers and delete the draft.
    Clear,

    /// List sheets submitted from this machine.
    History,

    /// Inspect or create the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
pub struct AnswerArgs {
    /// Field name (see `fields`).
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// New value. An empty value clears the field.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Parser)]
pub struct ChooseArgs {
    /// Field name (see `fields`).
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Option to toggle or pick.
    #[arg(value_name = "OPTION")]
    pub option: String,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings.
    Show,

    /// Write the default settings file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Print the settings file path.
    Path,
}

/// Values accepted by `--log-level`.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// Values accepted by `--log-format`.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
