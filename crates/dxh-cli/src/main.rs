//! DX hearing sheet CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use dxh_cli::logging::{LogConfig, init_logging};
use dxh_cli::settings::Settings;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, ConfigCommand};
use crate::commands::{
    run_answer, run_choose, run_clear, run_config_init, run_config_show, run_download, run_fields,
    run_history, run_status, run_submit,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match dispatch(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the selected command. `Ok(false)` means the command ran but the
/// sheet was left in a state the user has to act on.
fn dispatch(cli: Cli) -> Result<bool> {
    let config_path = cli.config.unwrap_or_else(Settings::config_path);
    match cli.command {
        Command::Config(ConfigCommand::Path) => {
            println!("{}", config_path.display());
            return Ok(true);
        }
        Command::Config(ConfigCommand::Init { force }) => {
            run_config_init(&config_path, force)?;
            return Ok(true);
        }
        _ => {}
    }

    let settings = Settings::load_from(&config_path)?;
    match cli.command {
        Command::Fields => run_fields(&settings),
        Command::Answer(args) => run_answer(&settings, &args),
        Command::Choose(args) => run_choose(&settings, &args),
        Command::Status => run_status(&settings),
        Command::Submit => run_submit(&settings),
        Command::Download => run_download(&settings),
        Command::Clear => run_clear(&settings),
        Command::History => run_history(&settings),
        Command::Config(ConfigCommand::Show) => run_config_show(&settings),
        Command::Config(_) => Ok(true),
    }
}

/// An explicit level (`-v`, `-q` or `--log-level`) wins over `RUST_LOG`.
fn log_config(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), Into::into),
        use_env_filter: !explicit,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        with_ansi,
        ..LogConfig::default()
    }
}
