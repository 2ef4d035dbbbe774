use std::path::Path;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, trace};

use dxh_cli::app::open_session;
use dxh_cli::logging::redact_value;
use dxh_cli::settings::Settings;
use dxh_session::{Choice, SubmitOutcome};

use crate::cli::{AnswerArgs, ChooseArgs};
use crate::summary::{
    apply_table_style, print_fields, print_history, print_status, print_submit_report,
};

pub fn run_fields(settings: &Settings) -> Result<bool> {
    let schema = settings.form.load_schema()?;
    print_fields(&schema);
    Ok(true)
}

pub fn run_answer(settings: &Settings, args: &AnswerArgs) -> Result<bool> {
    let mut session = open_session(settings)?;
    trace!(field = %args.field, value = redact_value(&args.value), "answer");
    match session.answer(&args.field, &args.value) {
        Ok(_) => {
            println!("{}", session.progress_label());
            Ok(true)
        }
        Err(error) => {
            eprintln!("error: {}", error.user_message());
            Ok(false)
        }
    }
}

pub fn run_choose(settings: &Settings, args: &ChooseArgs) -> Result<bool> {
    let mut session = open_session(settings)?;
    trace!(field = %args.field, option = redact_value(&args.option), "choose");
    let choice = match session.choose(&args.field, &args.option) {
        Ok(choice) => choice,
        Err(error) => {
            eprintln!("error: {}", error.user_message());
            return Ok(false);
        }
    };
    match choice {
        Choice::Checked | Choice::Selected => println!("[x] {}", args.option),
        Choice::Unchecked => println!("[ ] {}", args.option),
        Choice::LimitReached { .. } => return Ok(false),
    }
    println!("{}", session.progress_label());
    Ok(true)
}

pub fn run_status(settings: &Settings) -> Result<bool> {
    let session = open_session(settings)?;
    print_status(&session);
    Ok(true)
}

pub fn run_submit(settings: &Settings) -> Result<bool> {
    let mut session = open_session(settings)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;

    let report = runtime.block_on(session.submit());
    info!(transitions = ?report.transitions, "submit finished");
    print_submit_report(&report);
    Ok(matches!(report.outcome, SubmitOutcome::Submitted { .. }))
}

pub fn run_download(settings: &Settings) -> Result<bool> {
    let mut session = open_session(settings)?;
    match session.download() {
        Ok(transcript) => {
            println!("{}", transcript.path.display());
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

pub fn run_clear(settings: &Settings) -> Result<bool> {
    let mut session = open_session(settings)?;
    session.discard();
    Ok(true)
}

pub fn run_history(settings: &Settings) -> Result<bool> {
    let session = open_session(settings)?;
    let Some(archive) = session.archive() else {
        return Ok(true);
    };
    let entries = archive.entries().context("read submission history")?;
    print_history(session.schema(), &entries);
    Ok(true)
}

pub fn run_config_show(settings: &Settings) -> Result<bool> {
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    println!("{content}");

    let mut table = Table::new();
    table.set_header(vec!["Location", "Path"]);
    apply_table_style(&mut table);
    table.add_row(vec![
        "Drafts".to_string(),
        settings.storage.draft_dir().display().to_string(),
    ]);
    table.add_row(vec![
        "Transcripts".to_string(),
        settings.export.dir().display().to_string(),
    ]);
    println!("{table}");
    Ok(true)
}

pub fn run_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    Settings::default().save_to(path)?;
    println!("{}", path.display());
    Ok(())
}
