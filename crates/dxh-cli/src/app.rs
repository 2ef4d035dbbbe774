//! Session wiring for the command line.

use std::io::{self, Write};

use anyhow::{Context, Result};

use dxh_export::{DirectorySink, TranscriptExporter};
use dxh_persistence::{DraftStore, FileStore, SubmissionArchive};
use dxh_session::{NotificationEvent, NotificationSink, Notifier, RenderError, SurveySession};
use dxh_submit::{RemoteSubmitter, ReqwestTransport};

use crate::settings::Settings;

/// Session type used by every command.
pub type CliSession = SurveySession<FileStore, ReqwestTransport, DirectorySink>;

/// Prints notifications to stderr, one line each.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn render(&self, event: &NotificationEvent) -> Result<(), RenderError> {
        writeln!(io::stderr().lock(), "[{}] {}", event.severity, event.message)
            .map_err(|e| RenderError(e.to_string()))
    }
}

/// Build a session from settings and restore the stored draft.
pub fn open_session(settings: &Settings) -> Result<CliSession> {
    open_session_with(settings, Notifier::new(ConsoleSink))
}

pub fn open_session_with(settings: &Settings, notifier: Notifier) -> Result<CliSession> {
    let schema = settings.form.load_schema()?;
    let store = FileStore::new(settings.storage.draft_dir());
    let drafts = DraftStore::with_key(store.clone(), &settings.storage.draft_key);
    let archive = SubmissionArchive::with_key(store, &settings.storage.archive_key);

    let submitter =
        RemoteSubmitter::new(settings.endpoint.clone()).context("create endpoint client")?;
    let exporter = TranscriptExporter::new(
        settings.export.transcript_options(),
        DirectorySink::new(settings.export.dir()),
    );
    let notifier = notifier.with_display(settings.notifications.display());

    let mut session =
        SurveySession::new(schema, drafts, submitter, exporter, notifier).with_archive(archive);
    session.restore_draft();
    Ok(session)
}
