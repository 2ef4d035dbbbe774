//! The survey session: input events, autosave and the submit flow.

use chrono::{DateTime, Local, Utc};

use dxh_export::{ArtifactSink, ExportError, ExportedTranscript, TranscriptExporter};
use dxh_model::{
    DocumentError, FieldKind, FormDocument, FormSchema, FormSnapshot, estimate_progress,
    progress_label,
};
use dxh_persistence::{DraftStore, KeyValueStore, SubmissionArchive};
use dxh_submit::{Acknowledgement, RemoteSubmitter, SubmissionPayload, SubmitError, Transport};
use dxh_validate::validate;

use crate::flow::{FlowState, SubmitOutcome, SubmitReport};
use crate::latch::SubmitLatch;
use crate::notifier::{Notifier, Severity};

/// Result of a `choose` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// A checkbox was checked.
    Checked,
    /// A checked checkbox was unchecked.
    Unchecked,
    /// A select or radio option was picked.
    Selected,
    /// The group already holds `max` entries; nothing changed.
    LimitReached { max: usize },
}

/// One respondent's session with a sheet.
///
/// Every successful input event collects the form, autosaves the draft and
/// recomputes progress. [`SurveySession::submit`] runs the submit flow.
#[derive(Debug)]
pub struct SurveySession<S, T, K> {
    schema: FormSchema,
    document: FormDocument,
    drafts: DraftStore<S>,
    archive: Option<SubmissionArchive<S>>,
    submitter: RemoteSubmitter<T>,
    exporter: TranscriptExporter<K>,
    notifier: Notifier,
    latch: SubmitLatch,
    state: FlowState,
    progress: u8,
}

impl<S, T, K> SurveySession<S, T, K>
where
    S: KeyValueStore,
    T: Transport,
    K: ArtifactSink,
{
    pub fn new(
        schema: FormSchema,
        drafts: DraftStore<S>,
        submitter: RemoteSubmitter<T>,
        exporter: TranscriptExporter<K>,
        notifier: Notifier,
    ) -> Self {
        let document = FormDocument::from_schema(&schema);
        Self {
            schema,
            document,
            drafts,
            archive: None,
            submitter,
            exporter,
            notifier,
            latch: SubmitLatch::new(),
            state: FlowState::Idle,
            progress: 0,
        }
    }

    /// Also record every submitted sheet in `archive`.
    #[must_use]
    pub fn with_archive(mut self, archive: SubmissionArchive<S>) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn document(&self) -> &FormDocument {
        &self.document
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn archive(&self) -> Option<&SubmissionArchive<S>> {
        self.archive.as_ref()
    }

    pub fn submitter(&self) -> &RemoteSubmitter<T> {
        &self.submitter
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Handle to the submit latch; clones share the busy flag.
    pub fn latch(&self) -> &SubmitLatch {
        &self.latch
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Completion percentage after the latest event.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn progress_label(&self) -> String {
        progress_label(self.progress)
    }

    /// Current field values.
    pub fn snapshot(&self) -> FormSnapshot {
        self.document.collect()
    }

    /// Load the stored draft into the form. Returns the number of fields
    /// restored.
    pub fn restore_draft(&mut self) -> usize {
        let Some(draft) = self.drafts.load_draft() else {
            return 0;
        };
        let applied = self.document.apply_snapshot(&draft);
        self.refresh_progress();
        tracing::info!(fields = applied, progress = self.progress, "draft restored");
        applied
    }

    /// Type into a text field or pick a select/radio option by value.
    ///
    /// A blank value clears a select or radio field. Returns the new
    /// progress.
    pub fn answer(&mut self, field: &str, value: &str) -> Result<u8, DocumentError> {
        match self.document.field_kind(field) {
            None => return Err(DocumentError::UnknownField(field.to_string())),
            Some(FieldKind::Text | FieldKind::TextArea) => self.document.set_text(field, value)?,
            Some(FieldKind::Select | FieldKind::Radio) => {
                let value = value.trim();
                self.document
                    .select(field, (!value.is_empty()).then_some(value))?;
            }
            Some(FieldKind::Checkbox) => {
                return Err(DocumentError::WrongKind {
                    field: field.to_string(),
                    expected: "single-value",
                });
            }
        }
        tracing::debug!(field, "answer recorded");
        Ok(self.after_input())
    }

    /// Toggle a checkbox, or pick a select/radio option.
    ///
    /// Checking beyond the group's maximum leaves the selection unchanged
    /// and shows a warning.
    pub fn choose(&mut self, field: &str, option: &str) -> Result<Choice, DocumentError> {
        let Some(spec) = self.schema.field(field) else {
            return Err(DocumentError::UnknownField(field.to_string()));
        };
        if !spec.has_option(option) {
            return Err(DocumentError::UnknownOption {
                field: field.to_string(),
                option: option.to_string(),
            });
        }

        let choice = match spec.kind {
            FieldKind::Checkbox => {
                let checked = self.document.checked_values(field);
                if checked.iter().any(|value| value == option) {
                    self.document.set_checked(field, option, false)?;
                    Choice::Unchecked
                } else if let Some(max) = spec.max_selections
                    && checked.len() >= max
                {
                    let message = format!("「{}」は最大{max}つまで選択できます。", spec.label);
                    tracing::debug!(field, max, "selection limit reached");
                    self.notifier.notify(message, Severity::Warning);
                    return Ok(Choice::LimitReached { max });
                } else {
                    self.document.set_checked(field, option, true)?;
                    Choice::Checked
                }
            }
            FieldKind::Select | FieldKind::Radio => {
                self.document.select(field, Some(option))?;
                Choice::Selected
            }
            FieldKind::Text | FieldKind::TextArea => {
                return Err(DocumentError::WrongKind {
                    field: field.to_string(),
                    expected: "choice",
                });
            }
        };
        tracing::debug!(field, ?choice, "choice recorded");
        self.after_input();
        Ok(choice)
    }

    /// Clear the form and delete the draft.
    pub fn discard(&mut self) {
        self.document.reset();
        self.drafts.clear_draft();
        self.refresh_progress();
        self.notifier
            .notify("入力内容を消去しました。", Severity::Info);
    }

    /// Save a transcript of the current answers, independent of submission.
    pub fn download(&mut self) -> Result<ExportedTranscript, ExportError> {
        let snapshot = self.document.collect();
        match self
            .exporter
            .export(&self.schema, &snapshot, Local::now().naive_local())
        {
            Ok(transcript) => {
                self.notifier.notify(
                    format!("記録ファイルを保存しました: {}", transcript.path.display()),
                    Severity::Success,
                );
                Ok(transcript)
            }
            Err(error) => {
                tracing::error!(%error, "transcript export failed");
                self.notifier.notify(error.user_message(), Severity::Error);
                Err(error)
            }
        }
    }

    /// Run the submit flow once.
    ///
    /// Returns [`SubmitOutcome::Busy`] without doing anything while another
    /// submission holds the latch.
    pub async fn submit(&mut self) -> SubmitReport {
        let mut transitions = Vec::new();
        let Some(_permit) = self.latch.try_acquire() else {
            tracing::debug!("submit ignored: a submission is already in flight");
            return SubmitReport {
                outcome: SubmitOutcome::Busy,
                transitions,
            };
        };

        self.enter(FlowState::Validating, &mut transitions);
        let snapshot = self.document.collect();
        let report = validate(&self.schema, &snapshot);
        if !report.valid {
            self.enter(FlowState::Invalid, &mut transitions);
            tracing::info!(missing = ?report.missing_fields, "submission blocked by validation");
            if let Some(message) = report.user_message() {
                self.notifier.notify(message, Severity::Error);
            }
            self.enter(FlowState::Idle, &mut transitions);
            return SubmitReport {
                outcome: SubmitOutcome::Invalid(report),
                transitions,
            };
        }

        self.enter(FlowState::Submitting, &mut transitions);
        let sent_at = Local::now();
        if let Some(archive) = &self.archive {
            archive.append(&snapshot, sent_at.with_timezone(&Utc));
        }
        let payload = SubmissionPayload::build(&self.schema, &snapshot, sent_at.naive_local());
        let result = self.submitter.submit(&payload).await;

        let outcome = match result {
            Ok(ack) if ack.was_sent() => {
                self.enter(FlowState::Submitted, &mut transitions);
                self.finish_submitted(&snapshot, ack, sent_at)
            }
            Ok(ack) => {
                self.enter(FlowState::ExportingFallback, &mut transitions);
                self.finish_skipped(&snapshot, ack, sent_at)
            }
            Err(error) => {
                self.enter(FlowState::SubmitFailed, &mut transitions);
                tracing::error!(%error, "submission failed; draft kept");
                self.enter(FlowState::ExportingFallback, &mut transitions);
                self.finish_failed(&snapshot, error, sent_at)
            }
        };

        self.enter(FlowState::Idle, &mut transitions);
        SubmitReport {
            outcome,
            transitions,
        }
    }

    fn finish_submitted(
        &mut self,
        snapshot: &FormSnapshot,
        ack: Acknowledgement,
        sent_at: DateTime<Local>,
    ) -> SubmitOutcome {
        self.drafts.clear_draft();
        let transcript = self.export_quietly(snapshot, sent_at);

        let mut message = match ack {
            Acknowledgement::Confirmed { row: Some(row) } => {
                format!("送信が完了しました（{row}行目に記録）。ご協力ありがとうございました。")
            }
            _ => "送信が完了しました。ご協力ありがとうございました。".to_string(),
        };
        if transcript.is_none() {
            message.push_str("（記録ファイルは保存できませんでした）");
        }
        self.notifier.notify(message, Severity::Success);

        self.document.reset();
        self.refresh_progress();
        SubmitOutcome::Submitted { ack, transcript }
    }

    fn finish_skipped(
        &mut self,
        snapshot: &FormSnapshot,
        ack: Acknowledgement,
        sent_at: DateTime<Local>,
    ) -> SubmitOutcome {
        let transcript = self.export_quietly(snapshot, sent_at);
        let message = match &transcript {
            Some(t) => format!(
                "送信先が設定されていないため送信していません。入力内容を「{}」に保存しました。",
                t.path.display()
            ),
            None => "送信先が設定されていないため送信していません。入力内容は下書きとして保存されています。"
                .to_string(),
        };
        self.notifier.notify(message, Severity::Warning);
        SubmitOutcome::Submitted { ack, transcript }
    }

    fn finish_failed(
        &mut self,
        snapshot: &FormSnapshot,
        error: SubmitError,
        sent_at: DateTime<Local>,
    ) -> SubmitOutcome {
        let fallback = self.export_quietly(snapshot, sent_at);
        let message = match &fallback {
            Some(t) => format!(
                "{}ただし、入力内容は「{}」に保存されています。",
                error.user_message(),
                t.path.display()
            ),
            None => format!(
                "{}ただし、入力内容は下書きとして保存されています。",
                error.user_message()
            ),
        };
        self.notifier.notify(message, Severity::Error);
        SubmitOutcome::Failed { error, fallback }
    }

    fn export_quietly(
        &self,
        snapshot: &FormSnapshot,
        at: DateTime<Local>,
    ) -> Option<ExportedTranscript> {
        self.exporter
            .export(&self.schema, snapshot, at.naive_local())
            .inspect_err(|error| tracing::warn!(%error, "transcript not saved"))
            .ok()
    }

    fn after_input(&mut self) -> u8 {
        let snapshot = self.document.collect();
        self.drafts.save_draft(&snapshot);
        self.progress = estimate_progress(&snapshot, self.schema.progress_total());
        self.progress
    }

    fn refresh_progress(&mut self) {
        let snapshot = self.document.collect();
        self.progress = estimate_progress(&snapshot, self.schema.progress_total());
    }

    fn enter(&mut self, state: FlowState, transitions: &mut Vec<FlowState>) {
        tracing::debug!(from = %self.state, to = %state, "submit flow");
        self.state = state;
        transitions.push(state);
    }
}
