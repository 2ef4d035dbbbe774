//! Submit flow states and outcomes.

use std::fmt;

use dxh_export::ExportedTranscript;
use dxh_submit::{Acknowledgement, SubmitError};
use dxh_validate::ValidationReport;

/// Where the submit flow is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Validating,
    Invalid,
    Submitting,
    Submitted,
    SubmitFailed,
    ExportingFallback,
}

impl FlowState {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Invalid => "invalid",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::SubmitFailed => "submit failed",
            Self::ExportingFallback => "exporting fallback",
        }
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How one submit trigger ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Another submission was in flight; nothing happened.
    Busy,
    /// Required fields are missing; nothing was sent.
    Invalid(ValidationReport),
    /// The request went out (or no endpoint is configured).
    Submitted {
        ack: Acknowledgement,
        transcript: Option<ExportedTranscript>,
    },
    /// The submitter failed; the draft is kept.
    Failed {
        error: SubmitError,
        fallback: Option<ExportedTranscript>,
    },
}

impl SubmitOutcome {
    /// Whether the draft was cleared.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Submitted { ack, .. } if ack.was_sent())
    }

    /// Transcript written during this submission, if any.
    pub fn transcript(&self) -> Option<&ExportedTranscript> {
        match self {
            Self::Submitted { transcript, .. } => transcript.as_ref(),
            Self::Failed { fallback, .. } => fallback.as_ref(),
            Self::Busy | Self::Invalid(_) => None,
        }
    }
}

/// Outcome plus every state the flow passed through.
#[derive(Debug)]
pub struct SubmitReport {
    pub outcome: SubmitOutcome,
    /// Visited states in order, starting after `Idle` and ending with `Idle`.
    pub transitions: Vec<FlowState>,
}
