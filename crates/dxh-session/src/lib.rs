//! Survey session for the DX hearing sheet.
//!
//! Wires the form document, draft store, validator, remote submitter,
//! transcript exporter and notifier into one [`SurveySession`].
//!
//! # Submit flow
//!
//! ```text
//! Idle -> Validating -> Invalid -> Idle
//!                    -> Submitting -> Submitted -> Idle
//!                                  -> SubmitFailed -> ExportingFallback -> Idle
//!                                  -> ExportingFallback -> Idle   (no endpoint)
//! ```
//!
//! - Submitted: the draft is cleared, a transcript is saved, a success
//!   notice is shown and the form is reset
//! - Failed: the draft is kept, a fallback transcript is saved once and one
//!   error notice is shown
//!
//! A [`SubmitLatch`] keeps a second trigger from dispatching while a
//! submission is in flight.

mod flow;
mod latch;
mod notifier;
mod session;

pub use flow::{FlowState, SubmitOutcome, SubmitReport};
pub use latch::{SubmitLatch, SubmitPermit};
pub use notifier::{
    DEFAULT_DISPLAY, NotificationEvent, NotificationSink, Notifier, RecordingSink, RenderError,
    Severity, SilentSink,
};
pub use session::{Choice, SurveySession};
