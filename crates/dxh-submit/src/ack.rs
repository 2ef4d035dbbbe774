//! Best-effort acknowledgement of a submission.

use std::fmt;

/// What is known about a submission after it resolved without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// The request left without a transport error. The response was not read,
    /// so storage is not confirmed.
    Dispatched,
    /// The endpoint replied and reported the row as stored.
    Confirmed {
        /// Spreadsheet row number, when the endpoint reports it.
        row: Option<u64>,
    },
    /// No endpoint is configured; nothing was sent.
    Skipped,
}

impl Acknowledgement {
    /// Whether the submission left this machine.
    pub const fn was_sent(&self) -> bool {
        matches!(self, Self::Dispatched | Self::Confirmed { .. })
    }

    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

impl fmt::Display for Acknowledgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatched => f.write_str("dispatched (not confirmed)"),
            Self::Confirmed { row: Some(row) } => write!(f, "confirmed (row {row})"),
            Self::Confirmed { row: None } => f.write_str("confirmed"),
            Self::Skipped => f.write_str("skipped (no endpoint configured)"),
        }
    }
}
