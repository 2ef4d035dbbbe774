//! Status notifications.
//!
//! At most one notification is visible. A new one replaces the current one
//! immediately, and each expires after the display duration.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use thiserror::Error;

/// How long a notification stays visible by default.
pub const DEFAULT_DISPLAY: Duration = Duration::from_secs(3);

/// Notification type; determines how a front end styles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub message: String,
    pub severity: Severity,
    pub created_at: Instant,
}

/// Rendering failed. Never surfaced past the [`Notifier`].
#[derive(Debug, Error)]
#[error("notification could not be rendered: {0}")]
pub struct RenderError(pub String);

/// Presents notifications to the user.
pub trait NotificationSink {
    fn render(&self, event: &NotificationEvent) -> Result<(), RenderError>;
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl NotificationSink for SilentSink {
    fn render(&self, _event: &NotificationEvent) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Keeps every rendered notification. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NotificationEvent> {
        self.lock().clone()
    }

    /// Number of rendered notifications with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.lock().iter().filter(|e| e.severity == severity).count()
    }

    pub fn last(&self) -> Option<NotificationEvent> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<NotificationEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for RecordingSink {
    fn render(&self, event: &NotificationEvent) -> Result<(), RenderError> {
        self.lock().push(event.clone());
        Ok(())
    }
}

/// Owns the single visible notification.
pub struct Notifier {
    sink: Box<dyn NotificationSink + Send + Sync>,
    display: Duration,
    current: Option<NotificationEvent>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("display", &self.display)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(SilentSink)
    }
}

impl Notifier {
    pub fn new(sink: impl NotificationSink + Send + Sync + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            display: DEFAULT_DISPLAY,
            current: None,
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: Duration) -> Self {
        self.display = display;
        self
    }

    pub fn display(&self) -> Duration {
        self.display
    }

    /// Show `message`, replacing whatever is visible.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        let event = NotificationEvent {
            message: message.into(),
            severity,
            created_at: Instant::now(),
        };
        tracing::debug!(%severity, message = %event.message, "notification");
        if let Err(error) = self.sink.render(&event) {
            tracing::debug!(%error, "notification render failed");
        }
        self.current = Some(event);
    }

    /// The notification visible at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&NotificationEvent> {
        self.current
            .as_ref()
            .filter(|event| now.saturating_duration_since(event.created_at) < self.display)
    }

    /// The latest notification regardless of expiry.
    pub fn latest(&self) -> Option<&NotificationEvent> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
