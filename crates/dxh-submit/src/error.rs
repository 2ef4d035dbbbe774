//! Error types for remote submission.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while submitting a sheet.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The configured URL cannot be used.
    #[error("invalid endpoint URL `{url}`: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// No outcome within the soft timeout.
    #[error("submission timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint replied and refused the submission.
    #[error("endpoint rejected submission{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// The endpoint's reply could not be understood.
    #[error("unreadable endpoint response: {0}")]
    Response(String),
}

impl SubmitError {
    /// Returns a user-friendly error message suitable for a notification.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::InvalidEndpoint { .. } => "送信先のURLが正しく設定されていません。",
            Self::Network(_) => "送信先に接続できませんでした。ネットワーク接続を確認してください。",
            Self::Timeout(_) => "送信がタイムアウトしました。",
            Self::Rejected { .. } => "送信先でデータの保存に失敗しました。",
            Self::Response(_) => "送信先からの応答を確認できませんでした。",
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let err = SubmitError::Rejected {
            status: Some(500),
            message: "sheet locked".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "endpoint rejected submission (HTTP 500): sheet locked"
        );

        let err = SubmitError::Rejected {
            status: None,
            message: "nope".to_string(),
        };
        assert_eq!(err.to_string(), "endpoint rejected submission: nope");
    }

    #[test]
    fn test_user_messages() {
        assert!(
            SubmitError::Network("refused".to_string())
                .user_message()
                .contains("ネットワーク")
        );
        assert!(
            SubmitError::Timeout(Duration::from_secs(10))
                .user_message()
                .contains("タイムアウト")
        );
    }
}
