//! Export error types.

use std::path::PathBuf;

use thiserror::Error;

/// Transcript export error.
#[derive(Debug, Error)]
pub enum ExportError {
    /// File I/O error.
    #[error("Failed to {operation} transcript: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sink refused the artifact.
    #[error("Transcript sink unavailable: {0}")]
    Unavailable(String),
}

impl ExportError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { path, .. } => format!(
                "記録ファイルを保存できませんでした（{}）。",
                path.display()
            ),
            Self::Unavailable(_) => "記録ファイルを保存できませんでした。".to_string(),
        }
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
