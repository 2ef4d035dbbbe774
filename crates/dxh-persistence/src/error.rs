//! Storage error types.
//!
//! Draft storage failures never interrupt the user; they are logged with the
//! message from [`StorageError::user_message`] and otherwise ignored.

use std::path::PathBuf;

use thiserror::Error;

/// Draft storage error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store refused the value because it is full.
    #[error("Storage quota exceeded while writing `{key}` ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// Key cannot be mapped to a storage location.
    #[error("Invalid storage key `{0}`")]
    InvalidKey(String),

    /// Serialization error.
    #[error("Failed to serialize draft")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Stored value is not a draft record.
    #[error("Failed to deserialize draft")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the draft file at {}", operation, path.display()),
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the draft to {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::QuotaExceeded { .. } => "The draft storage is full.".to_string(),
            Self::InvalidKey(key) => format!("The draft key `{key}` cannot be used."),
            Self::Serialization { .. } => "An error occurred while saving the draft.".to_string(),
            Self::Deserialization { .. } => {
                "The saved draft could not be read. It may be corrupted.".to_string()
            }
        }
    }
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
