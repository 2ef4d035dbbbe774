//! Error types for schema loading and document mutation.

use std::path::PathBuf;

use thiserror::Error;

/// A form schema could not be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("failed to read form schema {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid TOML for a form schema.
    #[error("failed to parse form schema: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two fields share the same name.
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    /// A choice field was declared without options.
    #[error("field `{0}` needs at least one option")]
    MissingOptions(String),

    /// Selection bounds contradict each other or the option list.
    #[error("field `{field}` has invalid selection bounds (min {min}, max {max})")]
    InvalidSelectionBounds { field: String, min: usize, max: usize },

    /// The schema declares no fields at all.
    #[error("form schema declares no fields")]
    Empty,
}

/// An input event referenced something the document does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` has no option `{option}`")]
    UnknownOption { field: String, option: String },

    #[error("field `{field}` is not a {expected} field")]
    WrongKind {
        field: String,
        expected: &'static str,
    },
}

impl DocumentError {
    /// Short message suitable for a notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownField(field) => format!("項目「{field}」は存在しません。"),
            Self::UnknownOption { field, option } => {
                format!("項目「{field}」に選択肢「{option}」はありません。")
            }
            Self::WrongKind { field, .. } => {
                format!("項目「{field}」にはこの操作を行えません。")
            }
        }
    }
}
