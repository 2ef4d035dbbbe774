//! Transcript rendering options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text shown for a field left empty.
pub const DEFAULT_PLACEHOLDER: &str = "（未記入）";

/// File name prefix.
pub const DEFAULT_PREFIX: &str = "DXヒアリング";

/// Separator between the entries of a multi-select field.
pub const LIST_SEPARATOR: &str = "、";

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptFormat {
    #[default]
    Markdown,
    Text,
}

impl TranscriptFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Text => "txt",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => f.write_str("markdown"),
            Self::Text => f.write_str("text"),
        }
    }
}

/// How transcripts are rendered and named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptOptions {
    pub format: TranscriptFormat,
    pub prefix: String,
    pub placeholder: String,
}

impl Default for TranscriptOptions {
    fn default() -> Self {
        Self {
            format: TranscriptFormat::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl TranscriptOptions {
    #[must_use]
    pub fn with_format(mut self, format: TranscriptFormat) -> Self {
        self.format = format;
        self
    }
}
