//! Validation issue types.

use serde::{Deserialize, Serialize};

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    /// Required single-value field is absent or blank.
    RequiredMissing { field: String, label: String },
    /// Checkbox group has fewer checked entries than required.
    TooFewSelections {
        field: String,
        label: String,
        min: usize,
        found: usize,
    },
}

impl Issue {
    /// Human-readable label of the field.
    pub fn label(&self) -> &str {
        match self {
            Self::RequiredMissing { label, .. } | Self::TooFewSelections { label, .. } => label,
        }
    }

    /// Notice text for this issue alone.
    pub fn message(&self) -> String {
        match self {
            Self::RequiredMissing { label, .. } => format!("「{label}」は必須項目です。"),
            Self::TooFewSelections { label, min, .. } => {
                format!("「{label}」は{min}つ以上選択してください。")
            }
        }
    }
}
