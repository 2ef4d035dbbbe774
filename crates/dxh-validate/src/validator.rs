//! Required-field and selection-minimum checks.

use serde::{Deserialize, Serialize};

use dxh_model::{FieldValue, FormSchema, FormSnapshot};

use crate::issue::Issue;

/// Outcome of validating one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Labels of the offending fields in schema declaration order.
    pub missing_fields: Vec<String>,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            valid: issues.is_empty(),
            missing_fields: issues.iter().map(|i| i.label().to_string()).collect(),
            issues,
        }
    }

    /// Notice text, or `None` when valid.
    ///
    /// A single issue reads as its own message; several are summarized as
    /// one list of labels.
    pub fn user_message(&self) -> Option<String> {
        match self.issues.as_slice() {
            [] => None,
            [issue] => Some(issue.message()),
            _ => {
                let fields = self
                    .missing_fields
                    .iter()
                    .map(|label| format!("「{label}」"))
                    .collect::<Vec<_>>()
                    .join("、");
                Some(format!("未入力の必須項目があります: {fields}"))
            }
        }
    }
}

/// Check a snapshot against the schema's required fields.
///
/// Single-value fields marked `required` must be non-blank after trimming.
/// Checkbox groups must carry at least `min_selections` entries; the upper
/// bound is enforced when entries are checked, not here. A field whose value
/// has the wrong shape counts as missing.
pub fn validate(schema: &FormSchema, snapshot: &FormSnapshot) -> ValidationReport {
    let mut issues = Vec::new();

    for field in schema.fields.iter().filter(|f| f.is_mandatory()) {
        let value = snapshot.get(&field.name);
        if field.kind.is_multi() {
            let found = match value {
                Some(FieldValue::List(values)) => values.len(),
                _ => 0,
            };
            if found < field.min_selections {
                issues.push(Issue::TooFewSelections {
                    field: field.name.clone(),
                    label: field.label.clone(),
                    min: field.min_selections,
                    found,
                });
            }
        } else {
            let filled = matches!(value, Some(FieldValue::Text(text)) if !text.trim().is_empty());
            if !filled {
                issues.push(Issue::RequiredMissing {
                    field: field.name.clone(),
                    label: field.label.clone(),
                });
            }
        }
    }

    let report = ValidationReport::from_issues(issues);
    tracing::debug!(
        valid = report.valid,
        missing = report.missing_fields.len(),
        "validated snapshot"
    );
    report
}
