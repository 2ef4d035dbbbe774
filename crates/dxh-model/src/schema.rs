//! Form schema: which fields exist, how they are labelled, and which are required.
//!
//! Sheets differ only in their field set, so the flow takes a schema instead
//! of hard-coding one. Two sheets ship built in:
//!
//! - [`FormSchema::dx_hearing`]: the full hearing sheet with department,
//!   priority selection (1 to 3 entries), timeline and budget
//! - [`FormSchema::quick_hearing`]: name, current issues, free comment
//!
//! Custom sheets load from TOML:
//!
//! ```toml
//! title = "Team retro"
//!
//! [[field]]
//! name = "issue"
//! label = "Biggest issue"
//! kind = "text_area"
//! required = true
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Control kind backing a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    TextArea,
    /// Drop-down with one selected option.
    Select,
    /// Radio group with one checked option.
    Radio,
    /// Checkbox group; collected as an ordered list.
    Checkbox,
}

impl FieldKind {
    /// Whether the field collects into a list.
    pub const fn is_multi(&self) -> bool {
        matches!(self, Self::Checkbox)
    }

    /// Whether the field picks from declared options.
    pub const fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TextArea => "textarea",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Declaration of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name used as the snapshot key and the payload parameter.
    pub name: String,

    /// Human-readable label used in messages and transcripts.
    pub label: String,

    /// Transcript section heading. Consecutive fields with the same section
    /// are rendered together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    pub kind: FieldKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Single-value fields: must be non-blank to submit.
    #[serde(default)]
    pub required: bool,

    /// Checkbox groups: minimum number of checked entries to submit.
    #[serde(default)]
    pub min_selections: usize,

    /// Checkbox groups: maximum number of checked entries. Enforced when an
    /// entry is checked, not at validation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,

    /// Value sent to the remote endpoint when the field is blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_default: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            section: None,
            kind,
            options: Vec::new(),
            required: false,
            min_selections: 0,
            max_selections: None,
            payload_default: None,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn text_area(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    pub fn select<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, label, FieldKind::Select).with_options(options)
    }

    pub fn checkbox<I, S>(name: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, label, FieldKind::Checkbox).with_options(options)
    }

    #[must_use]
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    #[must_use]
    pub fn selections(mut self, min: usize, max: Option<usize>) -> Self {
        self.min_selections = min;
        self.max_selections = max;
        self
    }

    #[must_use]
    pub fn payload_default(mut self, value: impl Into<String>) -> Self {
        self.payload_default = Some(value.into());
        self
    }

    /// Whether the field blocks submission when left empty.
    pub fn is_mandatory(&self) -> bool {
        if self.kind.is_multi() {
            self.min_selections > 0
        } else {
            self.required
        }
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Most entries this field can contribute to progress: one for
    /// single-value fields, the selection cap for checkbox groups.
    pub fn progress_capacity(&self) -> usize {
        if self.kind.is_multi() {
            self.max_selections.unwrap_or(self.options.len())
        } else {
            1
        }
    }
}

/// Ordered set of field declarations making up one sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Sheet title used as the transcript heading.
    pub title: String,

    #[serde(rename = "field")]
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    /// Build a schema and check it for consistency.
    pub fn new(title: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        let schema = Self {
            title: title.into(),
            fields,
        };
        schema.check()?;
        Ok(schema)
    }

    /// Parse a schema from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SchemaError> {
        let schema: Self = toml::from_str(content)?;
        schema.check()?;
        Ok(schema)
    }

    /// Load a schema from a TOML file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            fields = schema.fields.len(),
            "loaded form schema"
        );
        Ok(schema)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Progress total of a completely filled sheet.
    pub fn progress_total(&self) -> usize {
        self.fields.iter().map(FieldSpec::progress_capacity).sum()
    }

    /// Check the declarations for contradictions.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if field.kind.has_options() && field.options.is_empty() {
                return Err(SchemaError::MissingOptions(field.name.clone()));
            }
            if field.kind.is_multi() {
                let max = field.max_selections.unwrap_or(field.options.len());
                if max == 0 || field.min_selections > max || field.min_selections > field.options.len()
                {
                    return Err(SchemaError::InvalidSelectionBounds {
                        field: field.name.clone(),
                        min: field.min_selections,
                        max,
                    });
                }
            }
        }
        Ok(())
    }

    /// The full DX hearing sheet.
    pub fn dx_hearing() -> Self {
        const BASICS: &str = "基本情報";
        const ISSUES: &str = "現状の課題";
        const DIRECTION: &str = "改善の方向性";
        const OTHER: &str = "その他";

        Self {
            title: "社内DX課題ヒアリングシート".to_string(),
            fields: vec![
                FieldSpec::text("name", "お名前")
                    .in_section(BASICS)
                    .payload_default("匿名"),
                FieldSpec::select(
                    "department",
                    "所属部署",
                    ["営業部", "総務部", "経理部", "人事部", "開発部", "製造部", "その他"],
                )
                .in_section(BASICS)
                .required(),
                FieldSpec::text_area("currentIssues", "現在の業務で困っていること・改善したいこと")
                    .in_section(ISSUES)
                    .required(),
                FieldSpec::text_area("dailyTasks", "日常的に行っている業務").in_section(ISSUES),
                FieldSpec::text_area("manualWork", "手作業で行っている業務").in_section(ISSUES),
                FieldSpec::text_area("systemIssues", "現在のシステムの問題点").in_section(ISSUES),
                FieldSpec::text_area("infoSharing", "情報共有の課題").in_section(ISSUES),
                FieldSpec::text_area("dreamSolution", "理想的な解決策").in_section(DIRECTION),
                FieldSpec::checkbox(
                    "priority",
                    "優先的に改善したい領域（最大3つ）",
                    [
                        "業務効率化",
                        "ペーパーレス化",
                        "情報共有の改善",
                        "データ活用",
                        "コスト削減",
                        "働き方改革",
                    ],
                )
                .in_section(DIRECTION)
                .selections(1, Some(3)),
                FieldSpec::select(
                    "timeline",
                    "希望する改善時期",
                    ["1ヶ月以内", "3ヶ月以内", "半年以内", "1年以内", "未定"],
                )
                .in_section(DIRECTION)
                .payload_default("未定"),
                FieldSpec::select(
                    "budget",
                    "想定予算",
                    ["10万円未満", "10〜50万円", "50〜100万円", "100万円以上", "未定"],
                )
                .in_section(DIRECTION)
                .payload_default("未定"),
                FieldSpec::text_area("freeComment", "その他・要望").in_section(OTHER),
            ],
        }
    }

    /// The short sheet: who, what hurts, anything else.
    pub fn quick_hearing() -> Self {
        Self {
            title: "社内DX課題ヒアリングシート".to_string(),
            fields: vec![
                FieldSpec::text("name", "お名前").payload_default("匿名"),
                FieldSpec::text_area("currentIssues", "現在の業務で困っていること・改善したいこと")
                    .required(),
                FieldSpec::text_area("freeComment", "その他・要望"),
            ],
        }
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::dx_hearing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemas_are_consistent() {
        FormSchema::dx_hearing().check().unwrap();
        FormSchema::quick_hearing().check().unwrap();
    }

    #[test]
    fn test_dx_hearing_priority_bounds() {
        let schema = FormSchema::dx_hearing();
        let priority = schema.field("priority").unwrap();
        assert!(priority.kind.is_multi());
        assert_eq!(priority.min_selections, 1);
        assert_eq!(priority.max_selections, Some(3));
        assert!(priority.is_mandatory());
    }

    #[test]
    fn test_progress_total_uses_selection_cap() {
        let schema = FormSchema::dx_hearing();
        assert_eq!(schema.field("priority").unwrap().progress_capacity(), 3);
        assert_eq!(schema.field("department").unwrap().progress_capacity(), 1);
        // 8 text fields, 3 selects, priority capped at 3
        assert_eq!(schema.progress_total(), 8 + 3 + 3);

        let open = FormSchema::new(
            "open",
            vec![FieldSpec::checkbox("tools", "Tools", ["a", "b"])],
        )
        .unwrap();
        assert_eq!(open.progress_total(), 2);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = FormSchema::new(
            "dup",
            vec![FieldSpec::text("a", "A"), FieldSpec::text_area("a", "A2")],
        );
        assert!(matches!(result, Err(SchemaError::DuplicateField(name)) if name == "a"));
    }

    #[test]
    fn test_choice_without_options_rejected() {
        let result = FormSchema::new(
            "bad",
            vec![FieldSpec::new("dept", "Dept", FieldKind::Select)],
        );
        assert!(matches!(result, Err(SchemaError::MissingOptions(_))));
    }

    #[test]
    fn test_min_above_max_rejected() {
        let result = FormSchema::new(
            "bad",
            vec![FieldSpec::checkbox("p", "P", ["a", "b", "c"]).selections(3, Some(2))],
        );
        assert!(matches!(
            result,
            Err(SchemaError::InvalidSelectionBounds { min: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let schema = FormSchema::from_toml_str(
            r#"
            title = "Retro"

            [[field]]
            name = "issue"
            label = "Biggest issue"
            kind = "text_area"
            required = true

            [[field]]
            name = "areas"
            label = "Areas"
            kind = "checkbox"
            options = ["ops", "dev"]
            min_selections = 1
            max_selections = 2
            "#,
        )
        .unwrap();

        assert_eq!(schema.title, "Retro");
        assert_eq!(schema.field_names().collect::<Vec<_>>(), ["issue", "areas"]);
        assert!(schema.field("issue").unwrap().required);
        assert_eq!(schema.field("areas").unwrap().max_selections, Some(2));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retro.toml");
        let toml = toml::to_string(&FormSchema::quick_hearing()).unwrap();
        std::fs::write(&path, toml).unwrap();

        assert_eq!(FormSchema::load(&path).unwrap(), FormSchema::quick_hearing());
        assert!(matches!(
            FormSchema::load(&dir.path().join("missing.toml")),
            Err(SchemaError::Io { .. })
        ));
    }

    #[test]
    fn test_empty_toml_schema_rejected() {
        let result = FormSchema::from_toml_str("title = \"nothing\"\nfield = []\n");
        assert!(matches!(result, Err(SchemaError::Empty)));
    }
}
