//! Collected form values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value of one field at collection time.
///
/// Checkbox groups produce [`FieldValue::List`] (checked values in document
/// order); every other control produces [`FieldValue::Text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Whether the value counts as "filled in".
    pub fn is_filled(&self) -> bool {
        match self {
            Self::Text(text) => !text.trim().is_empty(),
            Self::List(values) => !values.is_empty(),
        }
    }

    /// Number of entries this value contributes to progress.
    ///
    /// A text value contributes one entry when non-blank; a list contributes
    /// one entry per selection.
    pub fn filled_count(&self) -> usize {
        match self {
            Self::Text(text) => usize::from(!text.trim().is_empty()),
            Self::List(values) => values.len(),
        }
    }

    /// Render the value as a single string, joining list entries.
    pub fn joined(&self, delimiter: &str) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(values) => values.join(delimiter),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(values) => Some(values),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// Field name to value mapping captured from the form at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    fields: BTreeMap<String, FieldValue>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text value of a single-value field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    /// Selected entries of a multi-value field.
    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(FieldValue::as_list)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether no field carries a filled-in value.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|value| !value.is_filled())
    }
}

impl FromIterator<(String, FieldValue)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
