//! In-memory form document and the field collector.
//!
//! A [`FormDocument`] is the set of named controls a sheet renders, in
//! document order. Input events mutate it; [`FormDocument::collect`] reads
//! it back into a [`FormSnapshot`].

use crate::error::DocumentError;
use crate::schema::{FieldKind, FormSchema};
use crate::snapshot::{FieldValue, FormSnapshot};

/// Current state of a single control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    /// Text input or textarea content, untrimmed.
    Text(String),
    /// Drop-down; `None` until an option is picked.
    Select {
        options: Vec<String>,
        selected: Option<String>,
    },
    /// One radio button or checkbox of a group.
    Toggle { value: String, checked: bool },
}

/// A named control.
///
/// Radio and checkbox groups contribute one control per option, all sharing
/// the field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub name: String,
    pub kind: FieldKind,
    pub state: ControlState,
}

impl Control {
    fn blank(&mut self) {
        match &mut self.state {
            ControlState::Text(text) => text.clear(),
            ControlState::Select { selected, .. } => *selected = None,
            ControlState::Toggle { checked, .. } => *checked = false,
        }
    }
}

/// The form the user is filling in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDocument {
    controls: Vec<Control>,
}

impl FormDocument {
    /// Build blank controls for every field of the schema, in declaration order.
    pub fn from_schema(schema: &FormSchema) -> Self {
        let mut controls = Vec::new();
        for field in &schema.fields {
            match field.kind {
                FieldKind::Text | FieldKind::TextArea => controls.push(Control {
                    name: field.name.clone(),
                    kind: field.kind,
                    state: ControlState::Text(String::new()),
                }),
                FieldKind::Select => controls.push(Control {
                    name: field.name.clone(),
                    kind: field.kind,
                    state: ControlState::Select {
                        options: field.options.clone(),
                        selected: None,
                    },
                }),
                FieldKind::Radio | FieldKind::Checkbox => {
                    controls.extend(field.options.iter().map(|option| Control {
                        name: field.name.clone(),
                        kind: field.kind,
                        state: ControlState::Toggle {
                            value: option.clone(),
                            checked: false,
                        },
                    }));
                }
            }
        }
        Self { controls }
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Read every control into a snapshot.
    ///
    /// Checkbox groups become the list of checked values in document order
    /// (empty when nothing is checked). Other fields become their trimmed
    /// text or selected option, or an empty string.
    pub fn collect(&self) -> FormSnapshot {
        let mut snapshot = FormSnapshot::new();
        for control in &self.controls {
            match (&control.state, control.kind) {
                (ControlState::Text(text), _) => {
                    snapshot.insert(control.name.as_str(), text.trim());
                }
                (ControlState::Select { selected, .. }, _) => {
                    snapshot.insert(
                        control.name.as_str(),
                        selected.as_deref().unwrap_or_default().trim(),
                    );
                }
                (ControlState::Toggle { value, checked }, FieldKind::Checkbox) => {
                    let mut values = snapshot
                        .list(&control.name)
                        .map(<[String]>::to_vec)
                        .unwrap_or_default();
                    if *checked {
                        values.push(value.clone());
                    }
                    snapshot.insert(control.name.as_str(), FieldValue::List(values));
                }
                (ControlState::Toggle { value, checked }, _) => {
                    if *checked {
                        snapshot.insert(control.name.as_str(), value.as_str());
                    } else if snapshot.get(&control.name).is_none() {
                        snapshot.insert(control.name.as_str(), "");
                    }
                }
            }
        }
        snapshot
    }

    /// Checked values of a checkbox group, in document order.
    pub fn checked_values(&self, name: &str) -> Vec<String> {
        self.controls
            .iter()
            .filter(|c| c.name == name)
            .filter_map(|c| match &c.state {
                ControlState::Toggle {
                    value,
                    checked: true,
                } => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Kind of the named field, if present.
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.controls.iter().find(|c| c.name == name).map(|c| c.kind)
    }

    /// Replace the content of a text or textarea control.
    pub fn set_text(&mut self, name: &str, value: &str) -> Result<(), DocumentError> {
        let control = self
            .controls
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| DocumentError::UnknownField(name.to_string()))?;
        match &mut control.state {
            ControlState::Text(text) => {
                *text = value.to_string();
                Ok(())
            }
            _ => Err(DocumentError::WrongKind {
                field: name.to_string(),
                expected: "text",
            }),
        }
    }

    /// Pick an option of a select or radio field. `None` clears the choice.
    pub fn select(&mut self, name: &str, option: Option<&str>) -> Result<(), DocumentError> {
        let kind = self
            .field_kind(name)
            .ok_or_else(|| DocumentError::UnknownField(name.to_string()))?;
        match kind {
            FieldKind::Select => {
                let Some(ControlState::Select { options, selected }) = self
                    .controls
                    .iter_mut()
                    .find(|c| c.name == name)
                    .map(|c| &mut c.state)
                else {
                    return Err(DocumentError::UnknownField(name.to_string()));
                };
                if let Some(option) = option
                    && !options.iter().any(|o| o == option)
                {
                    return Err(unknown_option(name, option));
                }
                *selected = option.map(str::to_string);
                Ok(())
            }
            FieldKind::Radio => {
                if let Some(option) = option
                    && !self.has_toggle(name, option)
                {
                    return Err(unknown_option(name, option));
                }
                for control in self.controls.iter_mut().filter(|c| c.name == name) {
                    if let ControlState::Toggle { value, checked } = &mut control.state {
                        *checked = option == Some(value.as_str());
                    }
                }
                Ok(())
            }
            _ => Err(DocumentError::WrongKind {
                field: name.to_string(),
                expected: "select or radio",
            }),
        }
    }

    /// Check or uncheck one checkbox of a group.
    pub fn set_checked(
        &mut self,
        name: &str,
        option: &str,
        checked: bool,
    ) -> Result<(), DocumentError> {
        match self.field_kind(name) {
            None => return Err(DocumentError::UnknownField(name.to_string())),
            Some(FieldKind::Checkbox) => {}
            Some(_) => {
                return Err(DocumentError::WrongKind {
                    field: name.to_string(),
                    expected: "checkbox",
                });
            }
        }
        let state = self
            .controls
            .iter_mut()
            .filter(|c| c.name == name)
            .find_map(|c| match &mut c.state {
                ControlState::Toggle { value, checked } if value == option => Some(checked),
                _ => None,
            })
            .ok_or_else(|| unknown_option(name, option))?;
        *state = checked;
        Ok(())
    }

    /// Fill the document from a stored snapshot.
    ///
    /// Fields or options the document does not know are skipped, so a draft
    /// saved against a different sheet restores whatever still matches.
    /// Returns the number of fields applied.
    pub fn apply_snapshot(&mut self, snapshot: &FormSnapshot) -> usize {
        let mut applied = 0;
        for (name, value) in snapshot.iter() {
            let result = match (self.field_kind(name), value) {
                (Some(FieldKind::Text | FieldKind::TextArea), FieldValue::Text(text)) => {
                    self.set_text(name, text)
                }
                (Some(FieldKind::Select | FieldKind::Radio), FieldValue::Text(text)) => {
                    let option = (!text.is_empty()).then_some(text.as_str());
                    self.select(name, option)
                }
                (Some(FieldKind::Checkbox), FieldValue::List(values)) => {
                    self.apply_checked(name, values);
                    Ok(())
                }
                (None, _) => {
                    tracing::debug!(field = name, "skipping unknown field from snapshot");
                    continue;
                }
                (Some(kind), _) => {
                    tracing::debug!(field = name, %kind, "skipping value with mismatched shape");
                    continue;
                }
            };
            match result {
                Ok(()) => applied += 1,
                Err(error) => tracing::debug!(field = name, %error, "could not restore field"),
            }
        }
        applied
    }

    /// Clear every control.
    pub fn reset(&mut self) {
        self.controls.iter_mut().for_each(Control::blank);
    }

    fn apply_checked(&mut self, name: &str, values: &[String]) {
        for control in self.controls.iter_mut().filter(|c| c.name == name) {
            if let ControlState::Toggle { value, checked } = &mut control.state {
                *checked = values.contains(value);
            }
        }
    }

    fn has_toggle(&self, name: &str, option: &str) -> bool {
        self.controls.iter().any(|c| {
            c.name == name && matches!(&c.state, ControlState::Toggle { value, .. } if value == option)
        })
    }
}

fn unknown_option(field: &str, option: &str) -> DocumentError {
    DocumentError::UnknownOption {
        field: field.to_string(),
        option: option.to_string(),
    }
}
