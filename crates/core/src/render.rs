//! Substitution engine: renders a template's body text from form values.
//!
//! Rendering is a pure function re-run in full on every value change, never
//! an incremental patch. Substitution is flat and single-pass per field:
//! replacement text is not re-scanned, so values containing `{...}` tokens do
//! not expand recursively.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::template::{Field, FieldKind, Options, Template};

/* --------------------------------------------------------------------------
   Form values
   -------------------------------------------------------------------------- */

/// The value a user entered for one field.
///
/// Text, textarea, and dropdown fields hold a single string (for dropdowns,
/// the selected label). Checkbox fields hold the selected labels in selection
/// order -- order matters because joins preserve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Selection(Vec<String>),
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

/// The ephemeral per-session mapping from field name to entered value.
///
/// Rebuilt from [`FormValues::defaults`] whenever the selected template
/// changes; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, FormValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type-appropriate initial values for a template's fields: empty string
    /// for text-likes, empty selection for checkboxes, and the first option's
    /// label (or empty) for dropdowns.
    pub fn defaults(template: &Template) -> Self {
        let mut values = HashMap::new();
        for field in &template.fields {
            let value = match field.kind {
                FieldKind::Checkbox => FormValue::Selection(Vec::new()),
                FieldKind::Dropdown => FormValue::Text(
                    field
                        .options
                        .as_ref()
                        .and_then(|o| o.labels().first().map(|l| l.to_string()))
                        .unwrap_or_default(),
                ),
                FieldKind::Text | FieldKind::Textarea => FormValue::Text(String::new()),
            };
            values.insert(field.name.clone(), value);
        }
        Self(values)
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.0.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: FormValue) {
        self.0.insert(name.into(), value);
    }

    /// Check or uncheck one checkbox label. Checking appends to the end of
    /// the selection order; unchecking removes wherever it sits.
    pub fn toggle_selection(&mut self, name: &str, label: &str, checked: bool) {
        let entry = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| FormValue::Selection(Vec::new()));
        if !matches!(entry, FormValue::Selection(_)) {
            *entry = FormValue::Selection(Vec::new());
        }
        if let FormValue::Selection(labels) = entry {
            if checked {
                if !labels.iter().any(|l| l == label) {
                    labels.push(label.to_string());
                }
            } else {
                labels.retain(|l| l != label);
            }
        }
    }

    /// Reorder a checkbox selection by dragging `dragged` onto `target`:
    /// splice semantics, a no-op when either label is not currently selected.
    pub fn move_selected(&mut self, name: &str, dragged: &str, target: &str) {
        if let Some(FormValue::Selection(labels)) = self.0.get_mut(name) {
            let (Some(from), Some(to)) = (
                labels.iter().position(|l| l == dragged),
                labels.iter().position(|l| l == target),
            ) else {
                return;
            };
            let moved = labels.remove(from);
            labels.insert(to, moved);
        }
    }
}

/* --------------------------------------------------------------------------
   Rendering
   -------------------------------------------------------------------------- */

/// Render the final text for `template` under `values`.
///
/// Walks fields in list order; for each, computes the value to insert and
/// replaces every literal occurrence of `{name}` in the current body. Field
/// names are matched as exact literal text, never as patterns. A placeholder
/// with no corresponding field passes through verbatim. Duplicate field names
/// resolve to the first field, since its pass consumes every occurrence.
pub fn render(template: &Template, values: &FormValues) -> String {
    let mut body = template.template.clone();
    for field in &template.fields {
        let replacement = value_to_insert(field, values.get(&field.name));
        body = body.replace(&field.placeholder_token(), &replacement);
    }
    body
}

/// Resolve one field's replacement text. Lookup misses -- an absent value, a
/// selected label no longer present in the options, an empty rich content --
/// all degrade to empty text rather than failing the render.
fn value_to_insert(field: &Field, value: Option<&FormValue>) -> String {
    match field.kind {
        FieldKind::Text | FieldKind::Textarea => match value {
            Some(FormValue::Text(s)) => s.clone(),
            _ => String::new(),
        },
        FieldKind::Checkbox => {
            let selected = match value {
                Some(FormValue::Selection(labels)) => labels.as_slice(),
                _ => &[],
            };
            match field.options {
                Some(Options::Rich(ref options)) => selected
                    .iter()
                    .filter_map(|label| {
                        options
                            .iter()
                            .find(|o| &o.label == label)
                            .map(|o| o.content.as_str())
                    })
                    .filter(|content| !content.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n\n"),
                _ => selected.join(", "),
            }
        }
        FieldKind::Dropdown => {
            let selected = match value {
                Some(FormValue::Text(s)) => s.as_str(),
                _ => "",
            };
            match field.options {
                Some(Options::Rich(ref options)) => options
                    .iter()
                    .find(|o| o.label == selected)
                    .map(|o| o.content.clone())
                    .unwrap_or_default(),
                _ => selected.to_string(),
            }
        }
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */
