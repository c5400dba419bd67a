//! Field editor: maintains an in-progress template's field list, each field's
//! option structure, and the auxiliary expansion state of the builder UI.
//!
//! Expansion flags are keyed by the stable per-field identity (`Field::uid`),
//! never by array position, so they follow a field through reorders and stay
//! consistent after removals. Rich-option expansion is keyed by field identity
//! plus option index; option indices are renumbered on option removal.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Range;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::template::{Field, FieldKind, Options, RichOption, Template};

/* --------------------------------------------------------------------------
   Edit operations
   -------------------------------------------------------------------------- */

/// A single field property assignment.
///
/// Setting `Kind` or `OptionsShape` applies the structural side effects of
/// the model: switching the kind to checkbox/dropdown installs a fresh empty
/// simple options list, switching away clears options entirely, and switching
/// the shape converts existing options between simple and rich.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldProp {
    Name(String),
    Label(String),
    #[serde(rename = "type")]
    Kind(FieldKind),
    Placeholder(String),
    OptionsType(OptionsShape),
}

/// The two option shapes, as addressed by `FieldProp::OptionsType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionsShape {
    Simple,
    Rich,
}

/// One editor operation, applied through [`TemplateEditor::apply`].
///
/// The serialized form is used by the stateless builder endpoint, which
/// applies an ordered batch of operations to a template document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    AddField,
    RemoveField { index: usize },
    SetProperty { index: usize, property: FieldProp },
    ReorderField { from: usize, to: usize },
    AddOption { field: usize },
    RemoveOption { field: usize, option: usize },
    RenameOption { field: usize, option: usize, label: String },
    SetOptionContent { field: usize, option: usize, content: String },
    SetSimpleOptions { field: usize, raw: String },
    ToggleField { index: usize },
    ToggleOption { field: usize, option: usize },
}

/* --------------------------------------------------------------------------
   Editor
   -------------------------------------------------------------------------- */

/// The in-progress template plus the builder's expansion state.
///
/// Serializable as a whole: the builder endpoint round-trips the editor
/// between client and server, so the client owns the session and the server
/// stays stateless.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateEditor {
    template: Template,
    #[serde(default)]
    expanded_fields: HashSet<Uuid>,
    #[serde(default)]
    expanded_options: HashMap<Uuid, BTreeSet<usize>>,
}

impl TemplateEditor {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            expanded_fields: HashSet::new(),
            expanded_options: HashMap::new(),
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn into_template(self) -> Template {
        self.template
    }

    /// Apply one operation. Errors leave the editor unchanged.
    pub fn apply(&mut self, op: EditOp) -> Result<(), CoreError> {
        match op {
            EditOp::AddField => {
                self.add_field();
                Ok(())
            }
            EditOp::RemoveField { index } => self.remove_field(index),
            EditOp::SetProperty { index, property } => self.set_field_property(index, property),
            EditOp::ReorderField { from, to } => self.reorder_field(from, to),
            EditOp::AddOption { field } => self.add_option(field),
            EditOp::RemoveOption { field, option } => self.remove_option(field, option),
            EditOp::RenameOption { field, option, label } => {
                self.rename_option(field, option, &label)
            }
            EditOp::SetOptionContent { field, option, content } => {
                self.set_option_content(field, option, &content)
            }
            EditOp::SetSimpleOptions { field, raw } => self.set_simple_options(field, &raw),
            EditOp::ToggleField { index } => self.toggle_field_expanded(index),
            EditOp::ToggleOption { field, option } => self.toggle_option_expanded(field, option),
        }
    }

    /* -- field list ------------------------------------------------------ */

    /// Append a default text field (empty name/label/placeholder).
    pub fn add_field(&mut self) -> &Field {
        self.template.fields.push(Field::default());
        self.template.fields.last().expect("just pushed")
    }

    /// Remove the field at `index` and discard its expansion state.
    pub fn remove_field(&mut self, index: usize) -> Result<(), CoreError> {
        let field = self.field_at(index)?;
        let uid = field.uid;
        self.template.fields.remove(index);
        self.expanded_fields.remove(&uid);
        self.expanded_options.remove(&uid);
        Ok(())
    }

    /// Update one property of the field at `index`, applying structural side
    /// effects for `type` and `optionsType` changes.
    pub fn set_field_property(&mut self, index: usize, prop: FieldProp) -> Result<(), CoreError> {
        self.field_at(index)?;
        let field = &mut self.template.fields[index];
        match prop {
            FieldProp::Name(name) => field.name = name,
            FieldProp::Label(label) => field.label = label,
            FieldProp::Placeholder(placeholder) => field.placeholder = placeholder,
            FieldProp::Kind(kind) => {
                field.kind = kind;
                if kind.has_options() {
                    // Always a fresh empty list, never the stale one.
                    field.options = Some(Options::Simple(Vec::new()));
                } else {
                    field.options = None;
                }
                // The option list was just replaced: any expansion flags for
                // it would otherwise attach to unrelated future options.
                self.expanded_options.remove(&field.uid);
            }
            FieldProp::OptionsType(shape) => {
                let current = field.options.take().unwrap_or(Options::Simple(Vec::new()));
                field.options = Some(match shape {
                    OptionsShape::Simple => current.into_simple(),
                    OptionsShape::Rich => current.into_rich(),
                });
                if shape == OptionsShape::Simple {
                    // Rich content is gone, so its expansion flags are too.
                    self.expanded_options.remove(&field.uid);
                }
            }
        }
        Ok(())
    }

    /// Move a field from one position to another with splice semantics:
    /// the field is removed and reinserted, shifting the fields in between
    /// by one position. Expansion state needs no fixup since it is keyed by
    /// field identity.
    pub fn reorder_field(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        self.field_at(from)?;
        self.field_at(to)?;
        let field = self.template.fields.remove(from);
        self.template.fields.insert(to, field);
        Ok(())
    }

    /* -- options ----------------------------------------------------------- */

    /// Append an empty rich option to the field at `field_index`.
    pub fn add_option(&mut self, field_index: usize) -> Result<(), CoreError> {
        let options = self.rich_options_mut(field_index)?;
        options.push(RichOption::default());
        Ok(())
    }

    /// Remove one rich option and renumber that field's option expansion
    /// entries so none points at a shifted neighbour.
    pub fn remove_option(&mut self, field_index: usize, option_index: usize) -> Result<(), CoreError> {
        let uid = self.field_at(field_index)?.uid;
        let options = self.rich_options_mut(field_index)?;
        if option_index >= options.len() {
            return Err(CoreError::NotFound { entity: "Option", id: option_index as i64 });
        }
        options.remove(option_index);
        if let Some(expanded) = self.expanded_options.get_mut(&uid) {
            *expanded = expanded
                .iter()
                .filter(|&&i| i != option_index)
                .map(|&i| if i > option_index { i - 1 } else { i })
                .collect();
        }
        Ok(())
    }

    pub fn rename_option(
        &mut self,
        field_index: usize,
        option_index: usize,
        label: &str,
    ) -> Result<(), CoreError> {
        self.rich_option_mut(field_index, option_index)?.label = label.to_string();
        Ok(())
    }

    pub fn set_option_content(
        &mut self,
        field_index: usize,
        option_index: usize,
        content: &str,
    ) -> Result<(), CoreError> {
        self.rich_option_mut(field_index, option_index)?.content = content.to_string();
        Ok(())
    }

    /// Replace a simple options list from its single-line edit form:
    /// comma-separated labels, trimmed, empties dropped.
    pub fn set_simple_options(&mut self, field_index: usize, raw: &str) -> Result<(), CoreError> {
        self.field_at(field_index)?;
        let field = &mut self.template.fields[field_index];
        match field.options {
            Some(Options::Simple(ref mut labels)) => {
                *labels = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                Ok(())
            }
            _ => Err(CoreError::Validation(format!(
                "Field {field_index} does not have simple options"
            ))),
        }
    }

    /* -- expansion state --------------------------------------------------- */

    pub fn toggle_field_expanded(&mut self, index: usize) -> Result<(), CoreError> {
        let uid = self.field_at(index)?.uid;
        if !self.expanded_fields.remove(&uid) {
            self.expanded_fields.insert(uid);
        }
        Ok(())
    }

    pub fn is_field_expanded(&self, index: usize) -> bool {
        self.template
            .fields
            .get(index)
            .is_some_and(|f| self.expanded_fields.contains(&f.uid))
    }

    pub fn toggle_option_expanded(
        &mut self,
        field_index: usize,
        option_index: usize,
    ) -> Result<(), CoreError> {
        let uid = self.field_at(field_index)?.uid;
        let expanded = self.expanded_options.entry(uid).or_default();
        if !expanded.remove(&option_index) {
            expanded.insert(option_index);
        }
        Ok(())
    }

    pub fn is_option_expanded(&self, field_index: usize, option_index: usize) -> bool {
        self.template
            .fields
            .get(field_index)
            .and_then(|f| self.expanded_options.get(&f.uid))
            .is_some_and(|set| set.contains(&option_index))
    }

    /* -- internals --------------------------------------------------------- */

    fn field_at(&self, index: usize) -> Result<&Field, CoreError> {
        self.template
            .fields
            .get(index)
            .ok_or(CoreError::NotFound { entity: "Field", id: index as i64 })
    }

    fn rich_options_mut(&mut self, field_index: usize) -> Result<&mut Vec<RichOption>, CoreError> {
        self.field_at(field_index)?;
        match self.template.fields[field_index].options {
            Some(Options::Rich(ref mut options)) => Ok(options),
            _ => Err(CoreError::Validation(format!(
                "Field {field_index} does not have rich options"
            ))),
        }
    }

    fn rich_option_mut(
        &mut self,
        field_index: usize,
        option_index: usize,
    ) -> Result<&mut RichOption, CoreError> {
        let options = self.rich_options_mut(field_index)?;
        options
            .get_mut(option_index)
            .ok_or(CoreError::NotFound { entity: "Option", id: option_index as i64 })
    }
}

/* --------------------------------------------------------------------------
   Placeholder insertion
   -------------------------------------------------------------------------- */

/// Insert the literal `{name}` token into `body`, replacing the current
/// selection (an empty range is a plain cursor). Returns the new body and the
/// cursor position just after the inserted token.
///
/// A no-op when `name` is empty. The name is inserted as-is: delimiter
/// validation happens at field-creation time, not here.
pub fn insert_placeholder(
    body: &str,
    selection: Range<usize>,
    name: &str,
) -> Result<(String, usize), CoreError> {
    if selection.start > selection.end
        || selection.end > body.len()
        || !body.is_char_boundary(selection.start)
        || !body.is_char_boundary(selection.end)
    {
        return Err(CoreError::Validation(format!(
            "Selection {}..{} is out of bounds",
            selection.start, selection.end
        )));
    }
    if name.is_empty() {
        return Ok((body.to_string(), selection.end));
    }
    let token = format!("{{{name}}}");
    let mut out = String::with_capacity(body.len() + token.len());
    out.push_str(&body[..selection.start]);
    out.push_str(&token);
    out.push_str(&body[selection.end..]);
    let cursor = selection.start + token.len();
    Ok((out, cursor))
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn editor_with_fields(names: &[&str]) -> TemplateEditor {
        let mut editor = TemplateEditor::new(Template::new());
        for name in names {
            editor.add_field();
            let index = editor.template().fields.len() - 1;
            editor
                .set_field_property(index, FieldProp::Name(name.to_string()))
                .unwrap();
        }
        editor
    }

    // -- field list --

    #[test]
    fn add_field_appends_default_text_field() {
        let mut editor = TemplateEditor::new(Template::new());
        editor.add_field();
        let field = &editor.template().fields[0];
        assert_eq!(field.name, "");
        assert_eq!(field.label, "");
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.placeholder, "");
        assert!(field.options.is_none());
    }

    #[test]
    fn remove_field_discards_expansion_state() {
        let mut editor = editor_with_fields(&["a", "b"]);
        editor.toggle_field_expanded(0).unwrap();
        editor.remove_field(0).unwrap();
        assert_eq!(editor.template().fields.len(), 1);
        assert_eq!(editor.template().fields[0].name, "b");
        // "b" slid into index 0 but was never expanded.
        assert!(!editor.is_field_expanded(0));
    }

    #[test]
    fn remove_field_out_of_range_is_not_found() {
        let mut editor = editor_with_fields(&["a"]);
        assert_matches!(editor.remove_field(3), Err(CoreError::NotFound { .. }));
    }

    // -- type / optionsType side effects --

    #[test]
    fn switching_to_checkbox_installs_empty_simple_options() {
        let mut editor = editor_with_fields(&["tags"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Checkbox))
            .unwrap();
        assert_eq!(
            editor.template().fields[0].options,
            Some(Options::Simple(vec![]))
        );
    }

    #[test]
    fn switching_away_clears_options_and_back_yields_fresh_list() {
        let mut editor = editor_with_fields(&["tags"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Checkbox))
            .unwrap();
        editor.set_simple_options(0, "a, b, c").unwrap();

        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Text))
            .unwrap();
        assert!(editor.template().fields[0].options.is_none());

        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Checkbox))
            .unwrap();
        assert_eq!(
            editor.template().fields[0].options,
            Some(Options::Simple(vec![])),
            "stale options must not reappear"
        );
    }

    #[test]
    fn switching_kind_drops_option_expansion_flags() {
        let mut editor = editor_with_fields(&["style"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Dropdown))
            .unwrap();
        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();
        editor.add_option(0).unwrap();
        editor.toggle_option_expanded(0, 0).unwrap();

        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Text))
            .unwrap();
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Dropdown))
            .unwrap();
        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();
        editor.add_option(0).unwrap();
        // The new option must not inherit the old option's expansion flag.
        assert!(!editor.is_option_expanded(0, 0));
    }

    #[test]
    fn converting_rich_to_simple_drops_option_expansion_flags() {
        let mut editor = editor_with_fields(&["style"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Dropdown))
            .unwrap();
        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();
        editor.add_option(0).unwrap();
        editor.toggle_option_expanded(0, 0).unwrap();

        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Simple))
            .unwrap();
        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();
        assert!(!editor.is_option_expanded(0, 0));
    }

    #[test]
    fn options_shape_converts_both_ways() {
        let mut editor = editor_with_fields(&["tone"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Dropdown))
            .unwrap();
        editor.set_simple_options(0, "calm, bold").unwrap();

        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();
        assert_eq!(
            editor.template().fields[0].options,
            Some(Options::Rich(vec![
                RichOption::new("calm", ""),
                RichOption::new("bold", ""),
            ]))
        );

        editor.set_option_content(0, 0, "Keep it measured.").unwrap();
        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Simple))
            .unwrap();
        assert_eq!(
            editor.template().fields[0].options,
            Some(Options::Simple(vec!["calm".into(), "bold".into()])),
            "rich to simple keeps labels and drops content"
        );
    }

    #[test]
    fn simple_options_line_is_split_trimmed_and_filtered() {
        let mut editor = editor_with_fields(&["tags"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Checkbox))
            .unwrap();
        editor.set_simple_options(0, " a ,, b ,c, ").unwrap();
        assert_eq!(
            editor.template().fields[0].options,
            Some(Options::Simple(vec!["a".into(), "b".into(), "c".into()]))
        );
    }

    // -- rich option operations --

    #[test]
    fn rich_option_crud() {
        let mut editor = editor_with_fields(&["style"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Dropdown))
            .unwrap();
        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();

        editor.add_option(0).unwrap();
        editor.rename_option(0, 0, "Cinematic").unwrap();
        editor.set_option_content(0, 0, "moody lighting").unwrap();
        assert_eq!(
            editor.template().fields[0].options,
            Some(Options::Rich(vec![RichOption::new(
                "Cinematic",
                "moody lighting"
            )]))
        );

        editor.remove_option(0, 0).unwrap();
        assert_eq!(
            editor.template().fields[0].options,
            Some(Options::Rich(vec![]))
        );
    }

    #[test]
    fn rich_operations_on_simple_field_are_rejected() {
        let mut editor = editor_with_fields(&["tags"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Checkbox))
            .unwrap();
        assert_matches!(editor.add_option(0), Err(CoreError::Validation(_)));
        assert_matches!(
            editor.rename_option(0, 0, "x"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn removing_an_option_renumbers_expansion_entries() {
        let mut editor = editor_with_fields(&["style"]);
        editor
            .set_field_property(0, FieldProp::Kind(FieldKind::Dropdown))
            .unwrap();
        editor
            .set_field_property(0, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();
        for _ in 0..3 {
            editor.add_option(0).unwrap();
        }
        editor.toggle_option_expanded(0, 2).unwrap();

        editor.remove_option(0, 0).unwrap();
        // The expanded option slid from index 2 to index 1.
        assert!(editor.is_option_expanded(0, 1));
        assert!(!editor.is_option_expanded(0, 2));
    }

    // -- reorder --

    #[test]
    fn reorder_uses_splice_semantics() {
        let mut editor = editor_with_fields(&["a", "b", "c", "d"]);
        editor.reorder_field(0, 2).unwrap();
        let names: Vec<_> = editor
            .template()
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, ["b", "c", "a", "d"]);
    }

    #[test]
    fn expansion_follows_field_identity_through_reorder() {
        let mut editor = editor_with_fields(&["a", "b", "c"]);
        editor.toggle_field_expanded(0).unwrap(); // expand "a"

        editor.reorder_field(0, 2).unwrap(); // "a" is now last
        assert!(editor.is_field_expanded(2), "the moved field stays expanded");
        assert!(!editor.is_field_expanded(0));
        assert!(!editor.is_field_expanded(1));
    }

    #[test]
    fn rich_option_expansion_follows_field_identity_through_reorder() {
        let mut editor = editor_with_fields(&["a", "b"]);
        editor
            .set_field_property(1, FieldProp::Kind(FieldKind::Dropdown))
            .unwrap();
        editor
            .set_field_property(1, FieldProp::OptionsType(OptionsShape::Rich))
            .unwrap();
        editor.add_option(1).unwrap();
        editor.toggle_option_expanded(1, 0).unwrap();

        editor.reorder_field(1, 0).unwrap();
        assert!(editor.is_option_expanded(0, 0));
        assert!(!editor.is_option_expanded(1, 0));
    }

    // -- apply / serde --

    #[test]
    fn apply_runs_ops_in_order_and_errors_leave_state_unchanged() {
        let mut editor = TemplateEditor::new(Template::new());
        editor.apply(EditOp::AddField).unwrap();
        editor
            .apply(EditOp::SetProperty {
                index: 0,
                property: FieldProp::Name("topic".into()),
            })
            .unwrap();
        assert_eq!(editor.template().fields[0].name, "topic");

        let before = editor.template().clone();
        assert!(editor.apply(EditOp::RemoveField { index: 9 }).is_err());
        assert_eq!(editor.template(), &before);
    }

    #[test]
    fn edit_ops_deserialize_from_wire_form() {
        let op: EditOp = serde_json::from_value(serde_json::json!({
            "op": "set_property",
            "index": 1,
            "property": { "type": "checkbox" }
        }))
        .unwrap();
        assert_eq!(
            op,
            EditOp::SetProperty { index: 1, property: FieldProp::Kind(FieldKind::Checkbox) }
        );

        let op: EditOp = serde_json::from_value(serde_json::json!({
            "op": "reorder_field", "from": 2, "to": 0
        }))
        .unwrap();
        assert_eq!(op, EditOp::ReorderField { from: 2, to: 0 });
    }

    // -- insert_placeholder --

    #[test]
    fn insert_placeholder_replaces_selection() {
        let (body, cursor) = insert_placeholder("Write about X today", 12..13, "topic").unwrap();
        assert_eq!(body, "Write about {topic} today");
        assert_eq!(cursor, 12 + "{topic}".len());
    }

    #[test]
    fn insert_placeholder_at_plain_cursor() {
        let (body, cursor) = insert_placeholder("ab", 1..1, "x").unwrap();
        assert_eq!(body, "a{x}b");
        assert_eq!(cursor, 4);
    }

    #[test]
    fn insert_placeholder_with_empty_name_is_noop() {
        let (body, cursor) = insert_placeholder("abc", 1..2, "").unwrap();
        assert_eq!(body, "abc");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn insert_placeholder_does_not_validate_delimiters() {
        // Delimiter validation is a field-creation concern, not insertion's.
        let (body, _) = insert_placeholder("", 0..0, "we{ird").unwrap();
        assert_eq!(body, "{we{ird}");
    }

    #[test]
    fn insert_placeholder_rejects_bad_selection() {
        assert_matches!(
            insert_placeholder("abc", 2..9, "x"),
            Err(CoreError::Validation(_))
        );
    }
}
