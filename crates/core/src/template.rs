//! Template model: the schema for a prompt template and its validation rules.
//!
//! The wire format follows the stored document shape: `prompt_name`,
//! `template` (body text with `{name}` placeholders), and an ordered `fields`
//! list. Option data is an explicit tagged variant serialized as the
//! `optionsType` / `options` key pair.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::DbId;

/// Suffix appended to `prompt_name` when forking a template with
/// [`Template::clone_as_new`].
pub const COPY_SUFFIX: &str = " (copy)";

/* --------------------------------------------------------------------------
   Identifiers
   -------------------------------------------------------------------------- */

/// Identifier of a persisted template.
///
/// Custom templates carry the BIGSERIAL key assigned by the store; built-in
/// templates carry their registry slug. An unsaved template has no id at all
/// (`Option<TemplateId>` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateId {
    Custom(DbId),
    Builtin(String),
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateId::Custom(id) => write!(f, "{id}"),
            TemplateId::Builtin(slug) => write!(f, "{slug}"),
        }
    }
}

/* --------------------------------------------------------------------------
   Field types and options
   -------------------------------------------------------------------------- */

/// Input control type of a field. Unrecognized wire values fall back to
/// `Text`, so stored documents never fail to load over a bad type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Textarea,
    Checkbox,
    Dropdown,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Dropdown => "dropdown",
        }
    }

    /// Whether this kind carries an options list (checkbox and dropdown).
    pub fn has_options(self) -> bool {
        matches!(self, FieldKind::Checkbox | FieldKind::Dropdown)
    }
}

impl From<String> for FieldKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "textarea" => FieldKind::Textarea,
            "checkbox" => FieldKind::Checkbox,
            "dropdown" => FieldKind::Dropdown,
            _ => FieldKind::Text,
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One option of a rich options list: a visible label plus the markdown
/// content substituted when the label is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub content: String,
}

impl RichOption {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
        }
    }
}

/// Option data for checkbox/dropdown fields.
///
/// Serialized adjacently tagged as `"optionsType": "simple" | "rich"` with the
/// payload under `"options"`, matching the stored document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "optionsType", content = "options", rename_all = "lowercase")]
pub enum Options {
    Simple(Vec<String>),
    Rich(Vec<RichOption>),
}

impl Options {
    /// Labels of all options, shape-independent (used by previews and
    /// default-value computation).
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Options::Simple(labels) => labels.iter().map(String::as_str).collect(),
            Options::Rich(options) => options.iter().map(|o| o.label.as_str()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Options::Simple(labels) => labels.is_empty(),
            Options::Rich(options) => options.is_empty(),
        }
    }

    /// Convert to the simple shape: rich options keep their labels and drop
    /// their content; simple options are returned unchanged.
    pub fn into_simple(self) -> Options {
        match self {
            Options::Simple(labels) => Options::Simple(labels),
            Options::Rich(options) => {
                Options::Simple(options.into_iter().map(|o| o.label).collect())
            }
        }
    }

    /// Convert to the rich shape: simple labels are wrapped with empty
    /// content; rich options are returned unchanged.
    pub fn into_rich(self) -> Options {
        match self {
            Options::Simple(labels) => Options::Rich(
                labels
                    .into_iter()
                    .map(|label| RichOption { label, content: String::new() })
                    .collect(),
            ),
            Options::Rich(options) => Options::Rich(options),
        }
    }
}

/* --------------------------------------------------------------------------
   Field
   -------------------------------------------------------------------------- */

/// One form input definition within a template.
///
/// `uid` is a stable per-field identity assigned at creation. UI state such
/// as expanded/collapsed flags is keyed by this identity rather than by array
/// position, so it survives reorders and removals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default = "Uuid::new_v4")]
    pub uid: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: FieldKind,
    #[serde(default)]
    pub placeholder: String,
    // Flattened so the wire shape is the `optionsType` / `options` key pair,
    // absent entirely for text-like fields.
    #[serde(flatten)]
    pub options: Option<Options>,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            uid: Uuid::new_v4(),
            name: String::new(),
            label: String::new(),
            kind: FieldKind::Text,
            placeholder: String::new(),
            options: None,
        }
    }
}

impl Field {
    /// The literal placeholder token this field resolves, e.g. `{tone}`.
    pub fn placeholder_token(&self) -> String {
        format!("{{{}}}", self.name)
    }
}

/* --------------------------------------------------------------------------
   Template
   -------------------------------------------------------------------------- */

/// A prompt template: a display name, a body text with `{name}` placeholders,
/// and an ordered field list. Field order determines form and builder display
/// order, not substitution precedence (substitution walks fields in order, so
/// on duplicate names the first field wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    #[serde(default)]
    pub prompt_name: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Default for Template {
    fn default() -> Self {
        Self::new()
    }
}

impl Template {
    /// An empty, unsaved template.
    pub fn new() -> Self {
        Self {
            id: None,
            prompt_name: String::new(),
            template: String::new(),
            fields: Vec::new(),
        }
    }

    /// Deserialize a raw JSON document into a template, filling absent keys
    /// with their defaults (`fields` becomes an empty list, unrecognized
    /// `type` values fall back to `text`).
    pub fn normalize(raw: serde_json::Value) -> Result<Template, CoreError> {
        serde_json::from_value(raw)
            .map_err(|e| CoreError::Validation(format!("Malformed template document: {e}")))
    }

    /// Fork this template as a new, unsaved one: the id is stripped and the
    /// display name gets a copy marker. Fields receive fresh identities since
    /// the fork starts its own editing session.
    ///
    /// This is the only edit path for built-in templates, which are immutable
    /// at runtime.
    pub fn clone_as_new(&self) -> Template {
        let fields = self
            .fields
            .iter()
            .map(|f| Field {
                uid: Uuid::new_v4(),
                ..f.clone()
            })
            .collect();
        Template {
            id: None,
            prompt_name: format!("{}{COPY_SUFFIX}", self.prompt_name),
            template: self.template.clone(),
            fields,
        }
    }

    /// Validate the template is saveable: `prompt_name` must be non-empty.
    ///
    /// All other malformed states (empty field names, placeholders with no
    /// field) are tolerated and simply substitute to empty text or pass
    /// through verbatim at generation time.
    pub fn validate_for_save(&self) -> Result<(), CoreError> {
        if self.prompt_name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Template name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/* --------------------------------------------------------------------------
   Tests
   -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn normalize_fills_absent_fields() {
        let t = Template::normalize(json!({ "prompt_name": "Blog", "template": "{x}" }))
            .expect("valid document");
        assert_eq!(t.prompt_name, "Blog");
        assert_eq!(t.template, "{x}");
        assert!(t.fields.is_empty());
        assert!(t.id.is_none());
    }

    #[test]
    fn unknown_field_type_falls_back_to_text() {
        let t = Template::normalize(json!({
            "prompt_name": "t",
            "template": "",
            "fields": [{ "name": "x", "label": "", "type": "slider", "placeholder": "" }]
        }))
        .expect("valid document");
        assert_eq!(t.fields[0].kind, FieldKind::Text);
    }

    #[test]
    fn options_round_trip_simple_shape() {
        let t = Template::normalize(json!({
            "prompt_name": "t",
            "fields": [{
                "name": "tags", "type": "checkbox",
                "optionsType": "simple", "options": ["a", "b"]
            }]
        }))
        .expect("valid document");
        assert_eq!(
            t.fields[0].options,
            Some(Options::Simple(vec!["a".into(), "b".into()]))
        );

        let out = serde_json::to_value(&t).expect("serializes");
        assert_eq!(out["fields"][0]["optionsType"], "simple");
        assert_eq!(out["fields"][0]["options"], json!(["a", "b"]));
        // Text-likes never serialize option keys at all.
        let plain = serde_json::to_value(Field::default()).expect("serializes");
        assert!(plain.get("optionsType").is_none());
        assert!(plain.get("options").is_none());
    }

    #[test]
    fn options_round_trip_rich_shape() {
        let t = Template::normalize(json!({
            "prompt_name": "t",
            "fields": [{
                "name": "style", "type": "dropdown",
                "optionsType": "rich",
                "options": [{ "label": "A", "content": "alpha" }]
            }]
        }))
        .expect("valid document");
        assert_eq!(
            t.fields[0].options,
            Some(Options::Rich(vec![RichOption::new("A", "alpha")]))
        );
    }

    #[test]
    fn shape_conversion_rich_to_simple_keeps_labels() {
        let rich = Options::Rich(vec![
            RichOption::new("A", "alpha"),
            RichOption::new("B", "bravo"),
        ]);
        assert_eq!(
            rich.into_simple(),
            Options::Simple(vec!["A".into(), "B".into()])
        );
    }

    #[test]
    fn shape_conversion_simple_to_rich_wraps_with_empty_content() {
        let simple = Options::Simple(vec!["A".into()]);
        assert_eq!(
            simple.into_rich(),
            Options::Rich(vec![RichOption::new("A", "")])
        );
    }

    #[test]
    fn clone_as_new_strips_id_and_marks_name() {
        let mut source = Template::new();
        source.id = Some(TemplateId::Builtin("seo-article-brief".into()));
        source.prompt_name = "SEO brief".into();
        source.fields.push(Field::default());

        let fork = source.clone_as_new();
        assert!(fork.id.is_none());
        assert_eq!(fork.prompt_name, "SEO brief (copy)");
        assert_eq!(fork.fields.len(), 1);
        assert_ne!(fork.fields[0].uid, source.fields[0].uid);

        // Same invariants hold when forking an already-custom template.
        source.id = Some(TemplateId::Custom(7));
        let fork = source.clone_as_new();
        assert!(fork.id.is_none());
        assert!(fork.prompt_name.ends_with(COPY_SUFFIX));
    }

    #[test]
    fn save_validation_rejects_empty_name() {
        let t = Template::new();
        assert_matches!(t.validate_for_save(), Err(CoreError::Validation(_)));

        let mut named = Template::new();
        named.prompt_name = "Named".into();
        assert!(named.validate_for_save().is_ok());
    }

    #[test]
    fn template_id_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(TemplateId::Custom(42)).unwrap(),
            json!(42)
        );
        assert_eq!(
            serde_json::to_value(TemplateId::Builtin("x".into())).unwrap(),
            json!("x")
        );
        let parsed: TemplateId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(parsed, TemplateId::Custom(42));
    }
}
