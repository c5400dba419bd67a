//! Structural form preview: an inert description of a template's form, for
//! layout inspection only. Never binds form values and never substitutes.

use serde::{Deserialize, Serialize};

use crate::template::{FieldKind, Template};

/// Stand-in for a missing template name.
const DEFAULT_TITLE: &str = "Template name";
/// Stand-in for a missing field label.
const DEFAULT_LABEL: &str = "Label";
/// Stand-in for an empty template body.
const DEFAULT_BODY: &str = "Template text…";

/// One disabled control in the preview form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "lowercase")]
pub enum PreviewControl {
    Text { label: String, placeholder: String },
    Textarea { label: String, placeholder: String },
    Checkbox { label: String, options: Vec<String> },
    Dropdown { label: String, options: Vec<String> },
}

/// A read-only approximation of the template's form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPreview {
    pub title: String,
    pub controls: Vec<PreviewControl>,
    pub body: String,
}

/// Build the preview for a template. Missing labels and names get
/// human-readable stand-ins so authors can see unlabeled fields.
pub fn preview(template: &Template) -> FormPreview {
    let controls = template
        .fields
        .iter()
        .map(|field| {
            let label = if field.label.is_empty() {
                DEFAULT_LABEL.to_string()
            } else {
                field.label.clone()
            };
            let option_labels = || {
                field
                    .options
                    .as_ref()
                    .map(|o| o.labels().into_iter().map(String::from).collect())
                    .unwrap_or_default()
            };
            match field.kind {
                FieldKind::Text => PreviewControl::Text {
                    label,
                    placeholder: field.placeholder.clone(),
                },
                FieldKind::Textarea => PreviewControl::Textarea {
                    label,
                    placeholder: field.placeholder.clone(),
                },
                FieldKind::Checkbox => PreviewControl::Checkbox {
                    label,
                    options: option_labels(),
                },
                FieldKind::Dropdown => PreviewControl::Dropdown {
                    label,
                    options: option_labels(),
                },
            }
        })
        .collect();

    FormPreview {
        title: if template.prompt_name.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            template.prompt_name.clone()
        },
        controls,
        body: if template.template.is_empty() {
            DEFAULT_BODY.to_string()
        } else {
            template.template.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Field, Options, RichOption};

    #[test]
    fn empty_template_gets_stand_ins() {
        let p = preview(&Template::new());
        assert_eq!(p.title, "Template name");
        assert_eq!(p.body, "Template text…");
        assert!(p.controls.is_empty());
    }

    #[test]
    fn unlabeled_fields_show_the_label_stand_in() {
        let mut t = Template::new();
        t.fields.push(Field::default());
        let p = preview(&t);
        assert_eq!(
            p.controls[0],
            PreviewControl::Text { label: "Label".into(), placeholder: String::new() }
        );
    }

    #[test]
    fn option_controls_list_labels_shape_independent() {
        let mut t = Template::new();
        t.prompt_name = "P".into();
        t.template = "{a} {b}".into();
        t.fields.push(Field {
            name: "a".into(),
            label: "Tags".into(),
            kind: FieldKind::Checkbox,
            options: Some(Options::Simple(vec!["x".into(), "y".into()])),
            ..Field::default()
        });
        t.fields.push(Field {
            name: "b".into(),
            label: "Tone".into(),
            kind: FieldKind::Dropdown,
            options: Some(Options::Rich(vec![RichOption::new("calm", "content")])),
            ..Field::default()
        });

        let p = preview(&t);
        assert_eq!(
            p.controls,
            vec![
                PreviewControl::Checkbox { label: "Tags".into(), options: vec!["x".into(), "y".into()] },
                PreviewControl::Dropdown { label: "Tone".into(), options: vec!["calm".into()] },
            ]
        );
        assert_eq!(p.body, "{a} {b}");
    }
}
