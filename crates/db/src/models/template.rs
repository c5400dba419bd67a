//! Template row model and its conversion to the core template document.

use promptforge_core::error::CoreError;
use promptforge_core::template::{Field, Template, TemplateId};
use promptforge_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `templates` table. `fields` holds the ordered field list
/// as the JSONB document serialized by the core model.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateRow {
    pub id: DbId,
    pub user_id: DbId,
    pub prompt_name: String,
    pub body: String,
    pub fields: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TemplateRow {
    /// Reassemble the core template document, with `id` set to the row key.
    ///
    /// A fields column that fails to deserialize is a corrupted row, not a
    /// user error.
    pub fn into_template(self) -> Result<Template, CoreError> {
        let fields: Vec<Field> = serde_json::from_value(self.fields).map_err(|e| {
            CoreError::Internal(format!("Corrupt fields document for template {}: {e}", self.id))
        })?;
        Ok(Template {
            id: Some(TemplateId::Custom(self.id)),
            prompt_name: self.prompt_name,
            template: self.body,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptforge_core::template::FieldKind;
    use serde_json::json;

    fn row(fields: serde_json::Value) -> TemplateRow {
        TemplateRow {
            id: 5,
            user_id: 1,
            prompt_name: "Brief".into(),
            body: "{topic}".into(),
            fields,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_core_template() {
        let t = row(json!([{ "name": "topic", "type": "text" }]))
            .into_template()
            .expect("valid fields document");
        assert_eq!(t.id, Some(TemplateId::Custom(5)));
        assert_eq!(t.prompt_name, "Brief");
        assert_eq!(t.template, "{topic}");
        assert_eq!(t.fields[0].name, "topic");
        assert_eq!(t.fields[0].kind, FieldKind::Text);
    }

    #[test]
    fn corrupt_fields_column_is_an_internal_error() {
        let err = row(json!("not an array")).into_template().unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }
}
