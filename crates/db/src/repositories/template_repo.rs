//! Repository for the `templates` table (custom, per-user templates).

use promptforge_core::template::Template;
use promptforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::TemplateRow;

const COLUMNS: &str = "id, user_id, prompt_name, body, fields, created_at, updated_at";

/// Provides CRUD operations for custom templates, scoped by owning user.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template for `user_id`, returning the created row.
    /// Any id on the document is ignored; the store assigns the key.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        template: &Template,
    ) -> Result<TemplateRow, sqlx::Error> {
        let fields = fields_json(template);
        let query = format!(
            "INSERT INTO templates (user_id, prompt_name, body, fields) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(user_id)
            .bind(&template.prompt_name)
            .bind(&template.template)
            .bind(fields)
            .fetch_one(pool)
            .await
    }

    /// Find a template by id, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TemplateRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all templates owned by `user_id`, most recently updated first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<TemplateRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM templates WHERE user_id = $1 ORDER BY updated_at DESC");
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a template's document wholesale (the wire format is the whole
    /// document, so there is no field-level patching).
    ///
    /// Returns `None` when the row does not exist or belongs to another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        template: &Template,
    ) -> Result<Option<TemplateRow>, sqlx::Error> {
        let fields = fields_json(template);
        let query = format!(
            "UPDATE templates SET \
                prompt_name = $3, \
                body = $4, \
                fields = $5, \
                updated_at = now() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TemplateRow>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&template.prompt_name)
            .bind(&template.template)
            .bind(fields)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template by id, scoped to its owner. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Serialize the ordered field list for the JSONB column.
fn fields_json(template: &Template) -> serde_json::Value {
    serde_json::to_value(&template.fields).unwrap_or_else(|_| serde_json::Value::Array(vec![]))
}
