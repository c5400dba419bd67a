//! Repository for the `rich_text_items` table.

use promptforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::rich_text::RichTextItem;

const COLUMNS: &str = "id, user_id, name, content, created_at, updated_at";

/// Provides CRUD operations for rich-text library items, scoped by owner.
pub struct RichTextRepo;

impl RichTextRepo {
    /// Insert a new library item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        content: &str,
    ) -> Result<RichTextItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO rich_text_items (user_id, name, content) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RichTextItem>(&query)
            .bind(user_id)
            .bind(name)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Update an existing item by id, scoped to its owner.
    ///
    /// Returns `None` when the row does not exist or belongs to another user.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        name: &str,
        content: &str,
    ) -> Result<Option<RichTextItem>, sqlx::Error> {
        let query = format!(
            "UPDATE rich_text_items SET \
                name = $3, \
                content = $4, \
                updated_at = now() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RichTextItem>(&query)
            .bind(id)
            .bind(user_id)
            .bind(name)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// List a user's library items ordered by name, optionally filtered by a
    /// case-insensitive name substring.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        name_filter: Option<&str>,
    ) -> Result<Vec<RichTextItem>, sqlx::Error> {
        match name_filter {
            Some(q) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM rich_text_items \
                     WHERE user_id = $1 AND name ILIKE '%' || $2 || '%' \
                     ORDER BY name ASC"
                );
                sqlx::query_as::<_, RichTextItem>(&query)
                    .bind(user_id)
                    .bind(q)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM rich_text_items \
                     WHERE user_id = $1 \
                     ORDER BY name ASC"
                );
                sqlx::query_as::<_, RichTextItem>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Delete an item by id, scoped to its owner. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rich_text_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
