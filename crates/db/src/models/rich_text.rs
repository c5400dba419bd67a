//! Rich-text library item model and DTOs.

use promptforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rich_text_items` table: a named, reusable snippet stored
/// independently of any template.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RichTextItem {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Upsert DTO: an `id` means update, no `id` means create (the store assigns
/// the id).
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertRichTextItem {
    #[serde(default)]
    pub id: Option<DbId>,
    pub name: String,
    pub content: String,
}
