//! Handlers for the `/library` resource: the user's reusable rich-text
//! snippets, stored independently of any template.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptforge_core::error::CoreError;
use promptforge_core::types::DbId;
use promptforge_db::models::rich_text::UpsertRichTextItem;
use promptforge_db::repositories::RichTextRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::data;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Search parameters for library listings.
#[derive(Debug, Deserialize)]
pub struct LibraryListParams {
    /// Case-insensitive name substring filter.
    pub q: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /library
// ---------------------------------------------------------------------------

/// List the user's library items ordered by name, optionally filtered by a
/// case-insensitive name substring.
pub async fn list_items(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<LibraryListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let items = RichTextRepo::list(&state.pool, auth.user_id, filter).await?;

    tracing::debug!(count = items.len(), user_id = auth.user_id, "Listed library items");

    Ok(data(items))
}

// ---------------------------------------------------------------------------
// POST /library
// ---------------------------------------------------------------------------

/// Create or update a library item. The body's `id` decides: with an id the
/// named item is replaced, without one a new item is created. Both the name
/// and the content must be non-empty.
pub async fn upsert_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpsertRichTextItem>,
) -> AppResult<impl IntoResponse> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Library item name must not be empty".into(),
        )));
    }
    if body.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Library item content must not be empty".into(),
        )));
    }

    match body.id {
        Some(id) => {
            let item = RichTextRepo::update(&state.pool, auth.user_id, id, name, &body.content)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::NotFound {
                        entity: "RichTextItem",
                        id,
                    })
                })?;

            tracing::info!(item_id = id, user_id = auth.user_id, "Library item updated");

            Ok((StatusCode::OK, data(item)))
        }
        None => {
            let item = RichTextRepo::create(&state.pool, auth.user_id, name, &body.content).await?;

            tracing::info!(item_id = item.id, user_id = auth.user_id, "Library item created");

            Ok((StatusCode::CREATED, data(item)))
        }
    }
}

// ---------------------------------------------------------------------------
// DELETE /library/{id}
// ---------------------------------------------------------------------------

/// Delete a library item by id.
pub async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RichTextRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        tracing::info!(item_id = id, user_id = auth.user_id, "Library item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "RichTextItem",
            id,
        }))
    }
}
