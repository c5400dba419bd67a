//! Handlers for the `/builder` resource: stateless template-editing support.
//!
//! The builder session itself lives on the client. These endpoints take a
//! serialized editor (or body text), apply the requested operations through
//! the core editing logic, and hand the result back.

use axum::response::IntoResponse;
use axum::Json;
use promptforge_core::editor::{insert_placeholder, EditOp, TemplateEditor};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::data;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /builder/apply`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    /// The serialized editor state (template plus expansion state).
    pub editor: TemplateEditor,
    /// Operations to apply, in order.
    pub ops: Vec<EditOp>,
}

/// Request body for `POST /builder/insert-placeholder`.
#[derive(Debug, Deserialize)]
pub struct InsertPlaceholderRequest {
    pub body: String,
    /// Byte offset where the selection starts.
    pub selection_start: usize,
    /// Byte offset where the selection ends (equal to start for a cursor).
    pub selection_end: usize,
    /// Field name to insert as a `{name}` token.
    pub name: String,
}

/// Response body for `POST /builder/insert-placeholder`.
#[derive(Debug, Serialize)]
pub struct InsertPlaceholderResponse {
    pub body: String,
    /// Byte offset just after the inserted token.
    pub cursor: usize,
}

// ---------------------------------------------------------------------------
// POST /builder/apply
// ---------------------------------------------------------------------------

/// Apply an ordered batch of edit operations to an editor state and return
/// the updated state. The batch is all-or-nothing: the first failing
/// operation rejects the request and nothing is returned.
pub async fn apply(
    _auth: AuthUser,
    Json(body): Json<ApplyRequest>,
) -> AppResult<impl IntoResponse> {
    let mut editor = body.editor;
    let op_count = body.ops.len();

    for op in body.ops {
        editor.apply(op)?;
    }

    tracing::debug!(ops = op_count, "Applied builder operations");

    Ok(data(editor))
}

// ---------------------------------------------------------------------------
// POST /builder/insert-placeholder
// ---------------------------------------------------------------------------

/// Insert a `{name}` token into a body text at the given selection, returning
/// the new body and the cursor position after the token.
pub async fn insert(
    _auth: AuthUser,
    Json(body): Json<InsertPlaceholderRequest>,
) -> AppResult<impl IntoResponse> {
    let (new_body, cursor) = insert_placeholder(
        &body.body,
        body.selection_start..body.selection_end,
        &body.name,
    )?;

    Ok(data(InsertPlaceholderResponse {
        body: new_body,
        cursor,
    }))
}
