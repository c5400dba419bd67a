//! Route definitions for the `/library` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::library;
use crate::state::AppState;

/// Routes mounted at `/library`.
///
/// ```text
/// GET    /      -> list_items (?q= name filter)
/// POST   /      -> upsert_item (id in body decides create vs update)
/// DELETE /{id}  -> delete_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(library::list_items).post(library::upsert_item))
        .route("/{id}", delete(library::delete_item))
}
