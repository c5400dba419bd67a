//! Route definitions for the `/generate` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::generate;
use crate::state::AppState;

/// Routes mounted at `/generate`.
///
/// ```text
/// POST /          -> generate (template + values -> text)
/// POST /defaults  -> defaults (template -> initial form values)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(generate::generate))
        .route("/defaults", post(generate::defaults))
}
