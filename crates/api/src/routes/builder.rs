//! Route definitions for the `/builder` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::builder;
use crate::state::AppState;

/// Routes mounted at `/builder`.
///
/// ```text
/// POST /apply               -> apply (editor state + ops -> editor state)
/// POST /insert-placeholder  -> insert (body + selection + name -> body)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/apply", post(builder::apply))
        .route("/insert-placeholder", post(builder::insert))
}
