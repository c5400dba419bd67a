//! Route definition for the `/preview` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::preview;
use crate::state::AppState;

/// Routes merged at the API root.
///
/// ```text
/// POST /preview -> preview_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/preview", post(preview::preview_template))
}
