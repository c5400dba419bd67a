//! Route definitions for the `/templates` resource.
//!
//! ```text
//! GET    /                       list_templates (built-in + custom)
//! POST   /                       create_template
//! GET    /{id}                   get_template
//! PUT    /{id}                   update_template
//! DELETE /{id}                   delete_template
//! GET    /builtin/{slug}         get_builtin
//! POST   /builtin/{slug}/fork    fork_builtin
//! ```
//!
//! The `/builtin` routes are registered before `/{id}` so the literal segment
//! wins over the id capture.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Routes mounted at `/templates`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(templates::list_templates).post(templates::create_template),
        )
        .route("/builtin/{slug}", get(templates::get_builtin))
        .route("/builtin/{slug}/fork", post(templates::fork_builtin))
        .route(
            "/{id}",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
}
