pub mod auth;
pub mod builder;
pub mod generate;
pub mod health;
pub mod library;
pub mod preview;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/me                             current user (requires auth)
///
/// /templates                           list (built-in + custom), create
/// /templates/{id}                      get, update, delete
/// /templates/builtin/{slug}            get built-in
/// /templates/builtin/{slug}/fork       fork built-in into an unsaved draft
///
/// /library                             list (?q= name filter), upsert
/// /library/{id}                        delete
///
/// /generate                            render template + values to text
/// /generate/defaults                   default form values for a template
///
/// /builder/apply                       apply edit operations to an editor state
/// /builder/insert-placeholder          insert a {name} token into body text
///
/// /preview                             form-control preview of a template
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/templates", templates::router())
        .nest("/library", library::router())
        .nest("/generate", generate::router())
        .nest("/builder", builder::router())
        .merge(preview::router())
}
