//! Handlers for the `/templates` resource: the built-in catalog plus the
//! authenticated user's custom templates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use promptforge_core::builtin;
use promptforge_core::error::CoreError;
use promptforge_core::template::Template;
use promptforge_core::types::DbId;
use promptforge_db::repositories::TemplateRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::data;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// The two-group template tree returned by the list endpoint.
#[derive(Debug, Serialize)]
pub struct TemplateTree {
    pub built_in: Vec<Template>,
    pub custom: Vec<Template>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Look up a custom template scoped to its owner, returning the core document.
async fn ensure_template_exists(
    pool: &sqlx::PgPool,
    user_id: DbId,
    id: DbId,
) -> AppResult<Template> {
    let row = TemplateRepo::find_by_id(pool, user_id, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Template",
                id,
            })
        })?;
    Ok(row.into_template()?)
}

/// Look up a built-in template by slug.
fn ensure_builtin_exists(slug: &str) -> AppResult<&'static Template> {
    builtin::find(slug)
        .map(|b| &b.template)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown built-in template: {slug}")))
}

// ---------------------------------------------------------------------------
// GET /templates
// ---------------------------------------------------------------------------

/// List all templates visible to the user: the built-in catalog and their
/// own custom templates (most recently updated first).
pub async fn list_templates(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let built_in: Vec<Template> = builtin::all().iter().map(|b| b.template.clone()).collect();

    let rows = TemplateRepo::list(&state.pool, auth.user_id).await?;
    let custom = rows
        .into_iter()
        .map(|row| row.into_template())
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        built_in = built_in.len(),
        custom = custom.len(),
        user_id = auth.user_id,
        "Listed templates"
    );

    Ok(data(TemplateTree { built_in, custom }))
}

// ---------------------------------------------------------------------------
// POST /templates
// ---------------------------------------------------------------------------

/// Save a new custom template. Any id on the document is rejected: the store
/// assigns ids, and built-ins can only be forked, not written.
pub async fn create_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let template = Template::normalize(body)?;
    if template.id.is_some() {
        return Err(AppError::BadRequest(
            "A new template must not carry an id".into(),
        ));
    }
    template.validate_for_save()?;

    let row = TemplateRepo::create(&state.pool, auth.user_id, &template).await?;

    tracing::info!(
        template_id = row.id,
        user_id = auth.user_id,
        "Template created"
    );

    let saved = row.into_template()?;
    Ok((StatusCode::CREATED, data(saved)))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}
// ---------------------------------------------------------------------------

/// Get a single custom template by id.
pub async fn get_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = ensure_template_exists(&state.pool, auth.user_id, id).await?;
    Ok(data(template))
}

// ---------------------------------------------------------------------------
// PUT /templates/{id}
// ---------------------------------------------------------------------------

/// Replace a custom template wholesale with the submitted document.
pub async fn update_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let template = Template::normalize(body)?;
    template.validate_for_save()?;

    let row = TemplateRepo::update(&state.pool, auth.user_id, id, &template)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Template",
                id,
            })
        })?;

    tracing::info!(template_id = id, user_id = auth.user_id, "Template updated");

    let saved = row.into_template()?;
    Ok(data(saved))
}

// ---------------------------------------------------------------------------
// DELETE /templates/{id}
// ---------------------------------------------------------------------------

/// Delete a custom template by id.
pub async fn delete_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TemplateRepo::delete(&state.pool, auth.user_id, id).await?;
    if deleted {
        tracing::info!(template_id = id, user_id = auth.user_id, "Template deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// GET /templates/builtin/{slug}
// ---------------------------------------------------------------------------

/// Get a built-in template by slug.
pub async fn get_builtin(Path(slug): Path<String>) -> AppResult<impl IntoResponse> {
    let template = ensure_builtin_exists(&slug)?;
    Ok(data(template.clone()))
}

// ---------------------------------------------------------------------------
// POST /templates/builtin/{slug}/fork
// ---------------------------------------------------------------------------

/// Fork a built-in template into a new, unsaved document the client can edit
/// and later save as a custom template. Nothing is persisted here.
pub async fn fork_builtin(_auth: AuthUser, Path(slug): Path<String>) -> AppResult<impl IntoResponse> {
    let template = ensure_builtin_exists(&slug)?;
    let fork = template.clone_as_new();

    tracing::debug!(slug = %slug, "Built-in template forked");

    Ok(data(fork))
}
