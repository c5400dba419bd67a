//! Handlers for the `/generate` resource: placeholder substitution over a
//! template plus form values.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use promptforge_core::builtin;
use promptforge_core::error::CoreError;
use promptforge_core::render::{render, FormValues};
use promptforge_core::template::Template;
use promptforge_core::types::DbId;
use promptforge_db::repositories::TemplateRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::data;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Selects the template to operate on. Exactly one way wins when several are
/// given: an inline document beats a custom id, which beats a built-in slug.
#[derive(Debug, Deserialize)]
pub struct TemplateSelector {
    /// Inline template document (e.g. an unsaved draft being edited).
    pub template: Option<serde_json::Value>,
    /// Id of one of the user's custom templates.
    pub template_id: Option<DbId>,
    /// Slug of a built-in template.
    pub builtin: Option<String>,
}

/// Request body for `POST /generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(flatten)]
    pub selector: TemplateSelector,
    /// Per-field form values. When the map is omitted entirely, the
    /// template's defaults are used; when it is present, fields missing
    /// from it render as empty text.
    #[serde(default)]
    pub values: Option<FormValues>,
}

/// Response body for `POST /generate`.
#[derive(Debug, Serialize)]
pub struct GeneratedText {
    pub text: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a [`TemplateSelector`] to a concrete template document.
async fn resolve_template(
    state: &AppState,
    user_id: DbId,
    selector: TemplateSelector,
) -> AppResult<Template> {
    if let Some(raw) = selector.template {
        return Ok(Template::normalize(raw)?);
    }
    if let Some(id) = selector.template_id {
        let row = TemplateRepo::find_by_id(&state.pool, user_id, id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Template",
                    id,
                })
            })?;
        return Ok(row.into_template()?);
    }
    if let Some(slug) = selector.builtin {
        return builtin::find(&slug)
            .map(|b| b.template.clone())
            .ok_or_else(|| AppError::BadRequest(format!("Unknown built-in template: {slug}")));
    }
    Err(AppError::BadRequest(
        "One of `template`, `template_id`, or `builtin` is required".into(),
    ))
}

// ---------------------------------------------------------------------------
// POST /generate
// ---------------------------------------------------------------------------

/// Substitute form values into a template and return the finished text.
///
/// When no values are submitted the template's defaults apply (empty text
/// fields, nothing selected).
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<GenerateRequest>,
) -> AppResult<impl IntoResponse> {
    let template = resolve_template(&state, auth.user_id, body.selector).await?;
    let values = body
        .values
        .unwrap_or_else(|| FormValues::defaults(&template));

    let text = render(&template, &values);

    tracing::debug!(
        fields = template.fields.len(),
        chars = text.len(),
        user_id = auth.user_id,
        "Generated text"
    );

    Ok(data(GeneratedText { text }))
}

// ---------------------------------------------------------------------------
// POST /generate/defaults
// ---------------------------------------------------------------------------

/// Return the default form values for a template: empty text for text-like
/// fields, an empty selection for checkboxes, the first option's label for
/// dropdowns.
pub async fn defaults(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(selector): Json<TemplateSelector>,
) -> AppResult<impl IntoResponse> {
    let template = resolve_template(&state, auth.user_id, selector).await?;
    let values = FormValues::defaults(&template);

    Ok(data(values))
}
