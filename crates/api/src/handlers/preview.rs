//! Handler for the `/preview` resource: form-control preview of a template.

use axum::response::IntoResponse;
use axum::Json;
use promptforge_core::preview::preview;
use promptforge_core::template::Template;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::data;

/// POST /api/v1/preview
///
/// Describe the form a template would present: one control per field, plus
/// stand-in text for missing names and labels. Pure projection, nothing is
/// persisted.
pub async fn preview_template(
    _auth: AuthUser,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let template = Template::normalize(body)?;
    let form = preview(&template);

    Ok(data(form))
}
