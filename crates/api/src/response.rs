//! JSON response envelope.

use axum::Json;
use serde::Serialize;

/// `{ "data": ... }` wrapper used by every successful response, so clients
/// see one shape across collection and single-resource endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Wrap a payload in the envelope, ready to return from a handler.
pub fn data<T: Serialize>(value: T) -> Json<DataResponse<T>> {
    Json(DataResponse { data: value })
}
