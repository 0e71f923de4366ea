//! HTTP Handlers

pub mod summary;
pub mod tracker;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error payload shared by all endpoints: `{ "error": "..." }` with a
/// non-200 status.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
