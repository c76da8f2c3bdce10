//! HTTP error responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed extraction or validation.
    #[error("{0}")]
    Validation(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Missing body, malformed JSON, and schema mismatches all land here;
        // callers see a single validation failure shape.
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
