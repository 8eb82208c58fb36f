//! HTTP API endpoints.

pub mod health;
pub mod schedule;
pub mod scheduler;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON error envelope shared by the API modules.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Build a `(status, {"error": ...})` response.
pub(crate) fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Log an infrastructure failure and hide the detail from the client.
pub(crate) fn internal_error(err: &anyhow::Error) -> Response {
    tracing::error!(error = %err, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}
