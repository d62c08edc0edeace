use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("io_error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal_error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {self}");
        let message = match &self {
            Self::Io(e) => e.to_string(),
            Self::Internal(msg) => msg.clone(),
        };
        let body = json!({ "error": "failed", "message": message });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
