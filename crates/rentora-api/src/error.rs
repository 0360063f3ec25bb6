use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the whole HTTP surface. Every variant renders the
/// `{message, success: false}` envelope; `Internal` keeps its cause in the
/// server log only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Unauthorized user")]
    Unauthorized,
    #[error("Invalid Credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    Conflict,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            error!("request failed: {err:#}");
        }

        let body = json!({
            "message": self.to_string(),
            "success": false,
        });

        (self.status(), Json(body)).into_response()
    }
}
