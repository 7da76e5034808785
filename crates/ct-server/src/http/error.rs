//! Centralized error mapping for HTTP handlers.
//! 统一的 HTTP 错误映射。

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ct_app::usecases::UpdateSettingsError;
use ct_core::ports::HistoryError;
use serde_json::json;

/// Rendered as `{"error": true, "message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    Internal(String),
    /// A component could not be brought up with the new config.
    Unavailable(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m)
            | ApiError::Forbidden(m)
            | ApiError::Internal(m)
            | ApiError::Unavailable(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": true, "message": self.message() }));
        (status, body).into_response()
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<UpdateSettingsError> for ApiError {
    fn from(err: UpdateSettingsError) -> Self {
        match err {
            UpdateSettingsError::Persist(_) => ApiError::Internal(err.to_string()),
            UpdateSettingsError::Reinitialization { .. } => ApiError::Unavailable(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("invalid config data: {}", rejection.body_text()))
    }
}
