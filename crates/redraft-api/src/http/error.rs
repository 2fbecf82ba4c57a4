//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use redraft_types::error::{AssistError, DraftStoreError};

use crate::http::response::ApiResponse;

#[derive(Debug)]
pub enum AppError {
    Draft(DraftStoreError),
    Assist(AssistError),
    /// No usable owner identity on the request.
    Unauthorized(String),
    /// The assistant has no provider configured.
    AssistantUnavailable,
}

impl From<DraftStoreError> for AppError {
    fn from(e: DraftStoreError) -> Self {
        AppError::Draft(e)
    }
}

impl From<AssistError> for AppError {
    fn from(e: AssistError) -> Self {
        AppError::Assist(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Draft(DraftStoreError::Unauthenticated) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Draft(DraftStoreError::StorageUnavailable(msg)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Assist(AssistError::ValidationFailed(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Assist(AssistError::EnhancementFailed(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ENHANCEMENT_FAILED",
                msg.clone(),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::AssistantUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ASSISTANT_UNAVAILABLE",
                "No text-generation provider is configured".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::warn!(code, %message, "request failed");
        }

        let request_id = uuid::Uuid::now_v7().to_string();
        (status, Json(ApiResponse::error(code, &message, request_id, 0))).into_response()
    }
}
