//! Error types for the advisory API

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tax_core::{LlmError, RepositoryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Assistant unavailable")]
    AssistantUnavailable,

    #[error("Upstream error: {0}")]
    Upstream(LlmError),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::UnsupportedFileType(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::AssistantUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Repository(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound("record".to_string()),
            other => ApiError::Repository(other),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => ApiError::AssistantUnavailable,
            other => ApiError::Upstream(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::InvalidRequest(msg) => msg.clone(),
            ApiError::UnsupportedFileType(file_type) => format!(
                "File type '{}' is not allowed. Upload a PDF, JPEG, PNG or Excel file.",
                file_type
            ),
            ApiError::NotFound(what) => format!("Not found: {}", what),
            ApiError::PayloadTooLarge => "Uploaded file is too large".to_string(),
            ApiError::AssistantUnavailable => {
                tracing::warn!("Chat requested but no language model is configured");
                "AI assistant is not configured".to_string()
            }
            ApiError::Upstream(e) => {
                tracing::error!("Language model error: {}", e);
                "AI assistant failed to respond".to_string()
            }
            ApiError::Repository(e) => {
                tracing::error!("Repository error: {}", e);
                "Database error".to_string()
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                "Internal error".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
