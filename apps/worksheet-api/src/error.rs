//! Error types for the worksheet API

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gigachat_client::ProviderError;
use latex_engine::EngineError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No files uploaded")]
    MissingUpload,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed upload: {0}")]
    Upload(#[from] MultipartError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("PDF generation failed: {0}")]
    Compile(#[from] EngineError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingUpload => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Upload(e) => (StatusCode::BAD_REQUEST, format!("Malformed upload: {e}")),
            ApiError::Provider(e @ ProviderError::UnsupportedModel { .. }) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Provider(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Compile(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
