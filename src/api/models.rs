use crate::llm::CompletionClient;
use crate::storage::ReviewStore;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub completion: Arc<dyn CompletionClient>,
    pub store: Arc<dyn ReviewStore>,
    pub temperature: f32,
}

/// Request to review a code snippet
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub code_snippet: String,
    pub language: String,
}

/// Service banner for `GET /`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl ReviewRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.code_snippet.trim().is_empty() {
            return Err("Code snippet cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Caller sent something unusable; nothing was forwarded upstream.
    BadRequest(String),
    /// The model reply was not a JSON object, even after fence stripping.
    UpstreamFormat(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UpstreamFormat(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: status.to_string(),
                detail,
            }),
        )
            .into_response()
    }
}
