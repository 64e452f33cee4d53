use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
///
/// Every variant renders as a 500 with a `{ "error": message }` envelope, which
/// is the only failure shape the front end understands.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Profile not found for user {0}")]
    ProfileNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Roadmap generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Generated roadmap is malformed: {0}")]
    InvalidRoadmap(String),

    #[error("Failed to save roadmap: {0}")]
    Persistence(String),

    #[error("Roadmap generation exceeded the {0}s deadline")]
    Timeout(u64),
}

impl AppError {
    /// The message surfaced to the caller. Upstream details stay in the server log.
    fn public_message(&self) -> String {
        match self {
            AppError::Llm(LlmError::MissingApiKey) => LlmError::MissingApiKey.to_string(),
            AppError::Llm(LlmError::Api { status, message }) => {
                tracing::error!("Generative API returned {status}: {message}");
                format!("Roadmap generation failed: generative API returned status {status}")
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                self.to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "A database error occurred".to_string()
            }
            AppError::Persistence(msg) => {
                tracing::error!("Persistence error: {msg}");
                "Failed to save roadmap".to_string()
            }
            other => {
                tracing::warn!("Request failed: {other}");
                other.to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.public_message() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
