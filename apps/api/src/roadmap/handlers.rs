//! Axum route handler for roadmap generation.
//!
//! Idle → ProfileLoading → Generating → Persisting → Done | Failed.
//! Any failure renders the `{ "error": message }` envelope; a draft that fails
//! to persist is dropped, never retried or cached.

use std::time::Duration;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoadmapRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoadmapResponse {
    pub success: bool,
    pub message: String,
    pub roadmap_id: String,
}

fn parse_user_id(request: &GenerateRoadmapRequest) -> Result<Uuid, AppError> {
    let raw = request
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("userId is required".to_string()))?;
    Uuid::parse_str(raw)
        .map_err(|_| AppError::Validation(format!("userId '{raw}' is not a valid id")))
}

/// POST /generate-roadmap
///
/// Loads the caller's profile, generates and reconciles a roadmap, then
/// persists it atomically. Returns the new roadmap id.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRoadmapRequest>, JsonRejection>,
) -> Result<Json<GenerateRoadmapResponse>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;
    let user_id = parse_user_id(&request)?;

    let profile = state.profiles.load_profile(user_id).await?;
    info!("Profile loaded for user {user_id}");

    let deadline = state.config.generation_deadline_secs;
    let roadmap = tokio::time::timeout(
        Duration::from_secs(deadline),
        state.generator.generate(&profile),
    )
    .await
    .map_err(|_| AppError::Timeout(deadline))??;

    let roadmap_id = state.roadmaps.save_roadmap(user_id, &roadmap).await?;
    info!("Roadmap {roadmap_id} generated for user {user_id}");

    Ok(Json(GenerateRoadmapResponse {
        success: true,
        message: "Roadmap generated successfully".to_string(),
        roadmap_id,
    }))
}
