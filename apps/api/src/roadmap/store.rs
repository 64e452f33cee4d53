//! Profile loading and the roadmap persistence gateway.
//!
//! Both sit behind traits carried in `AppState`, so the request handler can be
//! exercised with in-memory stores.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::roadmap::models::RoadmapDraft;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profile(&self, user_id: Uuid) -> Result<UserProfile, AppError>;
}

/// Atomically writes a roadmap graph (roadmap, phases, milestones, resources).
/// Either every row lands and the new roadmap id is returned, or nothing does.
#[async_trait]
pub trait RoadmapStore: Send + Sync {
    async fn save_roadmap(&self, user_id: Uuid, roadmap: &RoadmapDraft) -> Result<String, AppError>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn load_profile(&self, user_id: Uuid) -> Result<UserProfile, AppError> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, full_name,
                   COALESCE(goals, '{}') AS goals,
                   COALESCE(skills, '{}') AS skills,
                   background, time_available, challenges, learning_style
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound(user_id.to_string()))
    }
}

#[async_trait]
impl RoadmapStore for PgStore {
    async fn save_roadmap(&self, user_id: Uuid, roadmap: &RoadmapDraft) -> Result<String, AppError> {
        // The stored procedure runs in a single transaction; a failure leaves no rows behind.
        let roadmap_id: Uuid = sqlx::query_scalar(
            "SELECT create_roadmap_with_details($1, $2, $3, $4::jsonb)",
        )
        .bind(user_id)
        .bind(&roadmap.title)
        .bind(&roadmap.description)
        .bind(Json(&roadmap.phases))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Persistence(e.to_string()))?;

        info!("Persisted roadmap {roadmap_id} for user {user_id}");
        Ok(roadmap_id.to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::MemoryRoadmaps;
    use super::*;
    use crate::roadmap::models::fixtures::{milestone, phase, resource, roadmap};

    #[test]
    fn test_phases_payload_matches_procedure_shape() {
        let draft = roadmap(vec![phase(
            1,
            vec![milestone(1, vec![resource("R", "https://r.example")])],
        )]);
        let payload = serde_json::to_value(&draft.phases).unwrap();
        let milestone = &payload[0]["milestones"][0];
        assert_eq!(payload[0]["position"], 1);
        assert_eq!(milestone["estimated_time"], "2 weeks");
        assert_eq!(milestone["resources"][0]["type"], "Course");
        assert_eq!(milestone["resources"][0]["url"], "https://r.example");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_nothing() {
        let store = MemoryRoadmaps {
            fail_with: Some("constraint violation".to_string()),
            ..Default::default()
        };
        let draft = roadmap(vec![]);
        let err = store.save_roadmap(Uuid::new_v4(), &draft).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert!(store.saved.lock().unwrap().is_empty());
    }
}
