use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A learner profile row, owned by the account system and read once per request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub goals: Vec<String>,
    pub skills: Vec<String>,
    pub background: Option<String>,
    pub time_available: Option<String>,
    pub challenges: Option<String>,
    pub learning_style: Option<String>,
}
