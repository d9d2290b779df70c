use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user, per-module progress. `progress_percentage` and `completed` are
/// always derived from `sections_completed` server-side and written in the
/// same transaction as the set they were derived from.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub module_id: Uuid,
    pub sections_completed: Vec<Uuid>,
    pub progress_percentage: i32,
    pub completed: bool,
    pub time_spent: i32,
    pub last_accessed: DateTime<Utc>,
    pub last_section_accessed: Option<Uuid>,
}
