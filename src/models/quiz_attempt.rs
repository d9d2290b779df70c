use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// One scored submission of answers to a quiz. Rows are written once at
/// submission time and never updated; retakes insert new rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub answers: JsonValue,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub time_taken: Option<i32>,
    pub passed: bool,
    pub detailed_results: JsonValue,
    pub created_at: DateTime<Utc>,
}
