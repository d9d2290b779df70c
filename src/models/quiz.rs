use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::question::Question;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub module_id: Option<Uuid>,
    pub questions: JsonValue,
    pub passing_score: i32,
    pub time_limit: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    pub fn parsed_questions(&self) -> Vec<Question> {
        serde_json::from_value(self.questions.clone()).unwrap_or_default()
    }
}
