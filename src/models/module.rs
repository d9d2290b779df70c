use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// A unit of study content. Sections are stored embedded as JSONB,
/// ordered by their `order` field.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudyModule {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: String,
    pub sections: JsonValue,
    pub sort_order: i32,
    pub estimated_time: i32,
    pub learning_objectives: JsonValue,
    pub key_concepts: JsonValue,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub order: i32,
}

impl StudyModule {
    pub fn parsed_sections(&self) -> Vec<Section> {
        serde_json::from_value(self.sections.clone()).unwrap_or_default()
    }

    pub fn total_sections(&self) -> usize {
        self.parsed_sections().len()
    }
}
