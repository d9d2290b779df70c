use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTimeSpentRequest {
    /// Minutes to add to the accumulator. The stored total never decreases.
    #[validate(range(min = 0, message = "Minutes must be non-negative"))]
    pub minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkSectionCompleteResponse {
    pub message: String,
    pub progress_percentage: i32,
    pub sections_completed: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_modules: i64,
    pub completed_modules: i64,
    pub total_time_spent: i64,
    pub completion_percentage: f64,
}
