use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quiz question with its selectable options. `correct_option_id` always
/// refers to exactly one entry of `options`; it must never reach a client
/// before the quiz has been submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: Uuid,
    pub text: String,
    #[serde(default)]
    pub explanation: Option<String>,
}
