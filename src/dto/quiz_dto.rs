use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::question::{AnswerOption, Question};
use crate::models::quiz::Quiz;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuizPayload {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub module_id: Option<Uuid>,
    pub questions: Vec<CreateQuestion>,
    #[validate(range(min = 0, max = 100, message = "Passing score must be between 0 and 100"))]
    pub passing_score: i32,
    pub time_limit: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestion {
    pub text: String,
    pub options: Vec<CreateOption>,
    /// Index into `options` of the single correct choice.
    pub correct_option: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOption {
    pub text: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub module_id: Option<Uuid>,
    pub total_questions: usize,
    pub passing_score: i32,
    pub time_limit: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            module_id: quiz.module_id,
            total_questions: quiz.parsed_questions().len(),
            passing_score: quiz.passing_score,
            time_limit: quiz.time_limit,
            created_at: quiz.created_at,
        }
    }
}

/// A question as handed out for an attempt: no correct option id and no
/// option explanations until the attempt has been submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptQuestion {
    pub id: Uuid,
    pub text: String,
    pub options: Vec<AttemptOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptOption {
    pub id: Uuid,
    pub text: String,
}

impl From<&Question> for AttemptQuestion {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            options: question
                .options
                .iter()
                .map(|o| AttemptOption {
                    id: o.id,
                    text: o.text.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestionsResponse {
    pub quiz: QuizSummary,
    pub questions: Vec<AttemptQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    pub selected_option_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitQuizRequest {
    /// Optional echo of the path id; rejected when it disagrees.
    pub quiz_id: Option<Uuid>,
    pub answers: Vec<SubmittedAnswer>,
    pub time_taken: Option<i32>,
}

/// Post-submission review entry for one question. Only produced after
/// grading; this is the point where explanations and the correct option id
/// become visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: Uuid,
    pub question_text: String,
    pub options: Vec<AnswerOption>,
    pub selected_option_id: Option<Uuid>,
    pub correct_option_id: Uuid,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    pub attempt_id: Uuid,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub passing_score: i32,
    pub passed: bool,
    pub time_taken: Option<i32>,
    pub detailed_results: Vec<QuestionResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttemptHistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub passed: bool,
    pub time_taken: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptDetailResponse {
    pub attempt: AttemptSummary,
    pub quiz: QuizSummary,
    pub detailed_results: Vec<QuestionResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub score: i32,
    pub correct_answers: i32,
    pub total_questions: i32,
    pub passed: bool,
    pub time_taken: Option<i32>,
    pub created_at: DateTime<Utc>,
}
