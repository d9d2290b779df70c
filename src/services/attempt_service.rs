use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::quiz_dto::{AttemptHistoryEntry, QuestionResult, SubmitQuizRequest};
use crate::error::{Error, Result};
use crate::models::quiz::Quiz;
use crate::models::quiz_attempt::QuizAttempt;
use crate::services::grading_service::{GradeOutcome, GradingService};

#[derive(Clone)]
pub struct AttemptService {
    pool: PgPool,
}

impl AttemptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grades a submission and stores it as a new, immutable attempt row.
    /// Retaking the quiz appends to the history; nothing is overwritten.
    pub async fn submit(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        req: SubmitQuizRequest,
    ) -> Result<(QuizAttempt, GradeOutcome)> {
        if let Some(body_quiz_id) = req.quiz_id {
            if body_quiz_id != quiz_id {
                return Err(Error::BadRequest(
                    "Quiz id in body does not match the request path".to_string(),
                ));
            }
        }

        let quiz = sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes WHERE id = $1"#)
            .bind(quiz_id)
            .fetch_one(&self.pool)
            .await?;

        let questions = quiz.parsed_questions();
        let answers: HashMap<Uuid, Uuid> = req
            .answers
            .iter()
            .map(|a| (a.question_id, a.selected_option_id))
            .collect();

        let outcome = GradingService::grade(&questions, &answers, quiz.passing_score);

        let answers_json = serde_json::to_value(&answers)?;
        let results_json = serde_json::to_value(&outcome.detailed_results)?;

        let attempt = sqlx::query_as::<_, QuizAttempt>(
            r#"
            INSERT INTO quiz_attempts (
                user_id, quiz_id, answers, score, correct_answers,
                total_questions, time_taken, passed, detailed_results
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(quiz_id)
        .bind(answers_json)
        .bind(outcome.score)
        .bind(outcome.correct_answers)
        .bind(outcome.total_questions)
        .bind(req.time_taken)
        .bind(outcome.passed)
        .bind(results_json)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "Quiz {} graded for user {}: score={} passed={}",
            quiz_id,
            user_id,
            outcome.score,
            outcome.passed
        );

        Ok((attempt, outcome))
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AttemptHistoryEntry>> {
        let rows = sqlx::query_as::<_, AttemptHistoryEntry>(
            r#"
            SELECT a.id, a.user_id, a.quiz_id, q.title AS quiz_title,
                   a.score, a.correct_answers, a.total_questions,
                   a.passed, a.time_taken, a.created_at
            FROM quiz_attempts a
            JOIN quizzes q ON a.quiz_id = q.id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetches one attempt with its stored review breakdown. Attempts are
    /// private to their owner; a foreign id reads as not found.
    pub async fn get_for_user(
        &self,
        attempt_id: Uuid,
        user_id: Uuid,
    ) -> Result<(QuizAttempt, Quiz, Vec<QuestionResult>)> {
        let attempt = sqlx::query_as::<_, QuizAttempt>(
            r#"SELECT * FROM quiz_attempts WHERE id = $1 AND user_id = $2"#,
        )
        .bind(attempt_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let quiz = sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes WHERE id = $1"#)
            .bind(attempt.quiz_id)
            .fetch_one(&self.pool)
            .await?;

        let detailed_results: Vec<QuestionResult> =
            serde_json::from_value(attempt.detailed_results.clone()).unwrap_or_default();

        Ok((attempt, quiz, detailed_results))
    }
}
