use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::quiz_dto::{AttemptQuestion, CreateQuizPayload};
use crate::error::{Error, Result};
use crate::models::question::{AnswerOption, Question};
use crate::models::quiz::Quiz;

#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
}

impl QuizService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        let quizzes =
            sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes ORDER BY created_at ASC"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(quizzes)
    }

    pub async fn get_quiz(&self, quiz_id: Uuid) -> Result<Quiz> {
        let quiz = sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes WHERE id = $1"#)
            .bind(quiz_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(quiz)
    }

    pub async fn create_quiz(&self, payload: CreateQuizPayload) -> Result<Quiz> {
        if let Some(module_id) = payload.module_id {
            sqlx::query_scalar::<_, Uuid>(r#"SELECT id FROM study_modules WHERE id = $1"#)
                .bind(module_id)
                .fetch_one(&self.pool)
                .await?;
        }

        let questions = build_questions(&payload.questions)?;
        let questions_json = serde_json::to_value(&questions)?;

        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (title, description, module_id, questions, passing_score, time_limit)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.module_id)
        .bind(questions_json)
        .bind(payload.passing_score)
        .bind(payload.time_limit)
        .fetch_one(&self.pool)
        .await?;

        Ok(quiz)
    }

    /// Questions as served for an attempt, with answer keys and
    /// explanations stripped.
    pub async fn questions_for_attempt(&self, quiz_id: Uuid) -> Result<(Quiz, Vec<AttemptQuestion>)> {
        let quiz = self.get_quiz(quiz_id).await?;
        let questions = sanitize_questions(&quiz.parsed_questions());
        Ok((quiz, questions))
    }

    pub async fn count_quizzes(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM quizzes"#)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

pub fn sanitize_questions(questions: &[Question]) -> Vec<AttemptQuestion> {
    questions.iter().map(AttemptQuestion::from).collect()
}

/// Builds stored questions from the create payload: server-assigned ids for
/// questions and options, with the correct option recorded by id. Every
/// question needs at least two options and a valid correct-option index, so
/// the exactly-one-correct invariant holds by construction.
fn build_questions(payload: &[crate::dto::quiz_dto::CreateQuestion]) -> Result<Vec<Question>> {
    payload
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            if q.options.len() < 2 {
                return Err(Error::BadRequest(format!(
                    "Question {} must have at least two options",
                    idx + 1
                )));
            }
            let options: Vec<AnswerOption> = q
                .options
                .iter()
                .map(|o| AnswerOption {
                    id: Uuid::new_v4(),
                    text: o.text.clone(),
                    explanation: o.explanation.clone(),
                })
                .collect();
            let correct = options.get(q.correct_option).ok_or_else(|| {
                Error::BadRequest(format!(
                    "Question {} has an out-of-range correct option index",
                    idx + 1
                ))
            })?;

            Ok(Question {
                id: Uuid::new_v4(),
                text: q.text.clone(),
                correct_option_id: correct.id,
                options,
            })
        })
        .collect()
}
