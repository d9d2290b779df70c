use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::quiz_dto::{
    CreateQuizPayload, QuizQuestionsResponse, QuizSummary, SubmitQuizRequest, SubmitQuizResponse,
};
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_quizzes(State(state): State<AppState>) -> crate::error::Result<Response> {
    let quizzes = state.quiz_service.list_quizzes().await?;
    let summaries: Vec<QuizSummary> = quizzes.iter().map(QuizSummary::from).collect();
    Ok(Json(summaries).into_response())
}

#[axum::debug_handler]
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let quiz = state.quiz_service.get_quiz(quiz_id).await?;
    Ok(Json(QuizSummary::from(&quiz)).into_response())
}

/// Questions as served before submission: no correct option ids, no
/// explanations.
#[axum::debug_handler]
pub async fn get_quiz_questions(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let (quiz, questions) = state.quiz_service.questions_for_attempt(quiz_id).await?;
    Ok(Json(QuizQuestionsResponse {
        quiz: QuizSummary::from(&quiz),
        questions,
    })
    .into_response())
}

#[axum::debug_handler]
pub async fn create_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateQuizPayload>,
) -> crate::error::Result<Response> {
    req.validate()?;
    state.user_service.require_user(&claims).await?;
    let quiz = state.quiz_service.create_quiz(req).await?;
    Ok(Json(QuizSummary::from(&quiz)).into_response())
}

#[axum::debug_handler]
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<Uuid>,
    Json(req): Json<SubmitQuizRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user = state.user_service.require_user(&claims).await?;
    let time_taken = req.time_taken;
    let (attempt, outcome) = state.attempt_service.submit(user.id, quiz_id, req).await?;

    let quiz = state.quiz_service.get_quiz(quiz_id).await?;
    Ok(Json(SubmitQuizResponse {
        attempt_id: attempt.id,
        score: outcome.score,
        correct_answers: outcome.correct_answers,
        total_questions: outcome.total_questions,
        passing_score: quiz.passing_score,
        passed: outcome.passed,
        time_taken,
        detailed_results: outcome.detailed_results,
    })
    .into_response())
}
