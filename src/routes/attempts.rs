use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use uuid::Uuid;

use crate::dto::quiz_dto::{AttemptDetailResponse, AttemptSummary, QuizSummary};
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_quiz_attempts(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> crate::error::Result<Response> {
    let user = state.user_service.require_user(&claims).await?;
    let attempts = state.attempt_service.list_for_user(user.id).await?;
    Ok(Json(attempts).into_response())
}

#[axum::debug_handler]
pub async fn get_quiz_attempt(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(attempt_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    let user = state.user_service.require_user(&claims).await?;
    let (attempt, quiz, detailed_results) = state
        .attempt_service
        .get_for_user(attempt_id, user.id)
        .await?;

    Ok(Json(AttemptDetailResponse {
        attempt: AttemptSummary {
            id: attempt.id,
            quiz_id: attempt.quiz_id,
            score: attempt.score,
            correct_answers: attempt.correct_answers,
            total_questions: attempt.total_questions,
            passed: attempt.passed,
            time_taken: attempt.time_taken,
            created_at: attempt.created_at,
        },
        quiz: QuizSummary::from(&quiz),
        detailed_results,
    })
    .into_response())
}
