//! REST endpoints for the conversational onboarding flow.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use super::manager::OnboardingManager;
use super::steps::StepAnswer;

/// Shared state for onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub manager: Arc<OnboardingManager>,
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    text: String,
}

/// POST /api/onboarding/{user_id}/message
///
/// Greeting-phase chat turn. Returns the coach's reply plus the session's
/// phase and progress.
async fn post_message(
    State(state): State<OnboardingRouteState>,
    Path(user_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Json<super::manager::MessageReply> {
    Json(state.manager.handle_message(&user_id, &request.text).await)
}

/// POST /api/onboarding/{user_id}/answer
///
/// Structured step submission. A rejected answer comes back with
/// `accepted: false` and the unchanged current question. Local validation
/// failures are not errors.
async fn post_answer(
    State(state): State<OnboardingRouteState>,
    Path(user_id): Path<String>,
    Json(answer): Json<StepAnswer>,
) -> Json<super::manager::AnswerReply> {
    Json(state.manager.submit_answer(&user_id, &answer).await)
}

/// POST /api/onboarding/{user_id}/complete
///
/// Retry a completion action whose persistence call failed.
async fn post_complete(
    State(state): State<OnboardingRouteState>,
    Path(user_id): Path<String>,
) -> Json<super::manager::AnswerReply> {
    Json(state.manager.retry_completion(&user_id).await)
}

/// GET /api/onboarding/{user_id}/status
async fn get_status(
    State(state): State<OnboardingRouteState>,
    Path(user_id): Path<String>,
) -> Json<super::manager::OnboardingStatus> {
    Json(state.manager.status(&user_id).await)
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/{user_id}/message", post(post_message))
        .route("/api/onboarding/{user_id}/answer", post(post_answer))
        .route("/api/onboarding/{user_id}/complete", post(post_complete))
        .route("/api/onboarding/{user_id}/status", get(get_status))
        .with_state(state)
}
