//! REST endpoints for on-demand plan generation.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::plan::{diet_plan, workout_plan};
use crate::store::Database;

/// Shared state for plan routes.
#[derive(Clone)]
pub struct PlanRouteState {
    pub db: Arc<dyn Database>,
}

/// GET /api/users/{user_id}/plans/workout
///
/// Generates a fresh workout plan from the stored profile, or 404 if the
/// user has no profile yet.
async fn get_workout_plan(
    State(state): State<PlanRouteState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.db.get_profile(&user_id).await {
        Ok(Some(profile)) => {
            Json(serde_json::to_value(workout_plan(&profile)).unwrap_or_default()).into_response()
        }
        Ok(None) => profile_missing(),
        Err(e) => store_error("workout plan", &e),
    }
}

/// GET /api/users/{user_id}/plans/diet
async fn get_diet_plan(
    State(state): State<PlanRouteState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.db.get_profile(&user_id).await {
        Ok(Some(profile)) => {
            Json(serde_json::to_value(diet_plan(&profile)).unwrap_or_default()).into_response()
        }
        Ok(None) => profile_missing(),
        Err(e) => store_error("diet plan", &e),
    }
}

fn profile_missing() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "No profile exists yet"})),
    )
        .into_response()
}

fn store_error(what: &str, e: &crate::error::DatabaseError) -> axum::response::Response {
    tracing::error!("Failed to load profile for {what}: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Storage unavailable"})),
    )
        .into_response()
}

/// Build the plan generation routes.
pub fn plan_routes(state: PlanRouteState) -> Router {
    Router::new()
        .route("/api/users/{user_id}/plans/workout", get(get_workout_plan))
        .route("/api/users/{user_id}/plans/diet", get(get_diet_plan))
        .with_state(state)
}
