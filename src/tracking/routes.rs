//! REST endpoints for workout, meal, and progress logging.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use super::model::{MealRecord, MealSlot, ProgressRecord, WorkoutRecord};
use crate::store::Database;

const DEFAULT_LIST_LIMIT: usize = 50;

/// Shared state for tracking routes.
#[derive(Clone)]
pub struct TrackingRouteState {
    pub db: Arc<dyn Database>,
}

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<usize>,
}

impl ListParams {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

#[derive(Debug, Deserialize)]
struct NewWorkout {
    name: String,
    duration_min: u32,
    calories: Option<u32>,
    notes: Option<String>,
    performed_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct NewMeal {
    name: String,
    slot: MealSlot,
    calories: u32,
    #[serde(default)]
    protein_g: u32,
    #[serde(default)]
    carbs_g: u32,
    #[serde(default)]
    fats_g: u32,
    eaten_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct NewProgress {
    weight_kg: f64,
    body_fat_pct: Option<f64>,
    notes: Option<String>,
    recorded_on: NaiveDate,
}

/// POST /api/users/{user_id}/workouts
async fn post_workout(
    State(state): State<TrackingRouteState>,
    Path(user_id): Path<String>,
    Json(body): Json<NewWorkout>,
) -> impl IntoResponse {
    let mut record = WorkoutRecord::new(&user_id, &body.name, body.duration_min, body.performed_on);
    record.calories = body.calories;
    record.notes = body.notes;
    match state.db.insert_workout(&record).await {
        Ok(()) => created(&record),
        Err(e) => storage_error("workout insert", &e),
    }
}

/// GET /api/users/{user_id}/workouts
async fn list_workouts(
    State(state): State<TrackingRouteState>,
    Path(user_id): Path<String>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    match state.db.list_workouts(&user_id, params.limit()).await {
        Ok(records) => Json(serde_json::to_value(records).unwrap_or_default()).into_response(),
        Err(e) => storage_error("workout list", &e),
    }
}

/// POST /api/users/{user_id}/meals
async fn post_meal(
    State(state): State<TrackingRouteState>,
    Path(user_id): Path<String>,
    Json(body): Json<NewMeal>,
) -> impl IntoResponse {
    let mut record = MealRecord::new(&user_id, &body.name, body.slot, body.calories, body.eaten_on);
    record.protein_g = body.protein_g;
    record.carbs_g = body.carbs_g;
    record.fats_g = body.fats_g;
    match state.db.insert_meal(&record).await {
        Ok(()) => created(&record),
        Err(e) => storage_error("meal insert", &e),
    }
}

/// GET /api/users/{user_id}/meals
async fn list_meals(
    State(state): State<TrackingRouteState>,
    Path(user_id): Path<String>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    match state.db.list_meals(&user_id, params.limit()).await {
        Ok(records) => Json(serde_json::to_value(records).unwrap_or_default()).into_response(),
        Err(e) => storage_error("meal list", &e),
    }
}

/// POST /api/users/{user_id}/progress
async fn post_progress(
    State(state): State<TrackingRouteState>,
    Path(user_id): Path<String>,
    Json(body): Json<NewProgress>,
) -> impl IntoResponse {
    let mut record = ProgressRecord::new(&user_id, body.weight_kg, body.recorded_on);
    record.body_fat_pct = body.body_fat_pct;
    record.notes = body.notes;
    match state.db.insert_progress(&record).await {
        Ok(()) => created(&record),
        Err(e) => storage_error("progress insert", &e),
    }
}

/// GET /api/users/{user_id}/progress
async fn list_progress(
    State(state): State<TrackingRouteState>,
    Path(user_id): Path<String>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    match state.db.list_progress(&user_id, params.limit()).await {
        Ok(records) => Json(serde_json::to_value(records).unwrap_or_default()).into_response(),
        Err(e) => storage_error("progress list", &e),
    }
}

fn created<T: serde::Serialize>(record: &T) -> axum::response::Response {
    (
        StatusCode::CREATED,
        Json(serde_json::to_value(record).unwrap_or_default()),
    )
        .into_response()
}

fn storage_error(what: &str, e: &crate::error::DatabaseError) -> axum::response::Response {
    tracing::error!("Storage failure during {what}: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Storage unavailable"})),
    )
        .into_response()
}

/// Build the tracking routes.
pub fn tracking_routes(state: TrackingRouteState) -> Router {
    Router::new()
        .route(
            "/api/users/{user_id}/workouts",
            post(post_workout).get(list_workouts),
        )
        .route("/api/users/{user_id}/meals", post(post_meal).get(list_meals))
        .route(
            "/api/users/{user_id}/progress",
            post(post_progress).get(list_progress),
        )
        .with_state(state)
}
