//! REST endpoints for profile fetch and wholesale update.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::model::{ActivityLevel, FitnessLevel, Gender, UserProfile};
use crate::store::Database;

/// Shared state for profile routes.
#[derive(Clone)]
pub struct ProfileRouteState {
    pub db: Arc<dyn Database>,
}

/// Wholesale profile submission. Every field is optional and defaults the
/// same way a missing stored field would.
#[derive(Debug, Deserialize)]
struct ProfileSubmission {
    #[serde(default)]
    name: String,
    #[serde(default)]
    age: u32,
    #[serde(default)]
    weight_kg: f64,
    #[serde(default)]
    height_cm: f64,
    #[serde(default)]
    gender: Gender,
    #[serde(default)]
    fitness_level: FitnessLevel,
    #[serde(default)]
    activity_level: ActivityLevel,
    #[serde(default)]
    goals: Vec<String>,
    #[serde(default)]
    equipment: Vec<String>,
    #[serde(default)]
    dietary_restrictions: Vec<String>,
    #[serde(default)]
    diet_notes: Option<String>,
}

/// GET /api/users/{user_id}/profile
async fn get_profile(
    State(state): State<ProfileRouteState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.db.get_profile(&user_id).await {
        Ok(Some(profile)) => {
            Json(serde_json::to_value(profile).unwrap_or_default()).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "No profile exists yet"})),
        )
            .into_response(),
        Err(e) => storage_error("profile fetch", &e),
    }
}

/// PUT /api/users/{user_id}/profile
///
/// Creates or replaces the profile wholesale. Numeric fields are taken as
/// submitted; only the conversational onboarding path range-checks them.
async fn put_profile(
    State(state): State<ProfileRouteState>,
    Path(user_id): Path<String>,
    Json(submission): Json<ProfileSubmission>,
) -> impl IntoResponse {
    let existing = match state.db.get_profile(&user_id).await {
        Ok(existing) => existing,
        Err(e) => return storage_error("profile fetch", &e),
    };

    let mut profile = UserProfile::new(&user_id);
    if let Some(ref old) = existing {
        profile.created_at = old.created_at;
    }
    profile.name = submission.name;
    profile.age = submission.age;
    profile.weight_kg = submission.weight_kg;
    profile.height_cm = submission.height_cm;
    profile.gender = submission.gender;
    profile.fitness_level = submission.fitness_level;
    profile.activity_level = submission.activity_level;
    profile.goals = submission.goals;
    profile.equipment = submission.equipment;
    profile.dietary_restrictions = submission.dietary_restrictions;
    profile.diet_notes = submission.diet_notes;

    let result = if existing.is_some() {
        state.db.update_profile(&profile).await
    } else {
        state.db.insert_profile(&profile).await
    };

    match result {
        Ok(()) => Json(serde_json::to_value(profile).unwrap_or_default()).into_response(),
        Err(e) => storage_error("profile save", &e),
    }
}

fn storage_error(what: &str, e: &crate::error::DatabaseError) -> axum::response::Response {
    tracing::error!("Storage failure during {what}: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": "Storage unavailable"})),
    )
        .into_response()
}

/// Build the profile routes.
pub fn profile_routes(state: ProfileRouteState) -> Router {
    Router::new()
        .route(
            "/api/users/{user_id}/profile",
            get(get_profile).put(put_profile),
        )
        .with_state(state)
}
