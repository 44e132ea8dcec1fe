//! REST endpoints for coach chat.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::CoachContext;
use super::service::ChatService;

/// Shared state for chat routes.
#[derive(Clone)]
pub struct ChatRouteState {
    pub service: Arc<ChatService>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    context: CoachContext,
}

/// POST /api/users/{user_id}/chat
///
/// One coach exchange. The reply is the endpoint's answer or, on any
/// endpoint failure, the fixed fallback for the request's context.
async fn post_chat(
    State(state): State<ChatRouteState>,
    Path(user_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    match state
        .service
        .send(&user_id, &request.message, request.context)
        .await
    {
        Ok(reply) => Json(serde_json::to_value(reply).unwrap_or_default()).into_response(),
        Err(e) => storage_error("chat exchange", &e),
    }
}

/// GET /api/users/{user_id}/chat
async fn get_history(
    State(state): State<ChatRouteState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.service.history(&user_id).await {
        Ok(records) => Json(serde_json::to_value(records).unwrap_or_default()).into_response(),
        Err(e) => storage_error("chat history", &e),
    }
}

/// DELETE /api/users/{user_id}/chat
async fn delete_history(
    State(state): State<ChatRouteState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    match state.service.clear(&user_id).await {
        Ok(deleted) => Json(serde_json::json!({ "deleted": deleted })).into_response(),
        Err(e) => storage_error("chat clear", &e),
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

/// Build the chat routes.
pub fn chat_routes(state: ChatRouteState) -> Router {
    Router::new()
        .route(
            "/api/users/{user_id}/chat",
            post(post_chat).get(get_history).delete(delete_history),
        )
        .with_state(state)
}
