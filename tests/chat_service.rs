//! Chat service behavior: fallback substitution and persisted history.

use std::sync::Arc;

use async_trait::async_trait;
use fitcoach::coach::{
    ChatRole, ChatService, CoachApi, CoachContext, CoachReply, CoachRequest, fallback_message,
};
use fitcoach::error::CoachError;
use fitcoach::store::{Database, LibSqlBackend};

/// Upstream that always answers.
struct EchoCoach;

#[async_trait]
impl CoachApi for EchoCoach {
    async fn send(&self, request: &CoachRequest) -> Result<CoachReply, CoachError> {
        Ok(CoachReply {
            message: format!("Coach says: {}", request.message),
            context: request.context.to_string(),
        })
    }
}

/// Upstream that always fails.
struct DownCoach;

#[async_trait]
impl CoachApi for DownCoach {
    async fn send(&self, _request: &CoachRequest) -> Result<CoachReply, CoachError> {
        Err(CoachError::Status { status: 502 })
    }
}

async fn db() -> Arc<dyn Database> {
    Arc::new(LibSqlBackend::new_memory().await.unwrap())
}

#[tokio::test]
async fn successful_exchange_persists_both_sides_in_order() {
    let db = db().await;
    let service = ChatService::new(Arc::clone(&db), Some(Arc::new(EchoCoach)));

    let reply = service
        .send("u1", "How many rest days?", CoachContext::Workout)
        .await
        .unwrap();
    assert_eq!(reply.message, "Coach says: How many rest days?");
    assert_eq!(reply.context, "workout");

    let history = service.history("u1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[0].content, "How many rest days?");
    assert_eq!(history[1].role, ChatRole::Coach);
    assert_eq!(history[1].content, "Coach says: How many rest days?");
    assert_eq!(history[1].context, CoachContext::Workout);
}

#[tokio::test]
async fn endpoint_failure_substitutes_context_fallback() {
    let db = db().await;
    let service = ChatService::new(Arc::clone(&db), Some(Arc::new(DownCoach)));

    for context in [
        CoachContext::Workout,
        CoachContext::Diet,
        CoachContext::Motivation,
        CoachContext::General,
    ] {
        let reply = service.send("u1", "help", context).await.unwrap();
        assert_eq!(reply.message, fallback_message(context));
        assert_eq!(reply.context, context.to_string());
    }

    // Every exchange was still persisted, both sides
    let history = service.history("u1").await.unwrap();
    assert_eq!(history.len(), 8);
}

#[tokio::test]
async fn unconfigured_endpoint_uses_fallback_persona() {
    let db = db().await;
    let service = ChatService::new(Arc::clone(&db), None);

    let reply = service
        .send("u1", "any tips?", CoachContext::Motivation)
        .await
        .unwrap();
    assert_eq!(reply.message, fallback_message(CoachContext::Motivation));

    let history = service.history("u1").await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn clear_removes_only_the_addressed_users_history() {
    let db = db().await;
    let service = ChatService::new(Arc::clone(&db), Some(Arc::new(EchoCoach)));

    service.send("u1", "one", CoachContext::General).await.unwrap();
    service.send("u2", "two", CoachContext::General).await.unwrap();

    let deleted = service.clear("u1").await.unwrap();
    assert_eq!(deleted, 2);

    assert!(service.history("u1").await.unwrap().is_empty());
    assert_eq!(service.history("u2").await.unwrap().len(), 2);
}
