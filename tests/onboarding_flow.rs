//! End-to-end onboarding flow against the in-memory backend.

use std::sync::Arc;

use fitcoach::onboarding::{ConversationPhase, OnboardingManager, StepAnswer, UnitSystem};
use fitcoach::profile::ActivityLevel;
use fitcoach::store::{Database, LibSqlBackend};

async fn manager() -> (Arc<dyn Database>, OnboardingManager) {
    let db: Arc<dyn Database> = Arc::new(LibSqlBackend::new_memory().await.unwrap());
    let manager = OnboardingManager::new(Arc::clone(&db));
    (db, manager)
}

fn all_answers() -> Vec<StepAnswer> {
    vec![
        StepAnswer::Measurements {
            height: 5.8,
            weight: 154.0,
            unit: UnitSystem::Imperial,
        },
        StepAnswer::Single {
            value: "moderate".into(),
        },
        StepAnswer::Text {
            value: "Porridge for breakfast, big lunch, light dinner".into(),
        },
        StepAnswer::Multi {
            values: vec!["dumbbells".into(), "pull_up_bar".into()],
        },
        StepAnswer::Multi {
            values: vec!["vegetarian".into()],
        },
    ]
}

#[tokio::test]
async fn greeting_gate_then_structured_sequence() {
    let (_db, manager) = manager().await;

    // Not a greeting: reprompt, still in the greeting phase
    let reply = manager.handle_message("u1", "ok let's go").await;
    assert_eq!(reply.phase, ConversationPhase::Greeting);
    assert_eq!(reply.progress, 0.0);

    // Greeting starts the structured sequence with the first question
    let reply = manager.handle_message("u1", "hey there").await;
    assert_eq!(reply.phase, ConversationPhase::Structured);
    assert!(reply.reply.contains("height and weight"));

    let status = manager.status("u1").await;
    // Two user messages + reprompt + first question
    assert_eq!(status.transcript.len(), 4);
}

#[tokio::test]
async fn rejected_answer_leaves_no_trace() {
    let (_db, manager) = manager().await;
    manager.handle_message("u1", "hello").await;
    let before = manager.status("u1").await.transcript.len();

    let reply = manager
        .submit_answer(
            "u1",
            &StepAnswer::Measurements {
                height: 40.0,
                weight: 70.0,
                unit: UnitSystem::Metric,
            },
        )
        .await;

    assert!(!reply.accepted);
    assert_eq!(reply.progress, 0.0);
    // The unchanged question is offered back; nothing was recorded
    assert!(reply.next_question.unwrap().contains("height and weight"));
    assert_eq!(manager.status("u1").await.transcript.len(), before);
}

#[tokio::test]
async fn full_flow_persists_one_profile_with_all_fields() {
    let (db, manager) = manager().await;
    manager.handle_message("u1", "good morning").await;

    let mut last_progress = 0.0_f32;
    let answers = all_answers();
    for (i, answer) in answers.iter().enumerate() {
        let reply = manager.submit_answer("u1", answer).await;
        assert!(reply.accepted, "answer {i} should be accepted");
        assert!(reply.progress >= last_progress);
        last_progress = reply.progress;
        if i + 1 < answers.len() {
            assert!(!reply.completed);
            assert!(reply.next_question.is_some());
        } else {
            assert!(reply.completed);
            assert!(reply.next_question.is_none());
        }
    }

    let status = manager.status("u1").await;
    assert_eq!(status.phase, ConversationPhase::Complete);
    assert_eq!(status.progress, 1.0);

    // Exactly one insert happened, carrying the five collected fields
    let profile = db.get_profile("u1").await.unwrap().expect("profile saved");
    assert_eq!(profile.user_id, "u1");
    // Imperial input converted and rounded: 5.8 ft is 177 cm, 154 lb is 70 kg
    assert_eq!(profile.height_cm, 177.0);
    assert_eq!(profile.weight_kg, 70.0);
    assert_eq!(profile.activity_level, ActivityLevel::Moderate);
    assert!(profile.diet_notes.unwrap().contains("Porridge"));
    assert_eq!(profile.equipment, vec!["dumbbells", "pull_up_bar"]);
    assert_eq!(profile.dietary_restrictions, vec!["vegetarian"]);
}

#[tokio::test]
async fn sessions_are_isolated_per_user() {
    let (db, manager) = manager().await;
    manager.handle_message("u1", "hello").await;
    manager.handle_message("u2", "hola").await;

    for answer in all_answers() {
        manager.submit_answer("u1", &answer).await;
    }

    assert!(db.get_profile("u1").await.unwrap().is_some());
    assert!(db.get_profile("u2").await.unwrap().is_none());

    let status = manager.status("u2").await;
    assert_eq!(status.phase, ConversationPhase::Structured);
    assert_eq!(status.progress, 0.0);
}

#[tokio::test]
async fn completion_failure_leaves_session_recoverable() {
    let (db, manager) = manager().await;

    // A pre-existing row makes the completion insert hit the primary key,
    // standing in for any persistence failure.
    let existing = fitcoach::profile::UserProfile::new("u1");
    db.insert_profile(&existing).await.unwrap();

    manager.handle_message("u1", "hello").await;
    let answers = all_answers();
    let mut last = None;
    for answer in &answers {
        last = Some(manager.submit_answer("u1", answer).await);
    }

    let reply = last.unwrap();
    assert!(reply.accepted);
    assert!(!reply.completed);

    let status = manager.status("u1").await;
    assert_eq!(status.phase, ConversationPhase::Structured);
    assert_eq!(status.progress, 1.0);

    // Retrying hits the same failure but the session stays intact
    let retry = manager.retry_completion("u1").await;
    assert!(retry.accepted);
    assert!(!retry.completed);
    assert_eq!(
        manager.status("u1").await.phase,
        ConversationPhase::Structured
    );
}

#[tokio::test]
async fn unknown_user_reads_as_fresh_greeting_session() {
    let (_db, manager) = manager().await;
    let status = manager.status("nobody").await;
    assert_eq!(status.phase, ConversationPhase::Greeting);
    assert_eq!(status.progress, 0.0);
    assert!(status.transcript.is_empty());
    assert!(!status.completed);
}
