//! OnboardingManager — per-user sessions and the completion action.
//!
//! Sessions live in memory only; the single persistence call happens when
//! the last step is answered. A failed save leaves the session recoverable
//! and is never retried automatically; `retry_completion` exists for the
//! embedding UI to offer a retry.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use super::controller::{MessageOutcome, OnboardingController, SubmitOutcome, TranscriptEntry};
use super::state::ConversationPhase;
use super::steps::StepAnswer;
use crate::store::Database;

/// Reply to a free-form onboarding message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageReply {
    pub reply: String,
    pub phase: ConversationPhase,
    pub progress: f32,
}

/// Reply to a structured step submission.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReply {
    /// Whether the submission passed the step's validation predicate.
    pub accepted: bool,
    /// Whether the collected profile has been persisted.
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    pub progress: f32,
}

/// Snapshot returned by the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStatus {
    pub phase: ConversationPhase,
    pub progress: f32,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<String>,
    pub transcript: Vec<TranscriptEntry>,
}

/// Coordinates onboarding sessions and persists the finished profile.
pub struct OnboardingManager {
    db: Arc<dyn Database>,
    sessions: RwLock<HashMap<String, OnboardingController>>,
}

impl OnboardingManager {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self {
            db,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Handle a free-form chat message, creating the session on first
    /// contact.
    pub async fn handle_message(&self, user_id: &str, text: &str) -> MessageReply {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id.to_string()).or_default();
        let reply = match session.handle_message(text) {
            MessageOutcome::Started { first_question } => first_question,
            MessageOutcome::Reprompted { reply } => reply,
        };
        MessageReply {
            reply,
            phase: session.phase(),
            progress: session.progress(),
        }
    }

    /// Submit an answer for the active step. Answering the final step runs
    /// the completion action: one profile insert carrying the collected
    /// fields plus the user id.
    pub async fn submit_answer(&self, user_id: &str, answer: &StepAnswer) -> AnswerReply {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id.to_string()).or_default();

        match session.submit(answer) {
            SubmitOutcome::Rejected => AnswerReply {
                accepted: false,
                completed: false,
                next_question: session.current_step().map(|s| s.question.to_string()),
                progress: session.progress(),
            },
            SubmitOutcome::Advanced { next_question } => AnswerReply {
                accepted: true,
                completed: false,
                next_question: Some(next_question),
                progress: session.progress(),
            },
            SubmitOutcome::StepsComplete => {
                let saved = self.run_completion(user_id, session).await;
                AnswerReply {
                    accepted: true,
                    completed: saved,
                    next_question: None,
                    progress: session.progress(),
                }
            }
        }
    }

    /// Re-run a previously failed completion action. No-op unless every
    /// step is answered and the profile has not been saved yet.
    pub async fn retry_completion(&self, user_id: &str) -> AnswerReply {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(user_id) else {
            return AnswerReply {
                accepted: false,
                completed: false,
                next_question: None,
                progress: 0.0,
            };
        };

        let completed = if session.steps_complete() && !session.phase().is_terminal() {
            self.run_completion(user_id, session).await
        } else {
            session.phase().is_terminal()
        };
        AnswerReply {
            accepted: session.steps_complete(),
            completed,
            next_question: session.current_step().map(|s| s.question.to_string()),
            progress: session.progress(),
        }
    }

    /// Current session snapshot; a user without a session reads as a fresh
    /// greeting-phase one.
    pub async fn status(&self, user_id: &str) -> OnboardingStatus {
        let sessions = self.sessions.read().await;
        match sessions.get(user_id) {
            Some(session) => OnboardingStatus {
                phase: session.phase(),
                progress: session.progress(),
                completed: session.phase().is_terminal(),
                current_question: session.current_step().map(|s| s.question.to_string()),
                transcript: session.transcript().to_vec(),
            },
            None => OnboardingStatus {
                phase: ConversationPhase::Greeting,
                progress: 0.0,
                completed: false,
                current_question: None,
                transcript: Vec::new(),
            },
        }
    }

    async fn run_completion(&self, user_id: &str, session: &mut OnboardingController) -> bool {
        let profile = session.draft().clone().into_profile(user_id);
        let saved = match self.db.insert_profile(&profile).await {
            Ok(()) => {
                tracing::info!(user_id, "Onboarding profile saved");
                true
            }
            Err(e) => {
                tracing::warn!(user_id, "Failed to save onboarding profile: {e}");
                false
            }
        };
        session.record_completion(saved);
        saved
    }
}
