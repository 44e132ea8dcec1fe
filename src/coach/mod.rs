//! Coach chat — the remote coaching endpoint and its fallback persona.
//!
//! The endpoint is consumed as a single request/response call; its
//! internals (prompt assembly, the upstream language model) are somebody
//! else's problem. What this module owns is the contract: on any transport
//! or upstream failure the conversation never stalls: a fixed message
//! keyed by context answers instead, and both sides of every exchange are
//! persisted as chat records.

pub mod client;
pub mod routes;
pub mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use client::{CoachApi, HttpCoachClient};
pub use routes::{ChatRouteState, chat_routes};
pub use service::ChatService;

/// Conversation context sent with every coach request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachContext {
    Workout,
    Diet,
    Motivation,
    #[default]
    General,
}

impl CoachContext {
    /// Parse a stored string. Unknown contexts read as `General`.
    pub fn parse(s: &str) -> Self {
        match s {
            "workout" => Self::Workout,
            "diet" => Self::Diet,
            "motivation" => Self::Motivation,
            _ => Self::General,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Diet => "diet",
            Self::Motivation => "motivation",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for CoachContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for the remote coaching endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachRequest {
    pub message: String,
    pub user_id: String,
    pub context: CoachContext,
}

/// Response body from the remote coaching endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachReply {
    pub message: String,
    pub context: String,
}

/// Who authored a chat record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Coach,
}

impl ChatRole {
    pub fn parse(s: &str) -> Self {
        match s {
            "coach" => Self::Coach,
            _ => Self::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Coach => "coach",
        }
    }
}

/// A persisted chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub user_id: String,
    pub role: ChatRole,
    pub content: String,
    pub context: CoachContext,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(user_id: &str, role: ChatRole, content: &str, context: CoachContext) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            role,
            content: content.to_string(),
            context,
            created_at: Utc::now(),
        }
    }
}

/// Fixed fallback reply for a context, used whenever the endpoint fails or
/// is not configured.
pub fn fallback_message(context: CoachContext) -> &'static str {
    match context {
        CoachContext::Workout => {
            "I can't reach your coach right now, but the session doesn't have to wait: \
             warm up properly, keep your form strict, and leave one rep in the tank."
        }
        CoachContext::Diet => {
            "I can't reach your coach right now. Until I'm back: build each meal around \
             protein and vegetables, and keep a glass of water within reach."
        }
        CoachContext::Motivation => {
            "Connection hiccup — but you don't need me for this one. Showing up today \
             is the win. One session at a time."
        }
        CoachContext::General => {
            "I'm having trouble reaching the coaching service right now. Please try \
             again in a moment."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_parse_defaults_to_general() {
        assert_eq!(CoachContext::parse("workout"), CoachContext::Workout);
        assert_eq!(CoachContext::parse("diet"), CoachContext::Diet);
        assert_eq!(CoachContext::parse("motivation"), CoachContext::Motivation);
        assert_eq!(CoachContext::parse("philosophy"), CoachContext::General);
    }

    #[test]
    fn each_context_has_a_distinct_fallback() {
        let all = [
            CoachContext::Workout,
            CoachContext::Diet,
            CoachContext::Motivation,
            CoachContext::General,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(fallback_message(*a), fallback_message(*b));
            }
        }
    }

    #[test]
    fn request_serializes_with_camel_case_user_id() {
        let request = CoachRequest {
            message: "How many sets?".to_string(),
            user_id: "user-1".to_string(),
            context: CoachContext::Workout,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"userId\":\"user-1\""));
        assert!(json.contains("\"context\":\"workout\""));
    }

    #[test]
    fn chat_role_roundtrip() {
        assert_eq!(ChatRole::parse(ChatRole::Coach.as_str()), ChatRole::Coach);
        assert_eq!(ChatRole::parse(ChatRole::User.as_str()), ChatRole::User);
        assert_eq!(ChatRole::parse("unknown"), ChatRole::User);
    }
}
