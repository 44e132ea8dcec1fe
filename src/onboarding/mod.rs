//! Conversational onboarding — a fixed question sequence disguised as chat.
//!
//! A linear phase machine (greeting → structured → complete) walks the user
//! through five validated steps, accumulates a draft profile, and fires a
//! single persistence call at the end. Steps are immutable configuration,
//! recreated each session; only the finished profile is stored.

pub mod controller;
pub mod manager;
pub mod routes;
pub mod state;
pub mod steps;

pub use controller::{
    DraftProfile, MessageOutcome, OnboardingController, Sender, SubmitOutcome, TranscriptEntry,
};
pub use manager::{AnswerReply, MessageReply, OnboardingManager, OnboardingStatus};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use state::ConversationPhase;
pub use steps::{
    OnboardingStep, ProfileField, SelectOption, StepAnswer, StepKind, UnitSystem, ValidatedAnswer,
    step_sequence,
};
