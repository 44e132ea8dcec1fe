//! Conversation controller — one onboarding session's cursor, draft
//! profile, and transcript.
//!
//! The controller is pure state + transition functions; persistence and
//! session bookkeeping live in the manager, rendering in the embedding UI.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::ConversationPhase;
use super::steps::{OnboardingStep, ProfileField, StepAnswer, ValidatedAnswer, step_sequence};
use crate::profile::{ActivityLevel, UserProfile};

/// Greeting keywords, matched case-insensitively as substrings.
const GREETING_KEYWORDS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "hola",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

/// Reprompt while the session stays in the greeting phase.
const GREETING_REPROMPT: &str =
    "Say hello whenever you're ready and we'll get your profile set up!";

/// Closing message once the profile has been saved.
const CLOSING_MESSAGE: &str =
    "That's everything I need — your profile is saved. Let's get to work!";

/// Apology when the profile could not be saved. The session stays
/// recoverable; nothing is retried automatically.
const SAVE_FAILED_MESSAGE: &str =
    "Sorry, I couldn't save your profile just now. Please try again in a moment.";

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Coach,
}

/// One chat bubble in the onboarding conversation.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Answers collected so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DraftProfile {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub diet_notes: Option<String>,
    pub equipment: Vec<String>,
    pub dietary_restrictions: Vec<String>,
}

impl DraftProfile {
    fn merge(&mut self, field: ProfileField, answer: ValidatedAnswer) {
        match (field, answer) {
            (
                ProfileField::Measurements,
                ValidatedAnswer::Measurements {
                    height_cm,
                    weight_kg,
                },
            ) => {
                self.height_cm = Some(height_cm);
                self.weight_kg = Some(weight_kg);
            }
            (ProfileField::ActivityLevel, ValidatedAnswer::Single(option)) => {
                self.activity_level = Some(ActivityLevel::parse(&option.value));
            }
            (ProfileField::DietNotes, ValidatedAnswer::Text(text)) => {
                self.diet_notes = Some(text);
            }
            (ProfileField::Equipment, ValidatedAnswer::Multi(options)) => {
                self.equipment = options.into_iter().map(|o| o.value).collect();
            }
            (ProfileField::DietaryRestrictions, ValidatedAnswer::Multi(options)) => {
                self.dietary_restrictions = options.into_iter().map(|o| o.value).collect();
            }
            // Step kinds and fields are paired in the fixed sequence, so a
            // mismatched combination cannot come out of validation.
            _ => {}
        }
    }

    /// Materialize the draft as a profile row for `user_id`. Fields the
    /// conversation does not collect keep their defaults.
    pub fn into_profile(self, user_id: &str) -> UserProfile {
        let mut profile = UserProfile::new(user_id);
        profile.height_cm = self.height_cm.unwrap_or_default();
        profile.weight_kg = self.weight_kg.unwrap_or_default();
        profile.activity_level = self.activity_level.unwrap_or_default();
        profile.diet_notes = self.diet_notes;
        profile.equipment = self.equipment;
        profile.dietary_restrictions = self.dietary_restrictions;
        profile
    }
}

/// Outcome of a free-form chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Greeting recognized; the structured sequence has begun.
    Started { first_question: String },
    /// No transition; the reply restates what the session is waiting for.
    Reprompted { reply: String },
}

/// Outcome of a structured step submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed. No transcript entry, no cursor movement.
    Rejected,
    /// Step accepted; the next question was appended to the transcript.
    Advanced { next_question: String },
    /// Every step is complete. The caller must now run the completion
    /// action (persist the draft) and report back via `record_completion`.
    StepsComplete,
}

/// State machine for a single onboarding session.
pub struct OnboardingController {
    phase: ConversationPhase,
    cursor: usize,
    steps: Vec<OnboardingStep>,
    completed: Vec<bool>,
    draft: DraftProfile,
    transcript: Vec<TranscriptEntry>,
}

impl Default for OnboardingController {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingController {
    pub fn new() -> Self {
        let steps = step_sequence();
        let completed = vec![false; steps.len()];
        Self {
            phase: ConversationPhase::Greeting,
            cursor: 0,
            steps,
            completed,
            draft: DraftProfile::default(),
            transcript: Vec::new(),
        }
    }

    pub fn phase(&self) -> ConversationPhase {
        self.phase
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    /// The active step, if the structured sequence is in progress.
    pub fn current_step(&self) -> Option<&OnboardingStep> {
        if self.phase == ConversationPhase::Structured {
            self.steps.get(self.cursor)
        } else {
            None
        }
    }

    /// Completed steps / total steps. Recomputed per call; monotonically
    /// non-decreasing within a session.
    pub fn progress(&self) -> f32 {
        let done = self.completed.iter().filter(|c| **c).count();
        done as f32 / self.steps.len() as f32
    }

    /// Handle a free-form chat message.
    ///
    /// In the greeting phase a keyword match starts the structured
    /// sequence; anything else draws the fixed reprompt. The user's text is
    /// recorded in the transcript either way.
    pub fn handle_message(&mut self, text: &str) -> MessageOutcome {
        self.push_user(text);
        match self.phase {
            ConversationPhase::Greeting => {
                if is_greeting(text) {
                    self.phase = ConversationPhase::Structured;
                    self.cursor = 0;
                    let question = self.steps[0].question;
                    self.push_coach(question);
                    MessageOutcome::Started {
                        first_question: question.to_string(),
                    }
                } else {
                    self.push_coach(GREETING_REPROMPT);
                    MessageOutcome::Reprompted {
                        reply: GREETING_REPROMPT.to_string(),
                    }
                }
            }
            ConversationPhase::Structured => {
                // Mid-sequence chatter: restate the active question (or the
                // save apology if the completion action is pending a retry).
                let reply = self
                    .steps
                    .get(self.cursor)
                    .map_or(SAVE_FAILED_MESSAGE, |s| s.question);
                self.push_coach(reply);
                MessageOutcome::Reprompted {
                    reply: reply.to_string(),
                }
            }
            ConversationPhase::Complete => {
                self.push_coach(CLOSING_MESSAGE);
                MessageOutcome::Reprompted {
                    reply: CLOSING_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Submit an answer for the active step.
    pub fn submit(&mut self, answer: &StepAnswer) -> SubmitOutcome {
        if self.phase != ConversationPhase::Structured || self.cursor >= self.steps.len() {
            return SubmitOutcome::Rejected;
        }

        let Some(valid) = self.steps[self.cursor].validate(answer) else {
            return SubmitOutcome::Rejected;
        };
        let field = self.steps[self.cursor].field;

        self.push_user(&valid.transcript_label());
        self.draft.merge(field, valid);
        self.completed[self.cursor] = true;
        self.cursor += 1;

        if self.cursor < self.steps.len() {
            let question = self.steps[self.cursor].question;
            self.push_coach(question);
            SubmitOutcome::Advanced {
                next_question: question.to_string(),
            }
        } else {
            SubmitOutcome::StepsComplete
        }
    }

    /// Record the result of the completion action.
    ///
    /// On success the session reaches its terminal phase; on failure it
    /// stays where it is so the completion can be retried externally.
    pub fn record_completion(&mut self, saved: bool) {
        if saved {
            self.push_coach(CLOSING_MESSAGE);
            self.phase = ConversationPhase::Complete;
        } else {
            self.push_coach(SAVE_FAILED_MESSAGE);
        }
    }

    /// Whether every step has been answered (the completion action may
    /// still be outstanding).
    pub fn steps_complete(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    fn push_user(&mut self, text: &str) {
        self.transcript.push(TranscriptEntry {
            sender: Sender::User,
            text: text.to_string(),
            at: Utc::now(),
        });
    }

    fn push_coach(&mut self, text: &str) {
        self.transcript.push(TranscriptEntry {
            sender: Sender::Coach,
            text: text.to_string(),
            at: Utc::now(),
        });
    }
}

fn is_greeting(text: &str) -> bool {
    let lower = text.to_lowercase();
    GREETING_KEYWORDS.iter().any(|k| lower.contains(k))
}
