//! Onboarding phase machine — tracks where a session is in the conversation.

use serde::{Deserialize, Serialize};

/// The phases of the onboarding conversation.
///
/// Progresses linearly: Greeting → Structured → Complete. Within
/// `Structured` the controller keeps a step cursor; `Complete` is reached
/// only after the collected profile has been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPhase {
    #[default]
    Greeting,
    Structured,
    Complete,
}

impl ConversationPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: ConversationPhase) -> bool {
        use ConversationPhase::*;
        matches!((self, target), (Greeting, Structured) | (Structured, Complete))
    }

    /// Whether this phase is terminal (onboarding is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Get the next phase in the linear progression, if any.
    pub fn next(&self) -> Option<ConversationPhase> {
        match self {
            Self::Greeting => Some(Self::Structured),
            Self::Structured => Some(Self::Complete),
            Self::Complete => None,
        }
    }
}

impl std::fmt::Display for ConversationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::Structured => "structured",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use ConversationPhase::*;
        assert!(Greeting.can_transition_to(Structured));
        assert!(Structured.can_transition_to(Complete));
    }

    #[test]
    fn invalid_transitions() {
        use ConversationPhase::*;
        // Skip ahead
        assert!(!Greeting.can_transition_to(Complete));
        // Go backward
        assert!(!Structured.can_transition_to(Greeting));
        assert!(!Complete.can_transition_to(Greeting));
        // Self-transition
        assert!(!Structured.can_transition_to(Structured));
    }

    #[test]
    fn next_walks_all_phases() {
        use ConversationPhase::*;
        assert_eq!(Greeting.next(), Some(Structured));
        assert_eq!(Structured.next(), Some(Complete));
        assert_eq!(Complete.next(), None);
    }

    #[test]
    fn terminal_phase() {
        assert!(ConversationPhase::Complete.is_terminal());
        assert!(!ConversationPhase::Greeting.is_terminal());
        assert!(!ConversationPhase::Structured.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        for phase in [
            ConversationPhase::Greeting,
            ConversationPhase::Structured,
            ConversationPhase::Complete,
        ] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{phase}\""));
        }
    }
}
