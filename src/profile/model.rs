//! User profile data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gender as used by the BMR formula.
///
/// The formula only distinguishes "male" from everything else, so unknown
/// strings parse to `Female` (the −161 branch) and a missing field defaults
/// to `Male`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Parse a stored string. Anything that isn't "male" is `Female`.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("male") {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-reported training experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    /// Parse a stored string. Unrecognized levels fall back to `Beginner`.
    pub fn parse(s: &str) -> Self {
        match s {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekly activity tier used to scale BMR into TDEE.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// Parse a stored string. Unrecognized tiers fall back to `Light`
    /// (multiplier 1.375).
    pub fn parse(s: &str) -> Self {
        match s {
            "sedentary" => Self::Sedentary,
            "moderate" => Self::Moderate,
            "active" => Self::Active,
            "very_active" => Self::VeryActive,
            _ => Self::Light,
        }
    }

    /// TDEE activity multiplier for this tier.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }

    /// Human-readable label shown by select affordances.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (little or no exercise)",
            Self::Light => "Lightly active (1-3 days/week)",
            Self::Moderate => "Moderately active (3-5 days/week)",
            Self::Active => "Active (6-7 days/week)",
            Self::VeryActive => "Very active (hard training daily)",
        }
    }

    /// All tiers, in presentation order.
    pub fn all() -> [Self; 5] {
        [
            Self::Sedentary,
            Self::Light,
            Self::Moderate,
            Self::Active,
            Self::VeryActive,
        ]
    }
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's fitness profile.
///
/// One row per user, keyed by the opaque `user_id` from the auth
/// collaborator. Updated wholesale on re-submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub height_cm: f64,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub fitness_level: FitnessLevel,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Goal tags, e.g. "weight_loss", "muscle_gain", "endurance".
    #[serde(default)]
    pub goals: Vec<String>,
    /// Equipment tags, e.g. "dumbbells", "resistance_bands".
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Dietary restriction tags, e.g. "vegetarian", "gluten_free".
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Free-text description of current eating habits, from onboarding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create an empty profile for a user, with every field at its default.
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            name: String::new(),
            age: 0,
            weight_kg: 0.0,
            height_cm: 0.0,
            gender: Gender::default(),
            fitness_level: FitnessLevel::default(),
            activity_level: ActivityLevel::default(),
            goals: Vec::new(),
            equipment: Vec::new(),
            dietary_restrictions: Vec::new(),
            diet_notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the profile carries the given goal tag.
    pub fn has_goal(&self, tag: &str) -> bool {
        self.goals.iter().any(|g| g == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse_treats_non_male_as_female() {
        assert_eq!(Gender::parse("male"), Gender::Male);
        assert_eq!(Gender::parse("Male"), Gender::Male);
        assert_eq!(Gender::parse("female"), Gender::Female);
        assert_eq!(Gender::parse("nonbinary"), Gender::Female);
        assert_eq!(Gender::parse(""), Gender::Female);
    }

    #[test]
    fn fitness_level_parse_falls_back_to_beginner() {
        assert_eq!(FitnessLevel::parse("intermediate"), FitnessLevel::Intermediate);
        assert_eq!(FitnessLevel::parse("advanced"), FitnessLevel::Advanced);
        assert_eq!(FitnessLevel::parse("elite"), FitnessLevel::Beginner);
        assert_eq!(FitnessLevel::parse(""), FitnessLevel::Beginner);
    }

    #[test]
    fn activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::Light.multiplier(), 1.375);
        assert_eq!(ActivityLevel::Moderate.multiplier(), 1.55);
        assert_eq!(ActivityLevel::Active.multiplier(), 1.725);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.9);
    }

    #[test]
    fn activity_parse_defaults_to_light() {
        assert_eq!(ActivityLevel::parse("very_active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::parse("couch"), ActivityLevel::Light);
        assert_eq!(ActivityLevel::parse("couch").multiplier(), 1.375);
    }

    #[test]
    fn display_matches_serde() {
        for level in ActivityLevel::all() {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{level}\""));
        }
        let json = serde_json::to_string(&FitnessLevel::Advanced).unwrap();
        assert_eq!(json, "\"advanced\"");
        let json = serde_json::to_string(&Gender::Male).unwrap();
        assert_eq!(json, "\"male\"");
    }

    #[test]
    fn profile_serde_roundtrip() {
        let mut profile = UserProfile::new("user-1");
        profile.name = "Alice".to_string();
        profile.age = 25;
        profile.weight_kg = 70.0;
        profile.height_cm = 170.0;
        profile.goals = vec!["weight_loss".to_string()];
        profile.equipment = vec!["dumbbells".to_string()];

        let json = serde_json::to_string(&profile).unwrap();
        let parsed: UserProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.user_id, "user-1");
        assert_eq!(parsed.name, "Alice");
        assert_eq!(parsed.weight_kg, 70.0);
        assert!(parsed.has_goal("weight_loss"));
        assert!(!parsed.has_goal("muscle_gain"));
    }

    #[test]
    fn missing_fields_take_silent_defaults() {
        let parsed: UserProfile = serde_json::from_str(
            r#"{"user_id":"u","created_at":"2026-01-01T00:00:00Z","updated_at":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.gender, Gender::Male);
        assert_eq!(parsed.fitness_level, FitnessLevel::Beginner);
        assert_eq!(parsed.activity_level, ActivityLevel::Light);
        assert!(parsed.goals.is_empty());
    }
}
