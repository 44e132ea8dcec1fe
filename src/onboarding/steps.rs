//! Step descriptors and validators for the structured onboarding sequence.
//!
//! The sequence is fixed configuration: recreated per session, never
//! persisted, presented strictly in declared order with no branching on
//! answer content.

use serde::{Deserialize, Serialize};

use crate::profile::ActivityLevel;

/// Minimum length for free-text answers.
pub const MIN_FREE_TEXT_LEN: usize = 10;

/// Accepted height range after normalization to centimeters.
pub const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);

/// Accepted weight range after normalization to kilograms.
pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 250.0);

const FT_TO_CM: f64 = 30.48;
const LB_TO_KG: f64 = 0.453_592;

/// Which draft-profile field a step fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Measurements,
    ActivityLevel,
    DietNotes,
    Equipment,
    DietaryRestrictions,
}

/// A selectable option: machine value plus display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// The input affordance a step renders, with its validation parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    FreeText { min_len: usize },
    NumericPair,
    SingleSelect { options: Vec<SelectOption> },
    MultiSelect { options: Vec<SelectOption> },
}

/// One immutable step descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingStep {
    pub id: &'static str,
    pub field: ProfileField,
    pub question: &'static str,
    #[serde(flatten)]
    pub kind: StepKind,
}

/// Unit system for the measurements step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

/// A submitted answer for the active step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAnswer {
    /// Free text.
    Text { value: String },
    /// Height and weight: cm/kg for metric, ft/lb for imperial.
    Measurements {
        height: f64,
        weight: f64,
        #[serde(default)]
        unit: UnitSystem,
    },
    /// A single option value.
    Single { value: String },
    /// One or more option values.
    Multi { values: Vec<String> },
}

/// A validated answer, normalized for the draft profile and the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedAnswer {
    Text(String),
    Measurements { height_cm: f64, weight_kg: f64 },
    Single(SelectOption),
    Multi(Vec<SelectOption>),
}

impl ValidatedAnswer {
    /// The transcript line recorded for the user: option labels joined by
    /// comma for multi-select, the resolved label for single-select, the
    /// raw value otherwise.
    pub fn transcript_label(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Measurements {
                height_cm,
                weight_kg,
            } => format!("{height_cm} cm, {weight_kg} kg"),
            Self::Single(option) => option.label.clone(),
            Self::Multi(options) => options
                .iter()
                .map(|o| o.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn in_range(value: f64, (lo, hi): (f64, f64)) -> bool {
    value >= lo && value <= hi
}

impl OnboardingStep {
    /// Validate a submission against this step's input kind.
    ///
    /// Returns `None` on any kind mismatch or failed predicate. Rejection
    /// is a silent no-op from the controller's perspective; the affordance
    /// itself keeps the submit action disabled until the predicate passes.
    pub fn validate(&self, answer: &StepAnswer) -> Option<ValidatedAnswer> {
        match (&self.kind, answer) {
            (StepKind::FreeText { min_len }, StepAnswer::Text { value }) => {
                let trimmed = value.trim();
                (trimmed.chars().count() >= *min_len)
                    .then(|| ValidatedAnswer::Text(trimmed.to_string()))
            }
            (
                StepKind::NumericPair,
                StepAnswer::Measurements {
                    height,
                    weight,
                    unit,
                },
            ) => {
                let (height_cm, weight_kg) = match unit {
                    UnitSystem::Metric => (*height, *weight),
                    UnitSystem::Imperial => {
                        ((height * FT_TO_CM).round(), (weight * LB_TO_KG).round())
                    }
                };
                (in_range(height_cm, HEIGHT_RANGE_CM) && in_range(weight_kg, WEIGHT_RANGE_KG))
                    .then_some(ValidatedAnswer::Measurements {
                        height_cm,
                        weight_kg,
                    })
            }
            (StepKind::SingleSelect { options }, StepAnswer::Single { value }) => options
                .iter()
                .find(|o| o.value == *value)
                .cloned()
                .map(ValidatedAnswer::Single),
            (StepKind::MultiSelect { options }, StepAnswer::Multi { values }) => {
                if values.is_empty() {
                    return None;
                }
                let resolved: Vec<SelectOption> = values
                    .iter()
                    .filter_map(|v| options.iter().find(|o| o.value == *v).cloned())
                    .collect();
                (resolved.len() == values.len()).then_some(ValidatedAnswer::Multi(resolved))
            }
            _ => None,
        }
    }
}

/// The fixed step sequence, in presentation order.
pub fn step_sequence() -> Vec<OnboardingStep> {
    vec![
        OnboardingStep {
            id: "measurements",
            field: ProfileField::Measurements,
            question: "Let's start with the basics — what are your height and weight?",
            kind: StepKind::NumericPair,
        },
        OnboardingStep {
            id: "activity_level",
            field: ProfileField::ActivityLevel,
            question: "How active are you in a typical week?",
            kind: StepKind::SingleSelect {
                options: ActivityLevel::all()
                    .iter()
                    .map(|l| SelectOption::new(l.as_str(), l.label()))
                    .collect(),
            },
        },
        OnboardingStep {
            id: "diet_notes",
            field: ProfileField::DietNotes,
            question: "Tell me about how you eat on a normal day — a sentence or two is plenty.",
            kind: StepKind::FreeText {
                min_len: MIN_FREE_TEXT_LEN,
            },
        },
        OnboardingStep {
            id: "equipment",
            field: ProfileField::Equipment,
            question: "What training equipment do you have access to?",
            kind: StepKind::MultiSelect {
                options: equipment_options(),
            },
        },
        OnboardingStep {
            id: "dietary_restrictions",
            field: ProfileField::DietaryRestrictions,
            question: "Any dietary restrictions I should plan around?",
            kind: StepKind::MultiSelect {
                options: dietary_restriction_options(),
            },
        },
    ]
}

fn equipment_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("none", "Bodyweight only"),
        SelectOption::new("dumbbells", "Dumbbells"),
        SelectOption::new("resistance_bands", "Resistance bands"),
        SelectOption::new("kettlebell", "Kettlebell"),
        SelectOption::new("barbell", "Barbell and plates"),
        SelectOption::new("pull_up_bar", "Pull-up bar"),
        SelectOption::new("gym", "Full gym membership"),
    ]
}

fn dietary_restriction_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("none", "No restrictions"),
        SelectOption::new("vegetarian", "Vegetarian"),
        SelectOption::new("vegan", "Vegan"),
        SelectOption::new("gluten_free", "Gluten-free"),
        SelectOption::new("dairy_free", "Dairy-free"),
        SelectOption::new("nut_allergy", "Nut allergy"),
        SelectOption::new("halal", "Halal"),
        SelectOption::new("kosher", "Kosher"),
    ]
}
