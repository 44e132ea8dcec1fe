//! Workout plan generation — fixed exercise tables keyed by level and track.

use serde::{Deserialize, Serialize};

use crate::profile::{FitnessLevel, UserProfile};

/// Which exercise track a plan draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Strength,
    Cardio,
}

/// One exercise in a plan. `reps` may encode a hold/work duration instead
/// of a count (e.g. "15-30s").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: String,
    pub rest: String,
}

/// An ephemeral workout plan. Produced fresh on every call; the caller
/// decides whether to persist it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub level: FitnessLevel,
    pub track: Track,
    pub duration: String,
    pub exercises: Vec<Exercise>,
}

type ExerciseRow = (&'static str, u32, &'static str, &'static str);

const BEGINNER_STRENGTH: (&str, &[ExerciseRow]) = (
    "30 min",
    &[
        ("Bodyweight Squats", 3, "10-15", "60s"),
        ("Incline Push-ups", 3, "8-12", "60s"),
        ("Glute Bridges", 3, "12-15", "45s"),
        ("Bent-over Dumbbell Rows", 3, "10-12", "60s"),
        ("Plank", 3, "20-30s", "45s"),
    ],
);

const BEGINNER_CARDIO: (&str, &[ExerciseRow]) = (
    "30 min",
    &[
        ("Brisk Walk / Light Jog", 1, "10 min", "-"),
        ("Jumping Jacks", 3, "30-45s", "30s"),
        ("Step-ups", 3, "10-12", "45s"),
        ("Mountain Climbers", 3, "15-30s", "45s"),
        ("Cool-down Walk", 1, "5 min", "-"),
    ],
);

const INTERMEDIATE_STRENGTH: (&str, &[ExerciseRow]) = (
    "45 min",
    &[
        ("Goblet Squats", 4, "8-12", "90s"),
        ("Push-ups", 4, "12-15", "60s"),
        ("Dumbbell Romanian Deadlifts", 3, "10-12", "90s"),
        ("Overhead Dumbbell Press", 3, "8-12", "90s"),
        ("Pull-ups / Assisted Pull-ups", 3, "6-10", "90s"),
        ("Side Plank", 3, "20-40s", "45s"),
    ],
);

const INTERMEDIATE_CARDIO: (&str, &[ExerciseRow]) = (
    "40 min",
    &[
        ("Jog", 1, "15 min", "-"),
        ("Burpees", 4, "10-15", "60s"),
        ("High Knees", 4, "30-45s", "30s"),
        ("Jump Squats", 3, "12-15", "60s"),
        ("Skipping Rope", 3, "60s", "45s"),
    ],
);

const ADVANCED_STRENGTH: (&str, &[ExerciseRow]) = (
    "60 min",
    &[
        ("Barbell Back Squats", 5, "5-8", "120s"),
        ("Barbell Bench Press", 5, "5-8", "120s"),
        ("Deadlifts", 4, "4-6", "150s"),
        ("Weighted Pull-ups", 4, "6-8", "120s"),
        ("Barbell Overhead Press", 4, "6-8", "120s"),
        ("Hanging Leg Raises", 3, "10-15", "60s"),
    ],
);

const ADVANCED_CARDIO: (&str, &[ExerciseRow]) = (
    "50 min",
    &[
        ("Interval Run (1 min hard / 1 min easy)", 10, "2 min", "-"),
        ("Burpee Broad Jumps", 4, "12-15", "60s"),
        ("Kettlebell Swings", 4, "15-20", "60s"),
        ("Box Jumps", 4, "10-12", "75s"),
        ("Battle Ropes", 4, "30-45s", "45s"),
    ],
);

/// Look up the fixed table for a (level, track) pair.
fn table(level: FitnessLevel, track: Track) -> Option<(&'static str, &'static [ExerciseRow])> {
    match (level, track) {
        (FitnessLevel::Beginner, Track::Strength) => Some(BEGINNER_STRENGTH),
        (FitnessLevel::Beginner, Track::Cardio) => Some(BEGINNER_CARDIO),
        (FitnessLevel::Intermediate, Track::Strength) => Some(INTERMEDIATE_STRENGTH),
        (FitnessLevel::Intermediate, Track::Cardio) => Some(INTERMEDIATE_CARDIO),
        (FitnessLevel::Advanced, Track::Strength) => Some(ADVANCED_STRENGTH),
        (FitnessLevel::Advanced, Track::Cardio) => Some(ADVANCED_CARDIO),
    }
}

/// Generate a workout plan for a profile.
///
/// Goals containing "weight_loss" select the cardio track, anything else
/// the strength track. A missing (level, track) table falls back to
/// beginner strength silently; this function never fails.
pub fn workout_plan(profile: &UserProfile) -> WorkoutPlan {
    let track = if profile.has_goal("weight_loss") {
        Track::Cardio
    } else {
        Track::Strength
    };

    let (duration, rows) = table(profile.fitness_level, track).unwrap_or(BEGINNER_STRENGTH);

    WorkoutPlan {
        level: profile.fitness_level,
        track,
        duration: duration.to_string(),
        exercises: rows
            .iter()
            .map(|(name, sets, reps, rest)| Exercise {
                name: (*name).to_string(),
                sets: *sets,
                reps: (*reps).to_string(),
                rest: (*rest).to_string(),
            })
            .collect(),
    }
}
