//! Log entry models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which meal of the day a logged meal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub fn parse(s: &str) -> Self {
        match s {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            _ => Self::Snack,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

/// A logged workout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub duration_min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub performed_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl WorkoutRecord {
    pub fn new(user_id: &str, name: &str, duration_min: u32, performed_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            duration_min,
            calories: None,
            notes: None,
            performed_on,
            created_at: Utc::now(),
        }
    }
}

/// A logged meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub slot: MealSlot,
    pub calories: u32,
    #[serde(default)]
    pub protein_g: u32,
    #[serde(default)]
    pub carbs_g: u32,
    #[serde(default)]
    pub fats_g: u32,
    pub eaten_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl MealRecord {
    pub fn new(
        user_id: &str,
        name: &str,
        slot: MealSlot,
        calories: u32,
        eaten_on: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            slot,
            calories,
            protein_g: 0,
            carbs_g: 0,
            fats_g: 0,
            eaten_on,
            created_at: Utc::now(),
        }
    }
}

/// A progress measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: Uuid,
    pub user_id: String,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recorded_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(user_id: &str, weight_kg: f64, recorded_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            weight_kg,
            body_fat_pct: None,
            notes: None,
            recorded_on,
            created_at: Utc::now(),
        }
    }
}
