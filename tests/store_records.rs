//! Store roundtrips for profiles and log records.

use chrono::NaiveDate;
use fitcoach::error::DatabaseError;
use fitcoach::profile::{ActivityLevel, FitnessLevel, Gender, UserProfile};
use fitcoach::store::{Database, LibSqlBackend};
use fitcoach::tracking::{MealRecord, MealSlot, ProgressRecord, WorkoutRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_profile(user_id: &str) -> UserProfile {
    let mut profile = UserProfile::new(user_id);
    profile.name = "Alice".to_string();
    profile.age = 25;
    profile.weight_kg = 70.0;
    profile.height_cm = 170.0;
    profile.gender = Gender::Female;
    profile.fitness_level = FitnessLevel::Intermediate;
    profile.activity_level = ActivityLevel::Active;
    profile.goals = vec!["weight_loss".to_string(), "endurance".to_string()];
    profile.equipment = vec!["gym".to_string()];
    profile.dietary_restrictions = vec!["gluten_free".to_string()];
    profile.diet_notes = Some("Mostly home cooking".to_string());
    profile
}

#[tokio::test]
async fn reopening_a_file_database_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitcoach.db");

    {
        let db = LibSqlBackend::new_local(&path).await.unwrap();
        db.insert_profile(&sample_profile("u1")).await.unwrap();
    }

    // Reopen: migrations re-run idempotently, data survives
    let db = LibSqlBackend::new_local(&path).await.unwrap();
    let stored = db.get_profile("u1").await.unwrap().unwrap();
    assert_eq!(stored.name, "Alice");
}

#[tokio::test]
async fn profile_insert_fetch_update() {
    let db = LibSqlBackend::new_memory().await.unwrap();

    assert!(db.get_profile("u1").await.unwrap().is_none());

    db.insert_profile(&sample_profile("u1")).await.unwrap();
    let stored = db.get_profile("u1").await.unwrap().unwrap();
    assert_eq!(stored.name, "Alice");
    assert_eq!(stored.gender, Gender::Female);
    assert_eq!(stored.fitness_level, FitnessLevel::Intermediate);
    assert_eq!(stored.activity_level, ActivityLevel::Active);
    assert_eq!(stored.goals, vec!["weight_loss", "endurance"]);
    assert_eq!(stored.diet_notes.as_deref(), Some("Mostly home cooking"));

    // Wholesale update
    let mut updated = sample_profile("u1");
    updated.weight_kg = 68.5;
    updated.goals = vec!["muscle_gain".to_string()];
    db.update_profile(&updated).await.unwrap();

    let stored = db.get_profile("u1").await.unwrap().unwrap();
    assert_eq!(stored.weight_kg, 68.5);
    assert_eq!(stored.goals, vec!["muscle_gain"]);
}

#[tokio::test]
async fn updating_a_missing_profile_is_not_found() {
    let db = LibSqlBackend::new_memory().await.unwrap();
    let result = db.update_profile(&sample_profile("ghost")).await;
    assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
}

#[tokio::test]
async fn workouts_list_newest_first_scoped_to_user() {
    let db = LibSqlBackend::new_memory().await.unwrap();

    let old = WorkoutRecord::new("u1", "Leg day", 40, date(2026, 3, 1));
    let recent = WorkoutRecord::new("u1", "Push day", 45, date(2026, 3, 8));
    let other = WorkoutRecord::new("u2", "Run", 30, date(2026, 3, 9));
    db.insert_workout(&old).await.unwrap();
    db.insert_workout(&recent).await.unwrap();
    db.insert_workout(&other).await.unwrap();

    let listed = db.list_workouts("u1", 50).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "Push day");
    assert_eq!(listed[1].name, "Leg day");

    let limited = db.list_workouts("u1", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].name, "Push day");
}

#[tokio::test]
async fn meal_roundtrip_keeps_macros() {
    let db = LibSqlBackend::new_memory().await.unwrap();

    let mut meal = MealRecord::new("u1", "Chicken and rice", MealSlot::Lunch, 650, date(2026, 3, 8));
    meal.protein_g = 45;
    meal.carbs_g = 70;
    meal.fats_g = 15;
    db.insert_meal(&meal).await.unwrap();

    let listed = db.list_meals("u1", 10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].slot, MealSlot::Lunch);
    assert_eq!(listed[0].calories, 650);
    assert_eq!(listed[0].protein_g, 45);
    assert_eq!(listed[0].carbs_g, 70);
    assert_eq!(listed[0].fats_g, 15);
}

#[tokio::test]
async fn progress_roundtrip_with_optional_fields() {
    let db = LibSqlBackend::new_memory().await.unwrap();

    let mut entry = ProgressRecord::new("u1", 71.2, date(2026, 3, 1));
    entry.body_fat_pct = Some(18.5);
    entry.notes = Some("After vacation".to_string());
    db.insert_progress(&entry).await.unwrap();
    db.insert_progress(&ProgressRecord::new("u1", 70.4, date(2026, 3, 8)))
        .await
        .unwrap();

    let listed = db.list_progress("u1", 10).await.unwrap();
    assert_eq!(listed.len(), 2);
    // Newest first
    assert_eq!(listed[0].weight_kg, 70.4);
    assert_eq!(listed[0].body_fat_pct, None);
    assert_eq!(listed[1].body_fat_pct, Some(18.5));
    assert_eq!(listed[1].notes.as_deref(), Some("After vacation"));
}
