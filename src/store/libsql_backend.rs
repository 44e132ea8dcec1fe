//! libSQL backend — async `Database` trait implementation.
//!
//! Supports local file and in-memory databases. Tag lists (goals,
//! equipment, dietary restrictions) are stored as JSON text columns;
//! timestamps are RFC 3339 text, dates are ISO `YYYY-MM-DD` text.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::coach::{ChatRecord, ChatRole, CoachContext};
use crate::error::DatabaseError;
use crate::profile::{ActivityLevel, FitnessLevel, Gender, UserProfile};
use crate::store::migrations;
use crate::store::traits::Database;
use crate::tracking::{MealRecord, MealSlot, ProgressRecord, WorkoutRecord};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 string into DateTime<Utc>. We always write RFC 3339,
/// so anything else reads as the epoch floor.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parse an ISO `YYYY-MM-DD` date.
fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

/// Decode a JSON-encoded tag list column.
fn parse_tag_list(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

/// Encode a tag list for storage.
fn encode_tag_list(list: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(list).map_err(|e| DatabaseError::Serialization(e.to_string()))
}

/// Convert `Option<&str>` to a libsql Value.
fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

/// Convert an optional integer to a libsql Value.
fn opt_int(v: Option<i64>) -> libsql::Value {
    match v {
        Some(v) => libsql::Value::Integer(v),
        None => libsql::Value::Null,
    }
}

/// Convert an optional float to a libsql Value.
fn opt_real(v: Option<f64>) -> libsql::Value {
    match v {
        Some(v) => libsql::Value::Real(v),
        None => libsql::Value::Null,
    }
}

fn row_to_profile(row: &libsql::Row) -> Result<UserProfile, libsql::Error> {
    let gender: String = row.get(5)?;
    let fitness_level: String = row.get(6)?;
    let activity_level: String = row.get(7)?;
    let goals: String = row.get(8)?;
    let equipment: String = row.get(9)?;
    let restrictions: String = row.get(10)?;
    let created_str: String = row.get(12)?;
    let updated_str: String = row.get(13)?;

    Ok(UserProfile {
        user_id: row.get(0)?,
        name: row.get(1)?,
        age: row.get::<i64>(2)? as u32,
        weight_kg: row.get(3)?,
        height_cm: row.get(4)?,
        gender: Gender::parse(&gender),
        fitness_level: FitnessLevel::parse(&fitness_level),
        activity_level: ActivityLevel::parse(&activity_level),
        goals: parse_tag_list(&goals),
        equipment: parse_tag_list(&equipment),
        dietary_restrictions: parse_tag_list(&restrictions),
        diet_notes: row.get(11).ok(),
        created_at: parse_datetime(&created_str),
        updated_at: parse_datetime(&updated_str),
    })
}

fn row_to_workout(row: &libsql::Row) -> Result<WorkoutRecord, libsql::Error> {
    let id_str: String = row.get(0)?;
    let performed_str: String = row.get(6)?;
    let created_str: String = row.get(7)?;

    Ok(WorkoutRecord {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::nil()),
        user_id: row.get(1)?,
        name: row.get(2)?,
        duration_min: row.get::<i64>(3)? as u32,
        calories: row.get::<i64>(4).ok().map(|v| v as u32),
        notes: row.get(5).ok(),
        performed_on: parse_date(&performed_str),
        created_at: parse_datetime(&created_str),
    })
}

fn row_to_meal(row: &libsql::Row) -> Result<MealRecord, libsql::Error> {
    let id_str: String = row.get(0)?;
    let slot: String = row.get(3)?;
    let eaten_str: String = row.get(8)?;
    let created_str: String = row.get(9)?;

    Ok(MealRecord {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::nil()),
        user_id: row.get(1)?,
        name: row.get(2)?,
        slot: MealSlot::parse(&slot),
        calories: row.get::<i64>(4)? as u32,
        protein_g: row.get::<i64>(5)? as u32,
        carbs_g: row.get::<i64>(6)? as u32,
        fats_g: row.get::<i64>(7)? as u32,
        eaten_on: parse_date(&eaten_str),
        created_at: parse_datetime(&created_str),
    })
}

fn row_to_progress(row: &libsql::Row) -> Result<ProgressRecord, libsql::Error> {
    let id_str: String = row.get(0)?;
    let recorded_str: String = row.get(5)?;
    let created_str: String = row.get(6)?;

    Ok(ProgressRecord {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::nil()),
        user_id: row.get(1)?,
        weight_kg: row.get(2)?,
        body_fat_pct: row.get(3).ok(),
        notes: row.get(4).ok(),
        recorded_on: parse_date(&recorded_str),
        created_at: parse_datetime(&created_str),
    })
}

fn row_to_chat(row: &libsql::Row) -> Result<ChatRecord, libsql::Error> {
    let id_str: String = row.get(0)?;
    let role: String = row.get(2)?;
    let context: String = row.get(4)?;
    let created_str: String = row.get(5)?;

    Ok(ChatRecord {
        id: Uuid::parse_str(&id_str).unwrap_or_else(|_| Uuid::nil()),
        user_id: row.get(1)?,
        role: ChatRole::parse(&role),
        content: row.get(3)?,
        context: CoachContext::parse(&context),
        created_at: parse_datetime(&created_str),
    })
}

// ── Trait implementation ────────────────────────────────────────────

const PROFILE_COLUMNS: &str = "user_id, name, age, weight_kg, height_cm, gender, fitness_level, activity_level, goals, equipment, dietary_restrictions, diet_notes, created_at, updated_at";

const WORKOUT_COLUMNS: &str =
    "id, user_id, name, duration_min, calories, notes, performed_on, created_at";

const MEAL_COLUMNS: &str =
    "id, user_id, name, slot, calories, protein_g, carbs_g, fats_g, eaten_on, created_at";

const PROGRESS_COLUMNS: &str =
    "id, user_id, weight_kg, body_fat_pct, notes, recorded_on, created_at";

const CHAT_COLUMNS: &str = "id, user_id, role, content, context, created_at";

#[async_trait]
impl Database for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    // ── Profiles ────────────────────────────────────────────────────

    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        let conn = self.conn();
        conn.execute(
            &format!(
                "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
            ),
            params![
                profile.user_id.as_str(),
                profile.name.as_str(),
                i64::from(profile.age),
                profile.weight_kg,
                profile.height_cm,
                profile.gender.as_str(),
                profile.fitness_level.as_str(),
                profile.activity_level.as_str(),
                encode_tag_list(&profile.goals)?,
                encode_tag_list(&profile.equipment)?,
                encode_tag_list(&profile.dietary_restrictions)?,
                opt_text(profile.diet_notes.as_deref()),
                profile.created_at.to_rfc3339(),
                profile.updated_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("insert_profile: {e}")))?;

        debug!(user_id = %profile.user_id, "Profile inserted");
        Ok(())
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        let conn = self.conn();
        let now = Utc::now().to_rfc3339();
        let affected = conn
            .execute(
                "UPDATE profiles SET name = ?1, age = ?2, weight_kg = ?3, height_cm = ?4, gender = ?5, fitness_level = ?6, activity_level = ?7, goals = ?8, equipment = ?9, dietary_restrictions = ?10, diet_notes = ?11, updated_at = ?12 WHERE user_id = ?13",
                params![
                    profile.name.as_str(),
                    i64::from(profile.age),
                    profile.weight_kg,
                    profile.height_cm,
                    profile.gender.as_str(),
                    profile.fitness_level.as_str(),
                    profile.activity_level.as_str(),
                    encode_tag_list(&profile.goals)?,
                    encode_tag_list(&profile.equipment)?,
                    encode_tag_list(&profile.dietary_restrictions)?,
                    opt_text(profile.diet_notes.as_deref()),
                    now,
                    profile.user_id.as_str(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("update_profile: {e}")))?;

        if affected == 0 {
            return Err(DatabaseError::NotFound {
                entity: "profile".to_string(),
                user_id: profile.user_id.clone(),
            });
        }
        debug!(user_id = %profile.user_id, "Profile updated");
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ?1"),
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_profile: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let profile = row_to_profile(&row)
                    .map_err(|e| DatabaseError::Query(format!("get_profile row parse: {e}")))?;
                Ok(Some(profile))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_profile: {e}"))),
        }
    }

    // ── Workouts ────────────────────────────────────────────────────

    async fn insert_workout(&self, record: &WorkoutRecord) -> Result<(), DatabaseError> {
        let conn = self.conn();
        conn.execute(
            &format!(
                "INSERT INTO workouts ({WORKOUT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ),
            params![
                record.id.to_string(),
                record.user_id.as_str(),
                record.name.as_str(),
                i64::from(record.duration_min),
                opt_int(record.calories.map(i64::from)),
                opt_text(record.notes.as_deref()),
                record.performed_on.to_string(),
                record.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("insert_workout: {e}")))?;
        Ok(())
    }

    async fn list_workouts(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE user_id = ?1 ORDER BY performed_on DESC, created_at DESC LIMIT ?2"
                ),
                params![user_id, limit as i64],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_workouts: {e}")))?;

        let mut records = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            match row_to_workout(&row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping workout row: {e}"),
            }
        }
        Ok(records)
    }

    // ── Meals ───────────────────────────────────────────────────────

    async fn insert_meal(&self, record: &MealRecord) -> Result<(), DatabaseError> {
        let conn = self.conn();
        conn.execute(
            &format!(
                "INSERT INTO meals ({MEAL_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            params![
                record.id.to_string(),
                record.user_id.as_str(),
                record.name.as_str(),
                record.slot.as_str(),
                i64::from(record.calories),
                i64::from(record.protein_g),
                i64::from(record.carbs_g),
                i64::from(record.fats_g),
                record.eaten_on.to_string(),
                record.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("insert_meal: {e}")))?;
        Ok(())
    }

    async fn list_meals(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MealRecord>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {MEAL_COLUMNS} FROM meals WHERE user_id = ?1 ORDER BY eaten_on DESC, created_at DESC LIMIT ?2"
                ),
                params![user_id, limit as i64],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_meals: {e}")))?;

        let mut records = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            match row_to_meal(&row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping meal row: {e}"),
            }
        }
        Ok(records)
    }

    // ── Progress ────────────────────────────────────────────────────

    async fn insert_progress(&self, record: &ProgressRecord) -> Result<(), DatabaseError> {
        let conn = self.conn();
        conn.execute(
            &format!(
                "INSERT INTO progress_entries ({PROGRESS_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            params![
                record.id.to_string(),
                record.user_id.as_str(),
                record.weight_kg,
                opt_real(record.body_fat_pct),
                opt_text(record.notes.as_deref()),
                record.recorded_on.to_string(),
                record.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("insert_progress: {e}")))?;
        Ok(())
    }

    async fn list_progress(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ProgressRecord>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {PROGRESS_COLUMNS} FROM progress_entries WHERE user_id = ?1 ORDER BY recorded_on DESC, created_at DESC LIMIT ?2"
                ),
                params![user_id, limit as i64],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_progress: {e}")))?;

        let mut records = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            match row_to_progress(&row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping progress row: {e}"),
            }
        }
        Ok(records)
    }

    // ── Chat messages ───────────────────────────────────────────────

    async fn insert_chat_message(&self, record: &ChatRecord) -> Result<(), DatabaseError> {
        let conn = self.conn();
        conn.execute(
            &format!("INSERT INTO chat_messages ({CHAT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
            params![
                record.id.to_string(),
                record.user_id.as_str(),
                record.role.as_str(),
                record.content.as_str(),
                record.context.as_str(),
                record.created_at.to_rfc3339(),
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(format!("insert_chat_message: {e}")))?;
        Ok(())
    }

    async fn list_chat_messages(&self, user_id: &str) -> Result<Vec<ChatRecord>, DatabaseError> {
        let conn = self.conn();
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {CHAT_COLUMNS} FROM chat_messages WHERE user_id = ?1 ORDER BY created_at ASC"
                ),
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_chat_messages: {e}")))?;

        let mut records = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            match row_to_chat(&row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping chat row: {e}"),
            }
        }
        Ok(records)
    }

    async fn delete_chat_messages(&self, user_id: &str) -> Result<usize, DatabaseError> {
        let conn = self.conn();
        let affected = conn
            .execute(
                "DELETE FROM chat_messages WHERE user_id = ?1",
                params![user_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("delete_chat_messages: {e}")))?;

        debug!(user_id, deleted = affected, "Chat history cleared");
        Ok(affected as usize)
    }
}
