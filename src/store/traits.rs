//! Unified `Database` trait — single async interface for all persistence.
//!
//! Five record kinds, each scoped to an owning `user_id` from the external
//! authentication collaborator: profiles, workouts, meals, progress
//! entries, and chat messages.

use async_trait::async_trait;

use crate::coach::ChatRecord;
use crate::error::DatabaseError;
use crate::profile::UserProfile;
use crate::tracking::{MealRecord, ProgressRecord, WorkoutRecord};

/// Backend-agnostic database trait.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    // ── Profiles ────────────────────────────────────────────────────

    /// Insert a new profile row.
    async fn insert_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError>;

    /// Replace an existing profile row wholesale.
    async fn update_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError>;

    /// Fetch a profile by user id.
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, DatabaseError>;

    // ── Workouts ────────────────────────────────────────────────────

    /// Insert a logged workout.
    async fn insert_workout(&self, record: &WorkoutRecord) -> Result<(), DatabaseError>;

    /// List a user's workouts, newest first, up to `limit`.
    async fn list_workouts(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, DatabaseError>;

    // ── Meals ───────────────────────────────────────────────────────

    /// Insert a logged meal.
    async fn insert_meal(&self, record: &MealRecord) -> Result<(), DatabaseError>;

    /// List a user's meals, newest first, up to `limit`.
    async fn list_meals(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<MealRecord>, DatabaseError>;

    // ── Progress ────────────────────────────────────────────────────

    /// Insert a progress measurement.
    async fn insert_progress(&self, record: &ProgressRecord) -> Result<(), DatabaseError>;

    /// List a user's progress entries, newest first, up to `limit`.
    async fn list_progress(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ProgressRecord>, DatabaseError>;

    // ── Chat messages ───────────────────────────────────────────────

    /// Insert a chat message.
    async fn insert_chat_message(&self, record: &ChatRecord) -> Result<(), DatabaseError>;

    /// List a user's chat messages ordered by creation time.
    async fn list_chat_messages(&self, user_id: &str) -> Result<Vec<ChatRecord>, DatabaseError>;

    /// Delete all chat messages for a user. Returns the number removed.
    async fn delete_chat_messages(&self, user_id: &str) -> Result<usize, DatabaseError>;
}
