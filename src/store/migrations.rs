//! Version-tracked database migrations for the libSQL backend.
//!
//! Each migration has a version number and SQL. `run_migrations()` checks
//! the current version and applies only the new ones sequentially.

use libsql::Connection;

use crate::error::DatabaseError;

/// A single migration step.
struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. Add new versions to the end.
static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: r#"
        CREATE TABLE IF NOT EXISTS profiles (
            user_id TEXT PRIMARY KEY,
            name TEXT NOT NULL DEFAULT '',
            age INTEGER NOT NULL DEFAULT 0,
            weight_kg REAL NOT NULL DEFAULT 0,
            height_cm REAL NOT NULL DEFAULT 0,
            gender TEXT NOT NULL DEFAULT 'male',
            fitness_level TEXT NOT NULL DEFAULT 'beginner',
            activity_level TEXT NOT NULL DEFAULT 'light',
            goals TEXT NOT NULL DEFAULT '[]',
            equipment TEXT NOT NULL DEFAULT '[]',
            dietary_restrictions TEXT NOT NULL DEFAULT '[]',
            diet_notes TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS workouts (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            duration_min INTEGER NOT NULL,
            calories INTEGER,
            notes TEXT,
            performed_on TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id);

        CREATE TABLE IF NOT EXISTS meals (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            slot TEXT NOT NULL,
            calories INTEGER NOT NULL,
            protein_g INTEGER NOT NULL DEFAULT 0,
            carbs_g INTEGER NOT NULL DEFAULT 0,
            fats_g INTEGER NOT NULL DEFAULT 0,
            eaten_on TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_meals_user ON meals(user_id);

        CREATE TABLE IF NOT EXISTS progress_entries (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            weight_kg REAL NOT NULL,
            body_fat_pct REAL,
            notes TEXT,
            recorded_on TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_progress_user ON progress_entries(user_id);

        CREATE TABLE IF NOT EXISTS chat_messages (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            role TEXT NOT NULL,
            content TEXT NOT NULL,
            context TEXT NOT NULL DEFAULT 'general',
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_chat_user ON chat_messages(user_id);
        CREATE INDEX IF NOT EXISTS idx_chat_created ON chat_messages(created_at);
    "#,
}];

/// Run all pending migrations against the given connection.
///
/// Creates the `_migrations` table if it doesn't exist.
pub async fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        (),
    )
    .await
    .map_err(|e| DatabaseError::Migration(format!("Failed to create _migrations table: {e}")))?;

    let current_version = get_current_version(conn).await?;

    for migration in MIGRATIONS {
        if migration.version > current_version {
            tracing::info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            conn.execute_batch(migration.sql).await.map_err(|e| {
                DatabaseError::Migration(format!(
                    "Migration V{} ({}) failed: {e}",
                    migration.version, migration.name
                ))
            })?;
            seed_version(conn, migration.version, migration.name).await?;
        }
    }

    Ok(())
}

/// Get the highest applied migration version, or 0 if none.
async fn get_current_version(conn: &Connection) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query("SELECT COALESCE(MAX(version), 0) FROM _migrations", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("Failed to query migration version: {e}")))?;

    let row = rows
        .next()
        .await
        .map_err(|e| DatabaseError::Migration(format!("Failed to read migration version: {e}")))?;

    match row {
        Some(row) => {
            let version: i64 = row.get(0).map_err(|e| {
                DatabaseError::Migration(format!("Failed to parse migration version: {e}"))
            })?;
            Ok(version)
        }
        None => Ok(0),
    }
}

/// Insert a version record into `_migrations`.
async fn seed_version(conn: &Connection, version: i64, name: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO _migrations (version, name) VALUES (?1, ?2)",
        libsql::params![version, name],
    )
    .await
    .map_err(|e| DatabaseError::Migration(format!("Failed to record migration V{version}: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_conn() -> Connection {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap();
        db.connect().unwrap()
    }

    #[tokio::test]
    async fn migrations_create_all_tables() {
        let conn = test_conn().await;
        run_migrations(&conn).await.unwrap();

        for table in &[
            "profiles",
            "workouts",
            "meals",
            "progress_entries",
            "chat_messages",
            "_migrations",
        ] {
            let mut rows = conn
                .query(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    libsql::params![*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap().unwrap();
            let count: i64 = row.get(0).unwrap();
            assert_eq!(count, 1, "Table '{}' should exist", table);
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let conn = test_conn().await;
        run_migrations(&conn).await.unwrap();
        // Running again should not fail
        run_migrations(&conn).await.unwrap();

        let version = get_current_version(&conn).await.unwrap();
        assert_eq!(version, 1);
    }

    #[tokio::test]
    async fn version_tracking() {
        let conn = test_conn().await;
        run_migrations(&conn).await.unwrap();

        let mut rows = conn
            .query("SELECT version, name FROM _migrations ORDER BY version", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        let version: i64 = row.get(0).unwrap();
        let name: String = row.get(1).unwrap();
        assert_eq!(version, 1);
        assert_eq!(name, "initial_schema");
    }
}
