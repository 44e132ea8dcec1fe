//! Error types for fitcoach.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Coach endpoint error: {0}")]
    Coach(#[from] CoachError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Entity not found: {entity} for user {user_id}")]
    NotFound { entity: String, user_id: String },

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Remote coaching endpoint errors.
///
/// Every variant is non-fatal: the chat service substitutes a fixed
/// per-context fallback message instead of surfacing these to the user.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("Coach endpoint request failed: {0}")]
    Request(String),

    #[error("Coach endpoint returned status {status}")]
    Status { status: u16 },

    #[error("Invalid response from coach endpoint: {0}")]
    InvalidResponse(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
