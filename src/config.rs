//! Configuration types.

use secrecy::SecretString;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port for the HTTP API.
    pub port: u16,
    /// Path to the local libSQL database file.
    pub db_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            db_path: "./data/fitcoach.db".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read the server configuration from the environment, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("FITCOACH_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);
        let db_path = std::env::var("FITCOACH_DB_PATH").unwrap_or(defaults.db_path);
        Self { port, db_path }
    }
}

/// Remote coaching endpoint configuration.
#[derive(Debug, Clone)]
pub struct CoachEndpointConfig {
    /// Base URL of the coach chat endpoint.
    pub url: String,
    /// Optional bearer token for the endpoint.
    pub api_key: Option<SecretString>,
}

impl CoachEndpointConfig {
    /// Build from environment. Returns `None` when `FITCOACH_COACH_URL` is
    /// unset; the chat service then answers with fallback messages only.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("FITCOACH_COACH_URL").ok()?;
        let api_key = std::env::var("FITCOACH_COACH_API_KEY")
            .ok()
            .map(SecretString::from);
        Some(Self { url, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, "./data/fitcoach.db");
    }
}
