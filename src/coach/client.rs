//! HTTP client for the remote coaching endpoint.

use async_trait::async_trait;
use secrecy::ExposeSecret;

use super::{CoachReply, CoachRequest};
use crate::config::CoachEndpointConfig;
use crate::error::CoachError;

/// The remote coaching endpoint, behind a trait so the chat service can be
/// tested without a network.
#[async_trait]
pub trait CoachApi: Send + Sync {
    /// One request/response exchange. No timeout, cancellation, or retry
    /// policy is layered on top; the caller awaits completion or failure.
    async fn send(&self, request: &CoachRequest) -> Result<CoachReply, CoachError>;
}

/// Production client: a single JSON POST to the configured endpoint.
pub struct HttpCoachClient {
    http: reqwest::Client,
    config: CoachEndpointConfig,
}

impl HttpCoachClient {
    pub fn new(config: CoachEndpointConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CoachApi for HttpCoachClient {
    async fn send(&self, request: &CoachRequest) -> Result<CoachReply, CoachError> {
        let mut builder = self.http.post(&self.config.url).json(request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CoachError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<CoachReply>()
            .await
            .map_err(|e| CoachError::InvalidResponse(e.to_string()))
    }
}
