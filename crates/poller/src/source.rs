//! Homework status source — the remote review API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use reviewbot_common::config::AppConfig;
use reviewbot_common::error::{BotError, Result};

/// Anything that can return the raw homework-statuses payload for a cursor.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch homework updates since `from_date` (Unix seconds).
    ///
    /// The payload is returned untouched; shape checks belong to the validator.
    async fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// HTTP client for the Practicum homework-statuses endpoint.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.practicum_endpoint.clone(),
            config.practicum_token.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        tracing::debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::EndpointUnavailable(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::EndpointUnavailable(format!(
                "{} returned {}",
                self.endpoint, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::EndpointUnavailable(e.to_string()))?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| BotError::MalformedResponse(format!("response is not valid JSON: {}", e)))
    }
}
