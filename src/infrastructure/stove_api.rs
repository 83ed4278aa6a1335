// Stove HTTP API actuator implementation
use crate::application::stove_actuator::StoveActuator;
use crate::domain::stove::BurnLevelCommand;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const ENDPOINT_SET_BURN_LEVEL: &str = "/set_burn_level";

#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    response: Option<String>,
}

impl CommandResponse {
    fn accepted(&self) -> bool {
        self.response.as_deref() == Some("OK")
    }
}

#[derive(Debug, Clone)]
pub struct HttpStoveActuator {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStoveActuator {
    pub fn new(host: &str, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .context("Failed to build stove HTTP client")?;

        Ok(Self {
            base_url: base_url(host),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[async_trait]
impl StoveActuator for HttpStoveActuator {
    async fn set_burn_level(&self, command: &BurnLevelCommand) -> Result<()> {
        let url = self.endpoint(ENDPOINT_SET_BURN_LEVEL);
        tracing::debug!("Making request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(&serde_json::json!({ "level": command.requested_level.value() }))
            .send()
            .await
            .context("Failed to send request to stove")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Stove rejected burn level with status {}: {}", status, body);
        }

        let reply = response
            .json::<CommandResponse>()
            .await
            .context("Failed to parse stove response")?;

        if !reply.accepted() {
            anyhow::bail!("Stove did not acknowledge burn level: {:?}", reply.response);
        }

        Ok(())
    }
}

/// Used when no stove API is configured: requests are only logged
#[derive(Debug, Clone, Default)]
pub struct LoggingActuator;

#[async_trait]
impl StoveActuator for LoggingActuator {
    async fn set_burn_level(&self, command: &BurnLevelCommand) -> Result<()> {
        tracing::warn!(
            "No stove API configured, dropping burn level {} for {}",
            command.requested_level.value(),
            command.sensor_id
        );
        Ok(())
    }
}
