use crate::config::WebhookConfig;
use crate::embed::NotificationPayload;
use crate::error::{NotifierError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

/// Destination for tournament notifications
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn send(&self, payload: &NotificationPayload) -> Result<()>;
}

/// Posts payloads to a Discord-compatible webhook
pub struct DiscordWebhook {
    client: Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(client: Client, config: &WebhookConfig) -> Self {
        Self { client, url: config.url.clone() }
    }
}

#[async_trait]
impl WebhookSink for DiscordWebhook {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        let response = self.client.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::Status { endpoint: "webhook".to_string(), status });
        }

        Ok(())
    }
}

/// Logs the payload instead of posting it
pub struct DryRunWebhook;

#[async_trait]
impl WebhookSink for DryRunWebhook {
    async fn send(&self, payload: &NotificationPayload) -> Result<()> {
        let body = serde_json::to_string_pretty(payload)?;
        info!("Dry run, webhook payload:\n{}", body);
        Ok(())
    }
}
