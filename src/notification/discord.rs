//! A client for executing Discord webhooks.

use crate::config::DiscordConfig;
use crate::core::{WebhookClientTrait, WebhookPayload};
use crate::notification::NotifyError;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// A client for posting messages to one Discord webhook.
pub struct DiscordClient {
    http: reqwest::Client,
    webhook_url: String,
    webhook_id: u64,
}

impl DiscordClient {
    /// Creates a new `DiscordClient` for the configured webhook.
    pub fn new(config: &DiscordConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            webhook_url: config.webhook_url(),
            webhook_id: config.webhook_id,
        })
    }
}

// The URL carries the webhook token.
impl fmt::Debug for DiscordClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordClient")
            .field("webhook_id", &self.webhook_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WebhookClientTrait for DiscordClient {
    /// Posts the payload to the webhook's execute endpoint.
    #[instrument(skip(self, payload), fields(webhook_id = self.webhook_id, embeds = payload.embeds.len()))]
    async fn execute(&self, payload: &WebhookPayload) -> Result<(), NotifyError> {
        let response = match self.http.post(&self.webhook_url).json(payload).send().await {
            Ok(res) => res,
            Err(e) => {
                error!(error = %e, timeout = e.is_timeout(), "HTTP request to Discord failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "Discord accepted the message");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            status = %status,
            body = %body,
            "Failed to send Discord notification"
        );
        Err(NotifyError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
