//! The notifier renders a batch of alerts and delivers it with a single
//! webhook call.

use crate::core::{Alert, CardFormatter, Notifier, WebhookClientTrait, WebhookPayload};
use crate::formatting::DiscordCardFormatter;
use crate::notification::NotifyError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Delivers alert batches to a Discord webhook.
pub struct DiscordNotifier<C: WebhookClientTrait> {
    client: Arc<C>,
    formatter: Box<dyn CardFormatter>,
}

impl<C: WebhookClientTrait> DiscordNotifier<C> {
    /// Creates a notifier with the default card formatter.
    pub fn new(client: Arc<C>) -> Self {
        Self::with_formatter(client, Box::new(DiscordCardFormatter::new()))
    }

    /// Creates a notifier rendering with the given formatter.
    pub fn with_formatter(client: Arc<C>, formatter: Box<dyn CardFormatter>) -> Self {
        Self { client, formatter }
    }
}

#[async_trait]
impl<C: WebhookClientTrait> Notifier for DiscordNotifier<C> {
    fn name(&self) -> &str {
        "discord"
    }

    #[instrument(skip(self, alerts), fields(count = alerts.len()))]
    async fn notify(&self, alerts: &[Alert]) -> Result<(), NotifyError> {
        if alerts.is_empty() {
            return Ok(());
        }

        let batch = self.formatter.format_batch(alerts);
        let truncated = batch.truncated;
        if truncated > 0 {
            metrics::counter!("alerts_truncated_total").increment(truncated as u64);
        }

        let payload = WebhookPayload {
            embeds: batch.embeds,
        };

        match self.client.execute(&payload).await {
            Ok(()) => {
                metrics::counter!("notifications_sent_total").increment(1);
                info!(
                    alerts = alerts.len(),
                    embeds = payload.embeds.len(),
                    truncated,
                    "Successfully sent batch to Discord."
                );
                Ok(())
            }
            Err(e) => {
                metrics::counter!("notifications_failed_total").increment(1);
                error!(error = %e, "Discord notification failed");
                Err(e)
            }
        }
    }
}
