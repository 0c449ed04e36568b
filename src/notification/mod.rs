//! Delivery of rendered alert batches to Discord.
//!
//! `DiscordNotifier` is the dispatcher: it renders a batch with a
//! `CardFormatter` and hands the payload to a `WebhookClientTrait`
//! implementation in a single call. `DiscordClient` is the HTTP transport.
pub mod discord;
pub mod notifier;

pub use discord::DiscordClient;
pub use notifier::DiscordNotifier;

use thiserror::Error;

/// A failed delivery. The whole batch is considered undelivered.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook returned status {status}: {body}")]
    Status { status: u16, body: String },
}

impl NotifyError {
    /// Whether the request was aborted by the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, NotifyError::Request(e) if e.is_timeout())
    }
}
