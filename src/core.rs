//! Core domain types and service traits for alertcord
//!
//! This module defines the alert records received from the monitoring
//! upstream, the Discord embed structures they are rendered into, and the
//! trait contracts between the renderer, the notifier and the webhook
//! transport.

use crate::notification::NotifyError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Embed color for firing alerts.
pub const FIRING_COLOR: u32 = 0xE84757;
/// Embed color for resolved alerts.
pub const RESOLVED_COLOR: u32 = 0x3DAF6D;
/// Name of the single field listing an alert's labels.
pub const LABELS_FIELD_NAME: &str = "» Labels";
/// Label whose value is shown in the embed footer.
pub const NODE_LABEL: &str = "node";
/// Discord rejects messages carrying more embeds than this.
pub const MAX_EMBEDS_PER_MESSAGE: usize = 10;

/// The state of an alert at the time it was delivered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Firing,
    Resolved,
}

impl AlertStatus {
    /// The wire name of the status, also used as an annotation key.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Firing => "firing",
            AlertStatus::Resolved => "resolved",
        }
    }

    /// The embed color associated with this status.
    pub fn color(&self) -> u32 {
        match self {
            AlertStatus::Firing => FIRING_COLOR,
            AlertStatus::Resolved => RESOLVED_COLOR,
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single monitoring event.
///
/// Labels and annotations are kept in sorted maps so every rendering of the
/// same alert lists them in the same order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Alert {
    /// The alert name (Prometheus' `alertname` label)
    pub name: String,
    /// Whether the alert is firing or resolved
    pub status: AlertStatus,
    /// Identifying labels
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Descriptive annotations, optionally keyed by status name
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl Alert {
    /// Creates an alert with no labels or annotations.
    pub fn new(name: &str, status: AlertStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            ..Default::default()
        }
    }

    /// Adds a label, replacing any previous value for the key.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds an annotation, replacing any previous value for the key.
    pub fn with_annotation(mut self, key: &str, value: &str) -> Self {
        self.annotations.insert(key.to_string(), value.to_string());
        self
    }
}

// =============================================================================
// Discord message structures
// =============================================================================

/// A rendered message card (a Discord embed).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 render time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

/// Footer line of an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedFooter {
    pub text: String,
}

/// A titled block of text inside an embed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

/// The JSON body of one execute-webhook call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

// =============================================================================
// Service Traits
// =============================================================================

/// The embeds of one message and how many alerts were left out of it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedBatch {
    pub embeds: Vec<Embed>,
    /// Alerts summarized by the overflow card instead of rendered
    pub truncated: usize,
}

/// Renders a batch of alerts into the embeds of a single message.
pub trait CardFormatter: Send + Sync {
    fn format_batch(&self, alerts: &[Alert]) -> FormattedBatch;
}

/// Hands a finished payload to the chat platform.
#[async_trait]
pub trait WebhookClientTrait: Send + Sync {
    /// Performs exactly one delivery call for the payload.
    ///
    /// # Returns
    /// * `Ok(())` if the platform accepted the message
    /// * `Err` on transport failure or a non-success response
    async fn execute(&self, payload: &WebhookPayload) -> Result<(), NotifyError>;
}

/// Delivers a batch of alerts as one notification.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A short name for the destination, used in logs.
    fn name(&self) -> &str;

    /// Renders and delivers the batch. The batch either fully succeeds or
    /// fully fails.
    async fn notify(&self, alerts: &[Alert]) -> Result<(), NotifyError>;
}
