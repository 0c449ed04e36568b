//! Prometheus Alertmanager webhook payloads.
//!
//! Alertmanager posts one `WebhookMessage` per notification group. Each
//! contained alert is converted into the crate's `Alert` record.

use crate::core::{Alert, AlertStatus};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// The label Prometheus stores the alert name in.
pub const ALERT_NAME_LABEL: &str = "alertname";

/// The body of an Alertmanager webhook notification (version 4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WebhookMessage {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub group_key: String,
    /// Alerts Alertmanager itself dropped because of `max_alerts`
    #[serde(default)]
    pub truncated_alerts: u64,
    pub status: AlertStatus,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub group_labels: BTreeMap<String, String>,
    #[serde(default)]
    pub common_labels: BTreeMap<String, String>,
    #[serde(default)]
    pub common_annotations: BTreeMap<String, String>,
    #[serde(default, rename = "externalURL")]
    pub external_url: String,
    #[serde(default)]
    pub alerts: Vec<AlertmanagerAlert>,
}

/// A single alert inside a `WebhookMessage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlertmanagerAlert {
    pub status: AlertStatus,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(default, rename = "generatorURL")]
    pub generator_url: String,
    #[serde(default)]
    pub fingerprint: String,
}

impl AlertmanagerAlert {
    /// Converts into an `Alert`. A missing `alertname` label yields an empty name.
    pub fn into_alert(self) -> Alert {
        let name = self
            .labels
            .get(ALERT_NAME_LABEL)
            .cloned()
            .unwrap_or_default();
        Alert {
            name,
            status: self.status,
            labels: self.labels,
            annotations: self.annotations,
        }
    }
}

impl WebhookMessage {
    /// Parses a message from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("Failed to parse Alertmanager webhook payload")
    }

    /// Parses a message from a reader, e.g. a file or stdin.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .context("Failed to read Alertmanager webhook payload")?;
        Self::from_slice(&buf)
    }

    /// Converts the contained alerts, preserving their order.
    pub fn into_alerts(self) -> Vec<Alert> {
        self.alerts
            .into_iter()
            .map(AlertmanagerAlert::into_alert)
            .collect()
    }
}
