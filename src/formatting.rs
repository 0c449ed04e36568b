// src/formatting.rs

use crate::core::{
    Alert, CardFormatter, Embed, EmbedField, EmbedFooter, FormattedBatch, LABELS_FIELD_NAME,
    MAX_EMBEDS_PER_MESSAGE, NODE_LABEL,
};
use chrono::{DateTime, Utc};

/// Source of the render timestamp stamped on each card.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Splits `alerts` into the part that gets rendered and the number omitted.
///
/// A `max_cards` of zero means "unbounded".
pub fn truncate_alerts(max_cards: usize, alerts: &[Alert]) -> (&[Alert], usize) {
    if max_cards != 0 && alerts.len() > max_cards {
        return (&alerts[..max_cards], alerts.len() - max_cards);
    }
    (alerts, 0)
}

/// Picks the card cap for a batch of `batch_len` alerts.
///
/// Exactly ten alerts fill the message. Anything larger keeps one slot free
/// for the overflow card.
pub fn max_cards_for_batch(batch_len: usize) -> usize {
    if batch_len == MAX_EMBEDS_PER_MESSAGE {
        MAX_EMBEDS_PER_MESSAGE
    } else {
        MAX_EMBEDS_PER_MESSAGE - 1
    }
}

/// Renders one alert into an embed stamped with `now`.
pub fn render_card(alert: &Alert, now: DateTime<Utc>) -> Embed {
    let footer = alert.labels.get(NODE_LABEL).map(|node| EmbedFooter {
        text: node.clone(),
    });
    let description = alert.annotations.get(alert.status.as_str()).cloned();

    Embed {
        title: Some(alert.name.clone()),
        description,
        timestamp: Some(now),
        color: Some(alert.status.color()),
        footer,
        fields: vec![EmbedField {
            name: LABELS_FIELD_NAME.to_string(),
            value: format_labels(alert),
        }],
    }
}

/// Renders the summary card for alerts cut from the message.
pub fn render_overflow(count: usize) -> Embed {
    Embed {
        description: Some(format!("and {} more...", count)),
        ..Default::default()
    }
}

/// Truncates the batch and renders it into the embeds of one message.
pub fn build_batch(max_alerts: usize, alerts: &[Alert], now: DateTime<Utc>) -> Vec<Embed> {
    build_counted_batch(max_alerts, alerts, now).embeds
}

/// Like `build_batch`, also reporting how many alerts the overflow card covers.
pub fn build_counted_batch(
    max_alerts: usize,
    alerts: &[Alert],
    now: DateTime<Utc>,
) -> FormattedBatch {
    let (kept, truncated) = truncate_alerts(max_alerts, alerts);
    let mut embeds: Vec<Embed> = kept.iter().map(|alert| render_card(alert, now)).collect();
    if truncated > 0 {
        embeds.push(render_overflow(truncated));
    }
    FormattedBatch { embeds, truncated }
}

// Labels come from a BTreeMap, so the lines are sorted by key.
fn format_labels(alert: &Alert) -> String {
    alert
        .labels
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A formatter producing Discord embeds, one per alert plus an overflow card.
pub struct DiscordCardFormatter {
    clock: Clock,
}

impl DiscordCardFormatter {
    /// Creates a formatter stamping cards with the current time.
    pub fn new() -> Self {
        Self {
            clock: Box::new(Utc::now),
        }
    }

    /// Creates a formatter using the given clock, e.g. a fixed instant in tests.
    pub fn with_clock(clock: Clock) -> Self {
        Self { clock }
    }
}

impl Default for DiscordCardFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CardFormatter for DiscordCardFormatter {
    fn format_batch(&self, alerts: &[Alert]) -> FormattedBatch {
        build_counted_batch(max_cards_for_batch(alerts.len()), alerts, (self.clock)())
    }
}
