//! # Receiver Server
//!
//! An `axum` server accepting Alertmanager webhook notifications and
//! forwarding each one to a `Notifier` as a single batch.
//!
//! Routes:
//! - `POST /` and `POST /alerts` take a `WebhookMessage` body. A delivery
//!   failure is answered with `502 Bad Gateway` so Alertmanager records the
//!   notification as failed.
//! - `GET /healthz` always answers `ok`.

use crate::alertmanager::WebhookMessage;
use crate::core::Notifier;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, trace, warn};

/// Builds the receiver routes around a notifier.
pub fn router(notifier: Arc<dyn Notifier>) -> Router {
    Router::new()
        .route("/", post(receive_alerts))
        .route("/alerts", post(receive_alerts))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(notifier)
}

async fn receive_alerts(
    State(notifier): State<Arc<dyn Notifier>>,
    Json(message): Json<WebhookMessage>,
) -> (StatusCode, String) {
    info!(
        receiver = %message.receiver,
        group_key = %message.group_key,
        status = %message.status,
        alerts = message.alerts.len(),
        "Received Alertmanager notification"
    );
    if message.truncated_alerts > 0 {
        warn!(
            truncated = message.truncated_alerts,
            "Alertmanager truncated the notification before delivery"
        );
    }

    let alerts = message.into_alerts();
    match notifier.notify(&alerts).await {
        Ok(()) => (StatusCode::OK, "ok".to_string()),
        Err(e) => {
            error!(notifier = notifier.name(), error = %e, "Failed to forward notification");
            (StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

/// A server that forwards Alertmanager notifications.
pub struct ReceiverServer {
    listener: TcpListener,
    notifier: Arc<dyn Notifier>,
    shutdown_rx: watch::Receiver<bool>,
}

impl ReceiverServer {
    /// Creates a new `ReceiverServer` but does not spawn it.
    ///
    /// # Arguments
    ///
    /// * `listener` - A `TcpListener` that has already been bound to an address.
    /// * `notifier` - The notifier every received batch is handed to.
    /// * `shutdown_rx` - A watch channel receiver for graceful shutdown.
    pub fn new(
        listener: TcpListener,
        notifier: Arc<dyn Notifier>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            listener,
            notifier,
            shutdown_rx,
        }
    }

    /// Returns a future that runs the server until a shutdown signal is received.
    pub fn run(self) -> impl Future<Output = ()> {
        let app = router(self.notifier);
        let listener = self.listener;
        let mut shutdown_rx = self.shutdown_rx;

        async move {
            let shutdown = async move {
                let _ = shutdown_rx.changed().await;
                trace!("Receiver server received shutdown signal.");
            };
            if let Err(e) = axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!("Receiver server error: {}", e);
            }
            trace!("Receiver server task finished.");
        }
    }
}
