//! alertcord - Alertmanager to Discord notification bridge
//!
//! Runs an HTTP receiver for Alertmanager webhook notifications, or delivers
//! a single payload file with `--once`.

use alertcord::{
    alertmanager::WebhookMessage,
    cli::Cli,
    config::Config,
    core::Notifier,
    notification::{DiscordClient, DiscordNotifier},
    server::ReceiverServer,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logging for this specific error
        tracing_subscriber::fmt().init();
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("alertcord starting up...");
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Discord Webhook ID: {}", config.discord.webhook_id);
    info!("Discord API: {}", config.discord.api_base_url);
    info!("Delivery Timeout: {}s", config.discord.timeout_seconds);
    info!("Listen Address: {}", config.server.listen_addr);
    info!("-------------------------------------------------------");

    config.validate()?;

    let client = Arc::new(DiscordClient::new(&config.discord)?);
    let notifier: Arc<dyn Notifier> = Arc::new(DiscordNotifier::new(client));

    if let Some(path) = &cli.once {
        return deliver_once(notifier.as_ref(), path).await;
    }

    // =========================================================================
    // Receiver Server
    // =========================================================================
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let listener = TcpListener::bind(config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_addr))?;
    info!("Listening for Alertmanager notifications on {}", listener.local_addr()?);

    let server_task = tokio::spawn(ReceiverServer::new(listener, notifier, shutdown_rx).run());

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Shutting down gracefully...");
    let _ = shutdown_tx.send(true);

    if let Err(e) = server_task.await {
        error!("Receiver server task panicked: {:?}", e);
    }

    info!("All tasks shut down. Exiting.");
    Ok(())
}

/// Reads one Alertmanager payload from `path` ("-" is stdin) and delivers it.
async fn deliver_once(notifier: &dyn Notifier, path: &Path) -> Result<()> {
    let message = if path == Path::new("-") {
        WebhookMessage::from_reader(std::io::stdin().lock())?
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        WebhookMessage::from_reader(file)?
    };

    let alerts = message.into_alerts();
    info!("Delivering {} alerts from {}", alerts.len(), path.display());
    notifier
        .notify(&alerts)
        .await
        .context("Failed to deliver notification")?;
    Ok(())
}
