//! Configuration management for alertcord
//!
//! This module defines the main `Config` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to layer defaults, an `alertcord.toml` file, environment variables
//! and command-line arguments.

use crate::cli::Cli;
use anyhow::{ensure, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The file read when no `--config` argument is given.
pub const DEFAULT_CONFIG_FILE: &str = "alertcord.toml";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// The Discord webhook alerts are delivered to.
    pub discord: DiscordConfig,
    /// The HTTP receiver for Alertmanager notifications.
    pub server: ServerConfig,
}

/// Configuration for the Discord webhook.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct DiscordConfig {
    /// The numeric webhook ID.
    pub webhook_id: u64,
    /// The webhook token.
    pub token: String,
    /// Base URL of the Discord API, overridable for testing.
    pub api_base_url: String,
    /// Timeout for a single delivery request.
    pub timeout_seconds: u64,
}

impl DiscordConfig {
    /// The execute-webhook endpoint for this webhook.
    pub fn webhook_url(&self) -> String {
        format!(
            "{}/webhooks/{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.webhook_id,
            self.token
        )
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            webhook_id: 0,
            token: String::new(),
            api_base_url: "https://discord.com/api".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("webhook_id", &self.webhook_id)
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Configuration for the Alertmanager receiver.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// The address the receiver listens on.
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 9094)),
        }
    }
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Sources are merged in order of increasing precedence: built-in
    /// defaults, the TOML file, `ALERTCORD_` environment variables (nested
    /// keys separated by `__`, e.g. `ALERTCORD_DISCORD__TOKEN`), then the
    /// command-line arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("ALERTCORD_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }

    /// Checks that the settings needed for delivery are present.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.discord.webhook_id != 0,
            "discord.webhook_id must be set"
        );
        ensure!(!self.discord.token.is_empty(), "discord.token must be set");
        ensure!(
            self.discord.timeout_seconds > 0,
            "discord.timeout_seconds must be greater than zero"
        );
        Ok(())
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            discord: DiscordConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_url() {
        let config = DiscordConfig {
            webhook_id: 42,
            token: "abc".to_string(),
            api_base_url: "http://127.0.0.1:8080/".to_string(),
            timeout_seconds: 5,
        };
        assert_eq!(config.webhook_url(), "http://127.0.0.1:8080/webhooks/42/abc");
    }

    #[test]
    fn test_validate_rejects_missing_webhook() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.discord.webhook_id = 42;
        assert!(config.validate().is_err());

        config.discord.token = "abc".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DiscordConfig {
            token: "very-secret".to_string(),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("very-secret"));
    }
}
