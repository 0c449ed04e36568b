//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `alertcord.toml` file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Forwards Prometheus Alertmanager notifications to a Discord webhook.
#[derive(Parser, Debug, Default, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address the Alertmanager receiver listens on.
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<SocketAddr>,

    /// Discord webhook ID.
    #[arg(long, value_name = "ID")]
    pub webhook_id: Option<u64>,

    /// Discord webhook token.
    #[arg(long, value_name = "TOKEN")]
    pub webhook_token: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Deliver a single Alertmanager webhook payload from FILE ("-" for
    /// stdin) and exit instead of starting the receiver.
    #[arg(long, value_name = "FILE")]
    pub once: Option<PathBuf>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut discord = Dict::new();
        if let Some(id) = self.webhook_id {
            discord.insert("webhook_id".into(), Value::from(id));
        }
        if let Some(token) = &self.webhook_token {
            discord.insert("token".into(), Value::from(token.clone()));
        }
        if !discord.is_empty() {
            dict.insert("discord".into(), Value::Dict(Tag::Default, discord));
        }

        if let Some(addr) = self.listen {
            let mut server = Dict::new();
            server.insert("listen_addr".into(), Value::from(addr.to_string()));
            dict.insert("server".into(), Value::Dict(Tag::Default, server));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
