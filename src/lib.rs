/// alertcord - Alertmanager to Discord notification bridge
///
/// This library renders batches of monitoring alerts into Discord webhook
/// embeds and delivers each batch with a single webhook call.
pub mod alertmanager;
pub mod cli;
pub mod config;
pub mod core;
pub mod formatting;
pub mod notification;
pub mod server;

// Re-export core types for convenience
pub use core::*;
