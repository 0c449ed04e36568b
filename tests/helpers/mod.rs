#![allow(dead_code)] // Not every test binary uses every helper

pub mod mock_notifier;

use alertcord::config::DiscordConfig;
use wiremock::MockServer;

pub const TEST_WEBHOOK_ID: u64 = 1234;
pub const TEST_WEBHOOK_TOKEN: &str = "test-token";
pub const TEST_WEBHOOK_PATH: &str = "/webhooks/1234/test-token";

/// A Discord configuration pointing at a mock server.
pub fn discord_config_for(server: &MockServer) -> DiscordConfig {
    DiscordConfig {
        webhook_id: TEST_WEBHOOK_ID,
        token: TEST_WEBHOOK_TOKEN.to_string(),
        api_base_url: server.uri(),
        timeout_seconds: 5,
    }
}
