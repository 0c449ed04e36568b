use alertcord::cli::Cli;
use alertcord::config::Config;
use std::io::Write;
use std::net::SocketAddr;
use tempfile::NamedTempFile;

fn write_config(toml_content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", toml_content).unwrap();
    file
}

#[test]
fn test_load_full_valid_config() {
    let toml_content = r#"
        log_level = "debug"
        [discord]
        webhook_id = 987654321
        token = "file-token"
        api_base_url = "http://localhost:8080/api"
        timeout_seconds = 3
        [server]
        listen_addr = "127.0.0.1:9999"
    "#;
    let file = write_config(toml_content);

    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let config = Config::load(&cli).unwrap();

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.discord.webhook_id, 987654321);
    assert_eq!(config.discord.token, "file-token");
    assert_eq!(config.discord.api_base_url, "http://localhost:8080/api");
    assert_eq!(config.discord.timeout_seconds, 3);
    assert_eq!(
        config.server.listen_addr,
        "127.0.0.1:9999".parse::<SocketAddr>().unwrap()
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_default_values() {
    let file = write_config("");

    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let config = Config::load(&cli).unwrap();
    let default_config = Config::default();

    assert_eq!(config, default_config);
    assert!(config.validate().is_err());
}

#[test]
fn test_cli_overrides_file() {
    let toml_content = r#"
        [discord]
        webhook_id = 1
        token = "file-token"
    "#;
    let file = write_config(toml_content);

    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        webhook_id: Some(2),
        webhook_token: Some("cli-token".to_string()),
        listen: Some("127.0.0.1:7000".parse().unwrap()),
        log_level: Some("trace".to_string()),
        ..Default::default()
    };

    let config = Config::load(&cli).unwrap();

    assert_eq!(config.discord.webhook_id, 2);
    assert_eq!(config.discord.token, "cli-token");
    assert_eq!(config.log_level, "trace");
    assert_eq!(config.server.listen_addr.port(), 7000);
    // Untouched keys keep their defaults
    assert_eq!(config.discord.api_base_url, "https://discord.com/api");
}

#[test]
fn test_invalid_value_type() {
    let file = write_config(
        r#"
        [discord]
        webhook_id = "not-a-number"
    "#,
    );

    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    let config = Config::load(&cli);
    assert!(config.is_err());
}

#[test]
fn test_invalid_listen_addr() {
    let file = write_config(
        r#"
        [server]
        listen_addr = "somewhere"
    "#,
    );

    let cli = Cli {
        config: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    assert!(Config::load(&cli).is_err());
}
