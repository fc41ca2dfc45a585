use super::data::{Config, ReadFormat};
use super::io::ConfigError;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.username(), "guest");
    assert_eq!(config.hostname(), "localhost");
    assert_eq!(config.read_format(), ReadFormat::Markdown);
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set_value("username", "neo").unwrap();
    config.set_value("read-format", "plain").unwrap();
    config.set_value("default-theme", "dracula").unwrap();
    config.save_to_path(&config_path).expect("save failed");

    let loaded = Config::load_from_path(&config_path).expect("load failed");
    assert_eq!(loaded.username(), "neo");
    assert_eq!(loaded.read_format(), ReadFormat::Plain);
    assert_eq!(loaded.default_theme.as_deref(), Some("Dracula"));

    let mut loaded = loaded;
    loaded.unset_value("username").unwrap();
    loaded.save_to_path(&config_path).expect("second save failed");
    let reloaded = Config::load_from_path(&config_path).expect("reload failed");
    assert_eq!(reloaded.username(), "guest");
}

#[test]
fn keys_are_kebab_case_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        "content-base = \"https://blog.example.com\"\nread-format = \"plain\"\nrequest-timeout-secs = 3\n",
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(
        config.content_base_or(Path::new("/unused")),
        "https://blog.example.com"
    );
    assert_eq!(config.read_format(), ReadFormat::Plain);
    assert_eq!(config.request_timeout(), Duration::from_secs(3));
}

#[test]
fn invalid_toml_reports_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "username = [").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn content_base_falls_back_when_blank() {
    let config = Config {
        content_base: Some("   ".to_string()),
        ..Default::default()
    };
    assert_eq!(
        config.content_base_or(Path::new("/data/content")),
        "/data/content"
    );
}

#[test]
fn set_value_rejects_bad_input() {
    let mut config = Config::default();
    assert!(config.set_value("nope", "x").is_err());
    assert!(config.set_value("read-format", "html").is_err());
    assert!(config.set_value("default-theme", "no-such-theme").is_err());
    assert!(config.set_value("request-timeout-secs", "0").is_err());
    assert!(config.set_value("email", "  ").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn zero_timeout_uses_default() {
    let config = Config {
        request_timeout_secs: Some(0),
        ..Default::default()
    };
    assert_eq!(config.request_timeout(), Duration::from_secs(15));
}
