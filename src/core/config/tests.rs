use super::data::{Config, DEFAULT_MODEL};
use super::env::{ChatSettings, EndpointSettings, SettingsOverrides, BASE_URL_ENV, CREDENTIAL_ENV};
use super::io::ConfigError;
use crate::core::message::HistoryMode;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn missing_base_url_is_a_config_error() {
    let err = EndpointSettings::from_lookup(env_of(&[(CREDENTIAL_ENV, "secret")]))
        .expect_err("base url is required");
    assert!(matches!(err, ConfigError::MissingBaseUrl { variable } if variable == BASE_URL_ENV));
    assert!(err.to_string().contains(BASE_URL_ENV));
}

#[test]
fn blank_base_url_counts_as_missing() {
    let result = EndpointSettings::from_lookup(env_of(&[(BASE_URL_ENV, "   ")]));
    assert!(matches!(result, Err(ConfigError::MissingBaseUrl { .. })));
}

#[test]
fn credential_defaults_to_empty() {
    let endpoint =
        EndpointSettings::from_lookup(env_of(&[(BASE_URL_ENV, "https://chat.example.com")]))
            .expect("endpoint");
    assert_eq!(endpoint.base_url, "https://chat.example.com");
    assert_eq!(endpoint.credential, "");
    assert!(!endpoint.has_credential());
}

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.model(), DEFAULT_MODEL);
    assert_eq!(config.timeout(), Duration::from_secs(120));
    assert_eq!(config.history(), HistoryMode::Full);
    assert!(config.attach_credential());
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.set_value("model", "mistral").expect("set model");
    config.set_value("history", "latest").expect("set history");
    config.set_value("attach-credential", "off").expect("set flag");
    config.save_to_path(&config_path).expect("save");

    let contents = std::fs::read_to_string(&config_path).expect("read back");
    assert!(contents.contains("history = \"latest\""));

    let mut loaded = Config::load_from_path(&config_path).expect("load");
    assert_eq!(loaded.model(), "mistral");
    assert_eq!(loaded.history(), HistoryMode::LatestOnly);
    assert!(!loaded.attach_credential());

    loaded.unset_value("model").expect("unset");
    loaded.save_to_path(&config_path).expect("save again");
    let reloaded = Config::load_from_path(&config_path).expect("reload");
    assert_eq!(reloaded.model(), DEFAULT_MODEL);
    assert_eq!(reloaded.history(), HistoryMode::LatestOnly);
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "model = [").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("parse should fail");
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn set_value_rejects_bad_input() {
    let mut config = Config::default();
    assert!(config.set_value("timeout", "0").is_err());
    assert!(config.set_value("timeout", "soon").is_err());
    assert!(config.set_value("markdown", "maybe").is_err());
    assert!(config.set_value("theme", "dark").is_err());
    assert!(config.unset_value("theme").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn overrides_take_precedence_over_file() {
    let endpoint = EndpointSettings {
        base_url: "https://chat.example.com".into(),
        credential: "secret".into(),
    };
    let config = Config {
        model: Some("from-file".into()),
        timeout_secs: Some(30),
        history: Some(HistoryMode::LatestOnly),
        attach_credential: Some(true),
        markdown: Some(false),
    };
    let overrides = SettingsOverrides {
        model: Some("from-flag".into()),
        history: Some(HistoryMode::Full),
        timeout_secs: None,
        no_credential: true,
    };

    let settings = ChatSettings::resolve(endpoint, &config, &overrides);
    assert_eq!(settings.model, "from-flag");
    assert_eq!(settings.timeout, Duration::from_secs(30));
    assert_eq!(settings.history, HistoryMode::Full);
    assert!(!settings.attach_credential);
    assert!(!settings.markdown);
}

#[test]
fn summary_marks_defaults() {
    let config = Config {
        model: Some("mistral".into()),
        ..Default::default()
    };
    let lines = config.summary_lines();
    assert_eq!(lines[0], "  model: mistral");
    assert_eq!(lines[1], "  timeout: 120s (default)");
}

#[test]
fn zero_timeout_in_file_uses_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "timeout_secs = 0\n").expect("write config");

    let config = Config::load_from_path(&config_path).expect("load");

    assert_eq!(config.timeout_secs, Some(0));
    assert_eq!(config.timeout(), Duration::from_secs(120));
}
