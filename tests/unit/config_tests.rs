use std::time::Duration;

use peer_chat::{config::DEFAULT_CONFIG_PATH, AppError, ChatConfig};

fn sample_toml() -> &'static str {
    r#"
[application]
name = "test-chat"
locale = "de"

[session]
poll_interval_ms = 25
max_line_bytes = 4096

[network]
listen_host = "127.0.0.1"
"#
}

#[test]
fn parses_valid_config() {
    let config = ChatConfig::from_toml_str(sample_toml()).expect("config parses");

    assert_eq!(config.application.name, "test-chat");
    assert_eq!(config.application.locale, "de");
    assert_eq!(config.session.poll_interval_ms, 25);
    assert_eq!(config.session.poll_interval(), Duration::from_millis(25));
    assert_eq!(config.session.max_line_bytes, 4096);
    assert_eq!(config.network.listen_host, "127.0.0.1");
}

#[test]
fn empty_document_uses_defaults() {
    let config = ChatConfig::from_toml_str("").expect("empty config parses");

    assert_eq!(config, ChatConfig::default());
    assert_eq!(config.application.name, "peer-chat");
    assert_eq!(config.application.locale, "en");
    assert_eq!(config.session.poll_interval_ms, 100);
    assert_eq!(config.session.max_line_bytes, 1_048_576);
    assert_eq!(config.network.listen_host, "0.0.0.0");
}

#[test]
fn bundled_config_matches_defaults() {
    let bundled = ChatConfig::bundled().expect("bundled config parses");
    assert_eq!(bundled, ChatConfig::default());
}

#[test]
fn rejects_zero_poll_interval() {
    let result = ChatConfig::from_toml_str("[session]\npoll_interval_ms = 0\n");
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("poll_interval_ms")));
}

#[test]
fn rejects_excessive_poll_interval() {
    let result = ChatConfig::from_toml_str("[session]\npoll_interval_ms = 60000\n");
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn rejects_zero_max_line_bytes() {
    let result = ChatConfig::from_toml_str("[session]\nmax_line_bytes = 0\n");
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("max_line_bytes")));
}

#[test]
fn rejects_unsupported_locale() {
    let result = ChatConfig::from_toml_str("[application]\nlocale = \"xx\"\n");
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("locale")));
}

#[test]
fn rejects_blank_name() {
    let result = ChatConfig::from_toml_str("[application]\nname = \"  \"\n");
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn rejects_malformed_toml() {
    let result = ChatConfig::from_toml_str("[session\npoll_interval_ms = 1");
    match result {
        Err(AppError::Config(msg)) => assert!(msg.starts_with("invalid config")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_missing_path_is_config_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let result = ChatConfig::load_from_path(temp.path().join("absent.toml"));
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("failed to read config")));
}

#[test]
fn discover_prefers_explicit_path() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("custom.toml");
    std::fs::write(&path, sample_toml()).expect("write config");

    let config = ChatConfig::discover(Some(&path), temp.path()).expect("discover");

    assert_eq!(config.application.name, "test-chat");
}

#[test]
fn discover_reads_working_directory_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join(DEFAULT_CONFIG_PATH);
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, sample_toml()).expect("write config");

    let config = ChatConfig::discover(None, temp.path()).expect("discover");

    assert_eq!(config.session.poll_interval_ms, 25);
}

#[test]
fn discover_falls_back_to_bundled_default() {
    let temp = tempfile::tempdir().expect("tempdir");

    let config = ChatConfig::discover(None, temp.path()).expect("discover");

    assert_eq!(config, ChatConfig::default());
}

#[test]
fn discover_with_missing_explicit_path_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("nope.toml");

    let result = ChatConfig::discover(Some(&missing), temp.path());

    assert!(matches!(result, Err(AppError::Config(_))));
}
