//! Unit tests for `AppError` display format.

use peer_chat::AppError;

#[test]
fn each_variant_has_distinct_prefix() {
    let cases = [
        (AppError::Config("x".into()), "config: x"),
        (AppError::Setup("x".into()), "setup: x"),
        (AppError::SessionSetup("x".into()), "session setup: x"),
        (AppError::Transmission("x".into()), "transmission: x"),
        (AppError::Receive("x".into()), "receive: x"),
        (AppError::Shutdown("x".into()), "shutdown: x"),
        (AppError::InvalidState("x".into()), "invalid state: x"),
        (AppError::Io("x".into()), "io: x"),
    ];

    for (err, expected) in cases {
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn error_message_no_trailing_period() {
    let err = AppError::Transmission("write failed".into());
    assert!(!err.to_string().ends_with('.'));
}

#[test]
fn implements_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    let err = AppError::Receive("peer reset".into());
    assert_error(&err);
    assert!(format!("{err:?}").contains("Receive"));
}

#[test]
fn toml_errors_become_config_errors() {
    let toml_err = toml::from_str::<toml::Value>("not = [valid").expect_err("invalid toml");
    let err = AppError::from(toml_err);
    assert!(matches!(err, AppError::Config(msg) if msg.starts_with("invalid config:")));
}

#[test]
fn io_errors_become_io_errors() {
    let err = AppError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"));
    assert_eq!(err.to_string(), "io: pipe closed");
}
