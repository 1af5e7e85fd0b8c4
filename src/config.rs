//! Configuration parsing, discovery, and validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};

use crate::localization::SUPPORTED_LOCALES;
use crate::{AppError, Result};

/// Location searched relative to the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/chat.toml";

/// Configuration shipped with the binary, used when no file is found on disk.
const BUNDLED_CONFIG: &str = include_str!("../config/chat.toml");

/// Upper bound for `session.poll_interval_ms`.
const MAX_POLL_INTERVAL_MS: u64 = 10_000;

/// Application identity and presentation settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ApplicationConfig {
    /// Display name of the application.
    #[serde(default = "default_name")]
    pub name: String,
    /// Language code for user-facing messages (`en`, `de`).
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            locale: default_locale(),
        }
    }
}

/// Tuning knobs for a running chat session.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    /// Pause between outbound input polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Longest inbound line accepted before it is discarded.
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_line_bytes: default_max_line_bytes(),
        }
    }
}

impl SessionConfig {
    /// Poll interval as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Connection establishment settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NetworkConfig {
    /// Host the server-role listener binds to.
    #[serde(default = "default_listen_host")]
    pub listen_host: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            listen_host: default_listen_host(),
        }
    }
}

fn default_name() -> String {
    "peer-chat".into()
}

fn default_locale() -> String {
    "en".into()
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_max_line_bytes() -> usize {
    1_048_576
}

fn default_listen_host() -> String {
    "0.0.0.0".into()
}

/// Top-level configuration parsed from `chat.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ChatConfig {
    /// Application identity settings.
    #[serde(default)]
    pub application: ApplicationConfig,
    /// Session loop tuning.
    #[serde(default)]
    pub session: SessionConfig,
    /// Listener settings.
    #[serde(default)]
    pub network: NetworkConfig,
}

impl ChatConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            AppError::Config(format!("failed to read config {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration bundled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the bundled file does not parse.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_CONFIG)
    }

    /// Resolve configuration from an explicit path, the working directory, or
    /// the bundled default, in that order.
    ///
    /// An explicit path must exist; the working-directory file is optional.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the selected source cannot be loaded.
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            info!(path = %path.display(), "loading configuration");
            return Self::load_from_path(path);
        }

        let candidate: PathBuf = working_dir.join(DEFAULT_CONFIG_PATH);
        if candidate.is_file() {
            info!(path = %candidate.display(), "loading configuration");
            return Self::load_from_path(candidate);
        }

        debug!(path = %candidate.display(), "no configuration file found, using bundled default");
        Self::bundled()
    }

    fn validate(&self) -> Result<()> {
        if self.application.name.trim().is_empty() {
            return Err(AppError::Config("application.name must not be empty".into()));
        }

        if !SUPPORTED_LOCALES.contains(&self.application.locale.as_str()) {
            return Err(AppError::Config(format!(
                "application.locale '{}' is not supported (expected one of {})",
                self.application.locale,
                SUPPORTED_LOCALES.join(", ")
            )));
        }

        if self.session.poll_interval_ms == 0 || self.session.poll_interval_ms > MAX_POLL_INTERVAL_MS
        {
            return Err(AppError::Config(format!(
                "session.poll_interval_ms must be between 1 and {MAX_POLL_INTERVAL_MS}"
            )));
        }

        if self.session.max_line_bytes == 0 {
            return Err(AppError::Config(
                "session.max_line_bytes must be greater than zero".into(),
            ));
        }

        if self.network.listen_host.trim().is_empty() {
            return Err(AppError::Config("network.listen_host must not be empty".into()));
        }

        Ok(())
    }
}
