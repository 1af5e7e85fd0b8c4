//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Listening, accepting, or dialing a peer failed.
    Setup(String),
    /// The read/write directions of a connected stream could not be opened.
    SessionSetup(String),
    /// A write to the peer failed mid-session.
    Transmission(String),
    /// A read from the peer failed mid-session.
    Receive(String),
    /// Closing the stream failed.
    Shutdown(String),
    /// Operation is not valid in the session's current state.
    InvalidState(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Setup(msg) => write!(f, "setup: {msg}"),
            Self::SessionSetup(msg) => write!(f, "session setup: {msg}"),
            Self::Transmission(msg) => write!(f, "transmission: {msg}"),
            Self::Receive(msg) => write!(f, "receive: {msg}"),
            Self::Shutdown(msg) => write!(f, "shutdown: {msg}"),
            Self::InvalidState(msg) => write!(f, "invalid state: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
