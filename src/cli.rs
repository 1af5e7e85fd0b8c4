//! Command-line surface.
//!
//! No arguments starts the server role. `--other_instance <host>:<port>`
//! starts the client role against that address.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::net::PeerAddress;

/// Output format for diagnostic logs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Which side of the conversation this process plays.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Role {
    /// Listen on an ephemeral port and accept one peer.
    Server,
    /// Dial the given address.
    Client(PeerAddress),
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "peer-chat", about = "Point-to-point chat between two peers", version, long_about = None)]
pub struct Cli {
    /// Address of the listening instance to connect to, as `<host>:<port>`.
    #[arg(long = "other_instance", value_name = "HOST:PORT", value_parser = parse_peer_address)]
    pub other_instance: Option<PeerAddress>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Role selected by the arguments.
    #[must_use]
    pub fn role(&self) -> Role {
        self.other_instance
            .clone()
            .map_or(Role::Server, Role::Client)
    }
}

fn parse_peer_address(raw: &str) -> std::result::Result<PeerAddress, String> {
    raw.parse::<PeerAddress>().map_err(|err| err.to_string())
}
