//! Dialing side: connect to a known `host:port`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use tokio::net::TcpStream;
use tracing::info;

use crate::{AppError, Result};

/// Address of the other instance, as given on the command line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PeerAddress {
    /// Host name or IP literal. IPv6 literals are written without brackets.
    pub host: String,
    /// Non-zero TCP port.
    pub port: u16,
}

impl FromStr for PeerAddress {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self> {
        let (host, port) = raw
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| AppError::Config(format!("expected <host>:<port>, got '{raw}'")))?;

        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            return Err(AppError::Config(format!("missing host in '{raw}'")));
        }

        let port: u16 = port
            .parse()
            .map_err(|err| AppError::Config(format!("invalid port in '{raw}': {err}")))?;
        if port == 0 {
            return Err(AppError::Config(format!("port must be non-zero in '{raw}'")));
        }

        Ok(Self {
            host: host.to_owned(),
            port,
        })
    }
}

impl Display for PeerAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Open a connection to `addr`.
///
/// # Errors
///
/// Returns `AppError::Setup` if the connection cannot be established.
pub async fn connect(addr: &PeerAddress) -> Result<TcpStream> {
    let stream = TcpStream::connect((addr.host.as_str(), addr.port))
        .await
        .map_err(|err| AppError::Setup(format!("failed to connect to {addr}: {err}")))?;

    info!(peer = %addr, "connected to peer");
    Ok(stream)
}
