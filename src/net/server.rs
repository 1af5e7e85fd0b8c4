//! Listening side: bind an ephemeral port and accept exactly one peer.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tracing::{debug, info};

use crate::{AppError, Result};

/// A bound listener waiting for its single peer.
#[derive(Debug)]
pub struct ChatServer {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl ChatServer {
    /// Bind an OS-assigned port on `host`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Setup` if the address cannot be bound.
    pub async fn bind(host: &str) -> Result<Self> {
        let listener = TcpListener::bind((host, 0))
            .await
            .map_err(|err| AppError::Setup(format!("failed to bind {host}:0: {err}")))?;
        let local_addr = listener
            .local_addr()
            .map_err(|err| AppError::Setup(format!("failed to read bound address: {err}")))?;

        info!(%local_addr, "server listening");
        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Address the listener is bound to, including the assigned port.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Address to give the peer.
    ///
    /// Equal to [`local_addr`](Self::local_addr) unless the listener is bound
    /// to the unspecified address, in which case the IP is replaced by the
    /// local address of the default route, or loopback when there is none.
    pub async fn advertised_addr(&self) -> SocketAddr {
        let local = self.local_addr;
        if !local.ip().is_unspecified() {
            return local;
        }

        let ip = match routed_local_ip(local.is_ipv6()).await {
            Ok(ip) => ip,
            Err(err) => {
                debug!(%err, "no routable local address, advertising loopback");
                if local.is_ipv6() {
                    IpAddr::V6(Ipv6Addr::LOCALHOST)
                } else {
                    IpAddr::V4(Ipv4Addr::LOCALHOST)
                }
            }
        };
        SocketAddr::new(ip, local.port())
    }

    /// Wait for one peer, then stop listening.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Setup` if accepting the connection fails.
    pub async fn accept(self) -> Result<(TcpStream, SocketAddr)> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(|err| AppError::Setup(format!("failed to accept peer: {err}")))?;

        info!(%peer, "peer connected");
        Ok((stream, peer))
    }
}

/// Local IP the OS would pick to reach a documentation-range address.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
async fn routed_local_ip(ipv6: bool) -> io::Result<IpAddr> {
    let (bind, target): (SocketAddr, SocketAddr) = if ipv6 {
        (
            (Ipv6Addr::UNSPECIFIED, 0).into(),
            (Ipv6Addr::new(0x2001, 0x0db8, 0, 0, 0, 0, 0, 1), 9).into(),
        )
    } else {
        (
            (Ipv4Addr::UNSPECIFIED, 0).into(),
            (Ipv4Addr::new(192, 0, 2, 1), 9).into(),
        )
    };

    let socket = UdpSocket::bind(bind).await?;
    socket.connect(target).await?;
    let ip = socket.local_addr()?.ip();
    if ip.is_unspecified() {
        return Err(io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            "route has no local address",
        ));
    }
    Ok(ip)
}
