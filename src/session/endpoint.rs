//! Connected byte streams a session can run over.

use std::io;

use tokio::io::{AsyncRead, AsyncWrite, DuplexStream};
use tokio::net::TcpStream;

/// An already-established, ordered, reliable duplex connection to the peer.
///
/// [`peer_label`](Endpoint::peer_label) doubles as the liveness check run
/// when a session is built: an error means the stream's directions cannot
/// be used.
pub trait Endpoint: AsyncRead + AsyncWrite + Send + Unpin + 'static {
    /// Human-readable description of the remote side.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the stream is not connected.
    fn peer_label(&self) -> io::Result<String>;
}

impl Endpoint for TcpStream {
    fn peer_label(&self) -> io::Result<String> {
        self.peer_addr().map(|addr| addr.to_string())
    }
}

impl Endpoint for DuplexStream {
    fn peer_label(&self) -> io::Result<String> {
        Ok("in-memory".to_owned())
    }
}
