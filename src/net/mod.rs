//! Connection establishment and the glue that runs a session over it.
//!
//! The server role binds an ephemeral port, announces an address the peer
//! can dial, and accepts one peer; the client role dials a known address.
//! Either way the resulting stream is handed to a [`ChatSession`] which runs
//! until it terminates and is then closed.

pub mod client;
pub mod server;

use tracing::{info_span, warn, Instrument};

pub use client::{connect, PeerAddress};
pub use server::ChatServer;

use crate::config::ChatConfig;
use crate::localization::{Bundle, Localizer};
use crate::session::{ChatSession, InputSource, SenderTag};
use crate::Result;

/// Listen, accept one peer, and chat with it until the session ends.
///
/// # Errors
///
/// Returns `AppError::Setup` if binding or accepting fails, or
/// `AppError::SessionSetup` if the accepted stream is unusable.
pub async fn run_server<I: InputSource>(
    config: &ChatConfig,
    localizer: &Localizer,
    input: I,
) -> Result<()> {
    let server = ChatServer::bind(&config.network.listen_host).await?;
    serve(server, config, localizer, input).await
}

/// Announce an already bound `server`, accept one peer, and chat with it
/// until the session ends.
///
/// # Errors
///
/// Returns `AppError::Setup` if accepting fails, or
/// `AppError::SessionSetup` if the accepted stream is unusable.
pub async fn serve<I: InputSource>(
    server: ChatServer,
    config: &ChatConfig,
    localizer: &Localizer,
    input: I,
) -> Result<()> {
    let addr = server.advertised_addr().await;
    println!(
        "{}",
        localizer.format(
            Bundle::Messages,
            "server.started",
            &[&addr.ip(), &addr.port()]
        )
    );

    let (stream, peer) = server.accept().await?;
    println!(
        "{}",
        localizer.format(Bundle::Messages, "server.connected", &[&peer])
    );

    let session = ChatSession::new(SenderTag::Server, stream, input, &config.session)?;
    drive(session, localizer)
        .instrument(info_span!("server", %peer))
        .await
}

/// Dial `addr` and chat with it until the session ends.
///
/// # Errors
///
/// Returns `AppError::Setup` if the connection fails, or
/// `AppError::SessionSetup` if the stream is unusable.
pub async fn run_client<I: InputSource>(
    addr: &PeerAddress,
    config: &ChatConfig,
    localizer: &Localizer,
    input: I,
) -> Result<()> {
    let stream = connect(addr).await?;
    let session = ChatSession::new(SenderTag::Client, stream, input, &config.session)?;
    println!(
        "{}",
        localizer.format(Bundle::Messages, "client.connected", &[addr])
    );

    drive(session, localizer)
        .instrument(info_span!("client", peer = %addr))
        .await
}

/// Run `session` to termination, then release its stream.
///
/// A failed close is logged rather than returned; the conversation is over
/// either way.
async fn drive(session: ChatSession, localizer: &Localizer) -> Result<()> {
    session.start().await?;
    println!("{}", localizer.message(Bundle::Messages, "session.ended"));

    if let Err(err) = session.close().await {
        warn!(%err, "stream did not shut down cleanly");
    }
    println!(
        "{}",
        localizer.message(Bundle::Messages, "session.disconnected")
    );
    Ok(())
}
