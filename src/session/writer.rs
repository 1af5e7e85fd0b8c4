//! Outbound side of a chat session.
//!
//! [`Outbound::send`] frames and writes a single message; [`run_outbound`]
//! is the loop that feeds it from an [`InputSource`].

use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures_util::SinkExt;
use tokio::io::WriteHalf;
use tokio::sync::Mutex;
use tokio_util::codec::FramedWrite;
use tracing::{debug, info, warn};

use super::codec::ChatCodec;
use super::endpoint::Endpoint;
use super::input::InputSource;
use super::log::MessageLog;
use super::termination::TerminationFlag;
use super::{is_exit_command, SendOutcome, SenderTag};
use crate::{AppError, Result};

/// Write half of a session's stream, framed into lines.
pub(crate) type LineSink = FramedWrite<WriteHalf<Box<dyn Endpoint>>, ChatCodec>;

/// State needed to transmit a message.
pub(crate) struct Outbound {
    sender: SenderTag,
    flag: TerminationFlag,
    log: MessageLog,
    sink: Mutex<Option<LineSink>>,
}

impl Outbound {
    pub(crate) fn new(
        sender: SenderTag,
        flag: TerminationFlag,
        log: MessageLog,
        sink: LineSink,
    ) -> Self {
        Self {
            sender,
            flag,
            log,
            sink: Mutex::new(Some(sink)),
        }
    }

    /// Transmit `text` to the peer.
    ///
    /// The sentinel raises the termination flag and is never written. Once
    /// the flag is raised every other call is suppressed. Otherwise exactly
    /// one framed line is written, flushed, and appended to the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transmission`] if `text` contains a line
    /// terminator, the stream is already closed, or the write fails.
    pub(crate) async fn send(&self, text: &str) -> Result<SendOutcome> {
        if is_exit_command(text) {
            if self.flag.raise() {
                info!(sender = %self.sender, "exit requested locally");
            }
            return Ok(SendOutcome::ExitRequested);
        }

        if self.flag.is_raised() {
            debug!(sender = %self.sender, "session terminating, message suppressed");
            return Ok(SendOutcome::Suppressed);
        }

        if text.contains(['\n', '\r']) {
            return Err(AppError::Transmission(
                "message must not contain a line terminator".into(),
            ));
        }

        let line = self.sender.frame(text);
        let mut guard = self.sink.lock().await;
        let sink = guard
            .as_mut()
            .ok_or_else(|| AppError::Transmission("stream is closed".into()))?;

        // `SinkExt::send` flushes before resolving.
        sink.send(line.clone()).await.map_err(|e| {
            warn!(sender = %self.sender, error = %e, "write to peer failed");
            AppError::Transmission(format!("write failed: {e}"))
        })?;

        self.log.push(line.clone());
        Ok(SendOutcome::Sent(line))
    }

    /// Flush and shut down the write half, releasing it.
    ///
    /// Returns `Ok(false)` if it had already been released.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Shutdown`] if flushing or shutting down fails.
    pub(crate) async fn shutdown(&self) -> Result<bool> {
        let Some(mut sink) = self.sink.lock().await.take() else {
            return Ok(false);
        };

        <LineSink as SinkExt<String>>::close(&mut sink)
            .await
            .map_err(|e| AppError::Shutdown(format!("failed to close stream: {e}")))?;
        Ok(true)
    }
}

/// Outbound loop: read local input and send it until the flag is raised.
///
/// Each input call runs on the blocking pool. If the flag is raised while a
/// call is parked the loop returns immediately and the blocking call is left
/// to finish on its own. Between calls the loop sleeps for `poll_interval`.
///
/// Transmission failures are logged and the loop carries on. An input
/// failure ends the loop without raising the flag; the inbound side keeps
/// running.
pub(crate) async fn run_outbound(
    outbound: Arc<Outbound>,
    mut input: Box<dyn InputSource>,
    poll_interval: Duration,
) {
    let flag = outbound.flag.clone();

    while !flag.is_raised() {
        let pending = tokio::task::spawn_blocking(move || {
            let line = input.next_line();
            (input, line)
        });

        let (source, line) = tokio::select! {
            biased;

            () = flag.raised() => {
                debug!("outbound loop: termination observed while waiting for input");
                break;
            }

            joined = pending => match joined {
                Ok(pair) => pair,
                Err(err) => {
                    warn!(%err, "outbound loop: input task failed, stopping");
                    break;
                }
            },
        };
        input = source;

        match line {
            Ok(text) if text.is_empty() => {}
            Ok(text) => {
                if let Err(err) = outbound.send(&text).await {
                    warn!(%err, "outbound loop: message not delivered");
                }
            }
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                info!("outbound loop: local input closed, stopping");
                break;
            }
            Err(err) => {
                warn!(%err, "outbound loop: local input failed, stopping");
                break;
            }
        }

        tokio::select! {
            biased;

            () = flag.raised() => break,
            () = tokio::time::sleep(poll_interval) => {}
        }
    }

    debug!("outbound loop: stopped");
}
