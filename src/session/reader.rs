//! Inbound loop of a chat session.
//!
//! Decodes lines from the peer with [`ChatCodec`] and hands them to a
//! [`MessageDisplay`]. The loop is readiness-driven: it parks on the framed
//! stream and on the termination flag instead of polling with sleeps.
//!
//! # Termination triggers
//!
//! | Event                      | Effect                                   |
//! |----------------------------|------------------------------------------|
//! | flag raised elsewhere      | loop exits                               |
//! | end of stream              | flag raised, loop exits                  |
//! | bare sentinel line         | flag raised, loop exits                  |
//! | I/O error                  | logged, flag raised, loop exits          |
//!
//! Over-long lines never reach the loop; [`ChatCodec`] drops them.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::ReadHalf;
use tokio_util::codec::FramedRead;
use tracing::{debug, info, warn};

use super::codec::ChatCodec;
use super::display::MessageDisplay;
use super::endpoint::Endpoint;
use super::is_exit_command;
use super::termination::TerminationFlag;
use crate::AppError;

/// Read half of a session's stream, framed into lines.
pub(crate) type LineStream = FramedRead<ReadHalf<Box<dyn Endpoint>>, ChatCodec>;

/// Why the inbound loop stopped.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum InboundExit {
    /// The termination flag was raised by someone else.
    Terminated,
    /// The peer closed its end of the stream.
    PeerClosed,
    /// The peer sent the bare sentinel word.
    RemoteExit,
    /// Reading failed.
    Failed(String),
}

/// Inbound loop: display peer lines until the flag is raised or the stream
/// ends.
///
/// Never returns an error; failures are logged and reported through the
/// returned [`InboundExit`].
pub(crate) async fn run_inbound(
    mut lines: LineStream,
    flag: TerminationFlag,
    display: Arc<dyn MessageDisplay>,
) -> InboundExit {
    let exit = loop {
        tokio::select! {
            biased;

            () = flag.raised() => {
                debug!("inbound loop: termination observed");
                break InboundExit::Terminated;
            }

            item = lines.next() => match item {
                None => {
                    info!("inbound loop: peer closed the stream");
                    flag.raise();
                    break InboundExit::PeerClosed;
                }

                Some(Err(err)) => {
                    let err = AppError::Receive(err.to_string());
                    warn!(%err, "inbound loop: read failed, stopping");
                    flag.raise();
                    break InboundExit::Failed(err.to_string());
                }

                Some(Ok(line)) => {
                    if line.is_empty() {
                        continue;
                    }
                    if is_exit_command(&line) {
                        info!("inbound loop: peer requested exit");
                        flag.raise();
                        break InboundExit::RemoteExit;
                    }
                    display.show(&line);
                }
            },
        }
    };

    debug!(?exit, "inbound loop: stopped");
    exit
}
