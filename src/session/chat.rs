//! Session lifecycle: construction, start, and close.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::codec::ChatCodec;
use super::display::{MessageDisplay, StdoutDisplay};
use super::endpoint::Endpoint;
use super::input::InputSource;
use super::log::MessageLog;
use super::reader::{run_inbound, LineStream};
use super::termination::TerminationFlag;
use super::writer::{run_outbound, Outbound};
use super::{SendOutcome, SenderTag, SessionState};
use crate::config::SessionConfig;
use crate::{AppError, Result};

/// Pieces consumed by the first call to [`ChatSession::start`].
struct Pending {
    input: Box<dyn InputSource>,
    lines: LineStream,
}

/// A single two-party chat over one connected stream.
///
/// Created around an already-connected [`Endpoint`], driven by
/// [`start`](Self::start), and released by [`close`](Self::close). A session
/// is never reused for another connection.
///
/// All methods take `&self`; wrap the session in an [`Arc`] to call
/// [`send_message`](Self::send_message) or [`close`](Self::close) while
/// [`start`](Self::start) is running on another task.
pub struct ChatSession {
    id: Uuid,
    sender: SenderTag,
    peer: String,
    flag: TerminationFlag,
    log: MessageLog,
    outbound: Arc<Outbound>,
    pending: Mutex<Option<Pending>>,
    display: Arc<dyn MessageDisplay>,
    poll_interval: Duration,
    closed: AtomicBool,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("sender", &self.sender)
            .field("peer", &self.peer)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Build a session around a connected stream.
    ///
    /// Received lines go to standard output; use
    /// [`with_display`](Self::with_display) to redirect them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SessionSetup`] if the stream's peer cannot be
    /// resolved, meaning its read and write directions are unusable.
    pub fn new<S, I>(
        sender: SenderTag,
        stream: S,
        input: I,
        settings: &SessionConfig,
    ) -> Result<Self>
    where
        S: Endpoint,
        I: InputSource,
    {
        let peer = stream.peer_label().map_err(|err| {
            AppError::SessionSetup(format!("cannot open stream directions: {err}"))
        })?;

        let stream: Box<dyn Endpoint> = Box::new(stream);
        let (read_half, write_half) = tokio::io::split(stream);
        let lines = FramedRead::new(
            read_half,
            ChatCodec::with_max_line_bytes(settings.max_line_bytes),
        );
        let sink = FramedWrite::new(write_half, ChatCodec::new());

        let flag = TerminationFlag::new();
        let log = MessageLog::new();
        let outbound = Arc::new(Outbound::new(sender, flag.clone(), log.clone(), sink));
        let id = Uuid::new_v4();

        debug!(session_id = %id, %sender, peer = %peer, "chat session created");

        Ok(Self {
            id,
            sender,
            peer,
            flag,
            log,
            outbound,
            pending: Mutex::new(Some(Pending {
                input: Box::new(input),
                lines,
            })),
            display: Arc::new(StdoutDisplay),
            poll_interval: settings.poll_interval(),
            closed: AtomicBool::new(false),
        })
    }

    /// Send received lines to `display` instead of standard output.
    #[must_use]
    pub fn with_display(mut self, display: impl MessageDisplay) -> Self {
        self.display = Arc::new(display);
        self
    }

    /// Unique identifier used in log output.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Tag prefixed to every transmitted line.
    #[must_use]
    pub fn sender(&self) -> SenderTag {
        self.sender
    }

    /// Description of the remote side captured at construction.
    #[must_use]
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.closed.load(Ordering::Acquire) {
            SessionState::Closed
        } else if self.flag.is_raised() {
            SessionState::Terminating
        } else {
            SessionState::Running
        }
    }

    /// Whether the termination flag has been raised.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.flag.is_raised()
    }

    /// Raise the termination flag without transmitting anything.
    pub fn request_exit(&self) {
        if self.flag.raise() {
            info!(session_id = %self.id, "exit requested");
        }
    }

    /// Lines successfully transmitted so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.log.entries()
    }

    /// Empty the transmitted-message log. Leaves the flag and stream alone.
    pub fn clear_messages(&self) {
        self.log.clear();
    }

    /// Shared handle to the transmitted-message log.
    #[must_use]
    pub fn message_log(&self) -> MessageLog {
        self.log.clone()
    }

    /// Transmit one message to the peer.
    ///
    /// See [`SendOutcome`] for the three possible results.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Transmission`] if the text contains a line
    /// terminator or the write fails. The inbound loop is unaffected.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome> {
        self.outbound.send(text).await
    }

    /// Run both loops until the termination flag is raised.
    ///
    /// Once the flag is raised both loops finish their current iteration
    /// and stop. A message being written at that moment is delivered and
    /// logged before `start` returns, so a peer that stops reading can hold
    /// `start` up. An input call blocked on the terminal is left behind.
    /// The stream stays open until [`close`](Self::close).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidState`] if the session was already started
    /// or has been closed.
    pub async fn start(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(AppError::InvalidState("session is closed".into()));
        }

        let Pending { input, lines } = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| AppError::InvalidState("session already started".into()))?;

        let span = info_span!("chat_session", session_id = %self.id, sender = %self.sender);
        info!(parent: &span, peer = %self.peer, "chat session started");

        let outbound_task = tokio::spawn(
            run_outbound(Arc::clone(&self.outbound), input, self.poll_interval)
                .instrument(span.clone()),
        );
        let inbound_task = tokio::spawn(
            run_inbound(lines, self.flag.clone(), Arc::clone(&self.display))
                .instrument(span.clone()),
        );

        self.flag.raised().await;

        // The outbound loop leaves at its next flag check; a write already
        // under way completes and is logged first.
        if let Err(err) = outbound_task.await {
            warn!(parent: &span, %err, "outbound loop ended abnormally");
        }

        match inbound_task.await {
            Ok(exit) => info!(parent: &span, ?exit, "chat session terminated"),
            Err(err) => warn!(parent: &span, %err, "inbound loop ended abnormally"),
        }

        Ok(())
    }

    /// Release the stream.
    ///
    /// Raises the termination flag, then flushes and shuts down the write
    /// half. Later calls are no-ops. In-flight reads or writes on the closed
    /// stream fail inside their loop and are logged there.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Shutdown`] if the first close fails to shut the
    /// stream down. The error is never repeated.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            debug!(session_id = %self.id, "chat session already closed");
            return Ok(());
        }

        self.flag.raise();
        // Never started: drop the read half and input source now.
        drop(
            self.pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take(),
        );

        match self.outbound.shutdown().await {
            Ok(_) => {
                info!(session_id = %self.id, "chat session closed");
                Ok(())
            }
            Err(err) => {
                warn!(session_id = %self.id, %err, "chat session close failed");
                Err(err)
            }
        }
    }
}
