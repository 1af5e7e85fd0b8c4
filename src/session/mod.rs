//! Two-party line chat over a connected stream.
//!
//! A [`ChatSession`] owns one connected [`Endpoint`] and runs two tasks
//! against it:
//! - `writer`: the outbound loop. Pulls lines from an [`InputSource`],
//!   frames them as `"<sender>: <text>"` and writes them to the peer.
//! - `reader`: the inbound loop. Decodes lines from the peer and hands them
//!   to a [`MessageDisplay`].
//!
//! The two tasks share nothing but a [`TerminationFlag`]. Typing the
//! [`SENTINEL`] word raises it locally without sending anything; the peer
//! closing its end raises it on the other side.

pub mod chat;
pub mod codec;
pub mod display;
pub mod endpoint;
pub mod input;
pub mod log;
pub mod reader;
pub mod termination;
pub mod writer;

use std::fmt::{Display, Formatter};

pub use chat::ChatSession;
pub use display::{MessageDisplay, StdoutDisplay, WriterDisplay};
pub use endpoint::Endpoint;
pub use input::{EmptyInput, InputSource, ScriptedInput, StdinInput};
pub use log::MessageLog;
pub use termination::TerminationFlag;

/// Control word that ends a session locally. Never sent to the peer.
pub const SENTINEL: &str = "EXIT";

/// Whether `text` is the [`SENTINEL`], ignoring case and surrounding whitespace.
#[must_use]
pub fn is_exit_command(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case(SENTINEL)
}

/// Identity prefixed to every line a session transmits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SenderTag {
    /// The dialing side.
    Client,
    /// The listening side.
    Server,
}

impl SenderTag {
    /// Wire representation of the tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Server => "Server",
        }
    }

    /// Frame `text` as a wire line, without the trailing newline.
    #[must_use]
    pub fn frame(self, text: &str) -> String {
        format!("{}: {text}", self.as_str())
    }
}

impl Display for SenderTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle position of a [`ChatSession`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SessionState {
    /// Both loops may still run.
    Running,
    /// The termination flag is raised; loops are winding down.
    Terminating,
    /// The stream has been released. Only `close` is valid.
    Closed,
}

/// Result of [`ChatSession::send_message`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SendOutcome {
    /// The framed line was written, flushed, and logged.
    Sent(String),
    /// The text was the sentinel; the termination flag is now raised.
    ExitRequested,
    /// The session is already terminating; nothing was written.
    Suppressed,
}
