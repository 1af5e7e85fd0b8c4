//! Where received messages are shown.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

/// Sink for lines received from the peer.
pub trait MessageDisplay: Send + Sync + 'static {
    /// Present one received line to the user.
    fn show(&self, line: &str);
}

/// Prints each received line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutDisplay;

impl MessageDisplay for StdoutDisplay {
    fn show(&self, line: &str) {
        emit(&mut io::stdout().lock(), line);
    }
}

/// Writes each received line to an arbitrary [`Write`] sink.
#[derive(Debug)]
pub struct WriterDisplay<W> {
    out: Mutex<W>,
}

impl<W: Write + Send + 'static> WriterDisplay<W> {
    /// Wrap `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Unwrap the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send + 'static> MessageDisplay for WriterDisplay<W> {
    fn show(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        emit(&mut *out, line);
    }
}

/// Write and flush one line. Failures are logged and otherwise ignored; the
/// session keeps running without its display.
fn emit(out: &mut impl Write, line: &str) {
    if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
        debug!(%err, "failed to display received line");
    }
}
