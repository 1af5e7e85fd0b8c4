//! Sources of local user input.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Produces one line of local input per call.
///
/// Calls may block indefinitely; the outbound loop runs them on the
/// blocking pool. An empty string means "nothing to send this round".
pub trait InputSource: Send + 'static {
    /// Next line of input, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying source fails.
    fn next_line(&mut self) -> io::Result<String>;
}

/// Interactive input read from the process's standard input.
///
/// Blocks until the user presses enter. End of input is reported as
/// [`io::ErrorKind::UnexpectedEof`] so the session stops polling a closed
/// terminal.
#[derive(Debug, Default)]
pub struct StdinInput;

impl StdinInput {
    /// Create a standard-input source.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for StdinInput {
    fn next_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

/// Input source that never has anything to say.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyInput;

impl InputSource for EmptyInput {
    fn next_line(&mut self) -> io::Result<String> {
        Ok(String::new())
    }
}

/// Replays a fixed list of lines, then behaves like [`EmptyInput`].
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Queue `lines` for replay in order.
    #[must_use]
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Lines not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_line(&mut self) -> io::Result<String> {
        Ok(self.lines.pop_front().unwrap_or_default())
    }
}
