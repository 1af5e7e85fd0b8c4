//! Line codec for chat streams.
//!
//! Wraps [`tokio_util::codec::LinesCodec`] with a maximum line length so an
//! unterminated or oversized line from the peer cannot grow the read buffer
//! without bound. Used as the codec parameter for
//! [`tokio_util::codec::FramedRead`] (inbound) and
//! [`tokio_util::codec::FramedWrite`] (outbound).

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};
use tracing::warn;

use crate::{AppError, Result};

type LinesResult = std::result::Result<Option<String>, LinesCodecError>;

/// Default maximum inbound line length: 1 MiB.
pub const MAX_LINE_BYTES: usize = 1_048_576;

/// Newline-delimited UTF-8 codec for chat messages.
///
/// # Decoder
///
/// Inbound lines longer than the configured limit are logged, discarded, and
/// counted; decoding resumes at the next newline. The error is absorbed here
/// because `FramedRead` ends the stream after any decoder error. I/O errors
/// are mapped to [`AppError::Io`].
///
/// # Encoder
///
/// Outbound strings are encoded as `item\n`. The limit is not enforced when
/// encoding.
#[derive(Debug)]
pub struct ChatCodec {
    inner: LinesCodec,
    max_line_bytes: usize,
    discarded: usize,
}

impl ChatCodec {
    /// Create a codec with the default [`MAX_LINE_BYTES`] limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_line_bytes(MAX_LINE_BYTES)
    }

    /// Create a codec that rejects inbound lines longer than `max_line_bytes`.
    #[must_use]
    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_line_bytes),
            max_line_bytes,
            discarded: 0,
        }
    }

    /// Configured inbound line limit.
    #[must_use]
    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    /// Number of over-long inbound lines dropped so far.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Run `step` until it yields something other than a length violation.
    fn skip_oversized<F>(&mut self, src: &mut BytesMut, mut step: F) -> Result<Option<String>>
    where
        F: FnMut(&mut LinesCodec, &mut BytesMut) -> LinesResult,
    {
        loop {
            match step(&mut self.inner, src) {
                Ok(line) => return Ok(line),
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    self.discarded += 1;
                    warn!(
                        max_line_bytes = self.max_line_bytes,
                        "inbound line too long, discarding"
                    );
                }
                Err(LinesCodecError::Io(io_err)) => return Err(AppError::Io(io_err.to_string())),
            }
        }
    }
}

impl Default for ChatCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ChatCodec {
    type Item = String;
    type Error = AppError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.skip_oversized(src, LinesCodec::decode)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        self.skip_oversized(src, LinesCodec::decode_eof)
    }
}

impl Encoder<String> for ChatCodec {
    type Error = AppError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<()> {
        // LinesCodec never enforces the limit on encode.
        self.inner
            .encode(item, dst)
            .map_err(|e| AppError::Io(e.to_string()))
    }
}
