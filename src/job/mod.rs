//! End-to-end embed and extract jobs.
//!
//! A job bundles the choices that sit around the streaming codec: a carrier
//! offset to step over, optional length-prefix framing, and a capacity check
//! when both sizes are known up front.
//!
//! - [`EmbedJob`] - Offset, framing and fail-fast capacity check around a [`Multiplexer`]
//! - [`ExtractJob`] - Offset and framing around an [`Extractor`]
//! - [`embed`] / [`extract`] - Shorthands with no offset and no framing
//!
//! # Example
//!
//! ```
//! use stegrs::{Context, EmbedJob, ExtractJob};
//!
//! let ctx = Context::new(1)?;
//! let carrier = vec![0x42u8; 2048];
//! let message = b"meet at noon";
//!
//! let mut muxed = Vec::new();
//! EmbedJob::new(ctx)
//!     .with_offset(16)
//!     .with_framing(true)
//!     .with_carrier_size(carrier.len() as u64)
//!     .with_message_size(message.len() as u64)
//!     .run(&mut muxed, &carrier[..], &message[..])?;
//!
//! let mut extracted = Vec::new();
//! ExtractJob::new(ctx)
//!     .with_offset(16)
//!     .with_framing(true)
//!     .run(&mut extracted, &muxed[..])?;
//! assert_eq!(extracted, message);
//! # Ok::<(), stegrs::StegError>(())
//! ```
//!
//! [`Multiplexer`]: crate::Multiplexer

use std::io::{self, Read, Write};

use crate::context::Context;
use crate::error::{Result, StegError};
use crate::frame::{Framer, Unframer};
use crate::stream::{Extractor, MuxSummary};

/// Buffer size used when draining an extractor.
const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Embeds a message into a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmbedJob {
    context: Context,
    offset: u64,
    framed: bool,
    carrier_size: Option<u64>,
    message_size: Option<u64>,
}

impl EmbedJob {
    /// Creates a job with no offset, no framing and unknown sizes.
    pub fn new(context: Context) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Copies `offset` carrier bytes through unchanged before embedding.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Prefixes the message with its length.
    pub fn with_framing(mut self, framed: bool) -> Self {
        self.framed = framed;
        self
    }

    /// Declares the total carrier size, offset included.
    pub fn with_carrier_size(mut self, size: u64) -> Self {
        self.carrier_size = Some(size);
        self
    }

    /// Declares the message size, framing header excluded.
    pub fn with_message_size(mut self, size: u64) -> Self {
        self.message_size = Some(size);
        self
    }

    /// Runs the job.
    ///
    /// When the carrier size and the message size are both known (a framed
    /// message of unknown size is buffered, which makes its size known), the
    /// capacity check runs before any carrier or destination I/O.
    ///
    /// # Errors
    ///
    /// - [`StegError::CapacityExceeded`] from the pre-flight check
    /// - [`StegError::ShortCarrier`] if the carrier cannot hold the offset
    ///   or the message
    /// - anything [`Multiplexer::run`] returns
    ///
    /// [`Multiplexer::run`]: crate::Multiplexer::run
    pub fn run<W: Write, C: Read, M: Read>(
        &self,
        dst: W,
        carrier: C,
        message: M,
    ) -> Result<MuxSummary> {
        if self.framed {
            let framer = Framer::new(message, self.message_size)?;
            self.check_capacity(Some(framer.framed_len()))?;
            self.mux(dst, carrier, framer)
        } else {
            self.check_capacity(self.message_size)?;
            self.mux(dst, carrier, message)
        }
    }

    fn check_capacity(&self, message_size: Option<u64>) -> Result<()> {
        match (self.carrier_size, message_size) {
            (Some(carrier), Some(message)) => self
                .context
                .check_capacity(carrier.saturating_sub(self.offset), message),
            _ => Ok(()),
        }
    }

    fn mux<W: Write, C: Read, M: Read>(&self, dst: W, carrier: C, message: M) -> Result<MuxSummary> {
        let mut mux = self.context.multiplexer(dst, carrier, message);
        if self.offset > 0 {
            mux.copy_passthrough(self.offset)?;
        }
        mux.run()
    }
}

/// Extracts a message from a carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractJob {
    context: Context,
    offset: u64,
    framed: bool,
}

impl ExtractJob {
    /// Creates a job with no offset and no framing.
    pub fn new(context: Context) -> Self {
        Self {
            context,
            ..Self::default()
        }
    }

    /// Discards `offset` source bytes before decoding.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Expects a length-prefixed message and yields only its body.
    pub fn with_framing(mut self, framed: bool) -> Self {
        self.framed = framed;
        self
    }

    /// Runs the job, writing the message to `dst`.
    ///
    /// Returns the number of message bytes written. Without framing, the
    /// message is everything decodable up to the end of the source, and a
    /// trailing partial chunk simply ends it. With framing, a source that
    /// ends before the declared length is an error.
    ///
    /// # Errors
    ///
    /// - [`StegError::ShortRead`] if the source is shorter than the offset,
    ///   or, when framed, ends before the header or the declared length,
    ///   whether or not it ends on a chunk boundary
    /// - [`StegError::Io`] for any other stream failure
    pub fn run<W: Write, R: Read>(&self, mut dst: W, source: R) -> Result<u64> {
        let mut extractor = self.context.extractor(source);
        if self.offset > 0 {
            extractor.discard(self.offset)?;
        }

        let copied = if self.framed {
            let mut unframer = Unframer::new(extractor);
            io::copy(&mut unframer, &mut dst).map_err(StegError::from_io)?
        } else {
            drain(&mut extractor, &mut dst)?
        };
        dst.flush()?;
        Ok(copied)
    }
}

/// Copies everything decodable, treating a short read as the end.
fn drain<R: Read, W: Write>(extractor: &mut Extractor<R>, dst: &mut W) -> Result<u64> {
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        match extractor.extract(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                dst.write_all(&buf[..n])?;
                total += n as u64;
            }
            Err(e) if e.is_short_read() => {
                tracing::debug!(extracted = total, error = %e, "carrier ended inside a chunk");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Embeds all of `message` into `carrier`, writing the result to `dst`.
pub fn embed<W: Write, C: Read, M: Read>(
    context: Context,
    dst: W,
    carrier: C,
    message: M,
) -> Result<MuxSummary> {
    EmbedJob::new(context).run(dst, carrier, message)
}

/// Returns a reader over the message carried by `source`.
pub fn extract<R: Read>(context: Context, source: R) -> Extractor<R> {
    context.extractor(source)
}
