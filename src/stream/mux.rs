//! Multiplexer - embeds a whole message into a carrier.

use std::io::{Read, Write};

use crate::context::{Context, PaddingPolicy};
use crate::error::{Result, StegError};
use crate::stream::Embedder;
use crate::util::read_full;

/// What a completed [`Multiplexer::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MuxSummary {
    /// Message bytes embedded, padding excluded.
    pub embedded: u64,
    /// Zero bytes added to complete the final atom.
    pub padding: u64,
    /// Carrier bytes copied through unchanged (offset and remainder).
    pub passthrough: u64,
}

/// Embeds an entire message stream into a carrier stream.
///
/// The message is read one atom at a time. A short final atom is handled
/// according to the context's [`PaddingPolicy`]. Once the message is
/// exhausted the rest of the carrier is copied through, so the output is
/// exactly as long as the carrier.
///
/// # Example
///
/// ```
/// use stegrs::Context;
///
/// let ctx = Context::new(1)?;
/// let carrier = vec![0x5au8; 1024];
/// let mut out = Vec::new();
///
/// let summary = ctx.multiplexer(&mut out, &carrier[..], &b"hidden"[..]).run()?;
/// assert_eq!(summary.embedded, 6);
/// assert_eq!(out.len(), carrier.len());
/// # Ok::<(), stegrs::StegError>(())
/// ```
#[derive(Debug)]
pub struct Multiplexer<W, C, M> {
    embedder: Embedder<W, C>,
    message: M,
}

impl<W: Write, C: Read, M: Read> Multiplexer<W, C, M> {
    /// Creates a multiplexer.
    pub fn new(dst: W, carrier: C, message: M, context: Context) -> Self {
        Self {
            embedder: Embedder::new(dst, carrier, context),
            message,
        }
    }

    /// Copies `n` carrier bytes to the destination before embedding.
    ///
    /// Counterpart of [`Extractor::discard`].
    ///
    /// [`Extractor::discard`]: crate::Extractor::discard
    pub fn copy_passthrough(&mut self, n: u64) -> Result<u64> {
        self.embedder.copy_passthrough(n)
    }

    /// Embeds the whole message, then copies the rest of the carrier.
    ///
    /// # Errors
    ///
    /// - [`StegError::ShortCarrier`] if the carrier runs out first
    /// - [`StegError::InsufficientData`] for a partial final atom under
    ///   [`PaddingPolicy::Strict`]; nothing is written for that atom
    /// - [`StegError::Io`] for any stream failure
    ///
    /// Output written before a failure is left in place.
    pub fn run(&mut self) -> Result<MuxSummary> {
        let context = *self.embedder.context();
        let atom_size = context.atom_size();
        tracing::debug!(
            atom_size,
            chunk_size = context.chunk_size(),
            "multiplexing message into carrier"
        );

        let mut group = [0u8; crate::context::MAX_ATOM_SIZE as usize];
        let group = &mut group[..atom_size];
        let mut padding = 0u64;
        loop {
            let got = read_full(&mut self.message, group).map_err(StegError::from_io)?;
            if got == 0 {
                break;
            }
            if got < atom_size {
                if context.padding_policy() == PaddingPolicy::Strict {
                    return Err(StegError::InsufficientData {
                        len: got,
                        atom_size,
                    });
                }
                group[got..].fill(0);
                padding = (atom_size - got) as u64;
                self.embedder.embed_atom(group)?;
                break;
            }
            self.embedder.embed_atom(group)?;
        }

        self.embedder.copy_remainder()?;
        self.embedder.flush()?;

        let summary = MuxSummary {
            embedded: self.embedder.embedded() - padding,
            padding,
            passthrough: self.embedder.passthrough(),
        };
        tracing::debug!(
            embedded = summary.embedded,
            padding = summary.padding,
            passthrough = summary.passthrough,
            "multiplex complete"
        );
        Ok(summary)
    }

    /// Returns the embedder and the message reader.
    pub fn into_inner(self) -> (Embedder<W, C>, M) {
        (self.embedder, self.message)
    }
}
