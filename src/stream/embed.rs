//! Streaming encoder - Embedder.

use std::io::{self, Read, Write};

use crate::codec;
use crate::context::Context;
use crate::error::{Result, StegError};
use crate::unit::{Atom, Chunk};
use crate::util::read_full;

/// Embeds message atoms into a carrier stream, writing the result to a
/// destination.
///
/// Every atom consumes one chunk from the carrier. A chunk is only counted
/// as embedded once it has been written to the destination in full.
///
/// The embedder never pads: [`Embedder::write`] takes whole atoms only. Use
/// a [`Multiplexer`] to embed a message of arbitrary length.
///
/// [`Multiplexer`]: crate::Multiplexer
///
/// # Example
///
/// ```
/// use stegrs::Context;
///
/// let ctx = Context::new(1)?;
/// let carrier = vec![0u8; 96];
/// let mut out = Vec::new();
///
/// let mut embedder = ctx.embedder(&mut out, &carrier[..]);
/// embedder.write(b"hi")?;
/// embedder.copy_remainder()?;
/// drop(embedder);
///
/// assert_eq!(out.len(), carrier.len());
/// # Ok::<(), stegrs::StegError>(())
/// ```
#[derive(Debug)]
pub struct Embedder<W, C> {
    dst: W,
    carrier: C,
    context: Context,
    chunk: Chunk,
    atom: Atom,
    embedded: u64,
    passthrough: u64,
}

impl<W: Write, C: Read> Embedder<W, C> {
    /// Creates an embedder reading chunks from `carrier` and writing to `dst`.
    pub fn new(dst: W, carrier: C, context: Context) -> Self {
        Self {
            dst,
            carrier,
            context,
            chunk: context.new_chunk(),
            atom: context.new_atom(),
            embedded: 0,
            passthrough: 0,
        }
    }

    /// Embeds a single atom given as exactly `atom_size` bytes.
    ///
    /// # Errors
    ///
    /// - [`StegError::InsufficientData`] if `bytes` is not one atom long
    /// - [`StegError::ShortCarrier`] if the carrier ends before a full chunk;
    ///   the partial chunk is consumed and nothing is written for it
    /// - [`StegError::Io`] for carrier or destination failures
    pub fn embed_atom(&mut self, bytes: &[u8]) -> Result<()> {
        let atom_size = self.context.atom_size();
        if bytes.len() != atom_size {
            return Err(StegError::InsufficientData {
                len: bytes.len(),
                atom_size,
            });
        }
        self.atom.as_mut_bytes().copy_from_slice(bytes);

        let need = self.chunk.len();
        let got = read_full(&mut self.carrier, self.chunk.as_mut_bytes())?;
        if got < need {
            return Err(StegError::ShortCarrier {
                embedded: self.embedded,
                got: got as u64,
                need: need as u64,
            });
        }

        let address = codec::encode(&mut self.chunk, &self.atom);
        self.dst.write_all(self.chunk.as_bytes())?;
        self.embedded += atom_size as u64;
        tracing::trace!(embedded = self.embedded, address, "encoded chunk");
        Ok(())
    }

    /// Embeds `buf`, which must be a whole number of atoms.
    ///
    /// Returns `buf.len()` on success. On failure, [`Embedder::embedded`]
    /// tells how much of the message made it to the destination.
    ///
    /// # Errors
    ///
    /// [`StegError::InsufficientData`] is returned before any I/O if the
    /// length is not a multiple of the atom size. Otherwise see
    /// [`Embedder::embed_atom`].
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let atom_size = self.context.atom_size();
        if buf.len() % atom_size != 0 {
            return Err(StegError::InsufficientData {
                len: buf.len(),
                atom_size,
            });
        }
        for group in buf.chunks_exact(atom_size) {
            self.embed_atom(group)?;
        }
        Ok(buf.len())
    }

    /// Copies `n` carrier bytes to the destination unchanged.
    ///
    /// Used to step over a carrier header before embedding.
    ///
    /// # Errors
    ///
    /// Returns [`StegError::ShortCarrier`] if the carrier holds fewer than
    /// `n` bytes; whatever was available has been copied.
    pub fn copy_passthrough(&mut self, n: u64) -> Result<u64> {
        let got = io::copy(&mut (&mut self.carrier).take(n), &mut self.dst)?;
        self.passthrough += got;
        if got < n {
            return Err(StegError::ShortCarrier {
                embedded: self.embedded,
                got,
                need: n,
            });
        }
        tracing::debug!(bytes = got, "copied carrier passthrough");
        Ok(got)
    }

    /// Copies the rest of the carrier to the destination unchanged.
    pub fn copy_remainder(&mut self) -> Result<u64> {
        let got = io::copy(&mut self.carrier, &mut self.dst)?;
        self.passthrough += got;
        tracing::debug!(bytes = got, "copied carrier remainder");
        Ok(got)
    }

    /// Flushes the destination.
    pub fn flush(&mut self) -> Result<()> {
        self.dst.flush()?;
        Ok(())
    }

    /// Returns the number of message bytes embedded and written so far.
    pub fn embedded(&self) -> u64 {
        self.embedded
    }

    /// Returns the number of carrier bytes copied through unchanged.
    pub fn passthrough(&self) -> u64 {
        self.passthrough
    }

    /// Returns the context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the destination and the carrier.
    pub fn into_inner(self) -> (W, C) {
        (self.dst, self.carrier)
    }
}
