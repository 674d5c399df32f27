//! Streaming decoder - Extractor and AtomIter.
//!
//! The extractor pulls one chunk at a time from a [`std::io::Read`] source,
//! decodes it, and serves the atom bytes to reads of any size. A decoded
//! atom that does not fit in the caller's buffer is held until the next
//! read, so atom boundaries never need to line up with read requests.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use stegrs::Context;
//!
//! let ctx = Context::new(1)?;
//! let mut extractor = ctx.extractor(&b"hello, there, how are you? fine."[..]);
//!
//! let mut message = Vec::new();
//! extractor.read_to_end(&mut message)?;
//! assert_eq!(message, [0xdb]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Read};

use crate::codec;
use crate::context::Context;
use crate::error::{Result, StegError};
use crate::unit::{Atom, Chunk};
use crate::util::read_full;

/// Decodes a carrier stream into the message it carries.
///
/// End of the source exactly at a chunk boundary is end of stream. A source
/// that ends inside a chunk yields [`StegError::ShortRead`], which for an
/// unframed message is the normal way extraction ends.
#[derive(Debug)]
pub struct Extractor<R> {
    reader: R,
    context: Context,
    chunk: Chunk,
    atom: Atom,
    remaining: usize,
    deferred: Option<StegError>,
    consumed: u64,
}

impl<R: Read> Extractor<R> {
    /// Creates an extractor over `reader`.
    pub fn new(reader: R, context: Context) -> Self {
        Self {
            reader,
            context,
            chunk: context.new_chunk(),
            atom: context.new_atom(),
            remaining: 0,
            deferred: None,
            consumed: 0,
        }
    }

    /// Reads and drops `n` raw source bytes.
    ///
    /// Call this before extracting to skip a carrier header region; it is
    /// the counterpart of [`Embedder::copy_passthrough`].
    ///
    /// # Errors
    ///
    /// Returns [`StegError::ShortRead`] if the source holds fewer than `n`
    /// bytes.
    ///
    /// [`Embedder::copy_passthrough`]: crate::Embedder::copy_passthrough
    pub fn discard(&mut self, n: u64) -> Result<u64> {
        let got = io::copy(&mut (&mut self.reader).take(n), &mut io::sink())?;
        self.consumed += got;
        if got < n {
            return Err(StegError::ShortRead { got, need: n });
        }
        Ok(got)
    }

    /// Extracts message bytes into `buf`.
    ///
    /// Returns the number of bytes written, 0 at a clean end of stream.
    /// If some bytes were produced before the source failed, they are
    /// returned and the error is reported by the next call.
    pub fn extract(&mut self, buf: &mut [u8]) -> Result<usize> {
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }

        let atom_size = self.context.atom_size();
        let mut n = 0;
        while n < buf.len() {
            if self.remaining == 0 {
                match self.load_atom() {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) if n > 0 => {
                        self.deferred = Some(e);
                        break;
                    }
                    Err(e) => return Err(e),
                }
            }

            let start = atom_size - self.remaining;
            let take = self.remaining.min(buf.len() - n);
            buf[n..n + take].copy_from_slice(&self.atom.as_bytes()[start..start + take]);
            n += take;
            self.remaining -= take;
        }
        Ok(n)
    }

    /// Decodes the next whole atom.
    ///
    /// Returns `None` at a clean end of stream. Bytes still held from a
    /// previous [`Extractor::extract`] call are dropped.
    pub fn next_atom(&mut self) -> Result<Option<Atom>> {
        if let Some(e) = self.deferred.take() {
            return Err(e);
        }
        self.remaining = 0;
        Ok(self.load_atom()?.then_some(self.atom))
    }

    /// Turns the extractor into an iterator over decoded atoms.
    pub fn atoms(self) -> AtomIter<R> {
        AtomIter {
            inner: self,
            finished: false,
        }
    }

    /// Returns the number of source bytes consumed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Returns the context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Pulls one chunk and decodes it into the held atom.
    fn load_atom(&mut self) -> Result<bool> {
        let need = self.chunk.len();
        let got = read_full(&mut self.reader, self.chunk.as_mut_bytes())?;
        self.consumed += got as u64;
        if got == 0 {
            return Ok(false);
        }
        if got < need {
            return Err(StegError::ShortRead {
                got: got as u64,
                need: need as u64,
            });
        }
        codec::decode_into(&self.chunk, &mut self.atom);
        self.remaining = self.context.atom_size();
        Ok(true)
    }
}

impl<R: Read> Read for Extractor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.extract(buf).map_err(Into::into)
    }
}

/// An iterator over the atoms of a carrier stream.
///
/// Yields `Ok(atom)` per whole chunk and stops after the first error,
/// including the [`StegError::ShortRead`] of a trailing partial chunk.
///
/// # Example
///
/// ```
/// use stegrs::Context;
///
/// let carrier = vec![0u8; 64];
/// let atoms = Context::new(1)?
///     .extractor(&carrier[..])
///     .atoms()
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(atoms.len(), 2);
/// # Ok::<(), stegrs::StegError>(())
/// ```
#[derive(Debug)]
pub struct AtomIter<R> {
    inner: Extractor<R>,
    finished: bool,
}

impl<R> AtomIter<R> {
    /// Returns the wrapped extractor.
    pub fn into_inner(self) -> Extractor<R> {
        self.inner
    }
}

impl<R: Read> Iterator for AtomIter<R> {
    type Item = Result<Atom>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.inner.next_atom() {
            Ok(Some(atom)) => Some(Ok(atom)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
