//! Length-prefix framing.
//!
//! An unframed extraction cannot tell the embedded message from the noise
//! decoded out of the rest of the carrier. Framing fixes that by prefixing
//! the message with its length:
//!
//! ```text
//! +----------------------+-----------------+
//! | length: u64, BE (8B) | message bytes   |
//! +----------------------+-----------------+
//! ```
//!
//! - [`Framer`] - Wraps a message reader, emitting header then body
//! - [`Unframer`] - Wraps an extracted stream, yielding exactly the body
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use stegrs::{Framer, Unframer};
//!
//! let mut framed = Vec::new();
//! Framer::new(&b"payload"[..], Some(7))?.read_to_end(&mut framed)?;
//!
//! framed.extend_from_slice(b"trailing noise");
//!
//! let mut body = Vec::new();
//! Unframer::new(&framed[..]).read_to_end(&mut body)?;
//! assert_eq!(body, b"payload");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Cursor, Read};

use crate::error::{Result, StegError};
use crate::util::read_full;

/// Size of the frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 8;

#[derive(Debug)]
enum Body<R> {
    Stream(R),
    Buffered(Cursor<Vec<u8>>),
}

impl<R: Read> Read for Body<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Body::Stream(r) => r.read(buf),
            Body::Buffered(c) => c.read(buf),
        }
    }
}

/// Prefixes a message stream with its length.
#[derive(Debug)]
pub struct Framer<R> {
    header: [u8; FRAME_HEADER_SIZE],
    header_pos: usize,
    body: Body<R>,
    len: u64,
    remaining: u64,
    checked_end: bool,
}

impl<R: Read> Framer<R> {
    /// Creates a framer for `message`.
    ///
    /// With `len` unknown the whole message is read into memory to learn its
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`StegError::Io`] if buffering the message fails.
    pub fn new(message: R, len: Option<u64>) -> Result<Self> {
        let (body, len) = match len {
            Some(len) => (Body::Stream(message), len),
            None => {
                let mut data = Vec::new();
                let mut message = message;
                message.read_to_end(&mut data)?;
                let len = data.len() as u64;
                tracing::debug!(len, "buffered message of unknown length for framing");
                (Body::Buffered(Cursor::new(data)), len)
            }
        };

        Ok(Self {
            header: len.to_be_bytes(),
            header_pos: 0,
            body,
            len,
            remaining: len,
            checked_end: false,
        })
    }

    /// Returns the message length recorded in the header.
    pub fn message_len(&self) -> u64 {
        self.len
    }

    /// Returns the total framed length, header included.
    pub fn framed_len(&self) -> u64 {
        self.len + FRAME_HEADER_SIZE as u64
    }
}

impl<R: Read> Read for Framer<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.header_pos < FRAME_HEADER_SIZE {
            let n = (FRAME_HEADER_SIZE - self.header_pos).min(buf.len());
            buf[..n].copy_from_slice(&self.header[self.header_pos..self.header_pos + n]);
            self.header_pos += n;
            return Ok(n);
        }

        if self.remaining == 0 {
            if !self.checked_end {
                self.checked_end = true;
                let mut probe = [0u8; 1];
                if read_full(&mut self.body, &mut probe)? > 0 {
                    return Err(StegError::Frame {
                        reason: "message longer than declared length",
                    }
                    .into());
                }
            }
            return Ok(0);
        }

        let limit = self.remaining.min(buf.len() as u64) as usize;
        let n = self.body.read(&mut buf[..limit])?;
        if n == 0 {
            return Err(StegError::Frame {
                reason: "message shorter than declared length",
            }
            .into());
        }
        self.remaining -= n as u64;
        Ok(n)
    }
}

/// Strips the frame header from a stream and yields exactly the framed
/// message.
///
/// Whatever follows the message in the inner stream is never read. A stream
/// that ends inside the header or before the declared length fails with an
/// [`io::ErrorKind::UnexpectedEof`] error carrying [`StegError::ShortRead`].
#[derive(Debug)]
pub struct Unframer<R> {
    reader: R,
    len: Option<u64>,
    remaining: u64,
}

impl<R: Read> Unframer<R> {
    /// Creates an unframer over `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            len: None,
            remaining: 0,
        }
    }

    /// Reads the header if needed and returns the declared message length.
    pub fn declared_len(&mut self) -> io::Result<u64> {
        if let Some(len) = self.len {
            return Ok(len);
        }
        let mut header = [0u8; FRAME_HEADER_SIZE];
        let got = read_full(&mut self.reader, &mut header)?;
        if got < FRAME_HEADER_SIZE {
            return Err(StegError::ShortRead {
                got: got as u64,
                need: FRAME_HEADER_SIZE as u64,
            }
            .into());
        }
        let len = u64::from_be_bytes(header);
        self.len = Some(len);
        self.remaining = len;
        Ok(len)
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Read for Unframer<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = self.declared_len()?;
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let limit = self.remaining.min(buf.len() as u64) as usize;
        let n = self.reader.read(&mut buf[..limit])?;
        if n == 0 {
            return Err(StegError::ShortRead {
                got: len - self.remaining,
                need: len,
            }
            .into());
        }
        self.remaining -= n as u64;
        Ok(n)
    }
}
