//! Async stream adapter for extraction.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use stegrs::{extract_async, Context};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), stegrs::StegError> {
//!     let mut stream = extract_async(reader, Context::default());
//!
//!     while let Some(atom) = stream.next().await {
//!         let atom = atom?;
//!         println!("atom: {:02x?}", &atom[..]);
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::codec;
use crate::context::Context;
use crate::error::StegError;
use crate::unit::{Atom, Chunk};

/// Scratch size used to skip the offset region.
const SKIP_BUFFER_SIZE: usize = 4096;

pin_project! {
    /// A stream of decoded atoms read from an async carrier.
    ///
    /// Each item holds the bytes of one atom. The stream ends at a clean
    /// chunk boundary; a trailing partial chunk yields a final
    /// [`StegError::ShortRead`].
    ///
    /// Works with tokio, async-std, smol, or any futures-compatible runtime.
    pub struct AtomStream<R> {
        #[pin]
        reader: R,
        context: Context,
        chunk: Chunk,
        atom: Atom,
        filled: usize,
        offset: u64,
        skipped: u64,
        finished: bool,
    }
}

impl<R> AtomStream<R> {
    /// Creates an atom stream from an async reader.
    pub fn new(reader: R, context: Context) -> Self {
        Self {
            reader,
            context,
            chunk: context.new_chunk(),
            atom: context.new_atom(),
            filled: 0,
            offset: 0,
            skipped: 0,
            finished: false,
        }
    }

    /// Skips `offset` raw bytes before the first chunk.
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the context.
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl<R: AsyncRead> Stream for AtomStream<R> {
    type Item = Result<Bytes, StegError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        while *this.skipped < *this.offset {
            let mut scratch = [0u8; SKIP_BUFFER_SIZE];
            let want = (*this.offset - *this.skipped).min(SKIP_BUFFER_SIZE as u64) as usize;
            match this.reader.as_mut().poll_read(cx, &mut scratch[..want]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => {}
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(StegError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(StegError::ShortRead {
                        got: *this.skipped,
                        need: *this.offset,
                    })));
                }
                Poll::Ready(Ok(n)) => *this.skipped += n as u64,
            }
        }

        loop {
            let need = this.chunk.len();
            let buf = &mut this.chunk.as_mut_bytes()[*this.filled..];
            match this.reader.as_mut().poll_read(cx, buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => {}
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(StegError::Io(e))));
                }
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    if *this.filled == 0 {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Err(StegError::ShortRead {
                        got: *this.filled as u64,
                        need: need as u64,
                    })));
                }
                Poll::Ready(Ok(n)) => {
                    *this.filled += n;
                    if *this.filled == need {
                        *this.filled = 0;
                        codec::decode_into(this.chunk, this.atom);
                        return Poll::Ready(Some(Ok(Bytes::copy_from_slice(
                            this.atom.as_bytes(),
                        ))));
                    }
                }
            }
        }
    }
}

/// Creates an atom stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O.
///
/// # Runtime Compatibility
///
/// For tokio users, you can use `tokio_util::compat` to convert
/// `tokio::io::AsyncRead` to `futures_io::AsyncRead`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use stegrs::{extract_async, Context};
///
/// let tokio_reader = tokio::fs::File::open("carrier.bin").await?;
/// let stream = extract_async(tokio_reader.compat(), Context::default());
/// ```
pub fn extract_async<R: AsyncRead>(reader: R, context: Context) -> AtomStream<R> {
    AtomStream::new(reader, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    const HELLO: &[u8; 32] = b"hello, there, how are you? fine.";

    #[tokio::test]
    async fn test_atom_stream_empty() {
        let reader: &[u8] = &[];
        let atoms: Vec<_> = AtomStream::new(reader, Context::default()).collect().await;
        assert!(atoms.is_empty());
    }

    #[tokio::test]
    async fn test_atom_stream_hello() {
        let data = HELLO.repeat(4);
        let reader: &[u8] = &data;
        let atoms: Vec<_> = extract_async(reader, Context::default())
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(atoms.len(), 4);
        assert!(atoms.iter().all(|a: &Bytes| a[..] == [0xdb]));
    }

    #[tokio::test]
    async fn test_atom_stream_offset_and_short_tail() {
        let mut data = b"skip".to_vec();
        data.extend_from_slice(HELLO);
        data.extend_from_slice(&HELLO[..3]);
        let reader: &[u8] = &data;

        let items: Vec<_> = extract_async(reader, Context::default())
            .with_offset(4)
            .collect()
            .await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap()[..], [0xdb]);
        assert!(matches!(
            items[1],
            Err(StegError::ShortRead { got: 3, need: 32 })
        ));
    }

    /// Fails with `Interrupted` before every successful read.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl AsyncRead for Flaky<'_> {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut TaskContext<'_>,
            buf: &mut [u8],
        ) -> Poll<io::Result<usize>> {
            if self.interrupt && !self.data.is_empty() {
                self.interrupt = false;
                return Poll::Ready(Err(io::ErrorKind::Interrupted.into()));
            }
            self.interrupt = true;
            let data = self.data;
            let n = data.len().min(buf.len()).min(7);
            buf[..n].copy_from_slice(&data[..n]);
            self.data = &data[n..];
            Poll::Ready(Ok(n))
        }
    }

    #[tokio::test]
    async fn test_interrupted_reads_are_retried() {
        let mut data = b"skip".to_vec();
        data.extend_from_slice(&HELLO.repeat(2));
        let reader = Flaky {
            data: &data,
            interrupt: true,
        };

        let atoms: Vec<_> = extract_async(reader, Context::default())
            .with_offset(4)
            .collect()
            .await;
        assert_eq!(atoms.len(), 2);
        assert!(atoms.iter().all(|a| a.as_ref().unwrap()[..] == [0xdb]));
    }

    #[tokio::test]
    async fn test_offset_past_end() {
        let reader: &[u8] = b"abc";
        let items: Vec<_> = extract_async(reader, Context::default())
            .with_offset(10)
            .collect()
            .await;
        assert!(matches!(
            items[..],
            [Err(StegError::ShortRead { got: 3, need: 10 })]
        ));
    }
}
