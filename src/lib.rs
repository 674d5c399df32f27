//! stegrs
//!
//! Streaming single-bit-flip steganography for Rust.
//!
//! `stegrs` treats any byte stream as a carrier cut into fixed-size chunks.
//! Every chunk already *decodes* to a small message unit, the atom, through
//! a parity projection over GF(2). Embedding a chosen atom into a chunk
//! never costs more than flipping one bit of it.
//!
//! | atom size | chunk size | embedding rate |
//! |-----------|------------|----------------|
//! | 1 byte    | 32 B       | 1 / 32         |
//! | 2 bytes   | 8 KiB      | 1 / 4096       |
//! | 3 bytes   | 2 MiB      | 1 / 699 051    |
//!
//! It is designed as a small, composable primitive:
//!
//! - [`codec`] - decode and encode single chunks
//! - [`Extractor`] / [`Embedder`] - stream atoms out of, or into, a carrier
//! - [`Multiplexer`] - embed a whole message, then copy the carrier through
//! - [`Framer`] / [`Unframer`] - optional length prefix
//! - [`EmbedJob`] / [`ExtractJob`] - offset, framing and capacity checks
//!
//! The crate intentionally:
//! - does NOT encrypt, compress or authenticate the message
//! - does NOT understand carrier file formats
//! - does NOT manage files or paths
//! - does NOT manage concurrency
//!
//! It only does one thing: **carrier in → message out** (and back).
//!
//! # Sync
//!
//! ```
//! use std::io::Read;
//! use stegrs::{Context, StegError};
//!
//! fn main() -> Result<(), StegError> {
//!     let ctx = Context::new(1)?;
//!     let carrier = vec![0x37u8; 32 * 16];
//!
//!     let mut muxed = Vec::new();
//!     stegrs::embed(ctx, &mut muxed, &carrier[..], &b"secret"[..])?;
//!     assert_eq!(muxed.len(), carrier.len());
//!
//!     let mut message = [0u8; 6];
//!     stegrs::extract(ctx, &muxed[..]).read_exact(&mut message)?;
//!     assert_eq!(&message, b"secret");
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
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
//!         println!("atom {:02x?}", &atom[..]);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;

mod context;
mod error;
mod frame;
mod job;
mod stream;
mod unit;

mod util; // internal read helpers

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use context::{AtomSize, Context, MAX_ATOM_SIZE, MIN_ATOM_SIZE, PaddingPolicy, chunk_size};
pub use error::{Result, StegError};
pub use frame::{FRAME_HEADER_SIZE, Framer, Unframer};
pub use job::{EmbedJob, ExtractJob, embed, extract};
pub use stream::{AtomIter, Embedder, Extractor, MuxSummary, Multiplexer};
pub use unit::{Atom, Chunk};

#[cfg(feature = "async-io")]
pub use async_stream::{AtomStream, extract_async};
