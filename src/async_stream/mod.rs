//! Async streaming support for extraction.
//!
//! This module decodes carriers from any `futures-io::AsyncRead`, making it
//! runtime-agnostic and compatible with tokio, async-std, smol, and other
//! async runtimes.
//!
//! - [`extract_async`] - Creates an async stream of atoms from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{AtomStream, extract_async};
