//! Streaming codec over blocking byte streams.
//!
//! - [`Extractor`] - Decodes carrier chunks into a continuous message stream
//! - [`AtomIter`] - Iterator over whole decoded atoms
//! - [`Embedder`] - Encodes message atoms into carrier chunks
//! - [`Multiplexer`] - Embeds an entire message, then passes the rest of the carrier through

mod embed;
mod extract;
mod mux;

pub use embed::Embedder;
pub use extract::{AtomIter, Extractor};
pub use mux::{MuxSummary, Multiplexer};
