//! Unit buffers.
//!
//! - [`Atom`] - One unit of message data (1 to 3 bytes)
//! - [`Chunk`] - One unit of carrier data, encoding exactly one atom

mod atom;
mod chunk;

pub use atom::Atom;
pub use chunk::Chunk;
