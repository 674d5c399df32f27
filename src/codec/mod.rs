//! Single-bit-flip codec.
//!
//! A chunk of `2^n` carrier bits carries `n` message bits. Atom bit `i` is
//! the parity of every chunk bit whose own index has bit `i` set. Because
//! that read-out is linear over GF(2), flipping chunk bit `d` flips exactly
//! the atom bits set in `d`, so any atom can be written by flipping the one
//! bit addressed by `decode(chunk) ^ desired`.
//!
//! - [`decode`] - Chunk to atom
//! - [`decode_bit`] - A single atom bit, computed from its selection masks
//! - [`encode`] - Rewrite a chunk to carry a given atom

mod decode;
mod encode;

pub use decode::{decode, decode_bit, decode_into};
pub use encode::encode;
