//! Single-bit-flip encoder.

use crate::codec::decode;
use crate::unit::{Atom, Chunk};

/// Rewrites `chunk` in place so that it decodes to `desired`.
///
/// Exactly one chunk bit is flipped: bit `decode(chunk) ^ desired`, read as
/// a little-endian integer. When the chunk already carries `desired` that
/// address is bit 0, which no atom bit selects, so the flip leaves the
/// decoded value unchanged.
///
/// Returns the index of the flipped bit.
///
/// # Panics
///
/// Panics if `chunk` and `desired` were built for different atom sizes.
///
/// # Example
///
/// ```
/// use stegrs::{codec, Atom, AtomSize, Chunk};
///
/// let original = Chunk::new(AtomSize::One);
/// let mut chunk = original.clone();
///
/// codec::encode(&mut chunk, &Atom::from_value(AtomSize::One, 0x41));
///
/// assert_eq!(codec::decode(&chunk).value(), 0x41);
/// assert_eq!(chunk.bit_distance(&original), 1);
/// ```
pub fn encode(chunk: &mut Chunk, desired: &Atom) -> u32 {
    assert_eq!(
        chunk.atom_size(),
        desired.size(),
        "chunk and atom sizes differ"
    );

    let address = decode(chunk).value() ^ desired.value();
    chunk.flip_bit(address);
    address
}
