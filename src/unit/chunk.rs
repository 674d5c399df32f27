//! The Chunk type - one unit of carrier data.

use std::fmt;
use std::ops::BitXorAssign;

use bytes::{Bytes, BytesMut};

use crate::context::AtomSize;

/// A fixed-size block of carrier data that encodes exactly one [`Atom`].
///
/// For the codec a chunk is a vector of `2^n` bits, `n` being the atom bit
/// width. Bit `j` is bit `j % 8` of byte `j / 8`.
///
/// [`Atom`]: crate::Atom
///
/// # Example
///
/// ```
/// use stegrs::{AtomSize, Chunk};
///
/// let mut chunk = Chunk::new(AtomSize::One);
/// chunk.flip_bit(9);
/// assert_eq!(chunk.as_bytes()[1], 0b10);
/// assert!(chunk.bit(9));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    data: BytesMut,
    size: AtomSize,
}

impl Chunk {
    /// Creates a zeroed chunk.
    pub fn new(size: AtomSize) -> Self {
        Self {
            data: BytesMut::zeroed(size.chunk_size()),
            size,
        }
    }

    /// Creates a chunk from exactly `size.chunk_size()` bytes.
    ///
    /// Returns `None` if the slice has the wrong length.
    pub fn from_slice(size: AtomSize, slice: &[u8]) -> Option<Self> {
        if slice.len() != size.chunk_size() {
            return None;
        }
        Some(Self {
            data: BytesMut::from(slice),
            size,
        })
    }

    /// Returns the atom size this chunk encodes.
    pub fn atom_size(&self) -> AtomSize {
        self.size
    }

    /// Returns the chunk length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk holds no bytes, which no constructor
    /// produces.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the chunk bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the chunk bytes mutably.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns chunk bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`AtomSize::chunk_bits`].
    pub fn bit(&self, index: u32) -> bool {
        let index = index as usize;
        self.data[index >> 3] & (1 << (index & 7)) != 0
    }

    /// Toggles chunk bit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`AtomSize::chunk_bits`].
    pub fn flip_bit(&mut self, index: u32) {
        let index = index as usize;
        self.data[index >> 3] ^= 1 << (index & 7);
    }

    /// Returns how many bits differ from `other`.
    pub fn bit_distance(&self, other: &Chunk) -> u32 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    /// Copies the chunk into an immutable [`Bytes`].
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }
}

/// # Panics
///
/// Panics if the chunks were built for different atom sizes.
impl BitXorAssign<&Chunk> for Chunk {
    fn bitxor_assign(&mut self, rhs: &Chunk) {
        assert_eq!(self.size, rhs.size, "chunk sizes differ");
        for (a, b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a ^= b;
        }
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("atom_size", &self.size)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        let chunk = Chunk::new(AtomSize::Two);
        assert_eq!(chunk.len(), 8192);
        assert!(chunk.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_slice() {
        assert!(Chunk::from_slice(AtomSize::One, &[0u8; 32]).is_some());
        assert!(Chunk::from_slice(AtomSize::One, &[0u8; 31]).is_none());
        assert!(Chunk::from_slice(AtomSize::One, &[0u8; 33]).is_none());
    }

    #[test]
    fn test_flip_bit() {
        let mut chunk = Chunk::new(AtomSize::One);
        chunk.flip_bit(255);
        assert_eq!(chunk.as_bytes()[31], 0x80);
        chunk.flip_bit(255);
        assert_eq!(chunk.as_bytes()[31], 0);
    }

    #[test]
    fn test_flip_high_bit_of_large_chunk() {
        let mut chunk = Chunk::new(AtomSize::Three);
        chunk.flip_bit((1 << 24) - 1);
        assert!(chunk.bit((1 << 24) - 1));
        assert_eq!(chunk.as_bytes()[chunk.len() - 1], 0x80);
    }

    #[test]
    fn test_bit_distance() {
        let a = Chunk::new(AtomSize::One);
        let mut b = a.clone();
        assert_eq!(a.bit_distance(&b), 0);
        b.flip_bit(3);
        b.flip_bit(100);
        assert_eq!(a.bit_distance(&b), 2);
    }

    #[test]
    fn test_xor_assign() {
        let mut a = Chunk::from_slice(AtomSize::One, &[0xf0; 32]).unwrap();
        let b = Chunk::from_slice(AtomSize::One, &[0xff; 32]).unwrap();
        a ^= &b;
        assert!(a.as_bytes().iter().all(|&x| x == 0x0f));
    }

    #[test]
    #[should_panic(expected = "chunk sizes differ")]
    fn test_xor_assign_mismatched_sizes() {
        let mut a = Chunk::new(AtomSize::One);
        a ^= &Chunk::new(AtomSize::Two);
    }

    #[test]
    #[should_panic]
    fn test_flip_bit_out_of_range() {
        Chunk::new(AtomSize::One).flip_bit(256);
    }
}
