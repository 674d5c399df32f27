//! Parity decoder.
//!
//! # Bit selection
//!
//! Atom bit `i` is the XOR of all chunk bits `j` where bit `i` of `j` is set.
//! Splitting `j` into a byte index and a bit-in-byte index gives two cases:
//!
//! - `i < 3`: the selection lives inside every byte. The in-byte masks are
//!   `0xAA`, `0xCC` and `0xF0`; atom bit `i` is the parity of the masked bits
//!   summed over all chunk bytes.
//! - `i >= 3`: the selection picks whole bytes. Byte `j` is selected when
//!   `j % 2^(i-2) >= 2^(i-3)`, and atom bit `i` is the parity of the XOR of
//!   all selected bytes.
//!
//! [`decode_bit`] evaluates one bit exactly like that. [`decode`] folds all of
//! them into a single pass: each byte contributes its in-byte parities to the
//! low three bits, and when its own parity is odd it toggles every high bit
//! whose selection contains it, which is `byte_index << 3`.

use crate::unit::{Atom, Chunk};

/// In-byte selection masks for atom bits 0, 1 and 2.
const LOW_BIT_MASKS: [u8; 3] = [0xAA, 0xCC, 0xF0];

/// Per-byte decode contribution, computed at compile time.
///
/// Low three bits hold the in-byte mask parities, bit 3 holds the parity of
/// the whole byte.
const fn byte_signatures() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut b = 0usize;
    while b < 256 {
        let byte = b as u8;
        let mut sig = 0u8;
        let mut i = 0;
        while i < 3 {
            sig |= ((byte & LOW_BIT_MASKS[i]).count_ones() as u8 & 1) << i;
            i += 1;
        }
        sig |= (byte.count_ones() as u8 & 1) << 3;
        table[b] = sig;
        b += 1;
    }
    table
}

static SIGNATURES: [u8; 256] = byte_signatures();

/// Returns the in-byte mask for atom bit `bit`, which must be below 3.
pub(crate) const fn low_bit_mask(bit: u32) -> u8 {
    LOW_BIT_MASKS[bit as usize]
}

/// Returns whether chunk byte `byte_index` is selected for atom bit `bit`
/// (`bit >= 3`).
pub(crate) const fn byte_selected(bit: u32, byte_index: usize) -> bool {
    let period = 1usize << (bit - 2);
    let half = 1usize << (bit - 3);
    byte_index % period >= half
}

/// Decodes a chunk into the atom it carries.
///
/// # Example
///
/// ```
/// use stegrs::{codec, AtomSize, Chunk};
///
/// let chunk = Chunk::from_slice(AtomSize::One, b"hello, there, how are you? fine.").unwrap();
/// assert_eq!(codec::decode(&chunk).value(), 0xdb);
/// ```
pub fn decode(chunk: &Chunk) -> Atom {
    let mut atom = Atom::new(chunk.atom_size());
    decode_into(chunk, &mut atom);
    atom
}

/// Decodes a chunk into an existing atom buffer.
///
/// # Panics
///
/// Panics if `atom` was built for a different atom size than `chunk`.
pub fn decode_into(chunk: &Chunk, atom: &mut Atom) {
    assert_eq!(chunk.atom_size(), atom.size(), "chunk and atom sizes differ");

    let mut acc = 0u32;
    for (j, &byte) in chunk.as_bytes().iter().enumerate() {
        let sig = SIGNATURES[byte as usize];
        acc ^= u32::from(sig & 0b111);
        if sig & 0b1000 != 0 {
            acc ^= (j as u32) << 3;
        }
    }
    atom.set_value(acc);
}

/// Decodes a single atom bit from its selection masks.
///
/// Returns 0 or 1.
///
/// # Panics
///
/// Panics if `bit` is not below the atom bit width.
pub fn decode_bit(chunk: &Chunk, bit: u32) -> u8 {
    assert!(bit < chunk.atom_size().bits(), "atom bit {bit} out of range");

    let bytes = chunk.as_bytes();
    if bit < 3 {
        let mask = low_bit_mask(bit);
        let ones: u32 = bytes.iter().map(|&b| (b & mask).count_ones()).sum();
        return (ones & 1) as u8;
    }

    let folded = bytes
        .iter()
        .enumerate()
        .filter(|&(j, _)| byte_selected(bit, j))
        .fold(0u8, |acc, (_, &b)| acc ^ b);
    (folded.count_ones() & 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AtomSize;

    const HELLO: &[u8; 32] = b"hello, there, how are you? fine.";

    fn decode_by_bits(chunk: &Chunk) -> u32 {
        (0..chunk.atom_size().bits()).fold(0, |acc, i| acc | u32::from(decode_bit(chunk, i)) << i)
    }

    #[test]
    fn test_hello_chunk() {
        let chunk = Chunk::from_slice(AtomSize::One, HELLO).unwrap();
        assert_eq!(decode(&chunk).value(), 0xdb);
        assert_eq!(decode_by_bits(&chunk), 0xdb);
    }

    #[test]
    fn test_zero_chunk() {
        for size in [AtomSize::One, AtomSize::Two] {
            assert_eq!(decode(&Chunk::new(size)).value(), 0);
        }
    }

    #[test]
    fn test_uniform_chunks_decode_to_zero() {
        // Every selection covers an even number of identical bytes.
        for byte in [0xff, 0xaa, 0x01] {
            let chunk = Chunk::from_slice(AtomSize::One, &[byte; 32]).unwrap();
            assert_eq!(decode(&chunk).value(), 0);
        }
    }

    #[test]
    fn test_single_bit_decodes_to_its_index() {
        let mut chunk = Chunk::new(AtomSize::Two);
        for index in [0u32, 1, 7, 8, 255, 4097, 65535] {
            chunk.flip_bit(index);
            assert_eq!(decode(&chunk).value(), index);
            chunk.flip_bit(index);
        }
    }

    #[test]
    fn test_selection_masks_match_fast_path() {
        let data: Vec<u8> = (0..8192u32).map(|i| (i.wrapping_mul(2654435761) >> 13) as u8).collect();
        let chunk = Chunk::from_slice(AtomSize::Two, &data).unwrap();
        assert_eq!(decode(&chunk).value(), decode_by_bits(&chunk));
    }

    #[test]
    fn test_byte_selection_is_index_bit() {
        for bit in 3..24 {
            for j in [0usize, 1, 2, 3, 5, 8, 100, 8191, 65535] {
                assert_eq!(byte_selected(bit, j), (j >> (bit - 3)) & 1 == 1);
            }
        }
    }

    #[test]
    fn test_signature_table() {
        assert_eq!(SIGNATURES[0], 0);
        // Bit 7 alone: index 7 = 0b111, odd parity.
        assert_eq!(SIGNATURES[0x80], 0b1111);
        // Bits 1 and 2: indices 1 ^ 2 = 3, even parity.
        assert_eq!(SIGNATURES[0b110], 0b0011);
    }

    #[test]
    #[should_panic(expected = "chunk and atom sizes differ")]
    fn test_decode_into_rejects_mismatched_atom() {
        let chunk = Chunk::new(AtomSize::Two);
        let mut atom = Atom::new(AtomSize::One);
        decode_into(&chunk, &mut atom);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_decode_bit_out_of_range() {
        decode_bit(&Chunk::new(AtomSize::One), 8);
    }
}
