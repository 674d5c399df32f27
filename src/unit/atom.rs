//! The Atom type - one unit of message data.

use std::fmt;
use std::ops::{BitXor, BitXorAssign};

use crate::context::{AtomSize, MAX_ATOM_SIZE};

/// A fixed-size unit of message data.
///
/// An atom holds `atom_size` bytes. For arithmetic it is read as an
/// unsigned little-endian integer of `atom_size * 8` bits, the same order
/// the encoder uses to address a carrier bit.
///
/// # Example
///
/// ```
/// use stegrs::{Atom, AtomSize};
///
/// let atom = Atom::from_bytes(AtomSize::Two, &[0x34, 0x12]).unwrap();
/// assert_eq!(atom.value(), 0x1234);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Atom {
    buf: [u8; MAX_ATOM_SIZE as usize],
    size: AtomSize,
}

impl Atom {
    /// Creates a zeroed atom.
    pub const fn new(size: AtomSize) -> Self {
        Self {
            buf: [0; MAX_ATOM_SIZE as usize],
            size,
        }
    }

    /// Creates an atom from exactly `size.bytes()` bytes.
    ///
    /// Returns `None` if the slice has the wrong length.
    pub fn from_bytes(size: AtomSize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != size.bytes() {
            return None;
        }
        let mut atom = Self::new(size);
        atom.buf[..bytes.len()].copy_from_slice(bytes);
        Some(atom)
    }

    /// Creates an atom from the low `size.bits()` bits of `value`.
    pub fn from_value(size: AtomSize, value: u32) -> Self {
        let mut atom = Self::new(size);
        atom.set_value(value);
        atom
    }

    /// Returns the atom size.
    pub fn size(&self) -> AtomSize {
        self.size
    }

    /// Returns the atom bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.size.bytes()]
    }

    /// Returns the atom bytes mutably.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf[..self.size.bytes()]
    }

    /// Returns the little-endian integer value.
    pub fn value(&self) -> u32 {
        self.as_bytes()
            .iter()
            .rev()
            .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
    }

    /// Overwrites the atom with the low bits of `value`, little-endian.
    pub fn set_value(&mut self, value: u32) {
        let le = value.to_le_bytes();
        let n = self.size.bytes();
        self.buf[..n].copy_from_slice(&le[..n]);
    }
}

/// # Panics
///
/// Panics if the atoms have different sizes.
impl BitXorAssign<&Atom> for Atom {
    fn bitxor_assign(&mut self, rhs: &Atom) {
        assert_eq!(self.size, rhs.size, "atom sizes differ");
        for (a, b) in self.buf.iter_mut().zip(rhs.buf.iter()) {
            *a ^= b;
        }
    }
}

impl BitXor for Atom {
    type Output = Atom;

    fn bitxor(mut self, rhs: Atom) -> Atom {
        self ^= &rhs;
        self
    }
}

impl AsRef<[u8]> for Atom {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Atom({:#0width$x})", self.value(), width = 2 + 2 * self.size.bytes())
    }
}
