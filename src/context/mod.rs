//! Codec context.
//!
//! - [`AtomSize`] - Message unit size (1, 2 or 3 bytes)
//! - [`PaddingPolicy`] - What to do with a final partial atom
//! - [`Context`] - Immutable configuration and factory for every other type
//!
//! # Example
//!
//! ```
//! use stegrs::{Context, PaddingPolicy};
//!
//! let ctx = Context::new(2)?;
//! assert_eq!(ctx.chunk_size(), 8 * 1024);
//!
//! let strict = Context::new(1)?.with_padding_policy(PaddingPolicy::Strict);
//! assert_eq!(strict.padding_policy(), PaddingPolicy::Strict);
//! # Ok::<(), stegrs::StegError>(())
//! ```

use std::io::{Read, Write};

use crate::error::{Result, StegError};
use crate::stream::{Embedder, Extractor, Multiplexer};
use crate::unit::{Atom, Chunk};

/// Smallest supported atom size in bytes.
pub const MIN_ATOM_SIZE: u8 = 1;

/// Largest supported atom size in bytes.
///
/// A 4-byte atom would need a 512 MiB chunk and 32-bit bit addresses into it.
pub const MAX_ATOM_SIZE: u8 = 3;

/// Number of message bytes read or written per step.
///
/// | atom size | chunk size |
/// |-----------|------------|
/// | 1 B       | 32 B       |
/// | 2 B       | 8 KiB      |
/// | 3 B       | 2 MiB      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AtomSize {
    /// One byte per 32-byte chunk.
    #[default]
    One = 1,
    /// Two bytes per 8 KiB chunk.
    Two = 2,
    /// Three bytes per 2 MiB chunk.
    Three = 3,
}

impl AtomSize {
    /// Atom size in bytes.
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Atom size in bits, `n`.
    pub const fn bits(self) -> u32 {
        self as u32 * 8
    }

    /// Chunk size in bytes, `2^n / 8`.
    pub const fn chunk_size(self) -> usize {
        1 << (self.bits() - 3)
    }

    /// Chunk size in bits, `2^n`.
    pub const fn chunk_bits(self) -> usize {
        1 << self.bits()
    }
}

impl TryFrom<u8> for AtomSize {
    type Error = StegError;

    fn try_from(size: u8) -> Result<Self> {
        match size {
            1 => Ok(AtomSize::One),
            2 => Ok(AtomSize::Two),
            3 => Ok(AtomSize::Three),
            _ => Err(StegError::InvalidAtomSize { size }),
        }
    }
}

/// Returns the chunk size in bytes for an atom size.
pub const fn chunk_size(atom_size: AtomSize) -> usize {
    atom_size.chunk_size()
}

/// How a [`Multiplexer`] handles a message whose length is not a multiple
/// of the atom size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaddingPolicy {
    /// Zero-fill the final partial atom before embedding it.
    #[default]
    Pad,
    /// Fail with [`StegError::InsufficientData`] instead of embedding it.
    Strict,
}

/// Immutable codec configuration.
///
/// `Context` fixes the atom size (and so the chunk size) for an operation.
/// It is `Copy`; every reader, writer and multiplexer holds its own copy.
///
/// # Example
///
/// ```
/// use stegrs::Context;
///
/// let ctx = Context::new(1)?;
/// assert_eq!(ctx.atom_size(), 1);
/// assert_eq!(ctx.chunk_size(), 32);
/// assert_eq!(ctx.capacity(100), 3);
///
/// assert!(Context::new(4).is_err());
/// # Ok::<(), stegrs::StegError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Context {
    atom_size: AtomSize,
    padding: PaddingPolicy,
}

impl Context {
    /// Creates a context for the given atom size in bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StegError::InvalidAtomSize`] unless `atom_size` is 1, 2 or 3.
    pub fn new(atom_size: u8) -> Result<Self> {
        Ok(Self::with_atom_size(AtomSize::try_from(atom_size)?))
    }

    /// Creates a context from an already validated [`AtomSize`].
    pub const fn with_atom_size(atom_size: AtomSize) -> Self {
        Self {
            atom_size,
            padding: PaddingPolicy::Pad,
        }
    }

    /// Sets the final partial atom policy.
    pub fn with_padding_policy(mut self, policy: PaddingPolicy) -> Self {
        self.padding = policy;
        self
    }

    /// Returns the atom size in bytes.
    pub fn atom_size(&self) -> usize {
        self.atom_size.bytes()
    }

    /// Returns the atom size as an [`AtomSize`].
    pub fn atom(&self) -> AtomSize {
        self.atom_size
    }

    /// Returns the number of message bits per atom.
    pub fn atom_bits(&self) -> u32 {
        self.atom_size.bits()
    }

    /// Returns the chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.atom_size.chunk_size()
    }

    /// Returns the final partial atom policy.
    pub fn padding_policy(&self) -> PaddingPolicy {
        self.padding
    }

    /// Returns the largest message, in bytes, a carrier of `carrier_size`
    /// bytes can hold.
    pub fn capacity(&self, carrier_size: u64) -> u64 {
        carrier_size / self.chunk_size() as u64 * self.atom_size() as u64
    }

    /// Fails fast when a message cannot fit in a carrier.
    ///
    /// # Errors
    ///
    /// Returns [`StegError::CapacityExceeded`] if `message_size` is larger
    /// than [`Context::capacity`] of `carrier_size`.
    pub fn check_capacity(&self, carrier_size: u64, message_size: u64) -> Result<()> {
        let capacity = self.capacity(carrier_size);
        if message_size > capacity {
            tracing::debug!(
                carrier_size,
                message_size,
                capacity,
                "message does not fit in carrier"
            );
            return Err(StegError::CapacityExceeded {
                message: message_size,
                capacity,
            });
        }
        Ok(())
    }

    /// Returns a zeroed atom buffer.
    pub fn new_atom(&self) -> Atom {
        Atom::new(self.atom_size)
    }

    /// Returns a zeroed chunk buffer.
    pub fn new_chunk(&self) -> Chunk {
        Chunk::new(self.atom_size)
    }

    /// Creates an [`Extractor`] reading carrier chunks from `reader`.
    pub fn extractor<R: Read>(&self, reader: R) -> Extractor<R> {
        Extractor::new(reader, *self)
    }

    /// Creates an [`Embedder`] that encodes `carrier` chunks into `dst`.
    pub fn embedder<W: Write, C: Read>(&self, dst: W, carrier: C) -> Embedder<W, C> {
        Embedder::new(dst, carrier, *self)
    }

    /// Creates a [`Multiplexer`] that embeds all of `message` into `carrier`,
    /// writing the result to `dst`.
    pub fn multiplexer<W: Write, C: Read, M: Read>(
        &self,
        dst: W,
        carrier: C,
        message: M,
    ) -> Multiplexer<W, C, M> {
        Multiplexer::new(dst, carrier, message, *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = Context::default();
        assert_eq!(ctx.atom_size(), 1);
        assert_eq!(ctx.chunk_size(), 32);
        assert_eq!(ctx.padding_policy(), PaddingPolicy::Pad);
    }

    #[test]
    fn test_chunk_sizes() {
        assert_eq!(Context::new(1).unwrap().chunk_size(), 32);
        assert_eq!(Context::new(2).unwrap().chunk_size(), 8 * 1024);
        assert_eq!(Context::new(3).unwrap().chunk_size(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_chunk_bits_match_atom_bits() {
        for size in MIN_ATOM_SIZE..=MAX_ATOM_SIZE {
            let atom = AtomSize::try_from(size).unwrap();
            assert_eq!(atom.chunk_bits(), 1usize << atom.bits());
            assert_eq!(atom.chunk_bits(), atom.chunk_size() * 8);
            assert_eq!(chunk_size(atom), atom.chunk_size());
        }
    }

    #[test]
    fn test_invalid_atom_size() {
        assert!(matches!(
            Context::new(0),
            Err(StegError::InvalidAtomSize { size: 0 })
        ));
        assert!(matches!(
            Context::new(4),
            Err(StegError::InvalidAtomSize { size: 4 })
        ));
    }

    #[test]
    fn test_capacity() {
        let ctx = Context::new(2).unwrap();
        assert_eq!(ctx.capacity(0), 0);
        assert_eq!(ctx.capacity(8191), 0);
        assert_eq!(ctx.capacity(8192), 2);
        assert_eq!(ctx.capacity(3 * 8192 + 17), 6);
    }

    #[test]
    fn test_check_capacity() {
        let ctx = Context::new(2).unwrap();
        assert!(ctx.check_capacity(8192, 2).is_ok());
        assert!(matches!(
            ctx.check_capacity(8192, 4),
            Err(StegError::CapacityExceeded {
                message: 4,
                capacity: 2
            })
        ));
    }

    #[test]
    fn test_factories() {
        let ctx = Context::new(3).unwrap();
        assert_eq!(ctx.new_atom().as_bytes().len(), 3);
        assert_eq!(ctx.new_chunk().len(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_builder() {
        let ctx = Context::new(1)
            .unwrap()
            .with_padding_policy(PaddingPolicy::Strict);
        assert_eq!(ctx.padding_policy(), PaddingPolicy::Strict);
        assert_eq!(ctx.atom(), AtomSize::One);
    }
}
