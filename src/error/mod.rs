//! Error types for stegrs.

use std::io;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StegError>;

/// Errors that can occur while embedding or extracting.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StegError {
    /// An I/O error occurred on a carrier, message, or destination stream.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The atom size is outside the supported range.
    #[error("invalid atom size: {size} (must be 1, 2 or 3)")]
    InvalidAtomSize {
        /// The rejected size.
        size: u8,
    },

    /// The source ended in the middle of a unit while extracting.
    ///
    /// This is the expected way for an unframed extraction to end.
    #[error("short read: got {got} of {need} bytes")]
    ShortRead {
        /// Bytes actually available.
        got: u64,
        /// Bytes required to complete the unit.
        need: u64,
    },

    /// The carrier ended in the middle of a chunk while embedding.
    #[error("short carrier: got {got} of {need} bytes after embedding {embedded} message bytes")]
    ShortCarrier {
        /// Message bytes fully embedded and written before the failure.
        embedded: u64,
        /// Carrier bytes actually available for the failed unit.
        got: u64,
        /// Carrier bytes required for the failed unit.
        need: u64,
    },

    /// The message length is not a multiple of the atom size.
    #[error("insufficient data: {len} bytes is not a multiple of atom size {atom_size}")]
    InsufficientData {
        /// Length of the offending message group.
        len: usize,
        /// The context atom size.
        atom_size: usize,
    },

    /// The message does not fit in the carrier.
    #[error("message size {message} exceeds carrier capacity {capacity}")]
    CapacityExceeded {
        /// Message size in bytes.
        message: u64,
        /// Carrier capacity in bytes.
        capacity: u64,
    },

    /// A length-prefix frame was malformed.
    #[error("frame error: {reason}")]
    Frame {
        /// What was wrong with the frame.
        reason: &'static str,
    },
}

impl StegError {
    /// Returns true for [`StegError::ShortRead`].
    pub fn is_short_read(&self) -> bool {
        matches!(self, StegError::ShortRead { .. })
    }

    /// Converts an I/O error, recovering a `StegError` that was carried
    /// through an [`io::Read`] adapter.
    pub fn from_io(e: io::Error) -> Self {
        if !e.get_ref().is_some_and(|inner| inner.is::<StegError>()) {
            return StegError::Io(e);
        }
        let kind = e.kind();
        match e.into_inner().map(|inner| inner.downcast::<StegError>()) {
            Some(Ok(steg)) => *steg,
            Some(Err(inner)) => StegError::Io(io::Error::new(kind, inner)),
            None => StegError::Io(kind.into()),
        }
    }
}

impl From<StegError> for io::Error {
    fn from(e: StegError) -> Self {
        match e {
            StegError::Io(e) => e,
            e @ (StegError::ShortRead { .. } | StegError::ShortCarrier { .. }) => {
                io::Error::new(io::ErrorKind::UnexpectedEof, e)
            }
            e => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: StegError = io_err.into();
        assert!(matches!(err, StegError::Io(_)));
    }

    #[test]
    fn test_display() {
        let err = StegError::CapacityExceeded {
            message: 4,
            capacity: 2,
        };
        assert_eq!(err.to_string(), "message size 4 exceeds carrier capacity 2");
    }

    #[test]
    fn test_short_read_into_io() {
        let err: io::Error = StegError::ShortRead { got: 3, need: 32 }.into();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let inner = err.into_inner().unwrap().downcast::<StegError>().unwrap();
        assert!(inner.is_short_read());
    }

    #[test]
    fn test_from_io_recovers_inner() {
        let err: io::Error = StegError::Frame { reason: "bad" }.into();
        assert!(matches!(
            StegError::from_io(err),
            StegError::Frame { reason: "bad" }
        ));

        let plain = io::Error::other("plain");
        assert!(matches!(StegError::from_io(plain), StegError::Io(_)));
    }

    #[test]
    fn test_io_round_trip_keeps_kind() {
        let err: io::Error = StegError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "x")).into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
