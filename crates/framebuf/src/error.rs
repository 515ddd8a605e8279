use alloc::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced by [`Framer`](crate::Framer) operations.
///
/// The absence of a frame is never an error: `check`, `feed` and `pop` report
/// it as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramerError {
    /// The backing store could not be grown to `requested` bytes. The buffer
    /// is left exactly as it was before the failing call.
    #[error("failed to grow frame buffer to {requested} bytes")]
    AllocationFailure {
        /// Capacity the store attempted to reach.
        requested: usize,
        /// Allocator error reported by `Vec::try_reserve_exact`.
        #[source]
        source: TryReserveError,
    },
    /// A terminator was rejected at `set_term` time.
    #[error("invalid terminator: {0}")]
    InvalidTerminator(#[from] InvalidTerminator),
}

/// Reasons a terminator value cannot be armed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTerminator {
    /// The byte pattern does not fit the inline pattern storage.
    #[error("pattern of {len} bytes exceeds the {max}-byte limit")]
    PatternTooLong {
        /// Length of the rejected pattern.
        len: usize,
        /// Maximum pattern length, [`MAX_PATTERN_LEN`](crate::MAX_PATTERN_LEN).
        max: usize,
    },
    /// A zero-length pattern would match before every byte.
    #[error("pattern must not be empty")]
    EmptyPattern,
    /// Fixed-length terminators count bytes and cannot be negative.
    #[error("frame length {0} is negative")]
    NegativeLength(i64),
}
