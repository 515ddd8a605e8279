//! The framing engine.
//!
//! Overview
//! - A [`Framer`] pairs one byte store with one terminator. Bytes go in via
//!   [`Framer::feed`]; complete frames come out of `feed` itself, of
//!   [`Framer::check`], or unconditionally of [`Framer::pop`].
//! - Every extraction copies the frame out of the store. Returned frames own
//!   their bytes and never alias the buffer.
//!
//! One-shot terminators
//! - A successful match resets the terminator to [`Terminator::Unset`]. The
//!   caller re-arms it before the next frame, typically choosing a different
//!   rule (a header line, then a fixed-length body, then another line).
//! - `feed` and `check` return at most one frame. With several frames already
//!   buffered, re-arm and call `check` until it returns `None`.
//!
//! Incremental search
//! - After an unsuccessful pattern search the framer remembers where the next
//!   search may start, so feeding a long frame a few bytes at a time does not
//!   rescan the whole buffer on every call. The offset is relative to the live
//!   region and is discarded whenever bytes are consumed or the terminator
//!   changes.

use core::fmt;

use bstr::ByteSlice;
use log::trace;

use crate::{
    error::FramerError,
    frame::Frame,
    options::FramerOptions,
    store::ByteStore,
    terminator::{Match, TermSpec, Terminator},
};

/// Incremental framing buffer for a single connection.
///
/// ```rust
/// use framebuf::Framer;
///
/// let mut framer = Framer::new(64)?;
/// framer.set_term(b"\r\n")?;
///
/// assert_eq!(framer.feed(b"GET / HT")?, None);
/// let line = framer.feed(b"TP/1.1\r\nHost: x")?.unwrap();
/// assert_eq!(line, b"GET / HTTP/1.1\r\n");
///
/// // The terminator was consumed by the match.
/// assert_eq!(framer.check(), None);
/// assert_eq!(framer.pop().unwrap(), b"Host: x");
/// # Ok::<(), framebuf::FramerError>(())
/// ```
pub struct Framer {
    store: ByteStore,
    term: Terminator,
    resume: usize,
}

impl Framer {
    /// Creates an empty framer with `initial_capacity` bytes preallocated.
    ///
    /// # Errors
    ///
    /// [`FramerError::AllocationFailure`] if the allocation cannot be made.
    pub fn new(initial_capacity: usize) -> Result<Self, FramerError> {
        Self::with_options(FramerOptions { initial_capacity })
    }

    /// Creates an empty framer from `options`.
    ///
    /// # Errors
    ///
    /// [`FramerError::AllocationFailure`] if the initial allocation cannot be
    /// made.
    pub fn with_options(options: FramerOptions) -> Result<Self, FramerError> {
        Ok(Self {
            store: ByteStore::with_capacity(options.initial_capacity)?,
            term: Terminator::Unset,
            resume: 0,
        })
    }

    /// Appends `bytes` and attempts to extract one frame.
    ///
    /// Equivalent to appending followed by [`Framer::check`].
    ///
    /// # Errors
    ///
    /// [`FramerError::AllocationFailure`] if the buffer had to grow and could
    /// not. The framer is unchanged in that case: `bytes` were not appended.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FramerError> {
        self.store.append(bytes)?;
        Ok(self.check())
    }

    /// Extracts the next frame if the armed terminator matches.
    ///
    /// On a match the frame bytes are consumed and the terminator is reset to
    /// [`Terminator::Unset`]. `None` means no complete frame is buffered yet
    /// (or no terminator is armed), which is the normal state between reads.
    pub fn check(&mut self) -> Option<Frame> {
        match self.term.find(self.store.live(), self.resume) {
            Match::Complete(len) => {
                let frame = Frame::from(self.store.take(len));
                trace!(
                    "extracted {len}-byte frame with {:?}, {} bytes left",
                    self.term,
                    self.store.len()
                );
                self.term = Terminator::Unset;
                self.resume = 0;
                Some(frame)
            }
            Match::Partial { resume } => {
                self.resume = resume;
                None
            }
            Match::Never => None,
        }
    }

    /// Validates `spec` and arms it, replacing any pending terminator.
    ///
    /// # Errors
    ///
    /// [`FramerError::InvalidTerminator`] for an empty or over-long pattern or
    /// a negative length. The previously armed terminator stays in place.
    pub fn set_term<'a>(&mut self, spec: impl Into<TermSpec<'a>>) -> Result<(), FramerError> {
        let term = Terminator::try_from(spec.into())?;
        self.arm(term);
        Ok(())
    }

    /// Arms an already validated terminator, replacing any pending one.
    pub fn arm(&mut self, term: Terminator) {
        trace!("arming {term:?}");
        self.term = term;
        self.resume = 0;
    }

    /// Disarms the terminator. Buffered bytes are kept.
    pub fn clear_term(&mut self) {
        self.arm(Terminator::Unset);
    }

    /// Drains every buffered byte regardless of the terminator, which is left
    /// as it was. Returns `None` when nothing is buffered.
    pub fn pop(&mut self) -> Option<Frame> {
        if self.store.is_empty() {
            return None;
        }
        let frame = Frame::from(self.store.take(self.store.len()));
        trace!("popped {} bytes", frame.len());
        self.resume = 0;
        Some(frame)
    }

    /// Discards all buffered bytes and disarms the terminator. Capacity is
    /// kept for reuse.
    pub fn reset(&mut self) {
        self.store.clear();
        self.term = Terminator::Unset;
        self.resume = 0;
    }

    /// The currently armed terminator.
    #[must_use]
    pub fn terminator(&self) -> &Terminator {
        &self.term
    }

    /// Read-only view of the buffered bytes.
    #[must_use]
    pub fn buffered(&self) -> &[u8] {
        self.store.live()
    }

    /// `len` buffered bytes starting `offset` bytes into the buffer, or `None`
    /// if that range is not fully buffered.
    #[must_use]
    pub fn peek(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.store.peek(offset, len)
    }

    /// Number of buffered bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bytes currently allocated for buffering.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }
}

impl fmt::Debug for Framer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framer")
            .field("buffered", &self.store.live().as_bstr())
            .field("terminator", &self.term)
            .field("capacity", &self.store.capacity())
            .finish()
    }
}

impl fmt::Display for Framer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Framer({:?})", self.store.live().as_bstr())
    }
}
