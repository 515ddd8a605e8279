//! Terminator rules and matching.
//!
//! A [`Terminator`] answers one question about the live region of the buffer:
//! does it start with a complete frame, and if so, how long is it?
//!
//! | Terminator      | Matches when                  | Frame length                 |
//! |-----------------|-------------------------------|------------------------------|
//! | `Unset`         | never                         |                              |
//! | `Pattern(p)`    | `p` occurs in the live region | first offset + `p.len()`     |
//! | `Length(n)`     | at least `n` bytes buffered   | `n`                          |
//! | `Any`           | at least one byte buffered    | everything buffered          |
//!
//! Patterns are binary safe: the search uses the stored pattern length and
//! never treats a zero byte as the end of the pattern.

use alloc::vec::Vec;
use core::fmt;

use bstr::ByteSlice;

use crate::error::InvalidTerminator;

/// Largest byte pattern a [`Terminator::Pattern`] can hold.
pub const MAX_PATTERN_LEN: usize = 32;

/// Carriage return + line feed, the delimiter of line-based protocols.
pub const CRLF: &[u8] = b"\r\n";

/// A non-empty byte pattern of at most [`MAX_PATTERN_LEN`] bytes, stored
/// inline.
#[derive(Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Pattern {
    bytes: [u8; MAX_PATTERN_LEN],
    len: u8,
}

impl Pattern {
    /// Copies `bytes` into inline storage.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTerminator::EmptyPattern`] for an empty slice and
    /// [`InvalidTerminator::PatternTooLong`] when `bytes` is longer than
    /// [`MAX_PATTERN_LEN`]. Nothing is ever truncated.
    #[expect(clippy::cast_possible_truncation)]
    pub fn new(bytes: &[u8]) -> Result<Self, InvalidTerminator> {
        if bytes.is_empty() {
            return Err(InvalidTerminator::EmptyPattern);
        }
        if bytes.len() > MAX_PATTERN_LEN {
            return Err(InvalidTerminator::PatternTooLong {
                len: bytes.len(),
                max: MAX_PATTERN_LEN,
            });
        }

        let mut storage = [0; MAX_PATTERN_LEN];
        storage[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: storage,
            len: bytes.len() as u8,
        })
    }

    /// The pattern bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// Pattern length in bytes, always in `1..=MAX_PATTERN_LEN`.
    #[must_use]
    #[expect(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }
}

const CRLF_PATTERN: Pattern = {
    let mut bytes = [0; MAX_PATTERN_LEN];
    bytes[0] = b'\r';
    bytes[1] = b'\n';
    Pattern { bytes, len: 2 }
};

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Pattern {}

impl core::hash::Hash for Pattern {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern")
            .field(&self.as_bytes().as_bstr())
            .finish()
    }
}

impl TryFrom<&[u8]> for Pattern {
    type Error = InvalidTerminator;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<Vec<u8>> for Pattern {
    type Error = InvalidTerminator;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(&bytes)
    }
}

impl From<Pattern> for Vec<u8> {
    fn from(pattern: Pattern) -> Self {
        pattern.as_bytes().to_vec()
    }
}

/// The rule deciding when buffered bytes form a complete frame.
///
/// Terminators are one-shot: a successful match resets the framer back to
/// [`Terminator::Unset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terminator {
    /// No rule armed; nothing matches.
    #[default]
    Unset,
    /// Frame ends with (and includes) the first occurrence of the pattern.
    Pattern(Pattern),
    /// Frame is exactly this many bytes.
    Length(usize),
    /// Frame is whatever is buffered, as long as it is non-empty.
    Any,
}

impl Terminator {
    /// Pattern terminator from raw bytes.
    ///
    /// # Errors
    ///
    /// See [`Pattern::new`].
    pub fn pattern(bytes: &[u8]) -> Result<Self, InvalidTerminator> {
        Pattern::new(bytes).map(Self::Pattern)
    }

    /// `\r\n` line terminator.
    #[must_use]
    pub fn crlf() -> Self {
        Self::Pattern(CRLF_PATTERN)
    }

    /// Whether a rule other than [`Terminator::Unset`] is installed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Length of the frame at the start of `live`, if one is complete.
    #[must_use]
    pub fn frame_len(&self, live: &[u8]) -> Option<usize> {
        match self.find(live, 0) {
            Match::Complete(len) => Some(len),
            Match::Partial { .. } | Match::Never => None,
        }
    }

    /// Match against `live`, skipping the first `from` bytes for pattern
    /// searches. `from` must come from a previous `Partial { resume }` on a
    /// prefix of the same live region, or be zero.
    pub(crate) fn find(&self, live: &[u8], from: usize) -> Match {
        match self {
            Self::Unset => Match::Never,
            Self::Pattern(pattern) => {
                let needle = pattern.as_bytes();
                let from = from.min(live.len());
                match live[from..].find(needle) {
                    Some(at) => Match::Complete(from + at + needle.len()),
                    None => Match::Partial {
                        // A match must start at or after this offset.
                        resume: live.len().saturating_sub(needle.len() - 1),
                    },
                }
            }
            Self::Length(n) if live.len() >= *n => Match::Complete(*n),
            Self::Any if !live.is_empty() => Match::Complete(live.len()),
            Self::Length(_) | Self::Any => Match::Partial { resume: 0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Match {
    /// A frame of this many bytes is ready.
    Complete(usize),
    /// Not yet; the next pattern search may start at `resume`.
    Partial { resume: usize },
    /// The terminator can never match.
    Never,
}

/// An unvalidated terminator value as supplied by a caller, before it has
/// been checked against the pattern and length constraints.
///
/// Conversions exist from byte strings (patterns) and integers (lengths) so
/// that [`Framer::set_term`](crate::Framer::set_term) reads naturally:
///
/// ```rust
/// # use framebuf::{Framer, TermSpec};
/// let mut framer = Framer::new(64)?;
/// framer.set_term(b"\r\n")?;
/// framer.set_term("\n")?;
/// framer.set_term(16_usize)?;
/// framer.set_term(TermSpec::Any)?;
/// # Ok::<(), framebuf::FramerError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSpec<'a> {
    /// Byte pattern; must be `1..=MAX_PATTERN_LEN` bytes long.
    Bytes(&'a [u8]),
    /// Fixed frame length; must not be negative.
    Length(i64),
    /// Accept whatever is buffered.
    Any,
}

impl<'a> From<&'a [u8]> for TermSpec<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for TermSpec<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for TermSpec<'a> {
    fn from(text: &'a str) -> Self {
        Self::Bytes(text.as_bytes())
    }
}

impl From<i64> for TermSpec<'_> {
    fn from(len: i64) -> Self {
        Self::Length(len)
    }
}

impl From<usize> for TermSpec<'_> {
    fn from(len: usize) -> Self {
        Self::Length(i64::try_from(len).unwrap_or(i64::MAX))
    }
}

impl TryFrom<TermSpec<'_>> for Terminator {
    type Error = InvalidTerminator;

    fn try_from(spec: TermSpec<'_>) -> Result<Self, Self::Error> {
        match spec {
            TermSpec::Bytes(bytes) => Self::pattern(bytes),
            TermSpec::Length(len) if len < 0 => Err(InvalidTerminator::NegativeLength(len)),
            TermSpec::Length(len) => Ok(Self::Length(usize::try_from(len).unwrap_or(usize::MAX))),
            TermSpec::Any => Ok(Self::Any),
        }
    }
}
