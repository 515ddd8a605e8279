//! Incremental framing for byte streams.
//!
//! `framebuf` is the per-connection receive buffer of an event-driven network
//! stack. Raw reads are fed in as they arrive; complete frames come out as soon
//! as the armed [`Terminator`] recognises one:
//!
//! - a byte pattern such as `\r\n` (the frame includes the pattern),
//! - a fixed number of bytes,
//! - or whatever happens to be buffered.
//!
//! Terminators are one-shot. After each frame the caller decides how the next
//! one ends, which is how mixed protocols (header lines followed by a sized
//! body) are read.
//!
//! ```rust
//! use framebuf::{Framer, TermSpec};
//!
//! let mut framer = Framer::new(1024)?;
//!
//! framer.set_term(b"\r\n")?;
//! let head = framer.feed(b"Content-Length: 5\r\nhel")?.unwrap();
//! assert_eq!(head, b"Content-Length: 5\r\n");
//!
//! framer.set_term(5_usize)?;
//! assert_eq!(framer.check(), None);
//! let body = framer.feed(b"lo!")?.unwrap();
//! assert_eq!(body, b"hello");
//!
//! framer.set_term(TermSpec::Any)?;
//! assert_eq!(framer.check().unwrap(), b"!");
//! # Ok::<(), framebuf::FramerError>(())
//! ```
//!
//! A `Framer` is owned by exactly one connection driver; every mutating call
//! takes `&mut self` and completes without blocking.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod chunk_utils;
mod error;
mod frame;
mod framer;
mod options;
mod store;
mod terminator;

#[cfg(test)]
mod tests;

pub use error::{FramerError, InvalidTerminator};
pub use frame::Frame;
pub use framer::Framer;
pub use options::{DEFAULT_CAPACITY, FramerOptions};
pub use terminator::{CRLF, MAX_PATTERN_LEN, Pattern, TermSpec, Terminator};
