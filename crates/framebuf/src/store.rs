//! Contiguous byte storage with head/tail cursors.
//!
//! The store keeps every unconsumed byte in a single `Vec<u8>`:
//!
//! ```text
//!  0          head                 tail           capacity
//!  | consumed  |   live region      |  free space  |
//! ```
//!
//! - `tail` is the vector length; `head` is tracked separately so that
//!   consuming a frame is a cursor bump rather than a memmove.
//! - When the live region drains completely both cursors snap back to zero.
//! - When an append would run past the end of the allocation but the live
//!   bytes plus the new bytes still fit, the live region is moved to the front
//!   instead of growing.
//! - Otherwise capacity grows by `max(incoming, capacity)`, which keeps the
//!   amortised cost of a long feed sequence linear in the bytes fed.
//!
//! Growth goes through `try_reserve_exact`, so allocation failure is returned
//! to the caller with the store untouched. Capacity is never released while
//! the store is alive.

use alloc::vec::Vec;
use core::fmt;

use bstr::ByteSlice;
use log::debug;

use crate::error::FramerError;

pub(crate) struct ByteStore {
    data: Vec<u8>,
    head: usize,
}

impl ByteStore {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, FramerError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|source| FramerError::AllocationFailure {
                requested: capacity,
                source,
            })?;
        Ok(Self { data, head: 0 })
    }

    /// Number of live (unconsumed) bytes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len() - self.head
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Read-only view of the live region. Borrowing it blocks further
    /// mutation, so callers copy out whatever they need to keep.
    #[inline]
    pub(crate) fn live(&self) -> &[u8] {
        &self.data[self.head..]
    }

    pub(crate) fn peek(&self, offset: usize, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.live().get(offset..end)
    }

    pub(crate) fn append(&mut self, bytes: &[u8]) -> Result<(), FramerError> {
        if bytes.is_empty() {
            return Ok(());
        }

        let capacity = self.data.capacity();
        if self.data.len() + bytes.len() > capacity {
            if self.len() + bytes.len() <= capacity {
                self.compact();
            } else {
                self.grow(bytes.len())?;
            }
        }

        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Drop `n` bytes from the front of the live region.
    pub(crate) fn consume(&mut self, n: usize) {
        debug_assert!(n <= self.len(), "consume({n}) past {} live bytes", self.len());
        self.head += n.min(self.len());
        if self.head == self.data.len() {
            self.data.clear();
            self.head = 0;
        }
    }

    /// Copy the first `n` live bytes out and consume them.
    pub(crate) fn take(&mut self, n: usize) -> Vec<u8> {
        let n = n.min(self.len());
        let taken = self.live()[..n].to_vec();
        self.consume(n);
        taken
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
        self.head = 0;
    }

    fn compact(&mut self) {
        debug!(
            "compacting {} live bytes from offset {}",
            self.len(),
            self.head
        );
        self.data.drain(..self.head);
        self.head = 0;
    }

    fn grow(&mut self, incoming: usize) -> Result<(), FramerError> {
        let capacity = self.data.capacity();
        let requested = capacity.saturating_add(incoming.max(capacity));
        self.data
            .try_reserve_exact(requested - self.data.len())
            .map_err(|source| FramerError::AllocationFailure { requested, source })?;
        debug!(
            "grew frame buffer from {capacity} to {} bytes",
            self.data.capacity()
        );
        Ok(())
    }
}

impl fmt::Debug for ByteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStore")
            .field("live", &self.live().as_bstr())
            .field("head", &self.head)
            .field("tail", &self.data.len())
            .field("capacity", &self.data.capacity())
            .finish()
    }
}
