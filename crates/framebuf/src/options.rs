/// Default initial capacity of a [`Framer`](crate::Framer): one 16 KiB
/// socket read.
pub const DEFAULT_CAPACITY: usize = 16 * 1024;

/// Configuration options for a [`Framer`](crate::Framer).
///
/// ```rust
/// # use framebuf::{Framer, FramerOptions};
/// let framer = Framer::with_options(FramerOptions {
///     initial_capacity: 512,
/// })?;
/// assert_eq!(framer.capacity(), 512);
/// # Ok::<(), framebuf::FramerError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FramerOptions {
    /// Bytes allocated up front for buffered data.
    ///
    /// The buffer grows past this on demand and never shrinks below its high
    /// water mark, so sizing it to the typical frame avoids reallocation on
    /// steady traffic.
    ///
    /// # Default
    ///
    /// [`DEFAULT_CAPACITY`]
    pub initial_capacity: usize,
}

impl Default for FramerOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}
