//! Helpers for replaying one logical byte stream as a sequence of reads.

use alloc::vec::Vec;

/// Split `payload` into `parts` chunks of approximately equal size.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Split `payload` at sizes derived from `seeds`: each seed picks a chunk of
/// `1 + seed % remaining` bytes. Whatever the seeds do not cover becomes the
/// final chunk.
///
/// The concatenation of the result is always `payload`, and no chunk is empty.
#[must_use]
pub fn split_at_seeds<'a>(payload: &'a [u8], seeds: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::with_capacity(seeds.len() + 1);
    let mut rest = payload;
    for &seed in seeds {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(1 + seed % rest.len());
        chunks.push(chunk);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}
