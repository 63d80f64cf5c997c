//! Accumulator for not-yet-processed input bytes.

use bytes::{Bytes, BytesMut};

/// Holds at most one block's worth of unprocessed input between calls.
///
/// The engine drains completed blocks immediately after each feed, so the
/// accumulator holds strictly fewer than `block_size` bytes whenever control
/// returns to the caller. That invariant is what lets required output sizes
/// be computed in closed form before any buffer is touched.
#[derive(Debug)]
pub(crate) struct BlockAccumulator {
    block_size: usize,
    buf: BytesMut,
}

impl BlockAccumulator {
    pub(crate) fn new(block_size: usize) -> Self {
        Self {
            block_size,
            buf: BytesMut::with_capacity(block_size),
        }
    }

    /// Number of buffered bytes.
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of bytes needed to complete the current block.
    pub(crate) fn shortfall(&self) -> usize {
        self.block_size - self.buf.len()
    }

    /// Appends bytes to the accumulator.
    ///
    /// Callers drain completed blocks with [`BlockAccumulator::take_block`]
    /// before feeding again, so the buffer never grows past `2 * block_size - 1`.
    pub(crate) fn feed(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Takes one whole block off the front, or `None` if fewer than
    /// `block_size` bytes are buffered.
    ///
    /// Looping until `None` drains every completed block in input order.
    pub(crate) fn take_block(&mut self) -> Option<Bytes> {
        if self.buf.len() < self.block_size {
            return None;
        }
        Some(self.buf.split_to(self.block_size).freeze())
    }

    /// Takes the trailing partial block (possibly empty), leaving the
    /// accumulator empty. Used by finalize-time tail handling.
    pub(crate) fn take_tail(&mut self) -> Bytes {
        self.buf.split().freeze()
    }
}
