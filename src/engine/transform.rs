//! Core transform engine - CipherEngine with streaming API.
//!
//! This module orchestrates the streaming transform: it drains the partial
//! block carried from previous calls, consumes whole blocks from the input
//! view, re-buffers the trailing partial block, invokes the injected
//! single-block cipher, and writes results to the output view.
//!
//! - [`CipherEngine`] - Stateful engine that processes streaming buffer views
//! - `update()` - Feed input in any chunking (1 byte, a block, megabytes)
//! - `finalize()` - Terminal call that flushes and optionally pads the tail

use crate::block::BlockAccumulator;
use crate::cipher::{BlockPadding, BlockTransform, Pkcs7};
use crate::config::EngineConfig;
use crate::error::CipherError;
use crate::view::ByteView;

use super::capacity::{Op, required_output_len};

/// A streaming engine that applies a single-block cipher to buffer views.
///
/// `CipherEngine` accepts input through [`ByteView`]s via `update()` and a
/// terminal `finalize()`, writing transformed blocks into a caller-supplied
/// output view. It carries partial-block state across calls, ensuring
/// bit-identical output regardless of input chunking or view storage.
///
/// # Streaming API
///
/// - Call `update()` zero or more times with input chunked any way at all
/// - Every call fully consumes its input view; a trailing partial block is
///   buffered internally, never written
/// - Call `finalize()` exactly once when the stream ends; afterwards the
///   engine is terminal and must be replaced for further work
///
/// # Determinism
///
/// Identical byte streams produce identical output, regardless of:
/// - How many bytes each `update()` call carries (1 byte vs 1 MB)
/// - The storage behind the views (heap, direct, read-only, offset slice)
/// - The number of `update()` calls
///
/// # Rejection before mutation
///
/// The bytes an operation will produce are computed in closed form up
/// front. If the output view cannot hold them, or the views are otherwise
/// unusable, the call fails with input, output, and buffered state all
/// unmodified, and can be retried as-is with a corrected output view.
///
/// # Concurrency
///
/// The engine has no internal concurrency and is not safe for concurrent
/// invocation; use one instance per logical stream. Views passed to a call
/// must not be mutated by anyone else during the call.
///
/// # Example
///
/// ```
/// use cipherbuf::{ByteView, CipherEngine, EngineConfig};
///
/// let shift = |input: &[u8], output: &mut [u8]| {
///     for (o, i) in output.iter_mut().zip(input) {
///         *o = i.wrapping_add(1);
///     }
/// };
/// let mut engine = CipherEngine::new(EngineConfig::new(4)?, shift)?;
///
/// let mut input = ByteView::copy_from_slice(&[0u8; 10]);
/// let mut output = ByteView::alloc(12);
///
/// // 10 bytes in: two whole blocks out, two bytes buffered
/// let n = engine.update(&mut input, &mut output)?;
/// assert_eq!(n, 8);
/// assert_eq!(engine.buffered_len(), 2);
///
/// // Finish the stream with two more bytes to complete the last block
/// let mut rest = ByteView::copy_from_slice(&[0u8; 2]);
/// let n = engine.finalize(&mut rest, &mut output)?;
/// assert_eq!(n, 4);
/// # Ok::<(), cipherbuf::CipherError>(())
/// ```
pub struct CipherEngine<T: BlockTransform> {
    config: EngineConfig,
    transform: T,
    padding: Option<Box<dyn BlockPadding>>,
    acc: BlockAccumulator,
    /// Reusable block-sized staging buffers, allocated once per instance.
    scratch_in: Vec<u8>,
    scratch_out: Vec<u8>,
    finalized: bool,
}

impl<T: BlockTransform> CipherEngine<T> {
    /// Creates a new engine with the given configuration and single-block
    /// transform.
    ///
    /// If the configuration enables padding, the shipped [`Pkcs7`]
    /// collaborator is used; inject a different scheme with
    /// [`CipherEngine::with_padder`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidConfig`] if the configuration does not
    /// pass [`EngineConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use cipherbuf::{CipherEngine, EngineConfig};
    ///
    /// let identity = |input: &[u8], output: &mut [u8]| output.copy_from_slice(input);
    /// let engine = CipherEngine::new(EngineConfig::default(), identity)?;
    /// assert_eq!(engine.block_size(), 16);
    /// # Ok::<(), cipherbuf::CipherError>(())
    /// ```
    pub fn new(config: EngineConfig, transform: T) -> Result<Self, CipherError> {
        config.validate()?;
        let block_size = config.block_size();
        let padding: Option<Box<dyn BlockPadding>> = if config.padding() {
            Some(Box::new(Pkcs7))
        } else {
            None
        };

        Ok(Self {
            config,
            transform,
            padding,
            acc: BlockAccumulator::new(block_size),
            scratch_in: vec![0u8; block_size],
            scratch_out: vec![0u8; block_size],
            finalized: false,
        })
    }

    /// Replaces the padding collaborator, enabling padding mode.
    ///
    /// # Example
    ///
    /// ```
    /// use cipherbuf::{CipherEngine, EngineConfig, Pkcs7};
    ///
    /// let identity = |input: &[u8], output: &mut [u8]| output.copy_from_slice(input);
    /// let engine = CipherEngine::new(EngineConfig::new(8)?, identity)?
    ///     .with_padder(Box::new(Pkcs7));
    /// assert!(engine.config().padding());
    /// # Ok::<(), cipherbuf::CipherError>(())
    /// ```
    pub fn with_padder(mut self, padder: Box<dyn BlockPadding>) -> Self {
        self.padding = Some(padder);
        self.config = self.config.with_padding(true);
        self
    }

    /// Transforms as much of `input` as forms whole blocks, writing the
    /// result to `output`, and buffers the trailing partial block.
    ///
    /// On success the input view is fully consumed (`input.remaining() == 0`)
    /// and the output position has advanced by exactly the returned count.
    ///
    /// # Errors
    ///
    /// All failures are reported before any view or buffered state is
    /// touched:
    ///
    /// - [`CipherError::EngineFinalized`] after `finalize` has completed
    /// - [`CipherError::ImmutableView`] if `output` is read-only
    /// - [`CipherError::OverlappingViews`] if the views share storage and
    ///   their windows overlap
    /// - [`CipherError::InsufficientCapacity`] if `output` cannot hold the
    ///   guaranteed output; supply a larger or repositioned output view and
    ///   retry the identical call
    pub fn update(
        &mut self,
        input: &mut ByteView,
        output: &mut ByteView,
    ) -> Result<usize, CipherError> {
        self.check_call(input, output)?;

        let required = required_output_len(
            self.acc.len(),
            input.remaining(),
            self.config.block_size(),
            Op::Update,
        )?;
        Self::check_capacity(required, output)?;

        let produced = self.drain_blocks(input, output)?;
        debug_assert_eq!(produced, required);
        debug_assert_eq!(input.remaining(), 0);
        debug_assert!(self.acc.len() < self.config.block_size());
        Ok(produced)
    }

    /// Terminal call: transforms all remaining whole blocks, applies
    /// mode-specific tail handling, and moves the engine to its finalized
    /// state.
    ///
    /// Without padding, the total processed length must be an exact
    /// multiple of the block size. With padding, the tail is padded to
    /// exactly one more full block by the padding collaborator.
    ///
    /// # Errors
    ///
    /// Everything listed for [`CipherEngine::update`], plus
    /// [`CipherError::IncompleteFinalBlock`] in no-padding mode when the
    /// total length is misaligned. All failures precede any mutation.
    pub fn finalize(
        &mut self,
        input: &mut ByteView,
        output: &mut ByteView,
    ) -> Result<usize, CipherError> {
        self.check_call(input, output)?;

        let op = if self.padding.is_some() {
            Op::FinalizePadded
        } else {
            Op::FinalizeUnpadded
        };
        let required = required_output_len(
            self.acc.len(),
            input.remaining(),
            self.config.block_size(),
            op,
        )?;
        Self::check_capacity(required, output)?;

        let mut produced = self.drain_blocks(input, output)?;

        if let Some(padder) = &self.padding {
            let tail = self.acc.take_tail();
            let padded = padder.pad(&tail, self.config.block_size());
            debug_assert_eq!(padded.len(), self.config.block_size());
            self.transform.transform_block(&padded, &mut self.scratch_out);
            output.write_bytes(&self.scratch_out)?;
            produced += self.config.block_size();
        } else {
            // The alignment check above guarantees an empty tail.
            debug_assert!(self.acc.is_empty());
        }

        self.finalized = true;
        debug_assert_eq!(produced, required);
        debug_assert_eq!(input.remaining(), 0);
        Ok(produced)
    }

    /// Returns the block size in bytes.
    pub fn block_size(&self) -> usize {
        self.config.block_size()
    }

    /// Returns the number of buffered bytes waiting for more input.
    ///
    /// Always strictly less than the block size; a completed block is
    /// transformed immediately, never held.
    pub fn buffered_len(&self) -> usize {
        self.acc.len()
    }

    /// Returns true once `finalize` has completed.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Returns the configuration used by this engine.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pre-mutation checks shared by `update` and `finalize`.
    fn check_call(&self, input: &ByteView, output: &ByteView) -> Result<(), CipherError> {
        if self.finalized {
            return Err(CipherError::EngineFinalized);
        }
        if output.is_read_only() {
            return Err(CipherError::ImmutableView);
        }
        if input.overlaps(output) {
            return Err(CipherError::OverlappingViews);
        }
        Ok(())
    }

    fn check_capacity(required: usize, output: &ByteView) -> Result<(), CipherError> {
        if output.remaining() < required {
            return Err(CipherError::InsufficientCapacity {
                required,
                available: output.remaining(),
            });
        }
        Ok(())
    }

    /// Consumes all of `input`: completes and transforms the buffered
    /// partial block, transforms whole blocks straight from the input, and
    /// re-buffers the trailing partial block.
    fn drain_blocks(
        &mut self,
        input: &mut ByteView,
        output: &mut ByteView,
    ) -> Result<usize, CipherError> {
        let block_size = self.config.block_size();
        let mut produced = 0;

        // Top up the buffered partial block first so output preserves
        // input order.
        if !self.acc.is_empty() {
            let take = self.acc.shortfall().min(input.remaining());
            if take > 0 {
                input.read_into(&mut self.scratch_in[..take])?;
                self.acc.feed(&self.scratch_in[..take]);
            }
            while let Some(block) = self.acc.take_block() {
                self.transform.transform_block(&block, &mut self.scratch_out);
                output.write_bytes(&self.scratch_out)?;
                produced += block_size;
            }
        }

        // Whole blocks straight from the input view, bypassing the
        // accumulator.
        while input.remaining() >= block_size {
            input.read_into(&mut self.scratch_in)?;
            self.transform
                .transform_block(&self.scratch_in, &mut self.scratch_out);
            output.write_bytes(&self.scratch_out)?;
            produced += block_size;
        }

        // Re-buffer the trailing partial block.
        let tail = input.remaining();
        if tail > 0 {
            input.read_into(&mut self.scratch_in[..tail])?;
            self.acc.feed(&self.scratch_in[..tail]);
        }

        Ok(produced)
    }
}

impl<T: BlockTransform> std::fmt::Debug for CipherEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherEngine")
            .field("config", &self.config)
            .field("buffered_len", &self.acc.len())
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(input: &[u8], output: &mut [u8]) {
        output.copy_from_slice(input);
    }

    fn engine(block_size: usize) -> CipherEngine<fn(&[u8], &mut [u8])> {
        let transform = identity as fn(&[u8], &mut [u8]);
        CipherEngine::new(EngineConfig::new(block_size).unwrap(), transform).unwrap()
    }

    #[test]
    fn test_fn_pointer_transform_fits_the_seam() {
        // A plain fn pointer is a valid transform, same as a closure.
        let mut eng: CipherEngine<fn(&[u8], &mut [u8])> =
            CipherEngine::new(EngineConfig::new(4).unwrap(), identity as fn(&[u8], &mut [u8]))
                .unwrap();

        let mut input = ByteView::copy_from_slice(b"1234");
        let mut output = ByteView::alloc(4);
        assert_eq!(eng.finalize(&mut input, &mut output).unwrap(), 4);

        output.flip();
        assert_eq!(output.to_vec(), b"1234");
    }

    #[test]
    fn test_update_buffers_partial_block() {
        let mut eng = engine(4);
        let mut input = ByteView::copy_from_slice(b"abcdef");
        let mut output = ByteView::alloc(8);

        let n = eng.update(&mut input, &mut output).unwrap();
        assert_eq!(n, 4);
        assert_eq!(input.remaining(), 0);
        assert_eq!(eng.buffered_len(), 2);

        output.flip();
        assert_eq!(output.to_vec(), b"abcd");
    }

    #[test]
    fn test_buffered_bytes_complete_next_block() {
        let mut eng = engine(4);
        let mut output = ByteView::alloc(8);

        let mut first = ByteView::copy_from_slice(b"ab");
        assert_eq!(eng.update(&mut first, &mut output).unwrap(), 0);
        assert_eq!(eng.buffered_len(), 2);

        let mut second = ByteView::copy_from_slice(b"cdef");
        assert_eq!(eng.update(&mut second, &mut output).unwrap(), 4);
        assert_eq!(eng.buffered_len(), 2);

        output.flip();
        assert_eq!(output.to_vec(), b"abcd");
    }

    #[test]
    fn test_finalize_is_terminal() {
        let mut eng = engine(4);
        let mut input = ByteView::copy_from_slice(b"wxyz");
        let mut output = ByteView::alloc(4);

        eng.finalize(&mut input, &mut output).unwrap();
        assert!(eng.is_finalized());

        let mut more = ByteView::copy_from_slice(b"wxyz");
        let err = eng.update(&mut more, &mut output).unwrap_err();
        assert_eq!(err, CipherError::EngineFinalized);
        let err = eng.finalize(&mut more, &mut output).unwrap_err();
        assert_eq!(err, CipherError::EngineFinalized);
        // The rejected input was not consumed
        assert_eq!(more.remaining(), 4);
    }

    #[test]
    fn test_finalize_unpadded_rejects_misaligned_total() {
        let mut eng = engine(4);
        let mut input = ByteView::copy_from_slice(b"abcde");
        let mut output = ByteView::alloc(8);

        let err = eng.finalize(&mut input, &mut output).unwrap_err();
        assert_eq!(
            err,
            CipherError::IncompleteFinalBlock {
                total_len: 5,
                block_size: 4,
            }
        );
        // Nothing was consumed or produced and the engine is still usable
        assert_eq!(input.remaining(), 5);
        assert_eq!(output.position(), 0);
        assert!(!eng.is_finalized());
    }

    #[test]
    fn test_finalize_padded_always_emits_padding_block() {
        let shift = |input: &[u8], output: &mut [u8]| {
            output.copy_from_slice(input);
        };
        let mut eng =
            CipherEngine::new(EngineConfig::new(4).unwrap().with_padding(true), shift).unwrap();
        let mut input = ByteView::copy_from_slice(b"abcd");
        let mut output = ByteView::alloc(8);

        let n = eng.finalize(&mut input, &mut output).unwrap();
        assert_eq!(n, 8);

        output.flip();
        // Empty tail pads to a whole block of the pad length
        assert_eq!(output.to_vec(), b"abcd\x04\x04\x04\x04");
    }

    #[test]
    fn test_update_rejects_read_only_output() {
        let mut eng = engine(4);
        let mut input = ByteView::copy_from_slice(b"abcd");
        let mut output = ByteView::alloc(4).as_read_only();

        let err = eng.update(&mut input, &mut output).unwrap_err();
        assert_eq!(err, CipherError::ImmutableView);
        assert_eq!(input.remaining(), 4);
    }

    #[test]
    fn test_update_rejects_overlapping_views() {
        let mut eng = engine(4);
        let storage = ByteView::alloc(16);
        let mut input = storage.slice();
        let mut output = storage.slice();
        input.set_limit(4).unwrap();

        let err = eng.update(&mut input, &mut output).unwrap_err();
        assert_eq!(err, CipherError::OverlappingViews);
        assert_eq!(input.remaining(), 4);
        assert_eq!(output.position(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = CipherEngine::new(EngineConfig::default().with_block_size(0), identity);
        assert!(result.is_err());
    }
}
