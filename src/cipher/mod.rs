//! Collaborator seams for the injected cipher primitive and padding scheme.
//!
//! - [`BlockTransform`] - The single-block cipher primitive.
//! - [`BlockPadding`] - Finalize-time padding of the trailing partial block.
//! - [`Pkcs7`] - A shipped PKCS#7 implementation of [`BlockPadding`].

mod padding;

pub use padding::Pkcs7;

use crate::error::CipherError;

/// The single-block cipher primitive injected into an engine.
///
/// Implementations must be deterministic and side-effect-free from the
/// engine's perspective: a pure function of the input block and whatever
/// key schedule the implementation holds. `input` and `output` are always
/// exactly one block long.
///
/// Any `Fn(&[u8], &mut [u8])` closure implements this trait, so tests and
/// callers can inject plain functions:
///
/// ```
/// use cipherbuf::{CipherEngine, EngineConfig};
///
/// let negate = |input: &[u8], output: &mut [u8]| {
///     for (o, i) in output.iter_mut().zip(input) {
///         *o = !i;
///     }
/// };
/// let engine = CipherEngine::new(EngineConfig::default(), negate)?;
/// assert_eq!(engine.block_size(), 16);
/// # Ok::<(), cipherbuf::CipherError>(())
/// ```
pub trait BlockTransform {
    /// Transforms exactly one block from `input` into `output`.
    ///
    /// Both slices are exactly the engine's block size.
    fn transform_block(&self, input: &[u8], output: &mut [u8]);
}

impl<F> BlockTransform for F
where
    F: Fn(&[u8], &mut [u8]),
{
    fn transform_block(&self, input: &[u8], output: &mut [u8]) {
        self(input, output)
    }
}

/// Finalize-time padding of the trailing partial block.
///
/// `pad` receives the tail (strictly fewer than `block_size` bytes, possibly
/// empty) and must return exactly one full block. `unpad` is the inverse for
/// decryption contexts: it receives the final transformed block and strips
/// the padding.
pub trait BlockPadding {
    /// Pads `tail` to exactly `block_size` bytes.
    fn pad(&self, tail: &[u8], block_size: usize) -> Vec<u8>;

    /// Strips padding from the final `block`, returning the payload bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidPadding`] if the block does not end in
    /// well-formed padding.
    fn unpad(&self, block: &[u8]) -> Result<Vec<u8>, CipherError>;
}
