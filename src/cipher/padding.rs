//! PKCS#7 padding implementation.

use crate::error::CipherError;

use super::BlockPadding;

/// PKCS#7 block padding.
///
/// Appends `n` bytes each of value `n`, where `n` is the number of bytes
/// needed to reach a full block. An empty tail pads to an entire block of
/// value `block_size`, which is why padding always produces exactly one
/// block of output. Block sizes are limited to 255 because the pad length
/// is encoded in a single byte.
///
/// # Example
///
/// ```
/// use cipherbuf::{BlockPadding, Pkcs7};
///
/// let padded = Pkcs7.pad(b"abc", 8);
/// assert_eq!(padded, b"abc\x05\x05\x05\x05\x05");
/// assert_eq!(Pkcs7.unpad(&padded)?, b"abc");
/// # Ok::<(), cipherbuf::CipherError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Pkcs7;

impl BlockPadding for Pkcs7 {
    fn pad(&self, tail: &[u8], block_size: usize) -> Vec<u8> {
        debug_assert!(tail.len() < block_size);
        debug_assert!(block_size <= 255);

        let pad_len = block_size - tail.len();
        let mut block = Vec::with_capacity(block_size);
        block.extend_from_slice(tail);
        block.resize(block_size, pad_len as u8);
        block
    }

    fn unpad(&self, block: &[u8]) -> Result<Vec<u8>, CipherError> {
        let pad_len = match block.last() {
            Some(&b) => b as usize,
            None => return Err(CipherError::InvalidPadding),
        };

        if pad_len == 0 || pad_len > block.len() {
            return Err(CipherError::InvalidPadding);
        }

        let (payload, padding) = block.split_at(block.len() - pad_len);
        if padding.iter().any(|&b| b as usize != pad_len) {
            return Err(CipherError::InvalidPadding);
        }

        Ok(payload.to_vec())
    }
}
