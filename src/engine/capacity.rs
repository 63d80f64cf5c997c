//! Closed-form output-capacity computation.
//!
//! The required output size of every call is computed analytically from the
//! accumulated byte count, the input length, the block size, and the
//! operation kind, before any buffer is touched. This is what makes the
//! "all or nothing" rejection contract possible without transactional undo
//! on the output view.

use crate::error::CipherError;

/// The operation a capacity check is being performed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    /// A non-terminal `update` call: whole blocks are produced, the tail is
    /// re-buffered.
    Update,

    /// A terminal `finalize` without padding: the total length must be an
    /// exact multiple of the block size.
    FinalizeUnpadded,

    /// A terminal `finalize` with padding: the tail is padded to exactly one
    /// more full block.
    FinalizePadded,
}

/// Returns the number of bytes the operation is guaranteed to produce.
///
/// # Errors
///
/// Returns [`CipherError::IncompleteFinalBlock`] for a no-padding finalize
/// whose total length is not a multiple of `block_size`.
pub(crate) fn required_output_len(
    accumulated: usize,
    input_len: usize,
    block_size: usize,
    op: Op,
) -> Result<usize, CipherError> {
    let total = accumulated + input_len;
    let whole = (total / block_size) * block_size;

    match op {
        Op::Update => Ok(whole),
        Op::FinalizeUnpadded => {
            if total % block_size != 0 {
                return Err(CipherError::IncompleteFinalBlock {
                    total_len: total,
                    block_size,
                });
            }
            Ok(total)
        }
        // Padding always adds exactly one full block.
        Op::FinalizePadded => Ok(whole + block_size),
    }
}
