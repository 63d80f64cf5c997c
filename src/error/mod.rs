//! Error types for cipherbuf.

use std::fmt;

/// Errors that can occur during buffer-view and streaming transform operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The output view cannot hold the guaranteed output size.
    ///
    /// Reported before any mutation; the call can be retried unchanged with
    /// a larger or repositioned output view.
    InsufficientCapacity {
        /// The number of bytes the operation is guaranteed to produce.
        required: usize,
        /// The number of bytes remaining in the destination view.
        available: usize,
    },

    /// A read exceeded a view's remaining bytes.
    InsufficientData {
        /// The number of bytes requested.
        requested: usize,
        /// The number of bytes remaining in the source view.
        available: usize,
    },

    /// `finalize` was called in no-padding mode with a total length that is
    /// not a multiple of the block size.
    IncompleteFinalBlock {
        /// Total bytes processed (accumulated plus remaining input).
        total_len: usize,
        /// The engine's block size.
        block_size: usize,
    },

    /// A write was attempted on a read-only view.
    ImmutableView,

    /// `update` or `finalize` was called after `finalize` completed.
    ///
    /// The engine instance is terminal; construct a new one for further work.
    EngineFinalized,

    /// The input and output views share backing storage and their windows
    /// overlap. Overlapping windows are unsupported.
    OverlappingViews,

    /// Padding bytes did not form a valid padded block.
    InvalidPadding,

    /// A cursor move would violate `position <= limit <= capacity`.
    CursorOutOfBounds {
        /// The requested position.
        position: usize,
        /// The requested (or current) limit.
        limit: usize,
        /// The view's capacity.
        capacity: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::InsufficientCapacity {
                required,
                available,
            } => {
                write!(
                    f,
                    "insufficient output capacity: {} bytes required, {} available",
                    required, available
                )
            }
            CipherError::InsufficientData {
                requested,
                available,
            } => {
                write!(
                    f,
                    "insufficient data: {} bytes requested, {} available",
                    requested, available
                )
            }
            CipherError::IncompleteFinalBlock {
                total_len,
                block_size,
            } => {
                write!(
                    f,
                    "incomplete final block: {} bytes total is not a multiple of block size {}",
                    total_len, block_size
                )
            }
            CipherError::ImmutableView => write!(f, "write attempted on a read-only view"),
            CipherError::EngineFinalized => {
                write!(f, "engine already finalized; construct a new instance")
            }
            CipherError::OverlappingViews => {
                write!(f, "input and output views overlap the same storage")
            }
            CipherError::InvalidPadding => write!(f, "invalid padding"),
            CipherError::CursorOutOfBounds {
                position,
                limit,
                capacity,
            } => {
                write!(
                    f,
                    "cursor out of bounds: position {} limit {} capacity {}",
                    position, limit, capacity
                )
            }
            CipherError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for CipherError {}
