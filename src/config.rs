//! Configuration for the transform engine.
//!
//! This module provides [`EngineConfig`], which fixes the block size and the
//! finalize-time padding behavior for one engine instance.
//!
//! # Example
//!
//! ```
//! use cipherbuf::EngineConfig;
//!
//! // AES-sized blocks, no padding on finalize
//! let config = EngineConfig::new(16)?;
//!
//! // DES-sized blocks, padding applied on finalize
//! let config = EngineConfig::new(8)?.with_padding(true);
//!
//! # Ok::<(), cipherbuf::CipherError>(())
//! ```

use crate::error::CipherError;

/// Default block size (16 bytes, the AES block size).
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Largest supported block size.
///
/// Padding schemes encode the pad length in a single byte, so a block can
/// never exceed 255 bytes.
pub const MAX_BLOCK_SIZE: usize = 255;

/// Configuration for a streaming transform engine.
///
/// `EngineConfig` fixes two properties for the lifetime of an engine
/// instance:
///
/// - `block_size` - The number of bytes the underlying single-block cipher
///   transforms per invocation. Fixed per instance.
/// - `padding` - Whether `finalize` pads the trailing partial block to a
///   full block. Without padding, the total processed length must be an
///   exact multiple of `block_size`.
///
/// # Example
///
/// ```
/// use cipherbuf::EngineConfig;
///
/// // Use default configuration (16-byte blocks, no padding)
/// let config = EngineConfig::default();
///
/// // Custom configuration
/// let config = EngineConfig::new(8)?.with_padding(true);
/// assert_eq!(config.block_size(), 8);
/// assert!(config.padding());
/// # Ok::<(), cipherbuf::CipherError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineConfig {
    /// Block size in bytes.
    block_size: usize,

    /// Whether `finalize` applies padding.
    padding: bool,
}

impl EngineConfig {
    /// Creates a new configuration with the specified block size.
    ///
    /// Padding is disabled; enable it with [`EngineConfig::with_padding`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidConfig`] if:
    /// - `block_size` is zero
    /// - `block_size` exceeds [`MAX_BLOCK_SIZE`]
    ///
    /// # Example
    ///
    /// ```
    /// use cipherbuf::EngineConfig;
    ///
    /// let config = EngineConfig::new(16)?;
    /// assert_eq!(config.block_size(), 16);
    /// # Ok::<(), cipherbuf::CipherError>(())
    /// ```
    pub fn new(block_size: usize) -> Result<Self, CipherError> {
        if block_size == 0 {
            return Err(CipherError::InvalidConfig {
                message: "block size must be non-zero",
            });
        }

        if block_size > MAX_BLOCK_SIZE {
            return Err(CipherError::InvalidConfig {
                message: "block size cannot exceed 255 bytes",
            });
        }

        Ok(Self {
            block_size,
            padding: false,
        })
    }

    /// Sets whether `finalize` applies padding.
    ///
    /// # Example
    ///
    /// ```
    /// use cipherbuf::EngineConfig;
    ///
    /// let config = EngineConfig::default().with_padding(true);
    /// assert!(config.padding());
    /// ```
    pub fn with_padding(mut self, padding: bool) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the block size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`EngineConfig::validate`] to check if the configuration is valid.
    ///
    /// # Example
    ///
    /// ```
    /// use cipherbuf::EngineConfig;
    ///
    /// let config = EngineConfig::default().with_block_size(8);
    /// assert_eq!(config.block_size(), 8);
    /// ```
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Returns the block size in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Returns whether `finalize` applies padding.
    pub fn padding(&self) -> bool {
        self.padding
    }

    /// Validates the current configuration.
    ///
    /// Returns an error if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use cipherbuf::EngineConfig;
    ///
    /// let config = EngineConfig::default().with_block_size(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CipherError> {
        Self::new(self.block_size).map(|_| ())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            padding: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.block_size(), DEFAULT_BLOCK_SIZE);
        assert!(!config.padding());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_block_size(8)
            .with_padding(true);

        assert_eq!(config.block_size(), 8);
        assert!(config.padding());
    }

    #[test]
    fn test_invalid_config_zero_block_size() {
        let result = EngineConfig::new(0);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_oversized_block() {
        let result = EngineConfig::new(256);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_after_builder() {
        let config = EngineConfig::default().with_block_size(0);
        assert!(config.validate().is_err());

        let config = EngineConfig::default().with_block_size(64);
        assert!(config.validate().is_ok());
    }
}
