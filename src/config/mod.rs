//! Configuration for pool geometry.
//!
//! - [`PoolConfig`] - Chunk size and chunk count, validated before any memory
//!   is reserved.
//!
//! # Example
//!
//! ```
//! use chunkpool::PoolConfig;
//!
//! // Explicit geometry
//! let config = PoolConfig::new(4096, 32)?;
//! assert_eq!(config.arena_len(), 4096 * 32);
//!
//! // Builder pattern
//! let config = PoolConfig::default()
//!     .with_chunk_size(8192)
//!     .with_chunk_count(8);
//! config.validate()?;
//!
//! # Ok::<(), chunkpool::PoolError>(())
//! ```

use crate::error::PoolError;

/// Largest chunk a pool (or standalone chunk) may hand out: 1 GiB.
pub const MAX_CHUNK_SIZE: usize = 1 << 30;

/// Default chunk size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default number of chunks in the arena.
pub const DEFAULT_CHUNK_COUNT: usize = 16;

/// Geometry of a [`MemoryPool`](crate::MemoryPool) arena.
///
/// The arena is `chunk_size * chunk_count` bytes. Constraints:
///
/// - `1 <= chunk_size <= MAX_CHUNK_SIZE`
/// - `chunk_count >= 1`
/// - the arena length fits in `usize` and does not exceed `isize::MAX`
///
/// # Example
///
/// ```
/// use chunkpool::PoolConfig;
///
/// let config = PoolConfig::new(4, 10)?;
/// assert_eq!(config.chunk_size(), 4);
/// assert_eq!(config.chunk_count(), 10);
/// # Ok::<(), chunkpool::PoolError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Bytes per slot.
    chunk_size: usize,

    /// Number of slots.
    chunk_count: usize,
}

impl PoolConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if:
    /// - `chunk_size` is zero or larger than [`MAX_CHUNK_SIZE`]
    /// - `chunk_count` is zero
    /// - `chunk_size * chunk_count` overflows or exceeds `isize::MAX`
    pub fn new(chunk_size: usize, chunk_count: usize) -> Result<Self, PoolError> {
        validate_chunk_size(chunk_size)?;

        if chunk_count == 0 {
            return Err(PoolError::InvalidArgument {
                message: "chunk_count must be at least 1",
            });
        }

        // Vec (and so BytesMut) cannot hold more than isize::MAX bytes
        match chunk_size.checked_mul(chunk_count) {
            Some(len) if len <= isize::MAX as usize => {}
            _ => {
                return Err(PoolError::InvalidArgument {
                    message: "chunk_size * chunk_count overflows the addressable size",
                });
            }
        }

        Ok(Self {
            chunk_size,
            chunk_count,
        })
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the chunk count.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_chunk_count(mut self, count: usize) -> Self {
        self.chunk_count = count;
        self
    }

    /// Returns the number of bytes per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the number of chunks in the arena.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Returns the arena length in bytes.
    ///
    /// Only meaningful for a validated configuration; saturates otherwise.
    pub fn arena_len(&self) -> usize {
        self.chunk_size.saturating_mul(self.chunk_count)
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkpool::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_chunk_count(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), PoolError> {
        Self::new(self.chunk_size, self.chunk_count).map(|_| ())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_count: DEFAULT_CHUNK_COUNT,
        }
    }
}

/// Checks a single chunk size against `[1, MAX_CHUNK_SIZE]`.
pub(crate) fn validate_chunk_size(chunk_size: usize) -> Result<(), PoolError> {
    if chunk_size == 0 {
        return Err(PoolError::InvalidArgument {
            message: "chunk_size must be non-zero",
        });
    }

    if chunk_size > MAX_CHUNK_SIZE {
        return Err(PoolError::InvalidArgument {
            message: "chunk_size must be less than or equal to 2^30",
        });
    }

    Ok(())
}
