//! The thread-safe fixed-size chunk pool.

use std::fmt;
use std::sync::{Arc, Weak};

use bytes::BytesMut;
use parking_lot::Mutex;

use super::Handle;
use super::slots::SlotTable;
use crate::chunk::{Chunk, PoolChunk, StandaloneChunk};
use crate::config::PoolConfig;
use crate::error::PoolError;

/// A pre-allocated arena of `chunk_count` chunks of `chunk_size` bytes each.
///
/// Cloning a `MemoryPool` is cheap and yields another handle to the same arena.
/// The arena is freed when the last clone is dropped; chunks still alive at
/// that point keep their bytes but no longer return them to any pool.
///
/// # Example
///
/// ```
/// use chunkpool::MemoryPool;
///
/// let pool = MemoryPool::new(4, 2)?;
///
/// {
///     let mut chunk = pool.get_chunk();
///     chunk.as_mut_slice().copy_from_slice(&7u32.to_le_bytes());
///     assert!(chunk.is_pooled());
///     assert_eq!(pool.total_allocated(), 1);
/// } // returned to the pool here
///
/// assert_eq!(pool.total_allocated(), 0);
/// # Ok::<(), chunkpool::PoolError>(())
/// ```
#[derive(Clone)]
pub struct MemoryPool {
    shared: Arc<Shared>,
}

pub(crate) struct Shared {
    config: PoolConfig,
    slots: Mutex<SlotTable>,
}

impl MemoryPool {
    /// Creates a pool of `chunk_count` chunks of `chunk_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if the geometry is invalid; see
    /// [`PoolConfig::new`].
    pub fn new(chunk_size: usize, chunk_count: usize) -> Result<Self, PoolError> {
        PoolConfig::new(chunk_size, chunk_count).map(Self::from_valid_config)
    }

    /// Creates a pool from a configuration, validating it first.
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PoolConfig) -> Self {
        let slots = SlotTable::new(config.chunk_size(), config.chunk_count());

        tracing::debug!(
            chunk_size = config.chunk_size(),
            chunk_count = config.chunk_count(),
            arena_len = config.arena_len(),
            "memory pool created"
        );

        Self {
            shared: Arc::new(Shared {
                config,
                slots: Mutex::new(slots),
            }),
        }
    }

    /// Claims a free slot, or returns [`Handle::INVALID`] if the pool is exhausted.
    ///
    /// Never blocks beyond the pool's short critical section. The slot's bytes
    /// can be reached with [`MemoryPool::adopt_handle`].
    pub fn try_get_chunk_handle(&self) -> Handle {
        self.shared
            .slots
            .lock()
            .pop_free()
            .map_or(Handle::INVALID, Handle::from_index)
    }

    /// Returns a raw handle to the pool and resets `handle` to [`Handle::INVALID`].
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidOperation`] if the handle is out of range,
    /// already free, or owned by a live chunk. The pool and `handle` are left
    /// untouched in that case.
    pub fn release_chunk_handle(&self, handle: &mut Handle) -> Result<(), PoolError> {
        self.shared.slots.lock().release(*handle)?;
        *handle = Handle::INVALID;
        Ok(())
    }

    /// Wraps a checked-out raw handle in a [`PoolChunk`], moving the release
    /// capability into the chunk and resetting `handle` to [`Handle::INVALID`].
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidOperation`] if the handle is out of range,
    /// free, or already owned by a chunk.
    pub fn adopt_handle(&self, handle: &mut Handle) -> Result<PoolChunk, PoolError> {
        let (index, view) = self.shared.slots.lock().adopt(*handle)?;
        *handle = Handle::INVALID;
        Ok(self.wrap(index, view))
    }

    /// Arena offset of a handle's slot: `handle * chunk_size`.
    ///
    /// Returns `None` for negative handles and for handles whose offset does
    /// not fit in `usize`. The handle is not checked against the pool's chunk
    /// count.
    pub fn chunk_offset(&self, handle: Handle) -> Option<usize> {
        handle
            .index()
            .and_then(|index| index.checked_mul(self.shared.config.chunk_size()))
    }

    /// Returns a chunk, falling back to a heap-allocated [`StandaloneChunk`]
    /// of the same size when the pool is exhausted.
    pub fn get_chunk(&self) -> Chunk {
        match self.try_get_chunk_from_pool() {
            Some(chunk) => Chunk::Pooled(chunk),
            None => {
                let chunk_size = self.chunk_size();
                tracing::trace!(chunk_size, "pool exhausted, allocating standalone chunk");
                Chunk::Standalone(StandaloneChunk::from_valid_size(chunk_size))
            }
        }
    }

    /// Returns a pool-backed chunk, or `None` if the pool is exhausted.
    pub fn try_get_chunk_from_pool(&self) -> Option<PoolChunk> {
        let (index, view) = self.shared.slots.lock().checkout()?;
        Some(self.wrap(index, view))
    }

    fn wrap(&self, index: usize, view: BytesMut) -> PoolChunk {
        PoolChunk::new(
            Arc::downgrade(&self.shared),
            Handle::from_index(index),
            index * self.shared.config.chunk_size(),
            view,
        )
    }

    /// Number of slots currently checked out.
    pub fn total_allocated(&self) -> usize {
        self.shared.slots.lock().allocated()
    }

    /// Number of free slots.
    pub fn available(&self) -> usize {
        self.shared.slots.lock().available()
    }

    /// Bytes per chunk.
    pub fn chunk_size(&self) -> usize {
        self.shared.config.chunk_size()
    }

    /// Number of slots in the arena.
    pub fn chunk_count(&self) -> usize {
        self.shared.config.chunk_count()
    }

    /// Total arena length in bytes.
    pub fn arena_len(&self) -> usize {
        self.shared.config.arena_len()
    }

    /// The configuration the pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

impl Shared {
    /// Puts a chunk's view back and frees its slot.
    pub(crate) fn restore(&self, index: usize, view: BytesMut) {
        self.slots.lock().restore(index, view);
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let outstanding = self.slots.get_mut().allocated();
        if outstanding > 0 {
            tracing::debug!(outstanding, "memory pool dropped with chunks checked out");
        }
    }
}

impl fmt::Debug for MemoryPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPool")
            .field("chunk_size", &self.chunk_size())
            .field("chunk_count", &self.chunk_count())
            .field("total_allocated", &self.total_allocated())
            .finish()
    }
}

/// Weak reference from a chunk back to its pool.
pub(crate) type PoolRef = Weak<Shared>;
