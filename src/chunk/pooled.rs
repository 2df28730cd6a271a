//! Chunks borrowed from a pool's arena.

use std::fmt;
use std::ops::{Deref, DerefMut};

use bytes::BytesMut;

use super::ChunkBuffer;
use crate::pool::{Handle, MemoryPool, PoolRef};

/// A window into a [`MemoryPool`] arena, owned through a slot handle.
///
/// The slot goes back to the pool when the chunk is dropped or
/// [disposed](PoolChunk::dispose), whichever comes first; the second is a no-op.
/// If the pool itself is already gone, the bytes are simply freed.
///
/// # Example
///
/// ```
/// use chunkpool::MemoryPool;
///
/// let pool = MemoryPool::new(4, 2)?;
/// let mut chunk = pool.try_get_chunk_from_pool().expect("pool has free slots");
/// assert_eq!(chunk.offset(), 0);
///
/// chunk[..].copy_from_slice(b"abcd");
/// chunk.dispose();
/// chunk.dispose();
///
/// assert!(chunk.is_disposed());
/// assert_eq!(pool.total_allocated(), 0);
/// # Ok::<(), chunkpool::PoolError>(())
/// ```
pub struct PoolChunk {
    pool: PoolRef,
    handle: Handle,
    offset: usize,
    len: usize,
    view: BytesMut,
}

impl PoolChunk {
    pub(crate) fn new(pool: PoolRef, handle: Handle, offset: usize, view: BytesMut) -> Self {
        Self {
            pool,
            handle,
            offset,
            len: view.len(),
            view,
        }
    }

    /// The slot handle, or [`Handle::INVALID`] once disposed.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Arena offset of this chunk: `handle * chunk_size`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Chunk length; always the pool's chunk size.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chunk has zero length.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true once the slot has been released.
    pub fn is_disposed(&self) -> bool {
        !self.handle.is_valid()
    }

    /// The owning pool, if it is still alive.
    pub fn pool(&self) -> Option<MemoryPool> {
        self.pool.upgrade().map(MemoryPool::from_shared)
    }

    /// Returns the chunk's bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.view
    }

    /// Returns the chunk's bytes mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.view
    }

    /// Returns the slot to the pool. Subsequent calls do nothing.
    ///
    /// After disposal the chunk's window is empty.
    pub fn dispose(&mut self) {
        let Some(index) = self.handle.index() else {
            return;
        };
        self.handle = Handle::INVALID;
        let view = std::mem::take(&mut self.view);

        match self.pool.upgrade() {
            Some(shared) => shared.restore(index, view),
            None => tracing::trace!(index, "pool already dropped, discarding chunk"),
        }
    }
}

impl ChunkBuffer for PoolChunk {
    fn as_slice(&self) -> &[u8] {
        PoolChunk::as_slice(self)
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        PoolChunk::as_mut_slice(self)
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn len(&self) -> usize {
        self.len
    }

    fn dispose(&mut self) {
        PoolChunk::dispose(self);
    }
}

impl Drop for PoolChunk {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl Deref for PoolChunk {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.view
    }
}

impl DerefMut for PoolChunk {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.view
    }
}

impl AsRef<[u8]> for PoolChunk {
    fn as_ref(&self) -> &[u8] {
        &self.view
    }
}

impl AsMut<[u8]> for PoolChunk {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.view
    }
}

impl fmt::Debug for PoolChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolChunk")
            .field("handle", &self.handle)
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::MemoryPool;

    #[test]
    fn test_offset_follows_handle() {
        let pool = MemoryPool::new(16, 3).unwrap();
        let a = pool.try_get_chunk_from_pool().unwrap();
        let b = pool.try_get_chunk_from_pool().unwrap();
        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset(), 16);
        assert_eq!(b.len(), 16);
        assert_eq!(b.as_slice().len(), 16);
    }

    #[test]
    fn test_drop_releases() {
        let pool = MemoryPool::new(4, 1).unwrap();
        {
            let _chunk = pool.try_get_chunk_from_pool().unwrap();
            assert!(pool.try_get_chunk_from_pool().is_none());
        }
        assert!(pool.try_get_chunk_from_pool().is_some());
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let pool = MemoryPool::new(4, 2).unwrap();
        let mut chunk = pool.try_get_chunk_from_pool().unwrap();
        let _other = pool.try_get_chunk_from_pool().unwrap();
        assert_eq!(pool.total_allocated(), 2);

        chunk.dispose();
        assert_eq!(pool.total_allocated(), 1);
        chunk.dispose();
        assert_eq!(pool.total_allocated(), 1);

        assert!(chunk.is_disposed());
        assert!(chunk.as_slice().is_empty());
        assert_eq!(chunk.len(), 4);

        drop(chunk);
        assert_eq!(pool.total_allocated(), 1);
    }

    #[test]
    fn test_outlives_pool() {
        let pool = MemoryPool::new(4, 1).unwrap();
        let mut chunk = pool.try_get_chunk_from_pool().unwrap();
        drop(pool);

        assert!(chunk.pool().is_none());
        chunk.copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(&chunk[..], &[1, 2, 3, 4]);
        chunk.dispose();
        assert!(chunk.is_disposed());
    }

    #[test]
    fn test_pool_upgrade() {
        let pool = MemoryPool::new(4, 1).unwrap();
        let chunk = pool.try_get_chunk_from_pool().unwrap();
        let owner = chunk.pool().unwrap();
        assert_eq!(owner.total_allocated(), 1);
    }
}
