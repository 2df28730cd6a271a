//! The Chunk type - whatever [`MemoryPool::get_chunk`](crate::MemoryPool::get_chunk) returned.

use bytes::Bytes;
use std::fmt;
use std::ops::{Deref, DerefMut};

use super::{ChunkBuffer, PoolChunk, StandaloneChunk};
use crate::pool::Handle;

/// A chunk from a pool, or its heap fallback when the pool was exhausted.
///
/// Both variants expose the same bytes/offset/length view and are released on
/// drop.
///
/// # Example
///
/// ```
/// use chunkpool::{Chunk, MemoryPool};
///
/// let pool = MemoryPool::new(4, 1)?;
/// let first = pool.get_chunk();
/// let second = pool.get_chunk();
///
/// assert!(matches!(first, Chunk::Pooled(_)));
/// assert!(matches!(second, Chunk::Standalone(_)));
/// assert_eq!(second.len(), 4);
/// # Ok::<(), chunkpool::PoolError>(())
/// ```
#[derive(Debug)]
pub enum Chunk {
    /// Borrowed from the pool arena.
    Pooled(PoolChunk),

    /// Heap-allocated because the pool had no free slot.
    Standalone(StandaloneChunk),
}

impl Chunk {
    /// Returns true if the chunk lives in a pool arena.
    pub fn is_pooled(&self) -> bool {
        matches!(self, Chunk::Pooled(_))
    }

    /// The slot handle of a pool-backed chunk; [`Handle::INVALID`] otherwise.
    pub fn handle(&self) -> Handle {
        match self {
            Chunk::Pooled(chunk) => chunk.handle(),
            Chunk::Standalone(_) => Handle::INVALID,
        }
    }

    /// Offset of the window in its backing storage.
    pub fn offset(&self) -> usize {
        match self {
            Chunk::Pooled(chunk) => chunk.offset(),
            Chunk::Standalone(chunk) => chunk.offset(),
        }
    }

    /// Chunk length.
    pub fn len(&self) -> usize {
        match self {
            Chunk::Pooled(chunk) => chunk.len(),
            Chunk::Standalone(chunk) => chunk.len(),
        }
    }

    /// Returns true if the chunk has zero length.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the chunk's bytes.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Chunk::Pooled(chunk) => chunk.as_slice(),
            Chunk::Standalone(chunk) => chunk.as_slice(),
        }
    }

    /// Returns the chunk's bytes mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Chunk::Pooled(chunk) => chunk.as_mut_slice(),
            Chunk::Standalone(chunk) => chunk.as_mut_slice(),
        }
    }

    /// Copies the first `len` bytes out into an immutable [`Bytes`].
    ///
    /// `len` is clamped to the chunk length.
    pub fn to_bytes(&self, len: usize) -> Bytes {
        let data = self.as_slice();
        Bytes::copy_from_slice(&data[..len.min(data.len())])
    }

    /// Releases the chunk early. Calling it more than once is a no-op.
    pub fn dispose(&mut self) {
        match self {
            Chunk::Pooled(chunk) => chunk.dispose(),
            Chunk::Standalone(chunk) => ChunkBuffer::dispose(chunk),
        }
    }
}

impl ChunkBuffer for Chunk {
    fn as_slice(&self) -> &[u8] {
        Chunk::as_slice(self)
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        Chunk::as_mut_slice(self)
    }

    fn offset(&self) -> usize {
        Chunk::offset(self)
    }

    fn len(&self) -> usize {
        Chunk::len(self)
    }

    fn dispose(&mut self) {
        Chunk::dispose(self);
    }
}

impl From<PoolChunk> for Chunk {
    fn from(chunk: PoolChunk) -> Self {
        Chunk::Pooled(chunk)
    }
}

impl From<StandaloneChunk> for Chunk {
    fn from(chunk: StandaloneChunk) -> Self {
        Chunk::Standalone(chunk)
    }
}

impl Deref for Chunk {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for Chunk {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for Chunk {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes", self.len())?;
        match self {
            Chunk::Pooled(chunk) => write!(f, " @ {}, handle={}", chunk.offset(), chunk.handle())?,
            Chunk::Standalone(_) => write!(f, ", standalone")?,
        }
        write!(f, ")")
    }
}
