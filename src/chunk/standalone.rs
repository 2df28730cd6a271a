//! Heap-allocated chunks used when a pool is exhausted.

use std::fmt;
use std::ops::{Deref, DerefMut};

use bytes::BytesMut;

use super::ChunkBuffer;
use crate::config::validate_chunk_size;
use crate::error::PoolError;

/// A chunk that owns its own zeroed buffer and never touches a pool.
///
/// # Example
///
/// ```
/// use chunkpool::StandaloneChunk;
///
/// let chunk = StandaloneChunk::new(4)?;
/// assert_eq!(chunk.offset(), 0);
/// assert_eq!(&chunk[..], &[0, 0, 0, 0]);
/// # Ok::<(), chunkpool::PoolError>(())
/// ```
pub struct StandaloneChunk {
    buf: BytesMut,
}

impl StandaloneChunk {
    /// Allocates a zeroed chunk of `chunk_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidArgument`] if `chunk_size` is zero or larger
    /// than [`MAX_CHUNK_SIZE`](crate::MAX_CHUNK_SIZE).
    pub fn new(chunk_size: usize) -> Result<Self, PoolError> {
        validate_chunk_size(chunk_size)?;
        Ok(Self::from_valid_size(chunk_size))
    }

    pub(crate) fn from_valid_size(chunk_size: usize) -> Self {
        Self {
            buf: BytesMut::zeroed(chunk_size),
        }
    }

    /// Always 0: the chunk starts at the beginning of its own buffer.
    pub fn offset(&self) -> usize {
        0
    }

    /// Chunk length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the chunk has zero length.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the chunk's bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the chunk's bytes mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Consumes the chunk and returns its buffer.
    pub fn into_inner(self) -> BytesMut {
        self.buf
    }
}

impl ChunkBuffer for StandaloneChunk {
    fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    fn offset(&self) -> usize {
        0
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    // Nothing to hand back; the buffer is freed on drop.
    fn dispose(&mut self) {}
}

impl Deref for StandaloneChunk {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for StandaloneChunk {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl AsRef<[u8]> for StandaloneChunk {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl AsMut<[u8]> for StandaloneChunk {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl fmt::Debug for StandaloneChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandaloneChunk")
            .field("len", &self.buf.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_CHUNK_SIZE;

    #[test]
    fn test_new() {
        let chunk = StandaloneChunk::new(8).unwrap();
        assert_eq!(chunk.len(), 8);
        assert!(!chunk.is_empty());
        assert!(chunk.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_size() {
        assert!(StandaloneChunk::new(0).is_err());
        assert!(StandaloneChunk::new(MAX_CHUNK_SIZE + 1).is_err());
    }

    #[test]
    fn test_dispose_keeps_buffer() {
        let mut chunk = StandaloneChunk::new(4).unwrap();
        chunk.copy_from_slice(b"data");
        ChunkBuffer::dispose(&mut chunk);
        ChunkBuffer::dispose(&mut chunk);
        assert_eq!(chunk.as_slice(), b"data");
    }

    #[test]
    fn test_into_inner() {
        let mut chunk = StandaloneChunk::new(2).unwrap();
        chunk.as_mut_slice().copy_from_slice(&[9, 9]);
        assert_eq!(&chunk.into_inner()[..], &[9, 9]);
    }
}
