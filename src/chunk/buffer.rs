//! The capability set shared by every chunk variant.

/// Byte window handed out by a pool.
///
/// Implemented by [`PoolChunk`](crate::PoolChunk),
/// [`StandaloneChunk`](crate::StandaloneChunk) and [`Chunk`](crate::Chunk), so
/// stream code can be generic over where its buffers come from.
///
/// # Example
///
/// ```
/// use chunkpool::{ChunkBuffer, MemoryPool};
///
/// fn fill<C: ChunkBuffer>(chunk: &mut C, byte: u8) {
///     chunk.as_mut_slice().fill(byte);
/// }
///
/// let pool = MemoryPool::new(8, 1)?;
/// let mut chunk = pool.get_chunk();
/// fill(&mut chunk, 0xAB);
/// assert!(chunk.as_slice().iter().all(|&b| b == 0xAB));
/// # Ok::<(), chunkpool::PoolError>(())
/// ```
pub trait ChunkBuffer {
    /// The chunk's bytes. Empty once a pool-backed chunk has been disposed.
    fn as_slice(&self) -> &[u8];

    /// The chunk's bytes, mutably.
    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Position of the window inside its backing storage.
    fn offset(&self) -> usize;

    /// Nominal length of the window.
    fn len(&self) -> usize;

    /// Returns true if the window has zero length.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Releases whatever the chunk holds. Calling it more than once is a no-op.
    fn dispose(&mut self);
}
