//! Chunk types.
//!
//! - [`ChunkBuffer`] - Capability set {bytes, offset, length, dispose}
//! - [`PoolChunk`] - Window into a pool arena, released on drop
//! - [`StandaloneChunk`] - Heap buffer used when the pool is exhausted
//! - [`Chunk`] - Either of the above

mod buffer;
mod data;
mod pooled;
mod standalone;

pub use buffer::ChunkBuffer;
pub use data::Chunk;
pub use pooled::PoolChunk;
pub use standalone::StandaloneChunk;
