//! chunkpool
//!
//! Fixed-size chunk memory pool for Rust.
//!
//! `chunkpool` pre-allocates one contiguous arena, slices it into equal-size
//! chunks and hands them out without touching the allocator again. It is
//! designed for stream buffering where many same-sized buffers are taken and
//! returned in bursts:
//!
//! - segmenting I/O streams
//! - read-ahead and write-behind buffers
//! - network frame staging
//!
//! The crate intentionally:
//! - does NOT do variable-size allocation
//! - does NOT resize, compact or defragment the arena
//! - does NOT block: an exhausted pool falls back to a heap chunk
//! - does NOT use a process-wide pool; every pool owns its own arena and lock
//!
//! It only does one thing: **take chunk → use bytes → drop chunk**
//!
//! # Chunks
//!
//! ```
//! use chunkpool::{MemoryPool, PoolError};
//!
//! fn main() -> Result<(), PoolError> {
//!     let pool = MemoryPool::new(4096, 8)?;
//!
//!     let mut chunk = pool.get_chunk();
//!     chunk[..5].copy_from_slice(b"hello");
//!     println!("{} at arena offset {}", chunk, chunk.offset());
//!
//!     drop(chunk); // slot goes back to the pool
//!     assert_eq!(pool.total_allocated(), 0);
//!     Ok(())
//! }
//! ```
//!
//! # Raw handles
//!
//! ```
//! use chunkpool::{Handle, MemoryPool};
//!
//! let pool = MemoryPool::new(4, 2)?;
//! let mut handle = pool.try_get_chunk_handle();
//! assert_eq!(handle, Handle::from_raw(0));
//! assert_eq!(pool.chunk_offset(handle), Some(0));
//!
//! pool.release_chunk_handle(&mut handle)?;
//! assert_eq!(handle, Handle::INVALID);
//! # Ok::<(), chunkpool::PoolError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod pool;

//
// Public surface (intentionally tiny)
//

pub use chunk::{Chunk, ChunkBuffer, PoolChunk, StandaloneChunk};
pub use config::{DEFAULT_CHUNK_COUNT, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, PoolConfig};
pub use error::PoolError;
pub use pool::{Handle, MemoryPool};
