//! Fixed-size chunk pool.
//!
//! - [`MemoryPool`] - Thread-safe arena of equal-size chunks
//! - [`Handle`] - Integer capability for one checked-out slot

mod handle;
mod memory;
mod slots;

pub use handle::Handle;
pub use memory::MemoryPool;

pub(crate) use memory::PoolRef;
