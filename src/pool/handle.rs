//! Slot handles.

use std::fmt;

/// Integer capability naming one checked-out slot of a [`MemoryPool`](crate::MemoryPool).
///
/// A valid handle lies in `[0, chunk_count)`. [`Handle::INVALID`] (raw `-1`)
/// means "no handle" or "already released". A handle grants exactly one
/// release: [`MemoryPool::release_chunk_handle`](crate::MemoryPool::release_chunk_handle)
/// resets the caller's variable to the sentinel on success.
///
/// # Example
///
/// ```
/// use chunkpool::Handle;
///
/// let handle = Handle::from_raw(3);
/// assert_eq!(handle.index(), Some(3));
/// assert_eq!(Handle::INVALID.index(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(isize);

impl Handle {
    /// Raw value of the sentinel.
    pub const INVALID_RAW: isize = -1;

    /// The "no handle" sentinel.
    pub const INVALID: Handle = Handle(Self::INVALID_RAW);

    /// Wraps a raw handle value. Any value is accepted; the pool validates it
    /// when the handle is released or adopted.
    pub const fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        // slot counts are bounded by isize::MAX bytes of arena
        Self(index as isize)
    }

    /// Returns the raw value.
    pub const fn raw(self) -> isize {
        self.0
    }

    /// Returns the slot index, or `None` for negative values.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Returns true unless this is a negative (sentinel) value.
    pub fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "invalid")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
