//! Arena and free-list bookkeeping.
//!
//! The arena is one contiguous `BytesMut` allocation split into `chunk_count`
//! disjoint views at construction. Each view stays parked in its slot until a
//! [`PoolChunk`](crate::PoolChunk) takes it, and goes back on release. Free slot
//! indices live on a stack so the most recently released slot is reused first.
//!
//! Every slot is in exactly one of three states:
//!
//! | state            | on `free` stack | `free_mask` bit | view parked |
//! |------------------|-----------------|-----------------|-------------|
//! | free             | yes             | set             | yes         |
//! | raw handle out   | no              | clear           | yes         |
//! | owned by a chunk | no              | clear           | no          |

use bytes::BytesMut;
use fixedbitset::FixedBitSet;

use super::Handle;
use crate::error::PoolError;

pub(crate) struct SlotTable {
    free: Vec<usize>,
    free_mask: FixedBitSet,
    views: Vec<Option<BytesMut>>,
}

impl SlotTable {
    /// Allocates the arena and marks every slot free.
    ///
    /// Caller guarantees `chunk_size * chunk_count` was validated.
    pub(crate) fn new(chunk_size: usize, chunk_count: usize) -> Self {
        let mut arena = BytesMut::zeroed(chunk_size * chunk_count);
        let views = (0..chunk_count)
            .map(|_| Some(arena.split_to(chunk_size)))
            .collect();

        // Reversed so that pops hand out 0, 1, 2, ...
        let free = (0..chunk_count).rev().collect();
        let mut free_mask = FixedBitSet::with_capacity(chunk_count);
        free_mask.insert_range(..);

        Self {
            free,
            free_mask,
            views,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.views.len()
    }

    pub(crate) fn available(&self) -> usize {
        self.free.len()
    }

    pub(crate) fn allocated(&self) -> usize {
        self.capacity() - self.available()
    }

    /// Pops the most recently freed slot.
    pub(crate) fn pop_free(&mut self) -> Option<usize> {
        let index = self.free.pop()?;
        self.free_mask.set(index, false);
        Some(index)
    }

    /// Pops a free slot and takes its view in one step.
    pub(crate) fn checkout(&mut self) -> Option<(usize, BytesMut)> {
        let index = self.pop_free()?;
        // free slots always have their view parked
        debug_assert!(self.views[index].is_some());
        let view = self.views[index].take().unwrap_or_default();
        Some((index, view))
    }

    /// Releases a raw handle whose view is still parked.
    pub(crate) fn release(&mut self, handle: Handle) -> Result<(), PoolError> {
        let index = self.checked_out(handle)?;
        if self.views[index].is_none() {
            return Err(PoolError::InvalidOperation {
                handle,
                message: "handle is owned by a live chunk",
            });
        }
        self.push_free(index);
        Ok(())
    }

    /// Takes the parked view of a raw handle so a chunk can own it.
    pub(crate) fn adopt(&mut self, handle: Handle) -> Result<(usize, BytesMut), PoolError> {
        let index = self.checked_out(handle)?;
        match self.views[index].take() {
            Some(view) => Ok((index, view)),
            None => Err(PoolError::InvalidOperation {
                handle,
                message: "handle is already owned by a chunk",
            }),
        }
    }

    /// Parks a chunk's view again and frees its slot.
    pub(crate) fn restore(&mut self, index: usize, view: BytesMut) {
        debug_assert!(index < self.capacity());
        debug_assert!(!self.free_mask.contains(index));
        debug_assert!(self.views[index].is_none());

        self.views[index] = Some(view);
        self.push_free(index);
    }

    fn push_free(&mut self, index: usize) {
        self.free.push(index);
        self.free_mask.insert(index);
    }

    /// Resolves a handle to a slot that is currently checked out.
    fn checked_out(&self, handle: Handle) -> Result<usize, PoolError> {
        let index = handle
            .index()
            .filter(|&index| index < self.capacity())
            .ok_or(PoolError::InvalidOperation {
                handle,
                message: "handle out of range",
            })?;

        if self.free_mask.contains(index) {
            return Err(PoolError::InvalidOperation {
                handle,
                message: "handle is already free",
            });
        }

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_all_free() {
        let table = SlotTable::new(4, 3);
        assert_eq!(table.capacity(), 3);
        assert_eq!(table.available(), 3);
        assert_eq!(table.allocated(), 0);
        assert!(table.views.iter().all(|v| v.as_ref().map(|v| v.len()) == Some(4)));
    }

    #[test]
    fn test_views_are_contiguous() {
        let table = SlotTable::new(8, 4);
        let base = table.views[0].as_ref().unwrap().as_ptr() as usize;
        for (i, view) in table.views.iter().enumerate() {
            let addr = view.as_ref().unwrap().as_ptr() as usize;
            assert_eq!(addr - base, i * 8);
        }
    }

    #[test]
    fn test_stack_order() {
        let mut table = SlotTable::new(4, 3);
        assert_eq!(table.pop_free(), Some(0));
        assert_eq!(table.pop_free(), Some(1));

        table.release(Handle::from_index(0)).unwrap();
        assert_eq!(table.pop_free(), Some(0));
        assert_eq!(table.pop_free(), Some(2));
        assert_eq!(table.pop_free(), None);
        assert_eq!(table.allocated(), 3);
    }

    #[test]
    fn test_release_rejects_free_and_out_of_range() {
        let mut table = SlotTable::new(4, 2);
        assert!(table.release(Handle::from_index(0)).is_err());
        assert!(table.release(Handle::from_index(2)).is_err());
        assert!(table.release(Handle::INVALID).is_err());
        assert_eq!(table.available(), 2);
    }

    #[test]
    fn test_checkout_and_restore() {
        let mut table = SlotTable::new(4, 1);
        let (index, view) = table.checkout().unwrap();
        assert_eq!(index, 0);
        assert_eq!(view.len(), 4);
        assert!(table.checkout().is_none());

        // owned by a chunk: raw release and adoption are refused
        assert!(table.release(Handle::from_index(0)).is_err());
        assert!(table.adopt(Handle::from_index(0)).is_err());

        table.restore(index, view);
        assert_eq!(table.available(), 1);
    }

    #[test]
    fn test_checkout_always_full_size() {
        let mut table = SlotTable::new(16, 3);
        for _ in 0..3 {
            let (index, view) = table.checkout().unwrap();
            assert_eq!(view.len(), 16);
            table.restore(index, view);
            let (_, view) = table.checkout().unwrap();
            assert_eq!(view.len(), 16);
        }
        assert_eq!(table.allocated(), 3);
    }

    #[test]
    fn test_adopt() {
        let mut table = SlotTable::new(4, 2);
        let index = table.pop_free().unwrap();
        let (adopted, view) = table.adopt(Handle::from_index(index)).unwrap();
        assert_eq!(adopted, index);
        assert_eq!(view.len(), 4);
        assert!(table.adopt(Handle::from_index(1)).is_err());
    }
}
