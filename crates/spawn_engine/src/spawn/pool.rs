//! Per-prototype free list
//!
//! A pool stores the inactive handles of one prototype and hands them back
//! in LIFO order so the most recently used instance (warmest caches, most
//! recently touched memory) is reused first. The pool never owns spawned
//! handles; everything in the free list is inactive by construction.

use crate::spawn::handle::{PoolSlot, SpawnHandle};
use crate::spawn::prototype::PrototypeId;

/// Free-list storage and reactivation bookkeeping for one prototype
#[derive(Debug)]
pub struct Pool {
    prototype: PrototypeId,
    free: Vec<SpawnHandle>,
    next_instance_id: u32,
    total_created: u64,
}

impl Pool {
    /// Create an empty pool for `prototype` with reserved free-list capacity
    pub(crate) fn new(prototype: PrototypeId, capacity: usize) -> Self {
        Self {
            prototype,
            free: Vec::with_capacity(capacity),
            next_instance_id: 0,
            total_created: 0,
        }
    }

    /// Pop the most recently pooled handle, or `None` if the pool is empty
    /// (the caller then constructs a fresh instance).
    pub(crate) fn acquire(&mut self) -> Option<SpawnHandle> {
        self.free.pop()
    }

    /// Push an inactive handle back onto the free list.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to a different pool. Cross-pool release
    /// would corrupt occupancy accounting for two prototypes at once, so it
    /// aborts loudly instead of proceeding.
    pub(crate) fn release(&mut self, handle: SpawnHandle, slot: PoolSlot) {
        assert!(
            slot.pool == self.prototype,
            "handle {handle:?} released into a pool it does not belong to \
             (owner {:?}, target {:?})",
            slot.pool,
            self.prototype,
        );
        self.free.push(handle);
    }

    /// Drain every free handle for destruction; spawned handles are untouched.
    pub(crate) fn evict(&mut self) -> Vec<SpawnHandle> {
        std::mem::take(&mut self.free)
    }

    /// Allot a fresh pool-local instance id. Ids are monotonic and never
    /// reused while a handle carrying one is alive.
    pub(crate) fn allot_instance_id(&mut self) -> u32 {
        let id = self.next_instance_id;
        self.next_instance_id += 1;
        self.total_created += 1;
        id
    }

    /// Prototype this pool serves
    pub fn prototype(&self) -> PrototypeId {
        self.prototype
    }

    /// Number of inactive handles ready for reuse
    pub fn inactive_count(&self) -> usize {
        self.free.len()
    }

    /// Total instances ever constructed for this pool
    pub fn total_created(&self) -> u64 {
        self.total_created
    }
}
