//! Entity handle and instance data

use crate::foundation::math::Transform;
use crate::persist::PersistedId;
use crate::spawn::placement::SceneId;
use crate::spawn::prototype::PrototypeId;

slotmap::new_key_type! {
    /// Identity of one live-or-pooled instance.
    ///
    /// Handles are generational: once the underlying instance is permanently
    /// destroyed (non-pooled despawn or eviction), old copies of the handle
    /// stop resolving instead of aliasing a later instance.
    pub struct SpawnHandle;
}

/// The concrete resource behind a handle: placement and ownership state
/// that survives across pooled reuse cycles.
#[derive(Debug, Clone)]
pub struct Instance {
    /// World-space transform
    pub transform: Transform,
    /// Containing instance, if any
    pub parent: Option<SpawnHandle>,
    /// Logical scene this instance belongs to
    pub scene: SceneId,
    /// Stable identifier assigned via the persistence bridge (non-pooled only)
    pub persisted_id: Option<PersistedId>,
}

/// Pool membership of a pooled handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PoolSlot {
    /// Pool that owns the handle (pools are keyed by prototype)
    pub pool: PrototypeId,
    /// Pool-local id, assigned once at construction and never reused while
    /// any handle carrying it is alive
    pub instance_id: u32,
}

/// Internal per-handle bookkeeping record
#[derive(Debug)]
pub(crate) struct EntityRecord {
    /// Prototype this handle was instantiated from
    pub prototype: PrototypeId,
    /// True strictly between activation and deactivation
    pub spawned: bool,
    /// Pool membership; `None` for instances created outside any pool
    pub pool: Option<PoolSlot>,
    /// Ticket of a pending delayed despawn, if one is scheduled
    pub pending_despawn: Option<u64>,
    /// The concrete resource
    pub instance: Instance,
}

/// Read-only snapshot of a handle's bookkeeping state
#[derive(Debug, Clone, Copy)]
pub struct HandleInfo {
    /// Prototype the handle was instantiated from
    pub prototype: PrototypeId,
    /// Whether the handle is currently spawned
    pub spawned: bool,
    /// Owning pool, or `None` for non-pooled instances
    pub pool: Option<PrototypeId>,
    /// Pool-local instance id, or `None` for non-pooled instances
    pub instance_id: Option<u32>,
}

impl EntityRecord {
    pub(crate) fn info(&self) -> HandleInfo {
        HandleInfo {
            prototype: self.prototype,
            spawned: self.spawned,
            pool: self.pool.map(|slot| slot.pool),
            instance_id: self.pool.map(|slot| slot.instance_id),
        }
    }
}
