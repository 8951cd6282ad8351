//! Persistence bridge interface
//!
//! The engine does not persist anything itself. When an instance that is
//! *not* pool-managed is created with a caller-supplied stable identifier,
//! the registry forwards that identifier to an external bridge so the save
//! system can track the dynamically created object; when such an instance
//! is permanently destroyed, the bridge is told so the identifier can be
//! retired. Pool-managed instances never touch the bridge, because despawn
//! does not destroy them.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned to a dynamically created instance for
/// save/restore purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersistedId(pub u64);

/// External collaborator that tracks dynamically created instances.
///
/// Both callbacks are invoked at most once per instance: registration when
/// the instance is constructed outside any pool, deregistration when it is
/// permanently destroyed.
pub trait PersistenceBridge {
    /// A dynamically created, non-pooled instance received this stable id.
    fn setup_dynamic_instance(&mut self, id: PersistedId);

    /// A previously registered instance was permanently destroyed.
    fn register_destroyed(&mut self, id: PersistedId);
}
