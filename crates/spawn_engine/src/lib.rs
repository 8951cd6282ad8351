//! # Spawn Engine
//!
//! An instance pooling and spawn/despawn lifecycle engine.
//!
//! Callers spawn and despawn prototypes through a single registry and never
//! need to know whether a given prototype participates in pooling: poolable
//! prototypes recycle their instances through per-prototype free lists,
//! everything else degrades transparently to plain construction and
//! destruction.
//!
//! ## Features
//!
//! - **Transparent Pooling**: One spawn/despawn API regardless of pooling opt-in
//! - **Stable Identity**: Generational handles that never alias a reused slot
//! - **Delayed Despawn**: Cancelable scheduled despawns on cooperative sim time
//! - **Lifecycle Notifications**: Synchronous spawned/despawned events
//! - **Persistence Bridge**: Stable-ID hooks for dynamically created instances
//! - **Bulk Eviction**: Per-pool or global reclamation of inactive instances
//!
//! ## Quick Start
//!
//! ```rust
//! use spawn_engine::prelude::*;
//!
//! let mut registry = SpawnRegistry::new();
//! let bolt = registry.register_prototype(Prototype::pooled("bolt"));
//!
//! let handle = registry.spawn(bolt, Placement::at(Vec3::new(0.0, 1.0, 0.0)), None);
//! registry.despawn(handle);
//!
//! // The despawned instance is reused rather than reconstructed.
//! let reused = registry.spawn(bolt, Placement::default(), None);
//! assert_eq!(reused, handle);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod persist;
pub mod spawn;

pub use spawn::{Placement, Prototype, PrototypeId, SpawnHandle, SpawnRegistry};

/// Common imports for engine users
pub mod prelude {
    pub use crate::config::{Config, PoolingConfig};
    pub use crate::events::{LifecycleEvent, LifecycleEventKind, LifecycleListener};
    pub use crate::foundation::{
        math::{Quat, Transform, Vec3},
        time::SimClock,
    };
    pub use crate::persist::{PersistedId, PersistenceBridge};
    pub use crate::spawn::{
        HandleInfo, Placement, Prototype, PrototypeId, RegistryStats, SceneId, Space,
        SpawnHandle, SpawnRegistry,
    };
}
