//! Instance pooling and spawn/despawn lifecycle
//!
//! Provides transparent pooling: callers spawn and despawn prototypes the
//! same way whether or not a given prototype opts into pooling.

pub mod handle;
pub mod placement;
pub mod pool;
pub mod prototype;
pub mod registry;

pub(crate) mod schedule;


pub use handle::{HandleInfo, Instance, SpawnHandle};
pub use placement::{Placement, SceneId, Space};
pub use pool::Pool;
pub use prototype::{PersistenceMode, PoolingMode, Prototype, PrototypeId};
pub use registry::{RegistryStats, SpawnRegistry};
