//! Prototype definitions
//!
//! A prototype is the immutable template an instance is constructed from
//! and the identity pools are keyed by. Whether a prototype participates
//! in pooling, and whether its instances are tracked by the persistence
//! bridge, are explicit capabilities resolved once at spawn time rather
//! than probed dynamically.

use crate::foundation::math::Transform;
use crate::spawn::handle::Instance;
use crate::spawn::placement::SceneId;

slotmap::new_key_type! {
    /// Stable identity of a registered prototype.
    ///
    /// Pools are keyed by this id, so two structurally identical prototypes
    /// registered separately get separate pools.
    pub struct PrototypeId;
}

/// Whether instances of a prototype are reclaimed through a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolingMode {
    /// Despawned instances return to a per-prototype free list for reuse
    Pooled,
    /// Despawned instances are permanently destroyed
    Unpooled,
}

/// Whether instances of a prototype are tracked by the persistence bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Non-pooled instances carry a stable id registered with the bridge
    Persistable,
    /// Instances leave no trace when destroyed
    Ephemeral,
}

/// Immutable template an instance is constructed from
#[derive(Debug, Clone)]
pub struct Prototype {
    name: String,
    pooling: PoolingMode,
    persistence: PersistenceMode,
    template: Transform,
    default_scene: SceneId,
}

impl Prototype {
    /// Create a prototype whose instances are pooled on despawn
    pub fn pooled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pooling: PoolingMode::Pooled,
            persistence: PersistenceMode::Ephemeral,
            template: Transform::identity(),
            default_scene: SceneId::ROOT,
        }
    }

    /// Create a prototype whose instances are destroyed on despawn
    pub fn unpooled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pooling: PoolingMode::Unpooled,
            persistence: PersistenceMode::Ephemeral,
            template: Transform::identity(),
            default_scene: SceneId::ROOT,
        }
    }

    /// Set the template transform new instances start from
    #[must_use]
    pub fn with_template(mut self, template: Transform) -> Self {
        self.template = template;
        self
    }

    /// Mark instances as tracked by the persistence bridge
    #[must_use]
    pub fn persistable(mut self) -> Self {
        self.persistence = PersistenceMode::Persistable;
        self
    }

    /// Set the scene new instances belong to by default
    #[must_use]
    pub fn with_default_scene(mut self, scene: SceneId) -> Self {
        self.default_scene = scene;
        self
    }

    /// Prototype name (used for prewarm configuration lookups)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether instances are reclaimed through a pool
    pub fn is_pooled(&self) -> bool {
        self.pooling == PoolingMode::Pooled
    }

    /// Whether instances are tracked by the persistence bridge
    pub fn is_persistable(&self) -> bool {
        self.persistence == PersistenceMode::Persistable
    }

    /// Factory operation: construct a fresh instance from the template
    pub(crate) fn instantiate(&self) -> Instance {
        Instance {
            transform: self.template.clone(),
            parent: None,
            scene: self.default_scene,
            persisted_id: None,
        }
    }
}
