//! Spawn registry
//!
//! Single entry point for spawn/despawn. The registry owns every pool,
//! routes spawn requests to the right pool (or falls back to plain
//! construction for prototypes that do not opt into pooling), drives the
//! delayed-despawn scheduler, and fires lifecycle notifications.
//!
//! The registry is an explicitly constructed context object, not a global:
//! the simulation root creates one and passes it down, so isolated
//! simulations (including tests) never share pool state.
//!
//! # Architecture
//!
//! ```text
//! caller ──spawn──▶ SpawnRegistry ──▶ Pool (free list, LIFO)
//!    ▲                  │   │
//!    │                  │   └──fallback──▶ plain construction
//!    └──handle──────────┘                  + persistence bridge
//! ```

use crate::config::PoolingConfig;
use crate::events::{EventBus, LifecycleEvent, LifecycleEventKind, LifecycleListener};
use crate::foundation::time::SimClock;
use crate::persist::{PersistedId, PersistenceBridge};
use crate::spawn::handle::{EntityRecord, HandleInfo, Instance, PoolSlot, SpawnHandle};
use crate::spawn::placement::{Placement, SceneId};
use crate::spawn::pool::Pool;
use crate::spawn::prototype::{Prototype, PrototypeId};
use crate::spawn::schedule::DespawnScheduler;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Counters for monitoring spawn/despawn traffic
#[derive(Debug, Clone, Default)]
pub struct RegistryStats {
    /// Spawns served since creation (pooled and fallback)
    pub total_spawned: u64,
    /// Despawns performed since creation
    pub total_despawned: u64,
    /// Spawns served by reactivating a pooled instance
    pub pooled_reuses: u64,
    /// Spawns served by plain construction (non-poolable prototypes)
    pub fallback_spawns: u64,
    /// Inactive instances destroyed through bulk eviction
    pub evicted: u64,
    /// Currently active instances
    pub active: usize,
    /// Most instances active simultaneously
    pub peak_active: usize,
}

/// Owner of all pools; routes spawn and despawn requests
pub struct SpawnRegistry {
    config: PoolingConfig,
    prototypes: SlotMap<PrototypeId, Prototype>,
    entities: SlotMap<SpawnHandle, EntityRecord>,
    pools: HashMap<PrototypeId, Pool>,
    scheduler: DespawnScheduler,
    events: EventBus,
    bridge: Option<Box<dyn PersistenceBridge>>,
    clock: SimClock,
    stats: RegistryStats,
}

impl Default for SpawnRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnRegistry {
    /// Create a registry with default configuration
    pub fn new() -> Self {
        Self::with_config(PoolingConfig::default())
    }

    /// Create a registry with custom configuration
    pub fn with_config(config: PoolingConfig) -> Self {
        Self {
            config,
            prototypes: SlotMap::with_key(),
            entities: SlotMap::with_key(),
            pools: HashMap::new(),
            scheduler: DespawnScheduler::default(),
            events: EventBus::new(),
            bridge: None,
            clock: SimClock::new(),
            stats: RegistryStats::default(),
        }
    }

    /// Register a prototype, creating (and optionally prewarming) its pool
    /// when the prototype opts into pooling.
    ///
    /// Prototypes are immutable once registered; the returned id is the
    /// identity pools are keyed by.
    pub fn register_prototype(&mut self, prototype: Prototype) -> PrototypeId {
        let pooled = prototype.is_pooled();
        let prewarm = self
            .config
            .prewarm
            .get(prototype.name())
            .copied()
            .unwrap_or(0);
        let name = prototype.name().to_string();
        let id = self.prototypes.insert(prototype);

        if pooled {
            let capacity = self.config.initial_pool_capacity.max(prewarm);
            let mut pool = Pool::new(id, capacity);
            for _ in 0..prewarm {
                let instance = self.prototypes[id].instantiate();
                let slot = PoolSlot {
                    pool: id,
                    instance_id: pool.allot_instance_id(),
                };
                let handle = self.entities.insert(EntityRecord {
                    prototype: id,
                    spawned: false,
                    pool: Some(slot),
                    pending_despawn: None,
                    instance,
                });
                pool.release(handle, slot);
            }
            log::info!("created pool for prototype '{name}' ({prewarm} prewarmed)");
            self.pools.insert(id, pool);
        }

        id
    }

    /// Register a listener for spawn/despawn notifications
    pub fn add_listener(&mut self, listener: Box<dyn LifecycleListener>) {
        self.events.register(listener);
    }

    /// Install the external persistence bridge
    pub fn set_persistence_bridge(&mut self, bridge: Box<dyn PersistenceBridge>) {
        self.bridge = Some(bridge);
    }

    /// Spawn an instance of `prototype` at `placement`.
    ///
    /// Pooled prototypes reuse the most recently despawned instance when one
    /// is available and construct a fresh one otherwise. Prototypes without
    /// the pooling capability degrade transparently to plain construction,
    /// forwarding `persisted` to the persistence bridge when the prototype
    /// is persistable. Either way the returned handle is fully activated:
    /// placement applied exactly once and the "was spawned" notification
    /// already fired.
    ///
    /// # Panics
    ///
    /// Panics if `prototype` is not registered (stale or foreign id), or if
    /// `placement` contains non-finite values. Both are programmer errors;
    /// failing fast here beats corrupting pool bookkeeping later.
    pub fn spawn(
        &mut self,
        prototype: PrototypeId,
        placement: Placement,
        persisted: Option<PersistedId>,
    ) -> SpawnHandle {
        let proto = self
            .prototypes
            .get(prototype)
            .unwrap_or_else(|| panic!("spawn from unknown prototype {prototype:?}"));
        placement.validate();

        let pooled = proto.is_pooled();
        let persistable = proto.is_persistable();

        // Parent transform must be captured before any entity mutation.
        let parent_world = placement.parent.and_then(|parent| {
            self.entities
                .get(parent)
                .filter(|record| record.spawned)
                .map(|record| record.instance.transform.clone())
        });

        let handle = if pooled {
            let capacity = self.config.initial_pool_capacity;
            let pool = self.pools.entry(prototype).or_insert_with(|| {
                log::info!("lazily created pool for prototype {prototype:?}");
                Pool::new(prototype, capacity)
            });

            if let Some(handle) = pool.acquire() {
                let record = self
                    .entities
                    .get_mut(handle)
                    .expect("pooled handle missing from slot map");
                assert!(
                    !record.spawned,
                    "reactivating already active handle {handle:?}"
                );
                record.instance.transform = placement
                    .resolve(&record.instance.transform, parent_world.as_ref());
                record.instance.parent = placement.parent;
                if let Some(scene) = placement.scene {
                    record.instance.scene = scene;
                }
                record.spawned = true;
                self.stats.pooled_reuses += 1;
                log::debug!("reused pooled instance {handle:?} of {prototype:?}");
                handle
            } else {
                let slot = PoolSlot {
                    pool: prototype,
                    instance_id: pool.allot_instance_id(),
                };
                let mut instance = proto.instantiate();
                instance.transform =
                    placement.resolve(&instance.transform, parent_world.as_ref());
                instance.parent = placement.parent;
                if let Some(scene) = placement.scene {
                    instance.scene = scene;
                }
                self.entities.insert(EntityRecord {
                    prototype,
                    spawned: true,
                    pool: Some(slot),
                    pending_despawn: None,
                    instance,
                })
            }
        } else {
            // Fallback path: plain construction, no pool entry anywhere.
            let mut instance = proto.instantiate();
            instance.transform = placement.resolve(&instance.transform, parent_world.as_ref());
            instance.parent = placement.parent;
            if let Some(scene) = placement.scene {
                instance.scene = scene;
            }
            if persistable {
                instance.persisted_id = persisted;
            } else if persisted.is_some() {
                log::debug!("persisted id supplied for ephemeral prototype {prototype:?}; ignored");
            }
            let handle = self.entities.insert(EntityRecord {
                prototype,
                spawned: true,
                pool: None,
                pending_despawn: None,
                instance,
            });
            if persistable {
                if let (Some(bridge), Some(id)) = (self.bridge.as_mut(), persisted) {
                    bridge.setup_dynamic_instance(id);
                }
            }
            self.stats.fallback_spawns += 1;
            handle
        };

        self.stats.total_spawned += 1;
        self.stats.active += 1;
        self.stats.peak_active = self.stats.peak_active.max(self.stats.active);

        // Observers see the handle only once it is fully activated.
        let event = LifecycleEvent {
            kind: LifecycleEventKind::Spawned,
            handle,
            prototype,
            timestamp: self.clock.now(),
        };
        self.events.emit(&event);

        handle
    }

    /// Despawn a handle immediately.
    ///
    /// Fires the "was despawned" notification first (listeners observe the
    /// instance while its placement is still valid), then deactivates:
    /// pooled handles return to their free list in constant time, non-pooled
    /// handles are permanently destroyed and reported to the persistence
    /// bridge. Any pending delayed despawn for the handle is canceled.
    ///
    /// Despawning a handle that is already inactive (or was already
    /// destroyed) is a recoverable no-op: timer-driven and event-driven
    /// despawn paths can race, so redundancy is logged, not fatal. Returns
    /// `true` when a despawn was actually performed.
    pub fn despawn(&mut self, handle: SpawnHandle) -> bool {
        let Some(record) = self.entities.get_mut(handle) else {
            log::warn!("despawn of unknown or destroyed handle {handle:?}; ignored");
            return false;
        };
        if !record.spawned {
            log::warn!("redundant despawn of inactive handle {handle:?}; ignored");
            return false;
        }

        if record.pending_despawn.take().is_some() {
            self.scheduler.cancel(handle);
        }

        let prototype = record.prototype;
        let pool_slot = record.pool;
        let persisted = record.instance.persisted_id;

        let event = LifecycleEvent {
            kind: LifecycleEventKind::Despawned,
            handle,
            prototype,
            timestamp: self.clock.now(),
        };
        self.events.emit(&event);

        // Borrow again: the event dispatch above needed the record borrow gone.
        self.entities[handle].spawned = false;

        match pool_slot {
            Some(slot) => {
                let pool = self
                    .pools
                    .get_mut(&slot.pool)
                    .expect("pool missing for pooled handle");
                pool.release(handle, slot);
                log::debug!("pooled {handle:?} back into {:?}", slot.pool);
            }
            None => {
                self.entities.remove(handle);
                if let (Some(bridge), Some(id)) = (self.bridge.as_mut(), persisted) {
                    bridge.register_destroyed(id);
                }
                log::debug!("destroyed non-pooled {handle:?}");
            }
        }

        self.stats.total_despawned += 1;
        self.stats.active = self.stats.active.saturating_sub(1);
        true
    }

    /// Schedule a despawn of `handle` after `delay_seconds` of simulation
    /// time; `update` performs it when the delay elapses.
    ///
    /// A non-positive delay despawns immediately. Scheduling again replaces
    /// any previously pending delayed despawn for the handle. Returns `true`
    /// if the despawn was performed or scheduled.
    pub fn despawn_after(&mut self, handle: SpawnHandle, delay_seconds: f32) -> bool {
        if delay_seconds <= 0.0 {
            return self.despawn(handle);
        }

        let due = self.clock.now() + f64::from(delay_seconds);
        let Some(record) = self.entities.get_mut(handle) else {
            log::warn!("delayed despawn of unknown handle {handle:?}; ignored");
            return false;
        };
        if !record.spawned {
            log::warn!("delayed despawn of inactive handle {handle:?}; ignored");
            return false;
        }

        if record.pending_despawn.is_some() {
            self.scheduler.cancel(handle);
        }
        let ticket = self.scheduler.schedule(handle, due);
        record.pending_despawn = Some(ticket);
        log::debug!("scheduled despawn of {handle:?} in {delay_seconds}s (ticket {ticket})");
        true
    }

    /// Advance the simulation clock and fire due delayed despawns.
    ///
    /// Call once per update step. Delayed despawns whose handle was
    /// despawned (and possibly reused) in the meantime are detected by
    /// ticket mismatch and skipped.
    pub fn update(&mut self, delta_time: f32) {
        self.clock.advance(delta_time);

        let due = self.scheduler.drain_due(self.clock.now());
        for (handle, ticket) in due {
            let live = self
                .entities
                .get(handle)
                .is_some_and(|record| record.spawned && record.pending_despawn == Some(ticket));
            if live {
                self.entities[handle].pending_despawn = None;
                self.despawn(handle);
            } else {
                log::debug!("stale delayed despawn ticket {ticket} for {handle:?}; skipped");
            }
        }
    }

    /// Destroy every inactive handle of one pool (`Some`) or all pools
    /// (`None`), emptying the free lists. Active handles are never touched.
    ///
    /// Intended for scope boundaries such as level transitions. Calling it
    /// with nothing to evict is a no-op. Returns the number of instances
    /// destroyed.
    pub fn clear_inactive(&mut self, prototype: Option<PrototypeId>) -> usize {
        let evicted: Vec<SpawnHandle> = match prototype {
            Some(id) => match self.pools.get_mut(&id) {
                Some(pool) => pool.evict(),
                None => {
                    log::debug!("clear_inactive for {id:?} without a pool; no-op");
                    Vec::new()
                }
            },
            None => {
                let mut all = Vec::new();
                for pool in self.pools.values_mut() {
                    all.extend(pool.evict());
                }
                all
            }
        };

        for handle in &evicted {
            self.scheduler.cancel(*handle);
            self.entities.remove(*handle);
        }

        let count = evicted.len();
        if count > 0 {
            self.stats.evicted += count as u64;
            log::info!("evicted {count} inactive instances");
        }
        count
    }

    /// Despawn every active handle owned by `scene`. Returns the number of
    /// handles despawned.
    pub fn despawn_scene(&mut self, scene: SceneId) -> usize {
        let targets: Vec<SpawnHandle> = self
            .entities
            .iter()
            .filter(|(_, record)| record.spawned && record.instance.scene == scene)
            .map(|(handle, _)| handle)
            .collect();

        let mut count = 0;
        for handle in targets {
            if self.despawn(handle) {
                count += 1;
            }
        }
        count
    }

    /// Access the instance behind an active handle
    pub fn instance(&self, handle: SpawnHandle) -> Option<&Instance> {
        self.entities
            .get(handle)
            .filter(|record| record.spawned)
            .map(|record| &record.instance)
    }

    /// Mutable access to the instance behind an active handle
    pub fn instance_mut(&mut self, handle: SpawnHandle) -> Option<&mut Instance> {
        self.entities
            .get_mut(handle)
            .filter(|record| record.spawned)
            .map(|record| &mut record.instance)
    }

    /// Whether `handle` is currently spawned
    pub fn is_spawned(&self, handle: SpawnHandle) -> bool {
        self.entities
            .get(handle)
            .is_some_and(|record| record.spawned)
    }

    /// Bookkeeping snapshot for a handle (spawned or pooled-inactive)
    pub fn handle_info(&self, handle: SpawnHandle) -> Option<HandleInfo> {
        self.entities.get(handle).map(EntityRecord::info)
    }

    /// Look up a registered prototype
    pub fn prototype(&self, id: PrototypeId) -> Option<&Prototype> {
        self.prototypes.get(id)
    }

    /// Whether a pool exists for `prototype`
    pub fn has_pool(&self, prototype: PrototypeId) -> bool {
        self.pools.contains_key(&prototype)
    }

    /// Inactive count and total-ever-created count for a prototype's pool
    pub fn pool_stats(&self, prototype: PrototypeId) -> Option<(usize, u64)> {
        self.pools
            .get(&prototype)
            .map(|pool| (pool.inactive_count(), pool.total_created()))
    }

    /// Number of currently active instances
    pub fn active_count(&self) -> usize {
        self.stats.active
    }

    /// Number of delayed despawns not yet due
    pub fn pending_despawn_count(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Snapshot of registry counters
    pub fn stats(&self) -> RegistryStats {
        self.stats.clone()
    }

    /// Current simulation time in seconds
    pub fn time(&self) -> f64 {
        self.clock.now()
    }
}
