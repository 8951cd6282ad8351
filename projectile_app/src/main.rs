//! Projectile pooling demo
//!
//! Simulates a turret firing pooled bolts over a fixed-step run: bolts are
//! spawned from the pool, live for a couple of seconds, and return to the
//! free list through delayed despawn. Halfway through, an unpooled wreck
//! prop is created with a persisted id to exercise the plain-construction
//! fallback and the persistence bridge. The run ends with a scene teardown
//! and a bulk eviction, then prints the registry counters.

use rand::Rng;
use spawn_engine::foundation::logging;
use spawn_engine::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// Simulation configuration
const SIM_SECONDS: f32 = 12.0;
const STEP_SECONDS: f32 = 1.0 / 60.0;
const FIRE_INTERVAL: f32 = 0.25;
const BOLT_LIFETIME: f32 = 2.0;
const BOLT_PREWARM: usize = 8;
const MUZZLE_SPREAD: f32 = 0.35;

const ARENA: SceneId = SceneId(1);

/// Counts lifecycle transitions as they are dispatched
#[derive(Default)]
struct TransitionCounter {
    spawned: u64,
    despawned: u64,
}

struct CountingListener {
    counter: Rc<RefCell<TransitionCounter>>,
}

impl LifecycleListener for CountingListener {
    fn on_event(&mut self, event: &LifecycleEvent) {
        let mut counter = self.counter.borrow_mut();
        match event.kind {
            LifecycleEventKind::Spawned => counter.spawned += 1,
            LifecycleEventKind::Despawned => counter.despawned += 1,
        }
        log::trace!(
            "lifecycle: {:?} {:?} at t={:.2}",
            event.kind,
            event.handle,
            event.timestamp
        );
    }
}

/// Stand-in for the save system on the other side of the bridge
#[derive(Default)]
struct SaveSystemStub;

impl PersistenceBridge for SaveSystemStub {
    fn setup_dynamic_instance(&mut self, id: PersistedId) {
        log::info!("save system now tracks dynamic instance {id:?}");
    }

    fn register_destroyed(&mut self, id: PersistedId) {
        log::info!("save system retired instance {id:?}");
    }
}

struct ProjectileApp {
    registry: SpawnRegistry,
    counter: Rc<RefCell<TransitionCounter>>,
    bolt: PrototypeId,
    wreck: PrototypeId,
    turret: SpawnHandle,
}

impl ProjectileApp {
    fn new() -> Self {
        let mut config = PoolingConfig::default();
        config.prewarm.insert("bolt".to_string(), BOLT_PREWARM);

        let mut registry = SpawnRegistry::with_config(config);
        let counter = Rc::new(RefCell::new(TransitionCounter::default()));
        registry.add_listener(Box::new(CountingListener {
            counter: counter.clone(),
        }));
        registry.set_persistence_bridge(Box::new(SaveSystemStub));

        let bolt = registry.register_prototype(Prototype::pooled("bolt"));
        let turret_proto = registry.register_prototype(
            Prototype::pooled("turret").with_default_scene(ARENA),
        );
        let wreck = registry.register_prototype(Prototype::unpooled("wreck").persistable());

        let turret = registry.spawn(
            turret_proto,
            Placement::at(Vec3::new(0.0, 1.5, 0.0)).in_scene(ARENA),
            None,
        );

        Self {
            registry,
            counter,
            bolt,
            wreck,
            turret,
        }
    }

    fn fire_bolt(&mut self) {
        let mut rng = rand::thread_rng();
        let spread = Vec3::new(
            rng.gen_range(-MUZZLE_SPREAD..MUZZLE_SPREAD),
            rng.gen_range(-MUZZLE_SPREAD..MUZZLE_SPREAD),
            0.0,
        );

        // Muzzle offset is local to the turret; lifetime drives reclamation.
        let handle = self.registry.spawn(
            self.bolt,
            Placement::at(Vec3::new(0.0, 0.5, 1.0) + spread)
                .with_parent(self.turret)
                .local()
                .in_scene(ARENA),
            None,
        );
        self.registry.despawn_after(handle, BOLT_LIFETIME);
    }

    fn run(&mut self) {
        let steps = (SIM_SECONDS / STEP_SECONDS) as u32;
        let mut next_fire = 0.0_f64;
        let mut wreck_handle = None;

        for step in 0..steps {
            let now = self.registry.time();

            if now >= next_fire {
                self.fire_bolt();
                next_fire = now + f64::from(FIRE_INTERVAL);
            }

            // Drop a persistable wreck into the arena halfway through and
            // clean it up two seconds later.
            if step == steps / 2 {
                let handle = self.registry.spawn(
                    self.wreck,
                    Placement::at(Vec3::new(4.0, 0.0, 12.0)).in_scene(ARENA),
                    Some(PersistedId(9001)),
                );
                log::info!("wreck spawned via fallback path: {handle:?}");
                wreck_handle = Some((handle, now + 2.0));
            }
            if let Some((handle, due)) = wreck_handle {
                if now >= due {
                    self.registry.despawn(handle);
                    wreck_handle = None;
                }
            }

            self.registry.update(STEP_SECONDS);
        }

        log::info!(
            "simulation finished: {} active, {} despawns still pending",
            self.registry.active_count(),
            self.registry.pending_despawn_count()
        );

        // Level transition: tear down the arena, then reclaim the pools.
        let torn_down = self.registry.despawn_scene(ARENA);
        log::info!("arena teardown despawned {torn_down} instances");

        let evicted = self.registry.clear_inactive(None);
        log::info!("bulk eviction destroyed {evicted} inactive instances");
    }

    fn report(&self) {
        let stats = self.registry.stats();
        let counter = self.counter.borrow();

        log::info!("--- registry counters ---");
        log::info!("total spawned:      {}", stats.total_spawned);
        log::info!("total despawned:    {}", stats.total_despawned);
        log::info!("pooled reuses:      {}", stats.pooled_reuses);
        log::info!("fallback spawns:    {}", stats.fallback_spawns);
        log::info!("evicted:            {}", stats.evicted);
        log::info!("peak active:        {}", stats.peak_active);
        log::info!(
            "listener saw {} spawns / {} despawns",
            counter.spawned,
            counter.despawned
        );
    }
}

fn main() {
    logging::init_with_level(log::LevelFilter::Info);

    log::info!("Starting projectile pooling demo");
    let mut app = ProjectileApp::new();
    app.run();
    app.report();
    log::info!("Projectile pooling demo completed successfully");
}
