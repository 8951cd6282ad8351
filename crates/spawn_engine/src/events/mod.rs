//! Lifecycle notification system
//!
//! Observers register for spawn/despawn notifications. Dispatch is
//! synchronous and happens before control returns to the caller of the
//! spawn or despawn operation, so listeners always observe the instance in
//! a consistent state: "was spawned" fires after the instance is fully
//! activated, "was despawned" fires while the instance still has valid
//! placement. Each transition produces exactly one event.

use crate::spawn::{PrototypeId, SpawnHandle};

/// Kind of lifecycle transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEventKind {
    /// Instance finished activation and is visible to callers
    Spawned,
    /// Instance is about to be deactivated (state still valid)
    Despawned,
}

/// A single lifecycle transition
#[derive(Debug, Clone, Copy)]
pub struct LifecycleEvent {
    /// Which transition occurred
    pub kind: LifecycleEventKind,
    /// The handle that transitioned
    pub handle: SpawnHandle,
    /// Prototype the handle was spawned from
    pub prototype: PrototypeId,
    /// Simulation time at which the transition occurred (seconds)
    pub timestamp: f64,
}

/// Observer of lifecycle transitions
pub trait LifecycleListener {
    /// Handle a lifecycle event
    fn on_event(&mut self, event: &LifecycleEvent);
}

/// Synchronous dispatcher for lifecycle events
///
/// Unlike an input event chain there is no consumption: every registered
/// listener sees every transition.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn LifecycleListener>>,
}

impl EventBus {
    /// Create a new empty event bus
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener for all lifecycle events
    pub fn register(&mut self, listener: Box<dyn LifecycleListener>) {
        self.listeners.push(listener);
    }

    /// Dispatch a single event to every registered listener
    pub fn emit(&mut self, event: &LifecycleEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CountingListener {
        seen: Rc<RefCell<Vec<LifecycleEventKind>>>,
    }

    impl LifecycleListener for CountingListener {
        fn on_event(&mut self, event: &LifecycleEvent) {
            self.seen.borrow_mut().push(event.kind);
        }
    }

    #[test]
    fn test_every_listener_sees_every_event() {
        let mut bus = EventBus::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));

        bus.register(Box::new(CountingListener { seen: first.clone() }));
        bus.register(Box::new(CountingListener {
            seen: second.clone(),
        }));

        let event = LifecycleEvent {
            kind: LifecycleEventKind::Spawned,
            handle: SpawnHandle::default(),
            prototype: PrototypeId::default(),
            timestamp: 0.0,
        };
        bus.emit(&event);

        assert_eq!(first.borrow().len(), 1);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_events_arrive_in_emit_order() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        bus.register(Box::new(CountingListener { seen: seen.clone() }));

        let spawned = LifecycleEvent {
            kind: LifecycleEventKind::Spawned,
            handle: SpawnHandle::default(),
            prototype: PrototypeId::default(),
            timestamp: 0.0,
        };
        let despawned = LifecycleEvent {
            kind: LifecycleEventKind::Despawned,
            ..spawned
        };

        bus.emit(&spawned);
        bus.emit(&despawned);

        assert_eq!(
            *seen.borrow(),
            vec![LifecycleEventKind::Spawned, LifecycleEventKind::Despawned]
        );
    }
}
