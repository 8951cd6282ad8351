//! Delayed despawn scheduling
//!
//! Delayed despawns are explicit, cancelable tasks rather than ambient
//! timer callbacks. Every scheduled despawn carries a ticket; the registry
//! records the live ticket on the handle and ignores any callback whose
//! ticket no longer matches. The ticket check is what makes a stale
//! callback harmless even if it survives cancellation: a handle that was
//! despawned early and reused for an unrelated spawn has either no pending
//! ticket or a newer one.

use crate::spawn::handle::SpawnHandle;

#[derive(Debug, Clone, Copy)]
struct PendingDespawn {
    due: f64,
    handle: SpawnHandle,
    ticket: u64,
}

/// Cooperative scheduler for pending despawns, driven by the simulation clock
#[derive(Debug, Default)]
pub(crate) struct DespawnScheduler {
    pending: Vec<PendingDespawn>,
    next_ticket: u64,
}

impl DespawnScheduler {
    /// Schedule a despawn of `handle` at absolute time `due`, returning the
    /// ticket identifying this request.
    pub fn schedule(&mut self, handle: SpawnHandle, due: f64) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.push(PendingDespawn {
            due,
            handle,
            ticket,
        });
        ticket
    }

    /// Drop every pending despawn for `handle`
    pub fn cancel(&mut self, handle: SpawnHandle) {
        self.pending.retain(|entry| entry.handle != handle);
    }

    /// Remove and return every despawn due at or before `now`, in the order
    /// it was scheduled.
    pub fn drain_due(&mut self, now: f64) -> Vec<(SpawnHandle, u64)> {
        let mut due = Vec::new();
        self.pending.retain(|entry| {
            if entry.due <= now {
                due.push((entry.handle, entry.ticket));
                false
            } else {
                true
            }
        });
        due
    }

    /// Number of despawns still waiting to come due
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn test_handles(n: usize) -> Vec<SpawnHandle> {
        let mut handles: SlotMap<SpawnHandle, ()> = SlotMap::with_key();
        (0..n).map(|_| handles.insert(())).collect()
    }

    #[test]
    fn test_drain_only_returns_due_entries() {
        let handles = test_handles(2);
        let mut scheduler = DespawnScheduler::default();

        scheduler.schedule(handles[0], 1.0);
        scheduler.schedule(handles[1], 5.0);

        let due = scheduler.drain_due(2.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].0, handles[0]);
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn test_cancel_removes_all_entries_for_handle() {
        let handles = test_handles(2);
        let mut scheduler = DespawnScheduler::default();

        scheduler.schedule(handles[0], 1.0);
        scheduler.schedule(handles[0], 2.0);
        scheduler.schedule(handles[1], 3.0);

        scheduler.cancel(handles[0]);
        assert_eq!(scheduler.pending_count(), 1);

        let due = scheduler.drain_due(10.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].0, handles[1]);
    }

    #[test]
    fn test_tickets_are_unique() {
        let handles = test_handles(1);
        let mut scheduler = DespawnScheduler::default();

        let first = scheduler.schedule(handles[0], 1.0);
        let second = scheduler.schedule(handles[0], 1.0);
        assert_ne!(first, second);
    }
}
