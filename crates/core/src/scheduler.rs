//! Scheduler - deferred engine events on a virtual clock
//!
//! The engine never reads the wall clock. Front ends advance time explicitly
//! (`RhymeMatchingEngine::tick`), which lets tests step through deferred
//! removals deterministically.

use crate::types::TileId;

/// Deferred engine work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEvent {
    /// Remove a matched pair and recompute exposure
    RemovePair([TileId; 2]),
    /// Return a tile's transient animation state to idle
    Settle(TileId),
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: u64,
    seq: u64,
    event: ScheduledEvent,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    queue: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Schedule `event` to fire `delay_ms` after the current virtual time
    pub fn schedule_in(&mut self, delay_ms: u32, event: ScheduledEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due_ms: self.now_ms + delay_ms as u64,
            seq,
            event,
        });
    }

    /// Drop every pending event (virtual time is kept)
    pub fn cancel_all(&mut self) {
        self.queue.clear();
    }

    /// Whether any pending event satisfies `pred`
    pub fn has_pending(&self, mut pred: impl FnMut(&ScheduledEvent) -> bool) -> bool {
        self.queue.iter().any(|e| pred(&e.event))
    }

    /// Advance virtual time and return the events that became due,
    /// ordered by due time then by scheduling order.
    pub fn advance(&mut self, elapsed_ms: u32) -> Vec<ScheduledEvent> {
        self.now_ms += elapsed_ms as u64;
        let now = self.now_ms;

        let mut due: Vec<Entry> = Vec::new();
        self.queue.retain(|e| {
            if e.due_ms <= now {
                due.push(e.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| (e.due_ms, e.seq));
        due.into_iter().map(|e| e.event).collect()
    }
}
