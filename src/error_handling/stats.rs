//! Rewrite statistics tracking.
//!
//! Counters for every [`RewriteEvent`], shareable by reference across the
//! link passes, the watcher and the driver.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::RewriteEvent;

/// Processing statistics for one run.
///
/// All event kinds are initialized to zero on creation, so incrementing never
/// needs a mutable borrow.
pub struct RewriteStats {
    events: HashMap<RewriteEvent, AtomicUsize>,
}

impl RewriteStats {
    pub fn new() -> Self {
        let mut events = HashMap::new();
        for event in RewriteEvent::iter() {
            events.insert(event, AtomicUsize::new(0));
        }
        RewriteStats { events }
    }

    /// Increment an event counter.
    pub fn increment(&self, event: RewriteEvent) {
        self.add(event, 1);
    }

    /// Add `n` to an event counter.
    pub fn add(&self, event: RewriteEvent, n: usize) {
        if let Some(counter) = self.events.get(&event) {
            counter.fetch_add(n, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in RewriteStats initialization.",
                event
            );
        }
    }

    /// Get the count for an event kind.
    pub fn get(&self, event: RewriteEvent) -> usize {
        self.events
            .get(&event)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Folds another run's counters into this one.
    pub fn merge(&self, other: &RewriteStats) {
        for event in RewriteEvent::iter() {
            self.add(event, other.get(event));
        }
    }

    /// Total across all event kinds.
    pub fn total(&self) -> usize {
        RewriteEvent::iter().map(|e| self.get(e)).sum()
    }
}

impl Default for RewriteStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RewriteStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for event in RewriteEvent::iter() {
            map.entry(&event, &self.get(event));
        }
        map.finish()
    }
}
