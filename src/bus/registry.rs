//! # Subscription registry shared by both bus variants.
//!
//! Maps a topic to the set of observers subscribed to it. The registry itself is
//! not synchronised: each bus wraps it in its own lock (a `Mutex` for the sync bus,
//! an `RwLock` for the async bus), so mutations and snapshots are atomic relative
//! to dispatch.
//!
//! ## Rules
//! - A `(topic, observer)` pair is stored at most once (instance identity).
//! - Removing an absent pair is a no-op.
//! - A topic whose last observer leaves is dropped.
//! - Snapshots are copies: later changes only affect later publishes.
//! - Enumeration order is insertion order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::observers::{ObserverId, ObserverRef};

/// Topic → observers mapping owned by one bus.
#[derive(Default)]
pub(crate) struct Registry {
    topics: HashMap<Arc<str>, Vec<ObserverRef>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `observer` to `topic`. Returns `false` if it was already there.
    pub(crate) fn subscribe(&mut self, topic: &str, observer: ObserverRef) -> bool {
        let id = ObserverId::of(&observer);
        let subs = self.topics.entry(Arc::from(topic)).or_default();
        if subs.iter().any(|o| ObserverId::of(o) == id) {
            return false;
        }
        subs.push(observer);
        true
    }

    /// Removes `observer` from `topic`. Returns `false` if it was not there.
    pub(crate) fn unsubscribe(&mut self, topic: &str, observer: &ObserverRef) -> bool {
        let id = ObserverId::of(observer);
        let Some(subs) = self.topics.get_mut(topic) else {
            return false;
        };
        let before = subs.len();
        subs.retain(|o| ObserverId::of(o) != id);
        let removed = subs.len() != before;
        if subs.is_empty() {
            self.topics.remove(topic);
        }
        removed
    }

    /// Current observers of `topic`, in subscription order.
    pub(crate) fn snapshot(&self, topic: &str) -> Vec<ObserverRef> {
        self.topics.get(topic).cloned().unwrap_or_default()
    }

    /// Number of observers on `topic`.
    pub(crate) fn count(&self, topic: &str) -> usize {
        self.topics.get(topic).map_or(0, Vec::len)
    }

    /// Sorted list of topics with at least one observer.
    pub(crate) fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.topics.keys().map(|t| t.to_string()).collect();
        names.sort_unstable();
        names
    }
}
