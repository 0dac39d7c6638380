//! # SyncEventBus: serialised, in-line delivery
//!
//! Every operation (subscribe, unsubscribe, publish) runs under one exclusive lock,
//! so no two bus operations ever overlap. A publish is one atomic unit:
//!
//! ```text
//! publish(ev)
//!   ├─► lock
//!   ├─► snapshot(ev.topic)
//!   ├─► o1.on_change(&ev) ─► o2.on_change(&ev) ─► ... (on the caller's task)
//!   │        └─ Err / panic collected as Failure, delivery continues
//!   ├─► reporter.report(&failure) for each collected failure
//!   └─► unlock
//! ```
//!
//! ## Limitations
//! - A hanging handler blocks the whole bus (no handler timeouts).
//! - Handlers must not call back into the same bus: the lock is not reentrant.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::bus::{EventBus, registry::Registry};
use crate::config::BusConfig;
use crate::events::Event;
use crate::observers::{ObserverRef, invoke};
use crate::reporters::{Failure, LogReporter, Report};

/// Event bus delivering on the publishing task, one handler at a time.
pub struct SyncEventBus {
    cfg: BusConfig,
    registry: Mutex<Registry>,
    reporter: Arc<dyn Report>,
}

impl SyncEventBus {
    /// Creates a bus with default config that logs failures via [`LogReporter`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BusConfig::default(), Arc::new(LogReporter::new()))
    }

    /// Creates a bus with a custom config and reporter.
    #[must_use]
    pub fn with_config(cfg: BusConfig, reporter: Arc<dyn Report>) -> Self {
        Self {
            cfg,
            registry: Mutex::new(Registry::new()),
            reporter,
        }
    }

    /// Creates a bus with default config and a custom reporter.
    #[must_use]
    pub fn with_reporter(reporter: Arc<dyn Report>) -> Self {
        Self::with_config(BusConfig::default(), reporter)
    }

    /// Bus name from its config.
    pub fn name(&self) -> &str {
        &self.cfg.name
    }

    /// Number of observers currently subscribed to `topic`.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        self.registry.lock().await.count(topic)
    }

    /// Sorted list of topics with at least one observer.
    pub async fn topics(&self) -> Vec<String> {
        self.registry.lock().await.topics()
    }
}

impl Default for SyncEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for SyncEventBus {
    async fn subscribe(&self, topic: &str, observer: ObserverRef) {
        let name = observer.name().to_string();
        let added = self.registry.lock().await.subscribe(topic, observer);
        debug!(bus = %self.cfg.name, topic, observer = %name, added, "subscribe");
    }

    async fn unsubscribe(&self, topic: &str, observer: &ObserverRef) {
        let removed = self.registry.lock().await.unsubscribe(topic, observer);
        debug!(bus = %self.cfg.name, topic, observer = observer.name(), removed, "unsubscribe");
    }

    async fn publish(&self, event: Event) {
        let registry = self.registry.lock().await;
        let subs = registry.snapshot(event.topic());
        if subs.is_empty() {
            trace!(bus = %self.cfg.name, topic = event.topic(), seq = event.seq(), "no subscribers");
            return;
        }

        let mut failures = Vec::new();
        for o in &subs {
            if let Err(error) = invoke(o, &event).await {
                failures.push(Failure::new(o, &event, error));
            }
        }
        trace!(
            bus = %self.cfg.name,
            topic = event.topic(),
            seq = event.seq(),
            delivered = subs.len(),
            failed = failures.len(),
            "published"
        );

        for f in &failures {
            self.reporter.report(f);
        }
        drop(registry);
    }
}
