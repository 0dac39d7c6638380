//! # EventBus: the contract shared by both bus variants.
//!
//! None of the operations can fail from the caller's point of view:
//! - `subscribe` / `unsubscribe` are idempotent;
//! - `publish` absorbs handler failures and hands them to the bus's reporter.

use async_trait::async_trait;

use crate::events::Event;
use crate::observers::ObserverRef;

/// Subscription registry plus dispatch.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use patternbus::{Event, EventBus, NamedObserver, ObserverRef, SyncEventBus};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bus = SyncEventBus::new();
/// let a: ObserverRef = Arc::new(NamedObserver::new("a"));
///
/// bus.subscribe("order_finish", a.clone()).await;
/// bus.publish(Event::new("order_finish", "order_id: xxx")).await;
/// bus.unsubscribe("order_finish", &a).await;
/// # }
/// ```
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Registers `observer` for `topic`. Subscribing twice keeps one membership.
    async fn subscribe(&self, topic: &str, observer: ObserverRef);

    /// Removes `observer` from `topic`. Unknown pairs are ignored.
    async fn unsubscribe(&self, topic: &str, observer: &ObserverRef);

    /// Delivers `event` to every observer of its topic.
    async fn publish(&self, event: Event);
}
