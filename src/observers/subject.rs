//! # Subject: the classic observable
//!
//! A [`Subject`] keeps an **ordered** list of observers and notifies them one by one.
//! Unlike the buses there is no topic routing and no failure absorption: the first
//! failing observer stops the notification and its error is returned to the caller.
//!
//! This suits flows where later steps depend on earlier ones (e.g. an order
//! cancellation: update status, write the status log, refund the coupon, ...).
//!
//! ```text
//! notify(&Event) ──► o1 ──► o2 ──► o3 ──✗ (Err returned, o4.. not called)
//! ```

use tracing::debug;

use crate::error::ObserverError;
use crate::events::Event;
use crate::observers::{ObserverId, ObserverRef};

/// Ordered observable with short-circuiting notification.
#[derive(Default)]
pub struct Subject {
    observers: Vec<ObserverRef>,
}

impl Subject {
    /// Creates an empty subject.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends observers in the given order. The same instance may be attached twice.
    pub fn attach<I>(&mut self, observers: I) -> &mut Self
    where
        I: IntoIterator<Item = ObserverRef>,
    {
        self.observers.extend(observers);
        self
    }

    /// Removes every occurrence of `observer`. Unknown observers are ignored.
    pub fn detach(&mut self, observer: &ObserverRef) -> &mut Self {
        let id = ObserverId::of(observer);
        let before = self.observers.len();
        self.observers.retain(|o| ObserverId::of(o) != id);
        if self.observers.len() != before {
            debug!(observer = observer.name(), %id, "observer detached");
        }
        self
    }

    /// Notifies observers in attach order, stopping at the first failure.
    pub async fn notify(&self, event: &Event) -> Result<(), ObserverError> {
        for o in &self.observers {
            o.on_change(event).await?;
        }
        Ok(())
    }

    /// Number of attached observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// True if nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observers::NamedObserver;
    use std::sync::Arc;

    #[tokio::test]
    async fn notify_stops_at_first_failure() {
        let status = NamedObserver::new("order-status").quiet().arc();
        let coupon = NamedObserver::failing("coupon-refund", "coupon locked").quiet().arc();
        let stock = NamedObserver::new("stock-refund").quiet().arc();

        let mut subject = Subject::new();
        subject.attach([
            status.clone() as ObserverRef,
            coupon.clone() as ObserverRef,
            stock.clone() as ObserverRef,
        ]);

        let err = subject.notify(&Event::signal("cancel")).await.unwrap_err();
        assert_eq!(err, ObserverError::failed("coupon locked"));
        assert_eq!(status.received(), 1);
        assert_eq!(coupon.received(), 1);
        assert_eq!(stock.received(), 0);
    }

    #[tokio::test]
    async fn detach_removes_all_occurrences() {
        let a: ObserverRef = Arc::new(NamedObserver::new("a").quiet());
        let b: ObserverRef = Arc::new(NamedObserver::new("b").quiet());

        let mut subject = Subject::new();
        subject.attach([a.clone(), b.clone(), a.clone()]);
        assert_eq!(subject.len(), 3);

        subject.detach(&a);
        assert_eq!(subject.len(), 1);

        subject.detach(&a);
        assert_eq!(subject.len(), 1);
        assert!(subject.notify(&Event::signal("t")).await.is_ok());
    }
}
