//! # NamedObserver: simple event printer
//!
//! A minimal observer that prints every event it receives to stdout and counts
//! deliveries. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! observer: a, event key: order_finish, event val: order_id: xxx
//! observer: b, event key: order_finish, event val: order_id: xxx
//! ```

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::error::ObserverError;
use crate::events::Event;
use crate::observers::Observe;

/// Printing observer identified by a name.
///
/// Built with [`NamedObserver::failing`], it still prints and counts the event but
/// then returns [`ObserverError::Failed`]; handy for exercising failure reporting.
#[derive(Debug)]
pub struct NamedObserver {
    name: Cow<'static, str>,
    fail_with: Option<String>,
    quiet: bool,
    received: AtomicU64,
}

impl NamedObserver {
    /// Construct a new printing observer.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            fail_with: None,
            quiet: false,
            received: AtomicU64::new(0),
        }
    }

    /// Construct an observer whose handler always fails with `reason`.
    #[must_use]
    pub fn failing(name: impl Into<Cow<'static, str>>, reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::new(name)
        }
    }

    /// Suppress stdout output (deliveries are still counted).
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Shorthand for `Arc::new(self)`.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of events delivered so far.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Observe for NamedObserver {
    async fn on_change(&self, e: &Event) -> Result<(), ObserverError> {
        if !self.quiet {
            println!(
                "observer: {}, event key: {}, event val: {}",
                self.name,
                e.topic(),
                e.describe_payload()
            );
        }
        self.received.fetch_add(1, Ordering::AcqRel);

        match &self.fail_with {
            Some(reason) => Err(ObserverError::failed(reason.clone())),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_deliveries() {
        let o = NamedObserver::new("a").quiet();
        let ev = Event::new("order_finish", "order_id: xxx");

        o.on_change(&ev).await.unwrap();
        o.on_change(&ev).await.unwrap();

        assert_eq!(o.received(), 2);
        assert_eq!(o.name(), "a");
    }

    #[tokio::test]
    async fn failing_observer_still_counts() {
        let o = NamedObserver::failing("b", "db down").quiet();
        let err = o.on_change(&Event::signal("t")).await.unwrap_err();

        assert_eq!(err, ObserverError::failed("db down"));
        assert_eq!(o.received(), 1);
    }
}
