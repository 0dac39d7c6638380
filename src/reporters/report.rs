//! # Failure reporting collaborator
//!
//! Buses never return handler errors to publishers. Instead every failure is
//! packed into a [`Failure`] and handed to a [`Report`] implementation: locally on
//! the publishing task for the sync bus, from the single background reporter task
//! for the async bus.
//!
//! ## Contract
//! - `report` is called once per failing `(observer, event)` delivery.
//! - It runs while the sync bus still holds its lock, so it should be quick and
//!   must not call back into the same bus.

use std::sync::Arc;

use crate::error::ObserverError;
use crate::events::Event;
use crate::observers::{ObserverId, ObserverRef};

/// One failed delivery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// Name of the failing observer.
    pub observer: Arc<str>,
    /// Instance identity of the failing observer.
    pub observer_id: ObserverId,
    /// Topic of the event being delivered.
    pub topic: Arc<str>,
    /// Sequence number of the event being delivered.
    pub seq: u64,
    /// What the handler returned.
    pub error: ObserverError,
}

impl Failure {
    pub(crate) fn new(observer: &ObserverRef, event: &Event, error: ObserverError) -> Self {
        Self {
            observer: Arc::from(observer.name()),
            observer_id: ObserverId::of(observer),
            topic: Arc::clone(event.topic_arc()),
            seq: event.seq(),
            error,
        }
    }
}

/// Contract for failure sinks.
pub trait Report: Send + Sync + 'static {
    /// Handle a single failed delivery.
    fn report(&self, failure: &Failure);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
