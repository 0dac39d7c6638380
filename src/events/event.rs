//! # Change events delivered through the buses.
//!
//! An [`Event`] is an immutable `(topic, payload)` record. The topic is the routing
//! key; the payload is opaque to the bus and only interpreted by observers, which
//! read it back with [`Event::payload`].
//!
//! ## Ordering
//! Each event gets a globally unique sequence number (`seq`) at construction.
//! The async bus delivers out of order; `seq` tells events apart in logs.
//!
//! ## Example
//! ```rust
//! use patternbus::Event;
//!
//! let ev = Event::new("order_finish", String::from("order_id: 42"));
//!
//! assert_eq!(ev.topic(), "order_finish");
//! assert_eq!(ev.payload::<String>().map(String::as_str), Some("order_id: 42"));
//! assert!(ev.payload::<u64>().is_none());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::error::ObserverError;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque, shareable event payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Immutable change notification.
///
/// Cheap to clone: topic and payload are reference counted.
#[derive(Clone)]
pub struct Event {
    seq: u64,
    at: SystemTime,
    topic: Arc<str>,
    payload: Payload,
}

impl Event {
    /// Creates a new event with the next sequence number and the current timestamp.
    pub fn new<T>(topic: impl Into<Arc<str>>, payload: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::from_shared(topic, Arc::new(payload))
    }

    /// Creates an event carrying no meaningful payload (`()`).
    pub fn signal(topic: impl Into<Arc<str>>) -> Self {
        Self::new(topic, ())
    }

    /// Creates an event around an already shared payload.
    pub fn from_shared(topic: impl Into<Arc<str>>, payload: Payload) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            topic: topic.into(),
            payload,
        }
    }

    /// Routing key.
    #[inline]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Shared handle to the routing key.
    #[inline]
    pub(crate) fn topic_arc(&self) -> &Arc<str> {
        &self.topic
    }

    /// Globally unique, monotonically increasing sequence number.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Wall-clock construction time.
    #[inline]
    pub fn at(&self) -> SystemTime {
        self.at
    }

    /// Borrows the payload as `T`, if that is its concrete type.
    #[inline]
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Like [`Event::payload`], but maps a type mismatch to [`ObserverError::PayloadMismatch`]
    /// so handlers can use `?`.
    pub fn expect_payload<T: Any>(&self) -> Result<&T, ObserverError> {
        self.payload::<T>().ok_or(ObserverError::PayloadMismatch {
            expected: std::any::type_name::<T>(),
        })
    }

    /// Best-effort rendering of common payload types; `<opaque>` otherwise.
    pub fn describe_payload(&self) -> String {
        let p = self.payload.as_ref();
        if let Some(s) = p.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = p.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(n) = p.downcast_ref::<i64>() {
            n.to_string()
        } else if let Some(n) = p.downcast_ref::<u64>() {
            n.to_string()
        } else if p.downcast_ref::<()>().is_some() {
            "()".to_string()
        } else {
            "<opaque>".to_string()
        }
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("seq", &self.seq)
            .field("topic", &self.topic)
            .field("payload", &self.describe_payload())
            .finish()
    }
}
