//! Change events routed by topic.
//!
//! ## Contents
//! - [`Event`] immutable `(topic, payload)` record with sequence number and timestamp
//! - [`Payload`] opaque shared payload type

mod event;

pub use event::{Event, Payload};
