//! Observers: change handlers and the classic subject.
//!
//! ## Contents
//! - [`Observe`] the handler trait; [`ObserverRef`] the shared handle; [`ObserverId`] instance identity
//! - [`ObserverFn`] closure-backed observer
//! - [`NamedObserver`] printing observer for demos and tests
//! - [`Subject`] ordered, short-circuiting observable (no bus involved)

mod named;
mod observer;
mod observer_fn;
mod subject;

pub(crate) use observer::invoke;

pub use named::NamedObserver;
pub use observer::{Observe, ObserverId, ObserverRef};
pub use observer_fn::ObserverFn;
pub use subject::Subject;
