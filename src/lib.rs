//! # patternbus
//!
//! **patternbus** is a small collection of classic design patterns, built around
//! an observer / event-bus pair with a synchronous and an asynchronous variant.
//!
//! ## Architecture
//! ### Event buses
//! ```text
//!                 subscribe(topic, Arc<dyn Observe>) / unsubscribe(topic, &observer)
//!                                        │
//!                                        ▼
//!  publish(Event{topic, payload}) ──► Registry (topic → observers, one per bus)
//!                                        │ snapshot(topic)
//!             ┌──────────────────────────┴───────────────────────────┐
//!             ▼                                                      ▼
//!      SyncEventBus                                           AsyncEventBus
//!  (one Mutex for everything)                          (RwLock; one task per observer)
//!   o1 ─► o2 ─► ... ─► oN                               o1    o2   ...   oN
//!   (on the publishing task)                             │ Err        │ Err
//!             │ Err                                      ▼            ▼
//!             ▼                                  [bounded mpsc] ◄─ select(stop)
//!     Report::report(&Failure)                          │
//!                                                       ▼
//!                                            reporter task ─► Report::report(&Failure)
//!                                            (exits on stop / shutdown)
//! ```
//!
//! ### Failure policy
//! Handler errors (and panics) never reach the publisher. They are turned into a
//! [`Failure`] and passed to the bus's [`Report`] implementation
//! ([`LogReporter`] by default).
//!
//! ### Async lifecycle
//! ```text
//! AsyncEventBus::new() ──► Running ──stop()──► Stopping ──reporter exits──► Stopped
//! ```
//! Failures of handlers finishing after `stop()` are dropped.
//!
//! ## Features
//! | Area            | Description                                              | Key types / traits                         |
//! |-----------------|----------------------------------------------------------|--------------------------------------------|
//! | **Buses**       | Topic pub/sub, sync and async dispatch                   | [`EventBus`], [`SyncEventBus`], [`AsyncEventBus`] |
//! | **Observers**   | Handler trait, closure observers, printing observer      | [`Observe`], [`ObserverFn`], [`NamedObserver`] |
//! | **Subject**     | Ordered observable, stops at first failure               | [`Subject`]                                |
//! | **Reporting**   | Failure sinks                                            | [`Report`], [`LogReporter`], [`CollectReporter`] |
//! | **Errors**      | Typed errors                                             | [`ObserverError`], [`BusError`], [`PatternError`] |
//! | **Configuration** | Bus settings                                           | [`BusConfig`]                              |
//!
//! ## Optional features
//! - `patterns` _(default)_: the [`patterns`] module (adapter, bridge, composite, template method).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use patternbus::{AsyncEventBus, BusConfig, CollectReporter, Event, EventBus, NamedObserver};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let failures = Arc::new(CollectReporter::new());
//!     let bus = AsyncEventBus::builder(BusConfig::named("orders"))
//!         .with_reporter(failures.clone())
//!         .build();
//!
//!     bus.subscribe("order_finish", Arc::new(NamedObserver::new("a"))).await;
//!     bus.subscribe("order_finish", Arc::new(NamedObserver::failing("b", "db down"))).await;
//!
//!     bus.publish(Event::new("order_finish", "order_id: xxx")).await;
//!
//!     // ... later
//!     bus.shutdown().await?;
//!     Ok(())
//! }
//! ```
mod bus;
mod config;
mod error;
mod events;
mod observers;
mod reporters;

#[cfg(feature = "patterns")]
pub mod patterns;

// ---- Public re-exports ----

pub use bus::{AsyncEventBus, BusBuilder, BusState, EventBus, SyncEventBus};
pub use config::BusConfig;
pub use error::{BusError, ObserverError, PatternError};
pub use events::{Event, Payload};
pub use observers::{NamedObserver, Observe, ObserverFn, ObserverId, ObserverRef, Subject};
pub use reporters::{CollectReporter, Failure, LogReporter, Report};
