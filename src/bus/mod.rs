//! Event buses: topic registry plus dispatch.
//!
//! | Variant          | Dispatch                         | Lock            | Failures reported by     |
//! |------------------|----------------------------------|-----------------|--------------------------|
//! | [`SyncEventBus`] | in-line, one handler at a time   | `Mutex`         | the publishing task      |
//! | [`AsyncEventBus`]| one spawned task per observer    | `RwLock`        | background reporter task |
//!
//! Both implement [`EventBus`] and own an independent registry: there is no
//! process-wide subscription state.

mod async_bus;
mod builder;
mod event_bus;
mod registry;
mod sync_bus;

pub use async_bus::{AsyncEventBus, BusState};
pub use builder::BusBuilder;
pub use event_bus::EventBus;
pub use sync_bus::SyncEventBus;
