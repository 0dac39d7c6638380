//! # Observer: user-facing change handlers
//!
//! The [`Observe`] trait is the main **extension point** for end users. Observers
//! register for a topic on a bus and get every [`Event`] published to it.
//!
//! ```text
//! publisher ── publish(Event) ──► bus ──► snapshot(topic)
//!                                            │
//!                     ┌──────────────────────┼──────────────────────┐
//!                     ▼                      ▼                      ▼
//!              Observe::on_change     Observe::on_change     Observe::on_change
//!                     │ Err                                         │ Err
//!                     └──────────────► Report::report(&Failure) ◄───┘
//! ```
//!
//! ## Identity
//! Subscribers are told apart by **instance**, not by value: two observers with the
//! same behaviour (even the same name) are distinct subscribers. Identity is the
//! address of the `Arc` allocation, see [`ObserverId`].
//!
//! # Example: custom observer
//! ```no_run
//! use async_trait::async_trait;
//! use patternbus::{Event, Observe, ObserverError};
//!
//! struct StockRefund;
//!
//! #[async_trait]
//! impl Observe for StockRefund {
//!     async fn on_change(&self, event: &Event) -> Result<(), ObserverError> {
//!         let order = event.expect_payload::<u64>()?;
//!         println!("refunding stock for order {order}");
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "stock-refund"
//!     }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use crate::error::ObserverError;
use crate::events::Event;

/// # Trait for receiving change events.
///
/// Implementations may be slow or fail; a bus never propagates the failure to the
/// publisher, it reports it.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Called for every event published on a topic this observer is subscribed to.
    async fn on_change(&self, event: &Event) -> Result<(), ObserverError>;

    /// Human-readable name (for logs and failure reports).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared observer handle, as stored by the buses.
pub type ObserverRef = Arc<dyn Observe>;

/// Instance identity of an observer.
///
/// Derived from the `Arc` allocation address, so it is stable for as long as any
/// handle to the observer is alive. Clones of the same `Arc` share one id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(usize);

impl ObserverId {
    /// Returns the identity of `observer`.
    #[inline]
    pub fn of(observer: &ObserverRef) -> Self {
        Self(Arc::as_ptr(observer) as *const () as usize)
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Runs one handler, turning a panic into [`ObserverError::Panicked`].
pub(crate) async fn invoke(observer: &ObserverRef, event: &Event) -> Result<(), ObserverError> {
    let fut = observer.on_change(event);
    match std::panic::AssertUnwindSafe(fut).catch_unwind().await {
        Ok(res) => res,
        Err(panic_err) => Err(ObserverError::from_panic(panic_err)),
    }
}
