//! # Function-backed observer (`ObserverFn`)
//!
//! [`ObserverFn`] wraps a closure `F: Fn(Event) -> Fut`, producing a fresh future
//! per delivery. The closure receives its own (cheap) clone of the event, so the
//! future can be `'static` and own everything it touches. Shared state goes
//! through an explicit `Arc<...>` captured by the closure.
//!
//! ## Example
//! ```rust
//! use patternbus::{Event, Observe, ObserverError, ObserverFn, ObserverRef};
//!
//! let o: ObserverRef = ObserverFn::arc("audit", |ev: Event| async move {
//!     if ev.topic().is_empty() {
//!         return Err(ObserverError::failed("empty topic"));
//!     }
//!     Ok(())
//! });
//!
//! assert_eq!(o.name(), "audit");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ObserverError;
use crate::events::Event;
use crate::observers::Observe;

/// Function-backed observer implementation.
#[derive(Debug)]
pub struct ObserverFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F, Fut> ObserverFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ObserverError>> + Send + 'static,
{
    /// Creates a new function-backed observer.
    ///
    /// Prefer [`ObserverFn::arc`] when you immediately need an
    /// [`ObserverRef`](crate::ObserverRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the observer and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Observe for ObserverFn<F>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), ObserverError>> + Send + 'static,
{
    async fn on_change(&self, event: &Event) -> Result<(), ObserverError> {
        (self.f)(event.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
