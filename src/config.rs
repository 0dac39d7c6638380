//! # Bus configuration.
//!
//! Provides [`BusConfig`], the settings shared by [`SyncEventBus`](crate::SyncEventBus)
//! and [`AsyncEventBus`](crate::AsyncEventBus).
//!
//! ## Sentinel values
//! - `error_capacity = 0` → clamped to 1 (a bounded channel needs at least one slot)

use std::borrow::Cow;

/// Configuration for an event bus.
///
/// ## Field semantics
/// - `name`: label attached to every log record emitted by the bus
/// - `error_capacity`: size of the async bus's failure channel (min 1; clamped)
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over reading sentinel
/// values directly.
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// Human-readable bus name used in logs.
    pub name: Cow<'static, str>,

    /// Capacity of the bounded failure channel feeding the reporter task.
    ///
    /// Handler tasks that find the channel full wait for a free slot, racing the
    /// stop signal. Unused by the synchronous bus.
    pub error_capacity: usize,
}

impl BusConfig {
    /// Creates a default configuration with the given bus name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the failure channel capacity clamped to a minimum of 1.
    #[inline]
    pub fn error_capacity_clamped(&self) -> usize {
        self.error_capacity.max(1)
    }
}

impl Default for BusConfig {
    /// Default configuration:
    ///
    /// - `name = "event-bus"`
    /// - `error_capacity = 128`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("event-bus"),
            error_capacity: 128,
        }
    }
}
