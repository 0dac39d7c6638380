//! Error types used by the event buses, observers and pattern modules.
//!
//! This module defines three error enums:
//!
//! - [`ObserverError`]: failures raised by an observer's change handler.
//! - [`BusError`]: failures of the bus machinery itself (only surfaced by shutdown).
//! - [`PatternError`]: misuse of the adapter / composite pattern modules.
//!
//! Each type provides `as_label` (stable snake_case) for log fields.

use thiserror::Error;

/// # Errors produced by observer handlers.
///
/// A bus never hands these back to the publisher; they are absorbed and passed to
/// the configured [`Report`](crate::Report) collaborator instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    /// Handler ran but could not apply the change.
    #[error("handler failed: {reason}")]
    Failed {
        /// The underlying error message.
        reason: String,
    },

    /// Event payload was not of the type the observer expects.
    #[error("payload type mismatch: expected {expected}")]
    PayloadMismatch {
        /// Name of the expected payload type.
        expected: &'static str,
    },

    /// Handler panicked; the panic was caught by the bus.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic message, if it could be extracted.
        info: String,
    },
}

impl ObserverError {
    /// Shorthand for [`ObserverError::Failed`].
    ///
    /// # Example
    /// ```
    /// use patternbus::ObserverError;
    ///
    /// let err = ObserverError::failed("stock service unavailable");
    /// assert_eq!(err.to_string(), "handler failed: stock service unavailable");
    /// ```
    pub fn failed(reason: impl Into<String>) -> Self {
        ObserverError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use patternbus::ObserverError;
    ///
    /// assert_eq!(ObserverError::failed("x").as_label(), "observer_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ObserverError::Failed { .. } => "observer_failed",
            ObserverError::PayloadMismatch { .. } => "observer_payload_mismatch",
            ObserverError::Panicked { .. } => "observer_panicked",
        }
    }

    /// Builds a [`ObserverError::Panicked`] out of a caught panic payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        ObserverError::Panicked {
            info: panic_message(payload.as_ref()),
        }
    }
}

/// Extracts the message of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// # Errors produced by the bus runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BusError {
    /// The background error reporter panicked before it observed the stop signal.
    #[error("error reporter task panicked: {info}")]
    ReporterPanicked {
        /// Join error details.
        info: String,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::ReporterPanicked { .. } => "bus_reporter_panicked",
        }
    }
}

/// # Errors produced by the pattern modules.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Payment channel name is not known to the adapter.
    #[error("unknown pay type {0:?}")]
    UnknownPayType(String),

    /// Level id does not belong to the tree (or was detached).
    #[error("unknown level id {0}")]
    UnknownLevel(usize),

    /// `child` is not a direct child of `parent`.
    #[error("level {child} is not a child of level {parent}")]
    NotAChild {
        /// Parent level id.
        parent: usize,
        /// Supposed child level id.
        child: usize,
    },
}

impl PatternError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            PatternError::UnknownPayType(_) => "pattern_unknown_pay_type",
            PatternError::UnknownLevel(_) => "pattern_unknown_level",
            PatternError::NotAChild { .. } => "pattern_not_a_child",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_payloads_are_extracted() {
        let err = ObserverError::from_panic(Box::new("boom"));
        assert_eq!(err, ObserverError::Panicked { info: "boom".into() });

        let err = ObserverError::from_panic(Box::new(String::from("kaboom")));
        assert_eq!(err.to_string(), "handler panicked: kaboom");

        let err = ObserverError::from_panic(Box::new(42_u8));
        assert_eq!(err.as_label(), "observer_panicked");
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(
            ObserverError::PayloadMismatch { expected: "u64" }.as_label(),
            "observer_payload_mismatch"
        );
        assert_eq!(
            BusError::ReporterPanicked { info: String::new() }.as_label(),
            "bus_reporter_panicked"
        );
        assert_eq!(
            PatternError::NotAChild { parent: 0, child: 3 }.to_string(),
            "level 3 is not a child of level 0"
        );
    }
}
