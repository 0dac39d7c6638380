//! # LogReporter: failures as structured log records
//!
//! The default reporter of both buses. Every failure becomes one `WARN` record:
//!
//! ```text
//! WARN patternbus::reporters::log: observer failed observer="b" observer_id=0x6000... topic="y" seq=4 label="observer_failed" error=handler failed: db down
//! ```

use tracing::warn;

use crate::reporters::{Failure, Report};

/// Reporter that logs each failure through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl LogReporter {
    /// Construct a new [`LogReporter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Report for LogReporter {
    fn report(&self, f: &Failure) {
        warn!(
            observer = %f.observer,
            observer_id = %f.observer_id,
            topic = %f.topic,
            seq = f.seq,
            label = f.error.as_label(),
            error = %f.error,
            "observer failed"
        );
    }

    fn name(&self) -> &'static str {
        "LogReporter"
    }
}
