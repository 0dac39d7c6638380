//! # CollectReporter: failures kept in memory
//!
//! Records every reported [`Failure`] so callers (tests, demos, health endpoints)
//! can inspect them after the fact. Can also forward to another reporter.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::reporters::{Failure, Report};

/// In-memory failure recorder.
#[derive(Default)]
pub struct CollectReporter {
    failures: Mutex<Vec<Failure>>,
    forward: Option<Arc<dyn Report>>,
}

impl CollectReporter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that also forwards each failure to `next`.
    #[must_use]
    pub fn forwarding(next: Arc<dyn Report>) -> Self {
        Self {
            failures: Mutex::new(Vec::new()),
            forward: Some(next),
        }
    }

    /// Shorthand for `Arc::new(self)`.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Copy of everything recorded so far, in report order.
    pub fn failures(&self) -> Vec<Failure> {
        self.lock().clone()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Recorded failures attributed to an observer name.
    pub fn count_for(&self, observer: &str) -> usize {
        self.lock()
            .iter()
            .filter(|f| &*f.observer == observer)
            .count()
    }

    // A panicking reporter elsewhere must not hide what was already recorded.
    fn lock(&self) -> MutexGuard<'_, Vec<Failure>> {
        self.failures
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Report for CollectReporter {
    fn report(&self, failure: &Failure) {
        self.lock().push(failure.clone());
        if let Some(next) = &self.forward {
            next.report(failure);
        }
    }

    fn name(&self) -> &'static str {
        "CollectReporter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObserverError;
    use crate::events::Event;
    use crate::observers::{NamedObserver, ObserverRef};

    #[test]
    fn records_and_forwards() {
        let sink = CollectReporter::new().arc();
        let rep = CollectReporter::forwarding(sink.clone());

        let o: ObserverRef = Arc::new(NamedObserver::new("a").quiet());
        let ev = Event::signal("y");
        rep.report(&Failure::new(&o, &ev, ObserverError::failed("x")));

        assert_eq!(rep.len(), 1);
        assert_eq!(sink.len(), 1);
        assert_eq!(rep.count_for("a"), 1);
        assert_eq!(rep.count_for("b"), 0);

        let f = &rep.failures()[0];
        assert_eq!(&*f.topic, "y");
        assert_eq!(f.seq, ev.seq());
    }
}
