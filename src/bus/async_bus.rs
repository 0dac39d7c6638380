//! # AsyncEventBus: concurrent fan-out with a background error reporter
//!
//! [`AsyncEventBus`] spawns one task per observer for every publish and never waits
//! for them. Failures travel through a bounded channel to a single reporter task.
//!
//! ## Architecture
//! ```text
//! publish(ev)
//!   ├─► registry.read() ─► snapshot(ev.topic)        (shared lock, released at once)
//!   ├─► spawn ─► o1.on_change(&ev) ──Err──┐
//!   ├─► spawn ─► o2.on_change(&ev)        │   select { stop signalled => drop,
//!   └─► spawn ─► oN.on_change(&ev) ──Err──┤            tx.send(failure) }
//!                                         ▼
//!                            [bounded mpsc, cap = error_capacity]
//!                                         │ (single consumer)
//!                                         ▼
//!                               reporter task ─► Report::report(&Failure)
//!                                  exits when the stop token is cancelled
//! ```
//!
//! ## Lifecycle
//! ```text
//! Running ──stop()──► Stopping ──reporter exits──► Stopped
//! ```
//! - `stop()` only signals; it is idempotent and never blocks.
//! - `shutdown().await` signals and waits for the reporter to exit.
//! - In-flight handler tasks are never aborted; their failures after stop are dropped.
//! - Publishing after stop still runs handlers, but their failures are dropped too.
//! - Dropping the bus signals stop.
//! - A panicking `Report` is logged and skipped; the reporter keeps running.
//!
//! ## Rules
//! - No ordering between publishes nor between observers of one publish.
//! - A handler blocked forever only holds its own task.
//! - Must be constructed inside a Tokio runtime (the reporter is spawned at once).

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::bus::{BusBuilder, EventBus, registry::Registry};
use crate::config::BusConfig;
use crate::error::{BusError, panic_message};
use crate::events::Event;
use crate::observers::{ObserverRef, invoke};
use crate::reporters::{Failure, Report};

/// Lifecycle state of an [`AsyncEventBus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusState {
    /// Accepting publishes; reporter active.
    Running,
    /// Stop signalled; reporter has not exited yet.
    Stopping,
    /// Reporter exited. Terminal.
    Stopped,
}

/// Event bus dispatching every delivery on its own Tokio task.
pub struct AsyncEventBus {
    cfg: BusConfig,
    registry: RwLock<Registry>,
    errors: mpsc::Sender<Failure>,
    stop: CancellationToken,
    reporter: Mutex<Option<JoinHandle<()>>>,
}

impl AsyncEventBus {
    /// Creates a bus with default config and the `LogReporter`.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::builder(BusConfig::default()).build()
    }

    /// Starts configuring a bus.
    pub fn builder(cfg: BusConfig) -> BusBuilder {
        BusBuilder::new(cfg)
    }

    pub(crate) fn start(cfg: BusConfig, reporter: Arc<dyn Report>) -> Self {
        let (tx, rx) = mpsc::channel::<Failure>(cfg.error_capacity_clamped());
        let stop = CancellationToken::new();

        let handle = tokio::spawn(run_reporter(
            cfg.name.to_string(),
            rx,
            stop.clone(),
            reporter,
        ));

        Self {
            cfg,
            registry: RwLock::new(Registry::new()),
            errors: tx,
            stop,
            reporter: Mutex::new(Some(handle)),
        }
    }

    /// Signals shutdown. Safe to call any number of times.
    pub fn stop(&self) {
        if !self.stop.is_cancelled() {
            debug!(bus = %self.cfg.name, "stop requested");
        }
        self.stop.cancel();
    }

    /// Signals shutdown and waits until the reporter task has exited.
    ///
    /// Calling it again (or after another caller already awaited the reporter)
    /// returns `Ok(())` at once.
    pub async fn shutdown(&self) -> Result<(), BusError> {
        self.stop();
        let handle = self.take_reporter();
        match handle {
            Some(h) => h.await.map_err(|e| BusError::ReporterPanicked {
                info: e.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// True once stop has been signalled.
    pub fn is_stopped(&self) -> bool {
        self.stop.is_cancelled()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> BusState {
        if !self.stop.is_cancelled() {
            return BusState::Running;
        }
        let guard = self
            .reporter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match guard.as_ref() {
            Some(h) if !h.is_finished() => BusState::Stopping,
            _ => BusState::Stopped,
        }
    }

    /// Bus name from its config.
    pub fn name(&self) -> &str {
        &self.cfg.name
    }

    /// Number of observers currently subscribed to `topic`.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        self.registry.read().await.count(topic)
    }

    /// Sorted list of topics with at least one observer.
    pub async fn topics(&self) -> Vec<String> {
        self.registry.read().await.topics()
    }

    fn take_reporter(&self) -> Option<JoinHandle<()>> {
        self.reporter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

impl Drop for AsyncEventBus {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}

#[async_trait]
impl EventBus for AsyncEventBus {
    async fn subscribe(&self, topic: &str, observer: ObserverRef) {
        let name = observer.name().to_string();
        let added = self.registry.write().await.subscribe(topic, observer);
        debug!(bus = %self.cfg.name, topic, observer = %name, added, "subscribe");
    }

    async fn unsubscribe(&self, topic: &str, observer: &ObserverRef) {
        let removed = self.registry.write().await.unsubscribe(topic, observer);
        debug!(bus = %self.cfg.name, topic, observer = observer.name(), removed, "unsubscribe");
    }

    async fn publish(&self, event: Event) {
        let subs = self.registry.read().await.snapshot(event.topic());
        trace!(
            bus = %self.cfg.name,
            topic = event.topic(),
            seq = event.seq(),
            subscribers = subs.len(),
            stopped = self.stop.is_cancelled(),
            "publish"
        );
        if subs.is_empty() {
            return;
        }

        let event = Arc::new(event);
        for o in subs {
            tokio::spawn(deliver(
                o,
                Arc::clone(&event),
                self.errors.clone(),
                self.stop.clone(),
            ));
        }
    }
}

/// One delivery: run the handler, then race the failure send against stop.
async fn deliver(
    observer: ObserverRef,
    event: Arc<Event>,
    errors: mpsc::Sender<Failure>,
    stop: CancellationToken,
) {
    let Err(error) = invoke(&observer, &event).await else {
        return;
    };
    let failure = Failure::new(&observer, &event, error);
    let (name, seq) = (Arc::clone(&failure.observer), failure.seq);

    // `send` takes the failure up front, so the stop arm logs from the copies above.
    tokio::select! {
        biased;
        _ = stop.cancelled() => {
            debug!(observer = %name, topic = event.topic(), seq, "failure dropped: bus stopped");
        }
        res = errors.send(failure) => {
            if res.is_err() {
                debug!(observer = %name, seq, "failure dropped: reporter gone");
            }
        }
    }
}

/// Drains the failure channel until stop is observed.
///
/// A panicking [`Report`] is logged and skipped; the loop keeps consuming.
/// Failures still queued when stop wins are dropped with a debug record.
async fn run_reporter(
    bus: String,
    mut rx: mpsc::Receiver<Failure>,
    stop: CancellationToken,
    reporter: Arc<dyn Report>,
) {
    debug!(bus = %bus, reporter = reporter.name(), "error reporter started");
    loop {
        tokio::select! {
            biased;
            _ = stop.cancelled() => break,
            msg = rx.recv() => match msg {
                Some(failure) => report_isolated(&bus, reporter.as_ref(), &failure),
                None => break,
            }
        }
    }

    rx.close();
    while let Ok(failure) = rx.try_recv() {
        debug!(
            bus = %bus,
            observer = %failure.observer,
            topic = %failure.topic,
            seq = failure.seq,
            "failure dropped: bus stopped"
        );
    }
    debug!(bus = %bus, "error reporter exited");
}

fn report_isolated(bus: &str, reporter: &dyn Report, failure: &Failure) {
    if let Err(panic) = catch_unwind(AssertUnwindSafe(|| reporter.report(failure))) {
        let info = panic_message(panic.as_ref());
        warn!(
            bus,
            reporter = reporter.name(),
            observer = %failure.observer,
            seq = failure.seq,
            panic = %info,
            "reporter panicked"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObserverError;
    use crate::observers::{NamedObserver, Observe, ObserverFn};
    use crate::reporters::CollectReporter;
    use std::time::Duration;
    use tokio::sync::{Notify, mpsc::unbounded_channel};
    use tokio::time::{sleep, timeout};

    fn bus() -> (AsyncEventBus, Arc<CollectReporter>) {
        let rep = CollectReporter::new().arc();
        let bus = AsyncEventBus::builder(BusConfig::named("test"))
            .with_reporter(rep.clone())
            .build();
        (bus, rep)
    }

    async fn wait_for(rep: &CollectReporter, n: usize) {
        timeout(Duration::from_secs(2), async {
            while rep.len() < n {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("reporter did not receive failures in time");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn all_observers_receive_the_event() {
        let (bus, rep) = bus();
        let (tx, mut rx) = unbounded_channel::<String>();
        for name in ["a", "b", "c"] {
            let tx = tx.clone();
            let o = ObserverFn::arc(name, move |ev: Event| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(format!("{name}:{}", ev.describe_payload()));
                    Ok::<(), ObserverError>(())
                }
            });
            bus.subscribe("order_finish", o).await;
        }

        bus.publish(Event::new("order_finish", "order_id: xxx")).await;

        let mut got = Vec::new();
        for _ in 0..3 {
            let msg = timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
            got.push(msg);
        }
        got.sort();
        assert_eq!(
            got,
            vec!["a:order_id: xxx", "b:order_id: xxx", "c:order_id: xxx"]
        );
        assert!(rep.is_empty());
        bus.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn publish_does_not_wait_for_handlers() {
        let (bus, _rep) = bus();
        let gate = Arc::new(Notify::new());
        let done = NamedObserver::new("done").quiet().arc();

        let g = Arc::clone(&gate);
        let d = Arc::clone(&done);
        let slow = ObserverFn::arc("slow", move |ev: Event| {
            let g = Arc::clone(&g);
            let d = Arc::clone(&d);
            async move {
                g.notified().await;
                d.on_change(&ev).await
            }
        });
        bus.subscribe("t", slow).await;

        bus.publish(Event::signal("t")).await;
        assert_eq!(done.received(), 0);

        gate.notify_one();
        timeout(Duration::from_secs(2), async {
            while done.received() == 0 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn only_the_failing_observer_is_reported() {
        let (bus, rep) = bus();
        let a = NamedObserver::failing("A", "a broke").quiet().arc();
        let b = NamedObserver::new("B").quiet().arc();
        bus.subscribe("y", a.clone()).await;
        bus.subscribe("y", b.clone()).await;

        bus.publish(Event::signal("y")).await;
        wait_for(&rep, 1).await;
        sleep(Duration::from_millis(50)).await;

        let failures = rep.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(&*failures[0].observer, "A");
        assert_eq!(failures[0].error, ObserverError::failed("a broke"));
        assert_eq!(b.received(), 1);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let (bus, rep) = bus();
        bus.publish(Event::signal("nobody")).await;
        sleep(Duration::from_millis(20)).await;
        assert!(rep.is_empty());
        assert_eq!(bus.state(), BusState::Running);
    }

    #[tokio::test]
    async fn unsubscribed_observer_is_not_invoked() {
        let (bus, _rep) = bus();
        let a = NamedObserver::new("a").quiet().arc();
        let a_ref: ObserverRef = a.clone();

        bus.subscribe("x", a_ref.clone()).await;
        bus.subscribe("x", a_ref.clone()).await;
        assert_eq!(bus.subscriber_count("x").await, 1);
        bus.unsubscribe("x", &a_ref).await;
        bus.unsubscribe("x", &a_ref).await;

        bus.publish(Event::signal("x")).await;
        sleep(Duration::from_millis(20)).await;
        assert_eq!(a.received(), 0);
    }

    #[tokio::test]
    async fn failures_after_stop_are_not_reported() {
        let (bus, rep) = bus();
        let gate = Arc::new(Notify::new());
        let finished = Arc::new(Notify::new());

        let g = Arc::clone(&gate);
        let f = Arc::clone(&finished);
        let late = ObserverFn::arc("late", move |_ev: Event| {
            let g = Arc::clone(&g);
            let f = Arc::clone(&f);
            async move {
                g.notified().await;
                f.notify_one();
                Err(ObserverError::failed("too late"))
            }
        });
        bus.subscribe("t", late).await;
        bus.publish(Event::signal("t")).await;

        timeout(Duration::from_secs(2), bus.shutdown())
            .await
            .expect("reporter did not exit")
            .unwrap();
        assert_eq!(bus.state(), BusState::Stopped);

        gate.notify_one();
        finished.notified().await;
        sleep(Duration::from_millis(20)).await;
        assert!(rep.is_empty());

        // Publishing after stop still runs handlers; failures are dropped.
        let bad = NamedObserver::failing("bad", "x").quiet().arc();
        bus.subscribe("u", bad.clone()).await;
        bus.publish(Event::signal("u")).await;
        timeout(Duration::from_secs(2), async {
            while bad.received() == 0 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        sleep(Duration::from_millis(20)).await;
        assert!(rep.is_empty());
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let (bus, _rep) = bus();
        assert_eq!(bus.state(), BusState::Running);

        bus.stop();
        bus.stop();
        assert!(bus.is_stopped());

        assert!(bus.shutdown().await.is_ok());
        assert!(bus.shutdown().await.is_ok());
        assert_eq!(bus.state(), BusState::Stopped);
    }

    #[tokio::test]
    async fn each_failure_before_stop_is_reported_once() {
        let rep = CollectReporter::new().arc();
        let bus = AsyncEventBus::builder(BusConfig {
            error_capacity: 1,
            ..BusConfig::default()
        })
        .with_reporter(rep.clone())
        .build();

        for i in 0..8 {
            bus.subscribe("t", NamedObserver::failing(format!("f{i}"), "nope").quiet().arc())
                .await;
        }
        bus.publish(Event::signal("t")).await;
        wait_for(&rep, 8).await;

        for i in 0..8 {
            assert_eq!(rep.count_for(&format!("f{i}")), 1);
        }
        bus.shutdown().await.unwrap();
    }

    /// Panics on its first call, records every later failure.
    struct PanicsOnce {
        calls: std::sync::atomic::AtomicUsize,
        inner: CollectReporter,
    }

    impl Report for PanicsOnce {
        fn report(&self, failure: &Failure) {
            if self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                panic!("reporter bug");
            }
            self.inner.report(failure);
        }
    }

    #[tokio::test]
    async fn reporter_survives_a_panicking_report() {
        let rep = Arc::new(PanicsOnce {
            calls: Default::default(),
            inner: CollectReporter::new(),
        });
        let bus = AsyncEventBus::builder(BusConfig::named("test"))
            .with_reporter(rep.clone())
            .build();
        bus.subscribe("t", NamedObserver::failing("first", "x").quiet().arc())
            .await;
        bus.publish(Event::signal("t")).await;
        timeout(Duration::from_secs(2), async {
            while rep.calls.load(std::sync::atomic::Ordering::SeqCst) == 0 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        bus.subscribe("u", NamedObserver::failing("second", "y").quiet().arc())
            .await;
        bus.publish(Event::signal("u")).await;
        wait_for(&rep.inner, 1).await;

        assert_eq!(rep.inner.count_for("second"), 1);
        assert_eq!(bus.state(), BusState::Running);
        bus.shutdown().await.unwrap();
        assert_eq!(bus.state(), BusState::Stopped);
    }

    /// Blocks inside its first `report` until released.
    struct Gated {
        seen: std::sync::atomic::AtomicUsize,
        release: Mutex<std::sync::mpsc::Receiver<()>>,
    }

    impl Report for Gated {
        fn report(&self, _failure: &Failure) {
            if self.seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                let _ = self.release.lock().unwrap().recv();
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn queued_failures_are_dropped_on_stop() {
        let (release_tx, release_rx) = std::sync::mpsc::channel();
        let rep = Arc::new(Gated {
            seen: Default::default(),
            release: Mutex::new(release_rx),
        });
        let bus = AsyncEventBus::builder(BusConfig::named("test"))
            .with_reporter(rep.clone())
            .build();
        for i in 0..5 {
            bus.subscribe("t", NamedObserver::failing(format!("f{i}"), "x").quiet().arc())
                .await;
        }
        bus.publish(Event::signal("t")).await;

        timeout(Duration::from_secs(2), async {
            while rep.seen.load(std::sync::atomic::Ordering::SeqCst) == 0 {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        sleep(Duration::from_millis(50)).await;

        bus.stop();
        release_tx.send(()).unwrap();
        timeout(Duration::from_secs(2), bus.shutdown())
            .await
            .expect("reporter did not exit")
            .unwrap();

        assert_eq!(rep.seen.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
