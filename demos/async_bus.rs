//! # Asynchronous bus demo
//!
//! Observers run on their own tasks; failures reach the background reporter,
//! which both logs and records them. After `shutdown`, late failures are dropped.
//!
//! ## Run
//! ```bash
//! RUST_LOG=patternbus=debug cargo run --example async_bus
//! ```

use std::sync::Arc;
use std::time::Duration;

use patternbus::{
    AsyncEventBus, BusConfig, CollectReporter, Event, EventBus, LogReporter, NamedObserver,
    ObserverError, ObserverFn,
};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let failures = Arc::new(CollectReporter::forwarding(Arc::new(LogReporter::new())));
    let bus = AsyncEventBus::builder(BusConfig::named("orders"))
        .with_reporter(failures.clone())
        .build();

    let topic = "order_finish";
    for name in ["a", "b", "c"] {
        bus.subscribe(topic, Arc::new(NamedObserver::new(name))).await;
    }
    bus.subscribe(topic, Arc::new(NamedObserver::failing("d", "sms gateway down")))
        .await;

    let slow = ObserverFn::arc("slow-invoice", |ev: Event| async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Err(ObserverError::failed(format!(
            "invoice for {} came too late",
            ev.describe_payload()
        )))
    });
    bus.subscribe(topic, slow).await;

    bus.publish(Event::new(topic, "order_id: xxx")).await;
    println!("publish returned, state={:?}", bus.state());

    tokio::time::sleep(Duration::from_millis(100)).await;
    bus.shutdown().await?;
    println!("bus shut down, state={:?}", bus.state());

    // The slow observer fails after shutdown; its failure is dropped.
    tokio::time::sleep(Duration::from_millis(600)).await;
    for f in failures.failures() {
        println!("recorded failure: observer={} error={}", f.observer, f.error);
    }
    Ok(())
}
