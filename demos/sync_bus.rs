//! # Synchronous bus demo
//!
//! Four observers on `order_finish`, one of them failing. The publish call delivers
//! to all of them in-line and logs the failure before returning.
//!
//! ## Run
//! ```bash
//! RUST_LOG=patternbus=debug cargo run --example sync_bus
//! ```

use std::sync::Arc;

use patternbus::{Event, EventBus, NamedObserver, ObserverRef, SyncEventBus};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let bus = SyncEventBus::new();
    let topic = "order_finish";

    let observers: Vec<ObserverRef> = vec![
        Arc::new(NamedObserver::new("a")),
        Arc::new(NamedObserver::new("b")),
        Arc::new(NamedObserver::failing("c", "inventory service timed out")),
        Arc::new(NamedObserver::new("d")),
    ];
    for o in &observers {
        bus.subscribe(topic, Arc::clone(o)).await;
    }

    bus.publish(Event::new(topic, "order_id: xxx")).await;

    println!();
    println!("unsubscribing c, publishing again");
    bus.unsubscribe(topic, &observers[2]).await;
    bus.publish(Event::new(topic, "order_id: yyy")).await;

    println!("topics: {:?}", bus.topics().await);
    Ok(())
}
