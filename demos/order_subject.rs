//! # Subject demo: order flows
//!
//! Each business flow is a [`Subject`] with its own ordered list of steps.
//! Notification stops at the first failing step.
//!
//! ## Run
//! ```bash
//! cargo run --example order_subject
//! ```

use std::sync::Arc;

use patternbus::{Event, NamedObserver, ObserverRef, Subject};

fn step(name: &'static str) -> ObserverRef {
    Arc::new(NamedObserver::new(name))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("----------------------- unpaid order cancelled");
    let mut unpaid_cancel = Subject::new();
    unpaid_cancel.attach([
        step("order-status"),
        step("order-status-log"),
        step("coupon-refund"),
        step("promotion-refund"),
        step("stock-refund"),
    ]);
    unpaid_cancel.notify(&Event::new("order.cancel.unpaid", 1001_u64)).await?;

    println!("----------------------- order timed out");
    let wechat = step("wechat-notify");
    let mut timeout_close = Subject::new();
    timeout_close.attach([
        step("order-status"),
        step("order-status-log"),
        step("stock-refund"),
        step("email"),
        step("sms"),
        Arc::clone(&wechat),
    ]);
    timeout_close.detach(&wechat);
    timeout_close.notify(&Event::new("order.timeout", 1002_u64)).await?;

    println!("----------------------- delivery rejected (wallet refund fails)");
    let mut rejected = Subject::new();
    rejected.attach([
        step("order-status"),
        step("deliver-bill-status"),
        Arc::new(NamedObserver::failing("wallet-refund", "wallet frozen")) as ObserverRef,
        step("invoice"),
    ]);
    if let Err(e) = rejected.notify(&Event::new("order.rejected", 1003_u64)).await {
        println!("flow aborted: {e}");
    }
    Ok(())
}
