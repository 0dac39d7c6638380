//! # Failure reporters
//!
//! ```text
//! handler Err ──► Failure { observer, observer_id, topic, seq, error }
//!                     │
//!                     ▼
//!              Report::report(&Failure)
//!                     │
//!         ┌───────────┴────────────┐
//!         ▼                        ▼
//!    LogReporter             CollectReporter
//!  (tracing WARN)        (in-memory, optional forward)
//! ```

mod collect;
mod log;
mod report;

pub use collect::CollectReporter;
pub use log::LogReporter;
pub use report::{Failure, Report};
