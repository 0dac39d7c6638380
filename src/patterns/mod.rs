//! Classic structural / behavioural patterns.
//!
//! Each module is self-contained and shares no state with the buses. Operations
//! return the lines a console demo prints, so behaviour stays testable.
//!
//! - [`adapter`]: one payment interface over two incompatible SDKs
//! - [`bridge`]: gifts × colors × dress-ups
//! - [`composite`]: arena tree of social/income levels
//! - [`template`]: document skeleton with a swappable step

pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod template;
