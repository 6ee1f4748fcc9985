//! telemetry/mod.rs
//! Read counters, stage timers, and immutable snapshots.
//!
//! - Counters live inside each combining stream and are updated on every read.
//! - Stage timers and snapshots are produced by the pipeline.
//! - Snapshots serialize with serde for logs and reports.

pub mod counters;
pub mod snapshot;
pub mod timers;

pub use counters::*;
pub use snapshot::*;
pub use timers::*;
