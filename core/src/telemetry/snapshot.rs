// ## src/telemetry/snapshot.rs

//! telemetry/snapshot.rs
//!
//! Immutable summary of one pipeline run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::ReadCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

/// Captures what a pipeline moved, how long it took and where the time went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub chunks: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Counters of the drained combining stream, if the pipeline was given one.
    pub stream: Option<ReadCounters>,
    /// Length the drained stream declared before the run.
    #[serde(default)]
    pub declared_bytes: Option<u64>,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn new(
        chunks: u64,
        bytes_read: u64,
        bytes_written: u64,
        stream: Option<ReadCounters>,
        timer: &TelemetryTimer,
    ) -> Self {
        let elapsed = timer.elapsed();
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            bytes_written as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            chunks,
            bytes_read,
            bytes_written,
            stream,
            declared_bytes: None,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    /// Every byte pulled from the source reached the sink.
    pub fn sanity_check(&self) -> bool {
        self.bytes_read == self.bytes_written
            && self
                .stream
                .as_ref()
                .map_or(true, |c| c.total_bytes() == self.bytes_read)
    }

    /// Declared and written byte counts, when a drained stream delivered a different amount
    /// than it declared.
    pub fn length_mismatch(&self) -> Option<(u64, u64)> {
        self.declared_bytes
            .filter(|&declared| declared != self.bytes_written)
            .map(|declared| (declared, self.bytes_written))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
