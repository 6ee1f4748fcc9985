// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Mutable counters kept by every combining stream.
//!
//! Summary: Collects read calls plus child and separator byte counts while a stream is drained.
//! Converted into an immutable TelemetrySnapshot at pipeline end.
use serde::{Deserialize, Serialize};

/// Deterministic counters collected during stream reads
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCounters {
    /// `read` calls that were handed a non-empty buffer.
    pub read_calls: u64,
    pub child_bytes: u64,
    pub separator_bytes: u64,
    pub children_finished: u64,
    pub separators_emitted: u64,
}

impl ReadCounters {
    pub fn add_read_call(&mut self) {
        self.read_calls += 1;
    }

    pub fn add_child_bytes(&mut self, n: usize) {
        self.child_bytes += n as u64;
    }

    /// Record `n` separator bytes; `completed` marks the last piece of one separator.
    pub fn add_separator_bytes(&mut self, n: usize, completed: bool) {
        self.separator_bytes += n as u64;
        if completed {
            self.separators_emitted += 1;
        }
    }

    pub fn add_child_finished(&mut self) {
        self.children_finished += 1;
    }

    /// Bytes handed to the caller so far.
    pub fn total_bytes(&self) -> u64 {
        self.child_bytes + self.separator_bytes
    }

    // Counters of nested streams stay with the nested stream; merge them in explicitly
    // when a combined view is wanted.
    pub fn merge(&mut self, other: &ReadCounters) {
        self.read_calls += other.read_calls;
        self.child_bytes += other.child_bytes;
        self.separator_bytes += other.separator_bytes;
        self.children_finished += other.children_finished;
        self.separators_emitted += other.separators_emitted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_completion_counts_once() {
        let mut c = ReadCounters::default();
        c.add_separator_bytes(1, false);
        c.add_separator_bytes(2, true);
        assert_eq!(c.separator_bytes, 3);
        assert_eq!(c.separators_emitted, 1);
    }

    #[test]
    fn merge_sums_fields() {
        let mut a = ReadCounters { read_calls: 1, child_bytes: 10, ..Default::default() };
        let b = ReadCounters { read_calls: 2, separator_bytes: 4, separators_emitted: 2, ..Default::default() };
        a.merge(&b);
        assert_eq!(a.read_calls, 3);
        assert_eq!(a.total_bytes(), 14);
        assert_eq!(a.separators_emitted, 2);
    }
}
