// # 📂 src/pipeline.rs

// ## Pure pipeline wiring: pull chunks on one thread, write them on the caller's thread

use std::io::{self, Read, Write};
use std::thread;

use bytes::Bytes;
use crossbeam::channel::bounded;
use tracing::{debug, warn};

use crate::combine::CombiningStream;
use crate::constants::{ChunkPolicy, DEFAULT_PIPELINE_DEPTH};
use crate::io::Chunks;
use crate::telemetry::{Stage, StageTimes, TelemetrySnapshot, TelemetryTimer};
use crate::types::CombineError;
use crate::utils::best_chunk_size;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Requested chunk size, normalized through `best_chunk_size`.
    /// - `None` → `DEFAULT_CHUNK_SIZE`.
    pub chunk_size: Option<usize>,
    pub chunk_policy: ChunkPolicy,
    /// Chunks allowed in flight between reader and writer (at least 1).
    pub depth: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: None,
            chunk_policy: ChunkPolicy::default(),
            depth: DEFAULT_PIPELINE_DEPTH,
        }
    }
}

impl PipelineConfig {
    pub fn new(chunk_size: Option<usize>, depth: Option<usize>) -> Self {
        Self {
            chunk_size,
            depth: depth.unwrap_or(DEFAULT_PIPELINE_DEPTH),
            ..Self::default()
        }
    }

    /// Chunk size actually used by the pipeline.
    pub fn effective_chunk_size(&self) -> usize {
        best_chunk_size(self.chunk_size, self.chunk_policy)
    }
}

struct ReaderReport {
    bytes_read: u64,
    stage_times: StageTimes,
}

// ============================================================
// Generic pipeline
// ============================================================

/// Copy `reader` into `writer` through a bounded channel and flush the writer.
///
/// The reader runs on a scoped thread; chunks are written in order on the calling thread.
/// The first read or write error stops both sides and is returned unmodified inside
/// `CombineError::Io`.
pub fn run_pipeline<R, W>(
    reader: &mut R,
    writer: &mut W,
    config: &PipelineConfig,
) -> Result<TelemetrySnapshot, CombineError>
where
    R: Read + Send + ?Sized,
    W: Write + ?Sized,
{
    let chunk_size = config.effective_chunk_size();
    let depth = config.depth.max(1);
    let mut chunks = Chunks::new(reader, chunk_size)?;
    let mut timer = TelemetryTimer::new();
    debug!(chunk_size, depth, "pipeline start");

    let (tx, rx) = bounded::<io::Result<Bytes>>(depth);

    let (written, report) = thread::scope(|scope| {
        let producer = scope.spawn(move || {
            let mut read_timer = TelemetryTimer::new();
            let mut bytes_read = 0u64;
            loop {
                let Some(item) = read_timer.time(Stage::Read, || chunks.next()) else {
                    break;
                };
                let failed = item.is_err();
                if let Ok(chunk) = &item {
                    bytes_read += chunk.len() as u64;
                }
                // A closed channel means the writer gave up; stop reading.
                if tx.send(item).is_err() || failed {
                    break;
                }
            }
            ReaderReport { bytes_read, stage_times: read_timer.stage_times }
        });

        let mut written = (0u64, 0u64);
        let mut outcome: Result<(), io::Error> = Ok(());
        for item in rx.iter() {
            let chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            };
            if let Err(e) = timer.time(Stage::Write, || writer.write_all(&chunk)) {
                outcome = Err(e);
                break;
            }
            written.0 += 1;
            written.1 += chunk.len() as u64;
        }
        drop(rx);

        let report = producer
            .join()
            .map_err(|_| CombineError::Pipeline("reader thread panicked"))?;
        if let Err(e) = outcome {
            warn!(error = %e, bytes_written = written.1, "pipeline aborted");
            return Err(CombineError::Io(e));
        }
        Ok((written, report))
    })?;

    timer.time(Stage::Write, || writer.flush())?;
    timer.stage_times.merge(&report.stage_times);
    timer.finish();

    let (chunks_written, bytes_written) = written;
    debug!(chunks = chunks_written, bytes = bytes_written, elapsed = ?timer.elapsed(), "pipeline done");
    Ok(TelemetrySnapshot::new(chunks_written, report.bytes_read, bytes_written, None, &timer))
}

// ============================================================
// Combining stream pipeline
// ============================================================

/// Drain a combining stream into `writer`; the snapshot carries the stream's own counters.
pub fn drain_stream<W>(
    stream: &mut CombiningStream,
    writer: &mut W,
    config: &PipelineConfig,
) -> Result<TelemetrySnapshot, CombineError>
where
    W: Write + ?Sized,
{
    let expected = stream.remaining();
    let mut snapshot = run_pipeline(stream, writer, config)?;
    snapshot.declared_bytes = Some(expected);
    if let Some((declared, written)) = snapshot.length_mismatch() {
        warn!(declared, written, "stream delivered a different length than it declared");
    }
    snapshot.stream = Some(stream.counters().clone());
    Ok(snapshot)
}
