//! combine-core
//!
//! Lazily-read, composable byte streams.
//! Concatenates child sources (optionally separated) without buffering the combined payload.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

pub mod source;
pub mod combine;
pub mod io;
pub mod telemetry;

// Stream layers
pub mod pipeline;

pub use combine::{CombineConfig, CombiningStream, LengthPolicy};
pub use source::{ByteSource, BytesSource, FileSource, SizedReader};
pub use types::CombineError;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::combine::{CombineConfig, CombiningStream, LengthPolicy};
    pub use crate::pipeline::{drain_stream, run_pipeline, PipelineConfig};
    pub use crate::source::{ByteSource, BytesSource, FileSource, SizedReader};
    pub use crate::types::CombineError;
}
