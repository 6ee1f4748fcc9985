//! types.rs
//! Error taxonomy for combining streams, io helpers and the pipeline.
//!
//! - `CombineError` covers caller contract violations and pipeline failures.
//! - Child source errors are never wrapped; they travel through `std::io::Error` untouched.
//! - `From<CombineError> for io::Error` lets the `Read` path surface our own failures.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CombineError {
    /// `add` was called after the stream started delivering bytes.
    #[error("cannot add a child after reading has started ({children} children already added)")]
    Sealed { children: usize },

    /// The running total no longer fits in a u64.
    #[error("combined length overflows u64: {current} + {added}")]
    LengthOverflow { current: u64, added: u64 },

    /// A child reported exhaustion before delivering its declared length (strict policy).
    #[error("child {index} declared {declared} bytes but delivered {delivered}")]
    SourceLengthMismatch { index: usize, declared: u64, delivered: u64 },

    #[error("invalid chunk size: {requested} (max {max})")]
    InvalidChunkSize { requested: usize, max: usize },

    /// Pipeline wiring failure (thread panic, closed channel).
    #[error("pipeline error: {0}")]
    Pipeline(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<CombineError> for io::Error {
    fn from(e: CombineError) -> Self {
        let kind = match e {
            CombineError::Io(inner) => return inner,
            CombineError::Sealed { .. } => io::ErrorKind::Unsupported,
            CombineError::LengthOverflow { .. } => io::ErrorKind::InvalidInput,
            CombineError::SourceLengthMismatch { .. } => io::ErrorKind::UnexpectedEof,
            CombineError::InvalidChunkSize { .. } => io::ErrorKind::InvalidInput,
            CombineError::Pipeline(_) => io::ErrorKind::Other,
        };
        io::Error::new(kind, e)
    }
}
