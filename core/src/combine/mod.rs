//! combine: lazily-read concatenation of byte sources.
//!
//! A [`CombiningStream`] owns an ordered list of children and an optional separator. It reports
//! its total length up front and yields its bytes through `std::io::Read` without buffering the
//! combined payload. Streams nest: a combining stream is itself a [`ByteSource`](crate::ByteSource),
//! and because `add` takes children by value a stream can never contain itself.

pub mod config;
pub mod cursor;
pub mod stream;

pub use config::{CombineConfig, LengthPolicy};
pub use cursor::Cursor;
pub use stream::CombiningStream;
