//! source/sized.rs
//! Wrap an arbitrary reader with a caller-declared length.

use std::io::{self, Read};

use super::ByteSource;

/// A reader whose total size is known from elsewhere (e.g. a Content-Length header).
///
/// The wrapper trusts the declared length; pair it with `LengthPolicy::Strict` on the
/// combining stream when the declaration must be enforced.
#[derive(Debug)]
pub struct SizedReader<R> {
    inner: R,
    len: u64,
}

impl<R: Read> SizedReader<R> {
    pub fn new(inner: R, len: u64) -> Self {
        Self { inner, len }
    }
}

impl<R: Read> Read for SizedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> ByteSource for SizedReader<R> {
    fn len(&self) -> u64 {
        self.len
    }
}
