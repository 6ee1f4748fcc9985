//! source/memory.rs
//! In-memory source backed by `Bytes`.

use std::io::{self, Read};

use bytes::Bytes;

use super::ByteSource;

/// Reads a `Bytes` buffer front to back.
///
/// Cloning the buffer is cheap, so the same payload can feed several streams.
#[derive(Debug, Clone, Default)]
pub struct BytesSource {
    data: Bytes,
    pos: usize,
}

impl BytesSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into(), pos: 0 }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    pub fn into_inner(self) -> Bytes {
        self.data
    }
}

impl Read for BytesSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let rest = &self.data[self.pos..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl ByteSource for BytesSource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }
}

impl From<Bytes> for BytesSource {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for BytesSource {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<String> for BytesSource {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&'static [u8]> for BytesSource {
    fn from(data: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(data))
    }
}

impl From<&'static str> for BytesSource {
    fn from(data: &'static str) -> Self {
        Self::new(Bytes::from_static(data.as_bytes()))
    }
}
