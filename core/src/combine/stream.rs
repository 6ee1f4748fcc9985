//! combine/stream.rs
//! Lazily concatenates child sources, optionally with a separator between them.
//!
//! ## Read contract
//! - `read` returns `Ok(0)` only once every child and every separator has been delivered,
//!   or when handed an empty buffer (which changes nothing).
//! - After exhaustion every call returns `Ok(0)` and leaves the buffer untouched.
//! - Child errors are passed through unmodified. If a child fails after bytes were already
//!   copied in the same call, those bytes are returned and the error is reported by the
//!   next call.

use std::fmt;
use std::io::{self, Read};

use bytes::Bytes;
use tracing::{debug, trace};

use crate::combine::config::{CombineConfig, LengthPolicy};
use crate::combine::cursor::Cursor;
use crate::source::{ByteSource, BytesSource};
use crate::telemetry::ReadCounters;
use crate::types::CombineError;

struct Child {
    source: Box<dyn ByteSource + Send>,
    /// Length captured at `add`.
    declared: u64,
}

/// An ordered, forward-only concatenation of byte sources.
///
/// ```
/// use std::io::Read;
/// use combine_core::CombiningStream;
///
/// let mut stream = CombiningStream::new(" bar ");
/// stream.add_bytes("foo")?.add_bytes("baz")?;
/// assert_eq!(stream.len(), 11);
///
/// let mut out = String::new();
/// stream.read_to_string(&mut out)?;
/// assert_eq!(out, "foo bar baz");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CombiningStream {
    separator: Bytes,
    children: Vec<Child>,
    len: u64,
    position: u64,
    cursor: Cursor,
    config: CombineConfig,
    counters: ReadCounters,
    pending_error: Option<io::Error>,
}

impl CombiningStream {
    pub fn new(separator: impl Into<Bytes>) -> Self {
        Self::with_config(separator, CombineConfig::default())
    }

    pub fn with_config(separator: impl Into<Bytes>, config: CombineConfig) -> Self {
        Self {
            separator: separator.into(),
            children: Vec::new(),
            len: 0,
            position: 0,
            cursor: Cursor::BeforeFirst,
            config,
            counters: ReadCounters::default(),
            pending_error: None,
        }
    }

    /// `prefix`, then `items` joined by `separator`, then `suffix`.
    pub fn enclosed<P, I, T, S>(
        prefix: P,
        items: I,
        separator: impl Into<Bytes>,
        suffix: S,
    ) -> Result<Self, CombineError>
    where
        P: ByteSource + Send + 'static,
        I: IntoIterator<Item = T>,
        T: ByteSource + Send + 'static,
        S: ByteSource + Send + 'static,
    {
        let mut inner = CombiningStream::new(separator);
        for item in items {
            inner.add(item)?;
        }

        let mut outer = CombiningStream::default();
        outer.add(prefix)?.add(inner)?.add(suffix)?;
        Ok(outer)
    }

    /// Append a child. Fails once reading has started.
    pub fn add<S>(&mut self, child: S) -> Result<&mut Self, CombineError>
    where
        S: ByteSource + Send + 'static,
    {
        self.push(Box::new(child))?;
        Ok(self)
    }

    /// Append an in-memory child.
    pub fn add_bytes(&mut self, data: impl Into<Bytes>) -> Result<&mut Self, CombineError> {
        self.add(BytesSource::new(data))
    }

    /// By-value variant of [`add`](Self::add) for builder-style construction.
    pub fn with_child<S>(mut self, child: S) -> Result<Self, CombineError>
    where
        S: ByteSource + Send + 'static,
    {
        self.push(Box::new(child))?;
        Ok(self)
    }

    /// Append an already boxed child.
    pub fn push(&mut self, child: Box<dyn ByteSource + Send>) -> Result<(), CombineError> {
        if self.cursor.is_started() {
            return Err(CombineError::Sealed { children: self.children.len() });
        }

        let declared = child.len();
        let boundary = if self.children.is_empty() { 0 } else { self.separator.len() as u64 };
        let added = declared.saturating_add(boundary);
        self.len = self
            .len
            .checked_add(declared)
            .and_then(|l| l.checked_add(boundary))
            .ok_or(CombineError::LengthOverflow { current: self.len, added })?;

        trace!(index = self.children.len(), declared, total = self.len, "child added");
        self.children.push(Child { source: child, declared });
        Ok(())
    }

    /// Total bytes this stream yields, separators included.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn separator(&self) -> &Bytes {
        &self.separator
    }

    pub fn config(&self) -> &CombineConfig {
        &self.config
    }

    /// Bytes delivered so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes still to come according to the declared lengths.
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.position)
    }

    /// True once the cursor has passed the last child. Under `LengthPolicy::Trust` this only
    /// flips after the last child has reported its own exhaustion, which takes one more read.
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_exhausted()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Counters of this stream only; nested streams keep their own.
    pub fn counters(&self) -> &ReadCounters {
        &self.counters
    }

    /// Read from child `index` into `buf`. `Ok(0)` means the child is finished.
    fn read_child(&mut self, index: usize, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        let child = &mut self.children[index];
        match self.config.length_policy {
            LengthPolicy::Trust => child.source.read(buf),
            LengthPolicy::Strict => {
                let left = child.declared.saturating_sub(offset);
                if left == 0 {
                    return Ok(0);
                }
                let cap = usize::try_from(left).map_or(buf.len(), |l| l.min(buf.len()));
                let n = child.source.read(&mut buf[..cap])?;
                if n == 0 {
                    return Err(CombineError::SourceLengthMismatch {
                        index,
                        declared: child.declared,
                        delivered: offset,
                    }
                    .into());
                }
                Ok(n)
            }
        }
    }

    fn finish_child(&mut self, index: usize) {
        self.counters.add_child_finished();
        self.cursor = Cursor::after_child(index, self.children.len(), !self.separator.is_empty());
        if self.cursor.is_exhausted() {
            debug!(len = self.len, position = self.position, "combining stream exhausted");
        } else {
            trace!(index, "child finished");
        }
    }

    /// Copy as much of the pending separator as fits; returns bytes copied.
    fn emit_separator(&mut self, after: usize, offset: usize, buf: &mut [u8]) -> usize {
        let rest = &self.separator[offset..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);

        let completed = offset + n == self.separator.len();
        self.counters.add_separator_bytes(n, completed);
        self.cursor = if completed {
            Cursor::after_separator(after)
        } else {
            Cursor::InSeparator { after, offset: offset + n }
        };
        n
    }
}

impl Read for CombiningStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if let Some(e) = self.pending_error.take() {
            return Err(e);
        }
        self.counters.add_read_call();

        let mut filled = 0;
        while filled < buf.len() {
            match self.cursor {
                Cursor::BeforeFirst => {
                    self.cursor = Cursor::start(self.children.len());
                    if self.cursor.is_exhausted() {
                        debug!("combining stream has no children");
                    }
                }
                Cursor::InChild { index, offset } => {
                    match self.read_child(index, offset, &mut buf[filled..]) {
                        Ok(0) => self.finish_child(index),
                        Ok(n) => {
                            filled += n;
                            self.counters.add_child_bytes(n);
                            self.cursor = Cursor::InChild { index, offset: offset + n as u64 };
                        }
                        Err(e) if filled == 0 => return Err(e),
                        Err(e) => {
                            trace!(index, error = %e, "child failed, deferring error");
                            self.pending_error = Some(e);
                            break;
                        }
                    }
                }
                Cursor::InSeparator { after, offset } => {
                    filled += self.emit_separator(after, offset, &mut buf[filled..]);
                }
                Cursor::Exhausted => break,
            }
        }

        self.position += filled as u64;
        Ok(filled)
    }
}

impl ByteSource for CombiningStream {
    fn len(&self) -> u64 {
        self.len
    }
}

impl Default for CombiningStream {
    fn default() -> Self {
        Self::new(Bytes::new())
    }
}

impl fmt::Debug for CombiningStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombiningStream")
            .field("separator", &self.separator)
            .field("children", &self.children.len())
            .field("len", &self.len)
            .field("position", &self.position)
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(stream: &mut CombiningStream) -> Vec<u8> {
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn cursor_walks_children_and_separators() {
        let mut s = CombiningStream::new("|");
        s.add_bytes("ab").unwrap().add_bytes("c").unwrap();

        let mut buf = [0u8; 2];
        assert_eq!(s.read(&mut buf).unwrap(), 2);
        assert_eq!(s.cursor(), Cursor::InChild { index: 0, offset: 2 });

        assert_eq!(s.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"|c");
        assert_eq!(s.cursor(), Cursor::InChild { index: 1, offset: 1 });

        assert_eq!(s.read(&mut buf).unwrap(), 0);
        assert!(s.is_exhausted());
        assert_eq!(s.position(), 4);
        assert_eq!(s.remaining(), 0);
        assert_eq!(&s.separator()[..], b"|");
        assert_eq!(s.config().length_policy, LengthPolicy::Trust);
    }

    #[test]
    fn empty_buffer_does_not_seal() {
        let mut s = CombiningStream::new(",");
        assert_eq!(s.read(&mut []).unwrap(), 0);
        assert!(!s.cursor().is_started());
        s.add_bytes("x").unwrap();
        assert_eq!(read_all(&mut s), b"x");
    }

    #[test]
    fn counters_track_bytes() {
        let mut s = CombiningStream::new(", ");
        for item in ["a", "b", "c"] {
            s.add_bytes(item).unwrap();
        }
        read_all(&mut s);

        let c = s.counters();
        assert_eq!(c.child_bytes, 3);
        assert_eq!(c.separator_bytes, 4);
        assert_eq!(c.separators_emitted, 2);
        assert_eq!(c.children_finished, 3);
        assert_eq!(c.total_bytes(), s.len());
    }

    #[test]
    fn overflow_is_rejected() {
        use crate::source::SizedReader;

        let mut s = CombiningStream::new("-");
        s.add(SizedReader::new(std::io::empty(), u64::MAX)).unwrap();
        let err = s.add(SizedReader::new(std::io::empty(), 0)).unwrap_err();
        assert!(matches!(err, CombineError::LengthOverflow { current: u64::MAX, added: 1 }));
        assert_eq!(s.len(), u64::MAX);
        assert_eq!(s.child_count(), 1);
    }
}
